//! Binding the router and running it in the background.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};

/// A running gateway.
///
/// Dropping the handle does not stop the server; use [`GatewayHandle::abort`].
#[derive(Debug)]
pub struct GatewayHandle {
    local_addr: SocketAddr,
    task: JoinHandle<Result<()>>,
}

impl GatewayHandle {
    /// The address the gateway is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Returns `true` once the serve loop has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop serving.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the serve loop to end.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the serve loop, or
    /// [`GatewayError::Crashed`] if the task panicked or was aborted.
    pub async fn wait(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| GatewayError::Crashed(e.to_string()))?
    }
}

/// Bind the address from `config` and serve `router` on a background task.
///
/// Binding happens before this returns, so an unusable address is reported
/// here rather than from the task.
///
/// # Errors
///
/// Returns [`GatewayError::Bind`] if the address cannot be bound.
pub async fn spawn_server(router: Router, config: &GatewayConfig) -> Result<GatewayHandle> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| GatewayError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| GatewayError::Bind { addr, source })?;

    tracing::info!(listen_addr = %local_addr, "Gateway listening");

    let task = tokio::spawn(async move {
        axum::serve(listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "Gateway stopped serving");
            GatewayError::Serve(e)
        })
    });

    Ok(GatewayHandle { local_addr, task })
}

#[cfg(test)]
mod tests {
    use axum::routing::get;

    use super::*;

    #[tokio::test]
    async fn serves_on_an_ephemeral_port() {
        let router = Router::new().route("/ping", get(|| async { "pong" }));
        let handle = spawn_server(router, &GatewayConfig::with_listen_addr("127.0.0.1:0"))
            .await
            .unwrap();

        assert_ne!(handle.local_addr().port(), 0);
        assert!(!handle.is_finished());

        handle.abort();
        assert!(matches!(handle.wait().await, Err(GatewayError::Crashed(_))));
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let first = spawn_server(Router::new(), &GatewayConfig::with_listen_addr("127.0.0.1:0"))
            .await
            .unwrap();
        let taken = first.local_addr().to_string();

        let err = spawn_server(Router::new(), &GatewayConfig::with_listen_addr(taken))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Bind { .. }));

        first.abort();
    }
}
