//! Gateway application state.

use std::sync::Arc;

use crate::auth::CredentialSet;
use crate::config::GatewayConfig;
use crate::handler_set::HandlerSet;

/// Shared application state for the gateway.
pub struct GatewayState<H>
where
    H: HandlerSet,
{
    /// The scraper's callbacks.
    pub handlers: Arc<H>,
    /// Credentials accepted by the Basic-Auth middleware.
    pub credentials: Arc<CredentialSet>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<H> GatewayState<H>
where
    H: HandlerSet,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(handlers: Arc<H>, credentials: CredentialSet, config: GatewayConfig) -> Self {
        Self {
            handlers,
            credentials: Arc::new(credentials),
            config,
        }
    }
}

impl<H> Clone for GatewayState<H>
where
    H: HandlerSet,
{
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            credentials: Arc::clone(&self.credentials),
            config: self.config.clone(),
        }
    }
}
