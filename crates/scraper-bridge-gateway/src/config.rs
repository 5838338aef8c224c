//! Gateway configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Listen address used when nothing else is configured.
pub const DEFAULT_LISTEN_ADDR: &str = ":2000";

/// Configuration for the inbound gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Listen address: `host:port`, `:port` (all interfaces) or a bare port.
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        DEFAULT_LISTEN_ADDR.to_string()
    }

    const fn default_max_body() -> usize {
        10 * 1024 * 1024 // CVs can carry long free-form text
    }

    const fn default_request_timeout() -> u64 {
        60
    }

    /// Create a config listening on `listen_addr`, with defaults otherwise.
    #[must_use]
    pub fn with_listen_addr(listen_addr: impl Into<String>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            ..Self::default()
        }
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// The socket address to bind, derived from [`GatewayConfig::listen_addr`].
    #[must_use]
    pub fn bind_address(&self) -> String {
        let listen = normalize_listen_addr(&self.listen_addr);
        match listen.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{port}"),
            None => listen,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Normalize a listen address.
///
/// An empty value becomes [`DEFAULT_LISTEN_ADDR`] and a value without a `:`
/// is taken to be a port and becomes `:port`. Anything else is kept.
///
/// ```
/// use scraper_bridge_gateway::config::normalize_listen_addr;
///
/// assert_eq!(normalize_listen_addr("8080"), ":8080");
/// assert_eq!(normalize_listen_addr(""), ":2000");
/// assert_eq!(normalize_listen_addr("127.0.0.1:9000"), "127.0.0.1:9000");
/// ```
#[must_use]
pub fn normalize_listen_addr(listen: &str) -> String {
    let listen = listen.trim();
    if listen.is_empty() {
        DEFAULT_LISTEN_ADDR.to_string()
    } else if listen.contains(':') {
        listen.to_string()
    } else {
        format!(":{listen}")
    }
}
