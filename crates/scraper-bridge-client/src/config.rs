//! Hub client configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Settings for a [`HubClient`](crate::HubClient).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubClientConfig {
    /// Deadline for a single request, unless the request sets its own.
    pub request_timeout: Duration,
    /// Deadline for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Retry policy used by the `*_with_retries` operations.
    pub retry: RetryPolicy,
    /// Send `Authorization: Basic id:secret` without base64 encoding.
    ///
    /// Older hubs accepted this form. Off by default.
    pub legacy_auth_header: bool,
}

impl HubClientConfig {
    /// Default per-request deadline.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connect deadline.
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the per-request deadline.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            retry: RetryPolicy::default(),
            legacy_auth_header: false,
        }
    }
}
