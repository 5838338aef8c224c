//! Bootstrap error types.

use scraper_bridge_client::{FetchError, HubError};
use scraper_bridge_core::CredentialError;
use scraper_bridge_gateway::GatewayError;
use thiserror::Error;

/// A result type using `BootstrapError`.
pub type Result<T> = std::result::Result<T, BootstrapError>;

/// Errors that stop a scraper from starting.
///
/// None of these are retried by [`start`](crate::start); the embedder decides
/// whether to exit.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required setting is missing.
    #[error("{key} is not set, it must contain the hub url with the api key credentials")]
    MissingConfig {
        /// The setting (environment variable) that is missing.
        key: &'static str,
    },

    /// A hub URL is malformed or lacks credentials.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// No slug was given while slug registration is enabled.
    #[error("a scraper slug is required unless slug checking is skipped")]
    MissingSlug,

    /// The primary hub stayed unreachable.
    #[error("primary hub health check failed: {0}")]
    HealthCheck(#[source] HubError),

    /// Registering the slug failed.
    #[error("failed to set the scraper slug: {0}")]
    SetSlug(#[source] HubError),

    /// The hub stored a different slug than requested.
    #[error("the hub stored slug {received:?} instead of {requested:?}")]
    SlugMismatch {
        /// The slug sent to the hub.
        requested: String,
        /// The slug the hub answered with.
        received: String,
    },

    /// The alternative hub stayed unreachable.
    #[error("alternative hub health check failed: {0}")]
    AlternativeHealthCheck(#[source] HubError),

    /// A hub client could not be built.
    #[error(transparent)]
    Client(#[from] FetchError),

    /// The gateway could not be started.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
