//! Hub client error types.

use scraper_bridge_core::{CoreError, SiteStorageCredentials};
use thiserror::Error;

/// A result type using `HubError`.
pub type Result<T> = std::result::Result<T, HubError>;

/// Errors from a single HTTP exchange with the hub.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the response could not be read.
    #[error("request to {path} failed: {source}")]
    Transport {
        /// Hub path of the request.
        path: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The hub answered with a non-success status.
    #[error("{path} returned HTTP {status}: {body}")]
    Status {
        /// Hub path of the request.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Response text, usually a JSON error envelope.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        /// Hub path of the request.
        path: String,
        /// JSON decode error.
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl FetchError {
    /// The HTTP status the hub answered with, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the request ran into its deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }
}

/// Errors returned by the outbound hub operations.
#[derive(Debug, Error)]
pub enum HubError {
    /// The HTTP exchange failed (after retries, where applicable).
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The hub returned no login users while at least one was required.
    #[error("no users found")]
    NoUsers,

    /// Every login user came back without a password.
    ///
    /// The hub still stores these users with a legacy encryption scheme that
    /// it can no longer decrypt for the scraper.
    #[error(
        "this key uses an unsupported and deprecated scraper user encryption method, \
         please convert your users to the new encryption method via the hub dashboard"
    )]
    DeprecatedEncryption,

    /// Some site storage credentials are hidden from this API key.
    ///
    /// The credentials are still returned so callers can use the metadata.
    #[error("this api key is not allowed to see the contents of site storage credentials")]
    HiddenCredentials {
        /// Everything the hub returned.
        credentials: SiteStorageCredentials,
    },

    /// A record failed local validation before it was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_set_for_status_errors() {
        let err = FetchError::Status {
            path: "/api/v1/health".to_string(),
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "/api/v1/health returned HTTP 503: down");

        assert_eq!(FetchError::InvalidHeader("x".into()).status(), None);
    }

    #[test]
    fn hub_error_wraps_cv_validation() {
        let err = HubError::from(CoreError::InvalidCv("referenceNumber is required".into()));
        assert!(err.to_string().contains("referenceNumber"));
    }
}
