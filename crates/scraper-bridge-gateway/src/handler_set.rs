//! The scraper's callbacks for requests coming in from the hub.
//!
//! Embedders implement [`HandlerSet`] and override only the operations their
//! scraper supports. Every other operation answers
//! [`HandlerError::NotImplemented`], which the gateway maps to `404`.

use async_trait::async_trait;
use scraper_bridge_core::{Cv, LoginUser, SiteStorageCredentialValue};
use thiserror::Error;

/// A result type using `HandlerError`.
pub type HandlerResult<T> = std::result::Result<T, HandlerError>;

/// Errors a [`HandlerSet`] operation can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The scraper does not support this operation.
    #[error("not implemented")]
    NotImplemented,

    /// The operation failed.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Wrap any displayable error as [`HandlerError::Failed`].
    pub fn failed(err: impl std::fmt::Display) -> Self {
        Self::Failed(err.to_string())
    }
}

/// Operations the hub can ask a scraper to perform.
#[async_trait]
pub trait HandlerSet: Send + Sync {
    /// Check whether `user` can log into the scraped site.
    ///
    /// # Errors
    ///
    /// Defaults to [`HandlerError::NotImplemented`].
    async fn check_credentials(&self, _user: LoginUser) -> HandlerResult<bool> {
        Err(HandlerError::NotImplemented)
    }

    /// Scrape and return the CV with the given reference number.
    ///
    /// # Errors
    ///
    /// Defaults to [`HandlerError::NotImplemented`].
    async fn cv(&self, _reference_number: String) -> HandlerResult<Cv> {
        Err(HandlerError::NotImplemented)
    }

    /// Check whether stored browser data still logs into the scraped site.
    ///
    /// # Errors
    ///
    /// Defaults to [`HandlerError::NotImplemented`].
    async fn check_site_storage_credentials(
        &self,
        _credentials: SiteStorageCredentialValue,
    ) -> HandlerResult<bool> {
        Err(HandlerError::NotImplemented)
    }
}

/// A handler set that implements nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandlers;

#[async_trait]
impl HandlerSet for NoopHandlers {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_handlers_implement_nothing() {
        let handlers = NoopHandlers;
        assert_eq!(
            handlers.check_credentials(LoginUser::new("a", "b")).await,
            Err(HandlerError::NotImplemented)
        );
        assert_eq!(
            handlers.cv("ref".to_string()).await,
            Err(HandlerError::NotImplemented)
        );
        assert_eq!(
            handlers
                .check_site_storage_credentials(SiteStorageCredentialValue::default())
                .await,
            Err(HandlerError::NotImplemented)
        );
    }

    #[test]
    fn failed_keeps_message() {
        assert_eq!(
            HandlerError::failed("site unreachable").to_string(),
            "site unreachable"
        );
    }
}
