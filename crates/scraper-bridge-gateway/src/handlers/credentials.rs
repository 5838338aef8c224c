//! Credential check endpoints.
//!
//! The hub asks the scraper whether a login user, or a stored set of browser
//! cookies, still works on the scraped site.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use scraper_bridge_core::{LoginUser, SiteStorageCredentialValue};

use crate::error::ApiError;
use crate::handler_set::HandlerSet;
use crate::handlers::decode_body;
use crate::state::GatewayState;

/// Response for both credential checks.
#[derive(Debug, Serialize)]
pub struct ValidResponse {
    /// Whether the credentials work.
    pub valid: bool,
}

/// `POST /check-credentials`
pub async fn check_credentials<H>(
    State(state): State<Arc<GatewayState<H>>>,
    body: Result<Json<LoginUser>, JsonRejection>,
) -> Result<Json<ValidResponse>, ApiError>
where
    H: HandlerSet + 'static,
{
    let user = decode_body(body)?;
    tracing::debug!(username = %user.username, "Checking login credentials");

    let valid = state.handlers.check_credentials(user).await?;
    Ok(Json(ValidResponse { valid }))
}

/// `POST /check-site-storage-credentials`
pub async fn check_site_storage_credentials<H>(
    State(state): State<Arc<GatewayState<H>>>,
    body: Result<Json<SiteStorageCredentialValue>, JsonRejection>,
) -> Result<Json<ValidResponse>, ApiError>
where
    H: HandlerSet + 'static,
{
    let value = decode_body(body)?;
    let valid = state.handlers.check_site_storage_credentials(value).await?;
    Ok(Json(ValidResponse { valid }))
}
