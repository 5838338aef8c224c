//! On-demand CV scraping endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use scraper_bridge_core::Cv;

use crate::error::ApiError;
use crate::handler_set::HandlerSet;
use crate::handlers::decode_body;
use crate::state::GatewayState;

/// Request body for `POST /cv`.
#[derive(Debug, Deserialize)]
pub struct CvRequest {
    /// Reference number of the CV on the scraped site.
    #[serde(rename = "referenceNr", default)]
    pub reference_number: String,
}

/// Response for `POST /cv`.
#[derive(Debug, Serialize)]
pub struct CvResponse {
    /// The scraped CV.
    pub cv: Cv,
}

/// `POST /cv`
pub async fn get_cv<H>(
    State(state): State<Arc<GatewayState<H>>>,
    body: Result<Json<CvRequest>, JsonRejection>,
) -> Result<Json<CvResponse>, ApiError>
where
    H: HandlerSet + 'static,
{
    let request = decode_body(body)?;
    tracing::debug!(reference_number = %request.reference_number, "Scraping CV on request");

    let cv = state.handlers.cv(request.reference_number).await?;
    Ok(Json(CvResponse { cv }))
}
