//! Health check endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
}

/// Health check handler.
///
/// Unlike most health checks this one sits behind the Basic-Auth layer, so
/// the hub can use it to verify its credentials.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
