//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_basic_auth;
use crate::error::ApiError;
use crate::handler_set::HandlerSet;
use crate::handlers::{credentials, cv, health};
use crate::state::GatewayState;

/// A hook that receives the router before authentication is applied.
///
/// Routes added by the hook share the server, the middleware and the
/// Basic-Auth check with the built-in routes.
pub type RouterHook = Box<dyn FnOnce(Router) -> Router + Send + Sync>;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// All routes require Basic-Auth with one of the configured credentials.
///
/// - `GET /health` - Health check
/// - `POST /check-credentials` - Check a login user
/// - `POST /cv` - Scrape a CV by reference number
/// - `POST /check-site-storage-credentials` - Check stored browser data
///
/// Unknown routes answer `404` with a JSON error body.
pub fn create_router<H>(state: GatewayState<H>, hook: Option<RouterHook>) -> Router
where
    H: HandlerSet + 'static,
{
    // Extract config values before moving state
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();
    let credentials = Arc::clone(&state.credentials);

    let router = Router::new()
        .route("/health", get(health::health))
        .route("/check-credentials", post(credentials::check_credentials::<H>))
        .route("/cv", post(cv::get_cv::<H>))
        .route(
            "/check-site-storage-credentials",
            post(credentials::check_site_storage_credentials::<H>),
        )
        .with_state(Arc::new(state));

    let router = match hook {
        Some(hook) => hook(router),
        None => router,
    };

    router
        .fallback(route_not_found)
        // Middleware
        .layer(middleware::from_fn_with_state(credentials, require_basic_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
