//! API error types and responses.
//!
//! Every error response has the body `{"error": "<message>"}`.

use std::io;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::handler_set::HandlerError;

/// Message returned with every `401` response.
pub const UNAUTHORIZED_MESSAGE: &str = "401 Unauthorized, either the authorization header is \
    missing or incorrect. Expected `Basic <base64(apiKeyId:apiKey)>` where the apiKeyId and \
    apiKey are the same as the scraper uses to authenticate with the hub";

/// Header set on responses for operations the scraper does not implement.
pub const NOT_IMPLEMENTED_HEADER: &str = "x-not-implemented";

/// A result type using `GatewayError`.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unknown Basic credentials.
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized,

    /// The handler set does not implement the operation.
    #[error("not implemented")]
    NotImplemented,

    /// The request body could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// The handler failed.
    #[error("{0}")]
    Internal(String),

    /// No route matches the request.
    #[error("404 Route not found")]
    RouteNotFound,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotImplemented | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let not_implemented = matches!(self, Self::NotImplemented);
        let body = ErrorResponse {
            error: self.to_string(),
        };

        let mut response = (status, Json(body)).into_response();
        if not_implemented {
            response.headers_mut().insert(
                HeaderName::from_static(NOT_IMPLEMENTED_HEADER),
                HeaderValue::from_static("true"),
            );
        }
        response
    }
}

impl From<HandlerError> for ApiError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::NotImplemented => Self::NotImplemented,
            HandlerError::Failed(msg) => {
                tracing::error!(error = %msg, "Handler failed");
                Self::Internal(msg)
            }
        }
    }
}

/// Errors that stop the gateway from serving.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that was tried.
        addr: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The serve loop ended with an error.
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),

    /// The serve task panicked or was cancelled.
    #[error("server task ended unexpectedly: {0}")]
    Crashed(String),
}
