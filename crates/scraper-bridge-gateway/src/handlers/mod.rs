//! HTTP request handlers.
//!
//! Handlers decode the request, call into the [`HandlerSet`](crate::HandlerSet)
//! and map its errors to responses through [`ApiError`](crate::ApiError).

pub mod credentials;
pub mod cv;
pub mod health;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Turn a JSON body rejection into a `400` with the decoder's message.
pub(crate) fn decode_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
