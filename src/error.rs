//! Application error taxonomy and HTTP mapping
//!
//! Handlers return `Result<_, AppError>` and rely on the `IntoResponse` impl
//! to produce the right status code with a JSON `{"error": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the service and resolver layers
#[derive(Debug, Error)]
pub enum AppError {
    /// Client sent a malformed target URL or custom code
    #[error("{0}")]
    Validation(String),

    /// Client asked for a custom code that is already in use
    #[error("code already exists")]
    CodeTaken,

    /// No live link for the requested code
    #[error("link not found")]
    NotFound,

    /// Generation could not find a free code within the retry bound
    #[error("could not generate a unique code, try again")]
    CodeSpaceExhausted,

    /// Any other store failure; details are logged, not exposed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::CodeTaken => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::CodeSpaceExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            // Map stray store sentinels too, in case one escapes the service
            AppError::Store(StoreError::AlreadyExists) => StatusCode::CONFLICT,
            AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
            // Generic body for server-side failures
            let body = match &self {
                AppError::CodeSpaceExhausted => self.to_string(),
                _ => "internal server error".to_string(),
            };
            return (status, Json(json!({ "error": body }))).into_response();
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
