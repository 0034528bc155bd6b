//! Error types for ecfr-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ecfr_common::CoreError;
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// Every variant renders as `{"error": "<message>"}` with a non-2xx status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request parameters (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Engine precondition failure, e.g. a missing input column (500)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::MissingColumn(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
