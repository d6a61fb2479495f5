use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use knot_core::{ShortenerError, StorageError};
use serde_json::json;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Request-level failures, mapped onto `{"error": ...}` JSON bodies.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input; never touches the store. 400.
    Validation(String),
    /// The code names no live record. 404.
    NotFound,
    /// Code allocation exhausted its retry budget. 503.
    Exhausted,
    /// Storage-layer failure; details stay in the logs. 500.
    Internal(String),
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        match err {
            ShortenerError::InvalidUrl(message) => Self::Validation(message),
            // A syntactically invalid code can't name a record.
            ShortenerError::InvalidShortCode(_) => Self::NotFound,
            ShortenerError::CodeSpaceExhausted(_) => Self::Exhausted,
            ShortenerError::Storage(err) => err.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Short code not found".to_string(),
            ),
            AppError::Exhausted => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Could not allocate a unique short code".to_string(),
            ),
            AppError::Internal(message) => {
                error!(error = %message, "request failed on a storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
