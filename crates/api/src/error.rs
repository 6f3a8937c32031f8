//! API error types
//!
//! Provides structured error responses for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use linkd_service::ServiceError;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request body or parameters
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request deadline elapsed before the batch finished
    #[error("request deadline exceeded")]
    Timeout,

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Timeout => "REQUEST_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Cancelled => Self::Timeout,
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub error: &'static str,
    /// Error message (human-readable)
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.code(),
            message: self.to_string(),
        };

        tracing::warn!(
            error_code = body.error,
            error_message = %body.message,
            status = %status,
            "API error"
        );

        (status, Json(body)).into_response()
    }
}
