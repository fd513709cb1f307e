/// Error types for feed-service
///
/// Failures are converted to the shared `ErrorResponse` JSON envelope for API
/// clients. Nothing here is locally recoverable: the service composes
/// read-only upstream queries, so any dependency failure fails the whole call
/// and no partial page is ever returned.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use error_types::{error_codes, ErrorResponse};
use thiserror::Error;

/// Result type for feed-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Requester does not exist (reported by the social graph upstream)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad caller input, e.g. a non-positive limit
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed or tampered pagination token
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// An upstream gateway errored or timed out
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCursor(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (error_type, code) = match self {
            AppError::NotFound(_) => ("not_found_error", error_codes::USER_NOT_FOUND),
            AppError::InvalidArgument(_) => ("validation_error", error_codes::INVALID_REQUEST),
            AppError::InvalidCursor(_) => ("conflict_error", error_codes::INVALID_CURSOR),
            AppError::Upstream(_) => ("upstream_error", error_codes::UPSTREAM_UNAVAILABLE),
            AppError::Internal(_) => ("server_error", error_codes::INTERNAL_SERVER_ERROR),
        };

        let title = match status {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::CONFLICT => "Conflict",
            StatusCode::BAD_GATEWAY => "Bad Gateway",
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
            _ => "Error",
        };

        let response =
            ErrorResponse::new(title, &self.to_string(), status.as_u16(), error_type, code);

        HttpResponse::build(status).json(response)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
