//! Shared error envelope for Verso services
//!
//! Every HTTP-facing service serializes failures into the same JSON shape so
//! clients can handle errors uniformly regardless of which service produced
//! them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable error codes shared across services.
pub mod error_codes {
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INVALID_CURSOR: &str = "INVALID_CURSOR";
    pub const UPSTREAM_UNAVAILABLE: &str = "UPSTREAM_UNAVAILABLE";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// JSON error body returned by every service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short human-readable title, e.g. "Not Found"
    pub error: String,
    /// Detailed message for the specific failure
    pub message: String,
    /// HTTP status code
    pub status: u16,
    /// Coarse classification, e.g. "validation_error"
    pub error_type: String,
    /// Machine-readable code from [`error_codes`]
    pub code: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, status: u16, error_type: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            error_type: error_type.to_string(),
            code: code.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_carries_code_and_status() {
        let resp = ErrorResponse::new(
            "Conflict",
            "cursor does not decode",
            409,
            "conflict_error",
            error_codes::INVALID_CURSOR,
        );
        assert_eq!(resp.status, 409);
        assert_eq!(resp.code, "INVALID_CURSOR");
        assert_eq!(resp.error, "Conflict");
    }
}
