//! Service error types and HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rate_rules::RateError;
use serde_json::json;
use thiserror::Error;

/// Result type for ratesrv
pub type Result<T> = std::result::Result<T, RatesrvError>;

/// Errors that can occur in ratesrv.
///
/// An unavailable price is NOT an error: the price handler renders it
/// inline as a 404 "unavailable" body without going through this type.
#[derive(Error, Debug)]
pub enum RatesrvError {
    #[error("Validation error: {0}")]
    Validation(#[from] RateError),

    #[error("Rate not found: {0}")]
    RateNotFound(u64),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// HTTP response conversion for Axum
impl IntoResponse for RatesrvError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RatesrvError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            RatesrvError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            RatesrvError::RateNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            RatesrvError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),
            RatesrvError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RatesrvError::RateNotFound(7);
        assert_eq!(format!("{}", error), "Rate not found: 7");

        let error = RatesrvError::Validation(RateError::UnknownWeekday("xyz".to_string()));
        assert!(format!("{}", error).contains("Unknown weekday: xyz"));
    }

    #[test]
    fn test_status_mapping() {
        let resp = RatesrvError::RateNotFound(1).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp =
            RatesrvError::Validation(RateError::UnknownTimezone("x".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = RatesrvError::Internal("boom".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
