//! Error handling module
//!
//! This module provides centralized error handling for the application.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("JSON serialization error: {0}")]
    Json(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Request too large: {size} bytes exceeds limit of {limit} bytes")]
    RequestTooLarge { size: usize, limit: usize },
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> warp::http::StatusCode {
        match self {
            AppError::Validation(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::Json(_) => warp::http::StatusCode::BAD_REQUEST,
            AppError::RateLimit => warp::http::StatusCode::TOO_MANY_REQUESTS,
            AppError::RequestTooLarge { .. } => warp::http::StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Authentication(_) => warp::http::StatusCode::UNAUTHORIZED,
            AppError::Security(_) => warp::http::StatusCode::FORBIDDEN,
            AppError::NotFound(_) => warp::http::StatusCode::NOT_FOUND,
            AppError::Conflict(_) => warp::http::StatusCode::CONFLICT,
            AppError::Gateway(_) => warp::http::StatusCode::BAD_GATEWAY,
            _ => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public-facing error message. Internal variants are not echoed verbatim.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) | AppError::Database(_) | AppError::Config(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;

// Implement warp::reject::Reject for AppError
impl warp::reject::Reject for AppError {}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Gateway(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("bad".into()).http_status_code(),
            warp::http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Authentication("no".into()).http_status_code(),
            warp::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("missing".into()).http_status_code(),
            warp::http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("dup".into()).http_status_code(),
            warp::http::StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::RateLimit.http_status_code(),
            warp::http::StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_internal_details_not_leaked() {
        let err = AppError::Database("UNIQUE constraint failed: admin_users.username".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::Validation("title must not be empty".into());
        assert!(err.public_message().contains("title must not be empty"));
    }
}
