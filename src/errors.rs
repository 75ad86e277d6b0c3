// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and a JSON body
/// whose `error` field is a human readable string.
/// Upstream failures keep their detail for the logs and show a generic
/// message to the caller.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Message is shown to the user verbatim
    #[error("{0}")]
    ValidationError(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Too many requests. Please try again later.")]
    RateLimitExceeded,

    #[error("Failed to submit event")]
    SubmissionFailed,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("CMS error: {0}")]
    CmsError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl SiteError {
    fn code(&self) -> &'static str {
        match self {
            SiteError::NotFound(_) => "NOT_FOUND",
            SiteError::InvalidInput(_) => "INVALID_INPUT",
            SiteError::ValidationError(_) => "VALIDATION_ERROR",
            SiteError::Unauthorized => "UNAUTHORIZED",
            SiteError::Forbidden(_) => "FORBIDDEN",
            SiteError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            SiteError::SubmissionFailed => "SUBMISSION_FAILED",
            SiteError::DatabaseError(_) => "DATABASE_ERROR",
            SiteError::CmsError(_) => "CMS_ERROR",
            SiteError::StorageError(_) => "STORAGE_ERROR",
            SiteError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            SiteError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to site visitors
    pub fn public_message(&self) -> String {
        match self {
            SiteError::DatabaseError(_) | SiteError::CmsError(_) | SiteError::InternalError(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            SiteError::StorageError(_) => "Failed to upload image".to_string(),
            SiteError::ExternalApiError(_) => {
                "An upstream service is unavailable. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Convert SiteError to HTTP response
impl ResponseError for SiteError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": self.public_message(),
            "code": self.code(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SiteError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SiteError::Unauthorized => StatusCode::UNAUTHORIZED,
            SiteError::Forbidden(_) => StatusCode::FORBIDDEN,
            SiteError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            SiteError::SubmissionFailed => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::CmsError(_) => StatusCode::BAD_GATEWAY,
            SiteError::StorageError(_) => StatusCode::BAD_GATEWAY,
            SiteError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            SiteError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for SiteError {
    fn from(e: sqlx::Error) -> Self {
        SiteError::DatabaseError(e.to_string())
    }
}
