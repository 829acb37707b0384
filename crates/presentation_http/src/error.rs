//! API error handling
//!
//! Maps application errors onto HTTP status codes with a JSON body.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Rate limit exceeded".to_string(),
            ),
            Self::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg)
            },
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            // Artifact-integrity failures are server-side faults, not bad input.
            ApplicationError::Domain(
                e @ (domain::DomainError::UnknownClassCode { .. }
                | domain::DomainError::MismatchedArtifacts { .. }
                | domain::DomainError::EmptyVocabulary),
            ) => Self::Internal(e.to_string()),
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::CityNotFound(city) => Self::NotFound(format!("City not found: {city}")),
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::ArtifactsMissing(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Ml(e) => Self::Internal(e.to_string()),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}
