//! Application-level errors

use domain::DomainError;
use ml_core::MlError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Classifier error
    #[error(transparent)]
    Ml(#[from] MlError),

    /// Persisted artifacts are absent; training has to run first
    #[error("Model artifacts not found: {0}. Run `weathervane-cli train` first")]
    ArtifactsMissing(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested city could not be geocoded
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Input rejected before reaching the model
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("timeout".into()).is_retryable());
        assert!(!ApplicationError::CityNotFound("Atlantis".into()).is_retryable());
        assert!(!ApplicationError::InvalidInput("negative wind speed".into()).is_retryable());
    }

    #[test]
    fn missing_artifacts_message_names_the_fix() {
        let err = ApplicationError::ArtifactsMissing("weather_model.bin".into());
        assert!(err.to_string().contains("weathervane-cli train"));
    }

    #[test]
    fn domain_errors_pass_through_transparently() {
        let err: ApplicationError = DomainError::EmptyVocabulary.into();
        assert_eq!(err.to_string(), DomainError::EmptyVocabulary.to_string());
    }
}
