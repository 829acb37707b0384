//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A label string is not part of the fitted vocabulary
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// A class code has no corresponding label in the encoder
    #[error("Unknown class code {code}: encoder knows {vocabulary_size} classes")]
    UnknownClassCode { code: usize, vocabulary_size: usize },

    /// Model and encoder do not come from the same training run
    #[error(
        "Mismatched artifact pair: model predicts over {model_classes} classes, \
         encoder was fitted on {encoder_classes}"
    )]
    MismatchedArtifacts {
        model_classes: usize,
        encoder_classes: usize,
    },

    /// Encoder was fitted on an empty label set
    #[error("Label vocabulary is empty: nothing to encode")]
    EmptyVocabulary,

    /// A feature value is outside its permitted range
    #[error("Invalid feature value: {0}")]
    InvalidFeature(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_message() {
        let err = DomainError::UnknownLabel("Hail".to_string());
        assert_eq!(err.to_string(), "Unknown label: Hail");
    }

    #[test]
    fn unknown_class_code_message() {
        let err = DomainError::UnknownClassCode {
            code: 9,
            vocabulary_size: 4,
        };
        assert_eq!(
            err.to_string(),
            "Unknown class code 9: encoder knows 4 classes"
        );
    }

    #[test]
    fn mismatched_artifacts_message() {
        let err = DomainError::MismatchedArtifacts {
            model_classes: 5,
            encoder_classes: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("Mismatched artifact pair"));
        assert!(msg.contains('5'));
        assert!(msg.contains('4'));
    }

    #[test]
    fn invalid_feature_message() {
        let err = DomainError::InvalidFeature("wind speed must be non-negative".to_string());
        assert!(err.to_string().starts_with("Invalid feature value"));
    }
}
