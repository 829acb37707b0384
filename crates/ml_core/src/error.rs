//! Classifier errors

use thiserror::Error;

/// Errors that can occur while fitting or querying the classifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlError {
    /// No rows left to fit on after cleaning
    #[error("Training set is empty")]
    EmptyTrainingSet,

    /// Feature row has the wrong number of columns
    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A target value lies outside the declared class range
    #[error("Class code {code} is out of range for {n_classes} classes")]
    ClassOutOfRange { code: usize, n_classes: usize },

    /// Feature matrix and target vector disagree on row count
    #[error("Row count mismatch: {x_rows} feature rows but {y_rows} targets")]
    RowCountMismatch { x_rows: usize, y_rows: usize },

    /// Test fraction must lie strictly between 0 and 1
    #[error("Test fraction {0} is outside (0, 1)")]
    InvalidTestFraction(f64),
}
