//! Error types for model training and inference.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during training, prediction, or snapshotting.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The feature matrix has no rows; nothing to train on.
    #[error("insufficient data: the feature matrix is empty")]
    InsufficientData,

    /// Matrix and target shapes disagree.
    #[error("dimension mismatch: expected {expected} {what}, got {actual}")]
    DimensionMismatch {
        /// Expected count.
        expected: usize,
        /// Actual count.
        actual: usize,
        /// What was being counted ("rows", "feature columns").
        what: &'static str,
    },

    /// The estimator configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
