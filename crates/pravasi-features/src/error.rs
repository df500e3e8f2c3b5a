//! Error types for feature engineering.

use thiserror::Error;

/// Result type for feature engineering.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that can occur during feature engineering.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A column expected from the loader or an earlier stage is absent.
    #[error("missing column {0}; run the upstream stage first")]
    MissingColumn(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
