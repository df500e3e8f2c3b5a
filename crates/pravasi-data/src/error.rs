//! Error types for source ingestion.

use thiserror::Error;

/// Result type for source ingestion.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading demographic source files.
#[derive(Debug, Error)]
pub enum DataError {
    /// No files matched the input glob. Fatal: the run aborts before any
    /// parsing happens.
    #[error("no {label} source files found matching {pattern}")]
    SourceNotFound {
        /// Human-readable label for the source (e.g. "DEMO").
        label: String,
        /// The glob pattern that matched nothing.
        pattern: String,
    },

    /// The glob pattern itself could not be parsed.
    #[error("invalid glob pattern: {0}")]
    InvalidPattern(String),

    /// One or more required columns are absent from the loaded table.
    #[error("missing required columns: {}", .missing.join(", "))]
    SchemaMismatch {
        /// Names of the absent columns, sorted.
        missing: Vec<String>,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
