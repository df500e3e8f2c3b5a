//! Run configuration.
//!
//! Everything the pipeline touches (input glob, artifact paths, estimator
//! hyperparameters) lives here and is passed in explicitly, so tests can
//! substitute paths and settings without process-wide state.

use pravasi_model::GbdtConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one end-to-end pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Glob matching the demographic CSV source files.
    pub input_glob: String,

    /// Label naming the source in logs and error messages.
    pub source_label: String,

    /// Where the migration master artifact is written.
    pub artifact_path: PathBuf,

    /// Where the trained model snapshot is written.
    pub model_path: PathBuf,

    /// Estimator hyperparameters.
    pub estimator: GbdtConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_glob: "data/demographic/*.csv".to_string(),
            source_label: "DEMO".to_string(),
            artifact_path: PathBuf::from("data/migration_master.json"),
            model_path: PathBuf::from("models/gbdt_migration_model.json"),
            estimator: GbdtConfig::default(),
        }
    }
}
