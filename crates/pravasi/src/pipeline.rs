//! End-to-end pipeline orchestration.
//!
//! One call runs the whole batch: load, detect, aggregate, encode, fit,
//! predict, export. Fatal errors abort before anything is written; the two
//! output files only appear after the full feature table and predictions
//! exist in memory, so there is never a partial or torn artifact.

use crate::config::PipelineConfig;
use pravasi_features::{aggregate_features, detect_migrations, encode_month_index, feature_matrix};
use pravasi_model::{FittedModel, GbdtRegressor, RegressionEstimator};
use pravasi_output::MigrationMaster;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source loading failed.
    #[error("data loading failed: {0}")]
    Data(#[from] pravasi_data::DataError),

    /// Feature engineering failed.
    #[error("feature engineering failed: {0}")]
    Features(#[from] pravasi_features::FeatureError),

    /// Model training or prediction failed.
    #[error("model training failed: {0}")]
    Model(#[from] pravasi_model::ModelError),

    /// Artifact export failed.
    #[error("artifact export failed: {0}")]
    Export(#[from] pravasi_output::ExportError),
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Raw observations loaded from the source files.
    pub observations_loaded: usize,

    /// Observations remaining after the date-parse filter.
    pub observations_kept: usize,

    /// District/month rows in the exported history.
    pub feature_rows: usize,

    /// Where the artifact was written.
    pub artifact_path: PathBuf,

    /// Where the model snapshot was written.
    pub model_path: PathBuf,
}

/// Run the full pipeline once.
///
/// # Errors
///
/// Propagates the first fatal error from any stage; see [`PipelineError`].
/// No output file is touched unless every stage before export succeeded.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let raw = pravasi_data::load_observations(&config.input_glob, &config.source_label)?;
    let observations_loaded = raw.height();

    let flagged = detect_migrations(raw)?;
    let observations_kept = flagged.height();

    let features = encode_month_index(aggregate_features(flagged)?)?;
    let matrix = feature_matrix(&features)?;

    let estimator = GbdtRegressor::new(config.estimator.clone())?;
    let model = estimator.fit(&matrix.x, &matrix.y)?;
    let predictions = model.predict(&matrix.x)?;

    let master = MigrationMaster::from_features(&features, predictions.to_vec())?;

    master.write_json(&config.artifact_path)?;
    model.save(&config.model_path)?;

    Ok(PipelineReport {
        observations_loaded,
        observations_kept,
        feature_rows: features.height(),
        artifact_path: config.artifact_path.clone(),
        model_path: config.model_path.clone(),
    })
}
