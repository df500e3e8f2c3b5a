//! Gradient-boosted regression trees.
//!
//! Squared-error boosting: start from the target mean, then repeatedly fit
//! a depth-limited tree to the residuals and shrink its contribution by the
//! learning rate. Training touches no source of randomness (no subsampling,
//! deterministic split search), so identical inputs always produce an
//! identical model and identical predictions.

pub mod tree;

use crate::error::{ModelError, Result};
use crate::estimator::{FittedModel, RegressionEstimator};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use tree::{Node, Tree};

/// Gradient-boosting hyperparameters.
///
/// The production configuration is fixed (see `Default`); the struct exists
/// so tests and future callers can substitute values without touching the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbdtConfig {
    /// Number of boosting rounds (default: 120).
    pub n_rounds: usize,

    /// Maximum tree depth (default: 5).
    pub max_depth: usize,

    /// Shrinkage applied to each tree's contribution (default: 0.1).
    pub learning_rate: f64,

    /// Minimum rows per leaf (default: 1).
    pub min_samples_leaf: usize,

    /// Random seed, recorded in the snapshot (default: 42). The trainer
    /// itself draws no random numbers.
    pub seed: u64,
}

impl Default for GbdtConfig {
    fn default() -> Self {
        Self {
            n_rounds: 120,
            max_depth: 5,
            learning_rate: 0.1,
            min_samples_leaf: 1,
            seed: 42,
        }
    }
}

impl GbdtConfig {
    fn validate(&self) -> Result<()> {
        if self.n_rounds == 0 {
            return Err(ModelError::InvalidConfig(
                "n_rounds must be at least 1".to_string(),
            ));
        }
        if self.learning_rate <= 0.0 || self.learning_rate > 1.0 {
            return Err(ModelError::InvalidConfig(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if self.min_samples_leaf == 0 {
            return Err(ModelError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gradient-boosted tree regressor.
#[derive(Debug)]
pub struct GbdtRegressor {
    config: GbdtConfig,
}

impl GbdtRegressor {
    /// Create a regressor with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidConfig`] for unusable hyperparameters.
    pub fn new(config: GbdtConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create with the fixed production configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration is invalid (should not
    /// happen).
    pub fn try_default() -> Result<Self> {
        Self::new(GbdtConfig::default())
    }

    /// The configuration this regressor trains with.
    pub const fn config(&self) -> &GbdtConfig {
        &self.config
    }
}

impl RegressionEstimator for GbdtRegressor {
    type Model = GbdtModel;

    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<GbdtModel> {
        if x.nrows() == 0 {
            return Err(ModelError::InsufficientData);
        }
        if x.nrows() != y.len() {
            return Err(ModelError::DimensionMismatch {
                expected: x.nrows(),
                actual: y.len(),
                what: "target rows",
            });
        }

        let base_score = y.mean().unwrap_or(0.0);
        let mut residuals = y.mapv(|v| v - base_score);
        let mut trees = Vec::with_capacity(self.config.n_rounds);

        for _ in 0..self.config.n_rounds {
            let tree = Tree::fit(
                x,
                &residuals,
                self.config.max_depth,
                self.config.min_samples_leaf,
            );
            for (i, residual) in residuals.iter_mut().enumerate() {
                *residual -= self.config.learning_rate * tree.predict_row(x.row(i));
            }
            trees.push(tree);
        }

        Ok(GbdtModel {
            config: self.config.clone(),
            base_score,
            n_features: x.ncols(),
            trees,
        })
    }
}

/// A trained gradient-boosted model.
///
/// Serializes to a JSON parameter snapshot so a later process can score
/// without retraining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbdtModel {
    config: GbdtConfig,
    base_score: f64,
    n_features: usize,
    trees: Vec<Tree>,
}

impl GbdtModel {
    /// The configuration the model was trained with.
    pub const fn config(&self) -> &GbdtConfig {
        &self.config
    }

    /// Number of feature columns the model expects.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Serialize the parameter snapshot to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a model from a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot does not parse.
    pub fn from_json(snapshot: &str) -> Result<Self> {
        Ok(serde_json::from_str(snapshot)?)
    }

    /// Write the snapshot to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a snapshot from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl FittedModel for GbdtModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: x.ncols(),
                what: "feature columns",
            });
        }

        let predictions = (0..x.nrows())
            .map(|i| {
                let row = x.row(i);
                let boosted: f64 = self.trees.iter().map(|t| t.predict_row(row)).sum();
                self.base_score + self.config.learning_rate * boosted
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}
