//! Estimator trait seam.
//!
//! The pipeline only ever talks to these two traits; the gradient-boosted
//! implementation in [`crate::gbdt`] is one concrete choice behind them.

use crate::error::Result;
use ndarray::{Array1, Array2};

/// Fits a regression model to a feature matrix and target vector.
pub trait RegressionEstimator {
    /// The fitted model type produced by [`fit`](Self::fit).
    type Model: FittedModel;

    /// Train on `x` (one row per sample) against `y` (one target per row).
    ///
    /// # Errors
    ///
    /// Returns an error if `x` is empty or the shapes of `x` and `y`
    /// disagree.
    fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Self::Model>;
}

/// A trained regression model.
pub trait FittedModel {
    /// Predict one value per row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` has a different number of feature columns
    /// than the matrix the model was trained on.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;
}
