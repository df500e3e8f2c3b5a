//! Month encoding and feature-matrix assembly.
//!
//! The regression model needs a numeric stand-in for the month key. The
//! month is factorized by first occurrence over the aggregated table in its
//! current (district-sorted) order, matching the artifact format consumers
//! already depend on; the index is therefore NOT a chronological rank when
//! districts cover different month ranges. See DESIGN.md for the rationale.

use crate::error::Result;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::collections::HashMap;

/// Feature columns fed to the estimator, in matrix column order.
pub const FEATURE_COLUMNS: [&str; 3] = ["age_5_17", "age_17_plus", "month_idx"];

/// Target column the estimator is trained against.
pub const TARGET_COLUMN: &str = "migration_events";

/// Numeric training data, row-aligned with the feature table.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// One row per (district, month), columns per [`FEATURE_COLUMNS`].
    pub x: Array2<f64>,
    /// Migration event counts, one per row of `x`.
    pub y: Array1<f64>,
}

impl FeatureMatrix {
    /// Number of training rows.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    /// True when there are no training rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Add the dense `month_idx` ordinal to the aggregated feature table.
///
/// The first distinct month value encountered gets index 0, the second
/// index 1, and so on, scanning the table top to bottom.
pub fn encode_month_index(mut features: DataFrame) -> Result<DataFrame> {
    let indices: Vec<u32> = {
        let months = features.column("month")?.str()?;
        let mut lookup: HashMap<String, u32> = HashMap::new();
        months
            .into_iter()
            .map(|month| {
                let key = month.unwrap_or_default().to_string();
                let next = lookup.len() as u32;
                *lookup.entry(key).or_insert(next)
            })
            .collect()
    };

    features.with_column(Series::new("month_idx".into(), indices))?;
    Ok(features)
}

/// Assemble the numeric feature matrix and target vector.
///
/// Row `i` of the matrix corresponds to row `i` of `features`; the caller
/// relies on that alignment when pairing predictions with historical rows.
pub fn feature_matrix(features: &DataFrame) -> Result<FeatureMatrix> {
    let rows = features.height();
    let mut x = Array2::<f64>::zeros((rows, FEATURE_COLUMNS.len()));

    for (j, name) in FEATURE_COLUMNS.iter().enumerate() {
        let values = features.column(*name)?.cast(&DataType::Float64)?;
        let values = values.f64()?;
        for (i, value) in values.into_no_null_iter().enumerate() {
            x[[i, j]] = value;
        }
    }

    let target = features.column(TARGET_COLUMN)?.cast(&DataType::Float64)?;
    let target = target.f64()?;
    let y = Array1::from_iter(target.into_no_null_iter());

    Ok(FeatureMatrix { x, y })
}
