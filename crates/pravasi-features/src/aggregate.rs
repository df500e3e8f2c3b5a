//! District/month aggregation.
//!
//! Collapses flagged observations into one row per (district, month):
//! migration events are the sum of flags, age brackets are per-group sums.
//! Missing months are not interpolated; a pair only appears if the input
//! contains it. Output is sorted by the grouping key so identical input
//! always yields an identical table.

use crate::error::Result;
use crate::proxy::MIGRATION_FLAG;
use polars::prelude::*;

/// Aggregate flagged observations into the district/month feature table.
///
/// Expects the columns produced by the loader and the proxy detector:
/// `district`, `month`, [`MIGRATION_FLAG`], `demo_age_5_17`, `demo_age_17_`.
/// The age columns arrive as strings from the loader; non-numeric cells
/// count as zero rather than dropping the row.
///
/// Output columns: `district`, `month`, `migration_events`, `age_5_17`,
/// `age_17_plus`.
pub fn aggregate_features(flagged: DataFrame) -> Result<DataFrame> {
    let features = flagged
        .lazy()
        .with_columns([
            col("demo_age_5_17")
                .cast(DataType::Int64)
                .fill_null(lit(0))
                .alias("age_5_17"),
            col("demo_age_17_")
                .cast(DataType::Int64)
                .fill_null(lit(0))
                .alias("age_17_plus"),
        ])
        .group_by([col("district"), col("month")])
        .agg([
            col(MIGRATION_FLAG)
                .cast(DataType::Int64)
                .sum()
                .alias("migration_events"),
            col("age_5_17").sum(),
            col("age_17_plus").sum(),
        ])
        .sort(["district", "month"], SortMultipleOptions::default())
        .collect()?;

    Ok(features)
}
