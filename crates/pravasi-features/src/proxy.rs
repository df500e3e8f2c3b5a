//! Migration proxy detection.
//!
//! "This person migrated" is not directly observable in the demographic
//! feed; the observable proxy is "the pincode associated with a district
//! changed between consecutive time-ordered records". Records are ordered
//! by (district, month) with a stable sort, and a row is flagged when its
//! pincode differs from the immediately preceding row of the same district.
//! The first row of each district has no predecessor and is never flagged.

use crate::error::{FeatureError, Result};
use polars::prelude::*;

/// Name of the 0/1 flag column added by [`flag_migrations`].
pub const MIGRATION_FLAG: &str = "is_migration";

/// Month key format, lexicographically ordered the same as time.
const MONTH_FORMAT: &str = "%Y-%m";

/// Source date format. Pinned rather than inferred so that a file of
/// entirely malformed dates degrades to dropped rows instead of a
/// format-inference failure.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn ensure_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.get_column_names().iter().any(|c| c.as_str() == name) {
        Ok(())
    } else {
        Err(FeatureError::MissingColumn(name.to_string()))
    }
}

/// Parse dates, derive the month key, and normalize district names.
///
/// `date` is parsed as `%Y-%m-%d`; rows whose date fails to parse are
/// dropped (a data-quality filter, not a fatal error). `district` is
/// trimmed and lower-cased so the same district never splits into several
/// groups over header-only differences.
pub fn prepare_observations(raw: DataFrame) -> Result<DataFrame> {
    ensure_column(&raw, "date")?;
    ensure_column(&raw, "district")?;

    let prepared = raw
        .lazy()
        .with_column(
            col("date")
                .str()
                .to_date(StrptimeOptions {
                    format: Some(DATE_FORMAT.into()),
                    strict: false,
                    ..Default::default()
                })
                .alias("date"),
        )
        .filter(col("date").is_not_null())
        .with_columns([
            col("date").dt().to_string(MONTH_FORMAT).alias("month"),
            col("district")
                .str()
                .strip_chars(lit(NULL))
                .str()
                .to_lowercase()
                .alias("district"),
        ])
        .collect()?;

    Ok(prepared)
}

/// Add the [`MIGRATION_FLAG`] column.
///
/// Sorts by (district, month) keeping the incoming order of ties, then
/// compares each pincode with the previous one inside the district group.
/// The shifted comparison is null on each group's first row; filling with
/// `false` is what makes a district's first appearance a non-event.
/// Repeated identical (district, month, pincode) rows are kept as-is and
/// never flag.
pub fn flag_migrations(observations: DataFrame) -> Result<DataFrame> {
    ensure_column(&observations, "month")?;
    ensure_column(&observations, "pincode")?;

    let flagged = observations
        .lazy()
        .sort(
            ["district", "month"],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .with_column(
            col("pincode")
                .neq(col("pincode").shift(lit(1)).over([col("district")]))
                .fill_null(lit(false))
                .cast(DataType::Int32)
                .alias(MIGRATION_FLAG),
        )
        .collect()?;

    Ok(flagged)
}

/// Full proxy detection: [`prepare_observations`] then [`flag_migrations`].
pub fn detect_migrations(raw: DataFrame) -> Result<DataFrame> {
    flag_migrations(prepare_observations(raw)?)
}
