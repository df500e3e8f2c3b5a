//! Glob-matched CSV ingestion.
//!
//! Loads every file matching an input glob into one concatenated DataFrame.
//! Every column is read as a string: the source files come from different
//! export batches whose inferred dtypes disagree (pincode in particular
//! flips between integer and string), and downstream stages cast what they
//! need. Header casing and padding also vary between batches, so column
//! names are trimmed and lower-cased before the schema is validated.

use crate::error::{DataError, Result};
use glob::glob;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Columns that must be present (after header normalization) in the
/// concatenated table.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "date",
    "district",
    "pincode",
    "demo_age_5_17",
    "demo_age_17_",
];

/// Load all demographic observations matching `pattern` into one table.
///
/// `label` names the source in error messages ("DEMO" in production).
///
/// # Errors
///
/// Returns [`DataError::SourceNotFound`] if no file matches the glob and
/// [`DataError::SchemaMismatch`] if any required column is absent from the
/// concatenated table.
pub fn load_observations(pattern: &str, label: &str) -> Result<DataFrame> {
    let paths = matching_files(pattern)?;
    if paths.is_empty() {
        return Err(DataError::SourceNotFound {
            label: label.to_string(),
            pattern: pattern.to_string(),
        });
    }

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        frames.push(read_source_file(path)?.lazy());
    }

    // Diagonal concat aligns columns by name and fills gaps with nulls, so
    // a batch with extra columns does not reject the whole load.
    let combined = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;

    validate_schema(&combined)?;
    Ok(combined)
}

/// Expand the glob and return matching files in sorted order.
///
/// Sorting makes the concatenation order (and therefore the whole run)
/// independent of filesystem enumeration order.
fn matching_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob(pattern).map_err(|e| DataError::InvalidPattern(e.to_string()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read one CSV file with all columns as strings and normalized headers.
fn read_source_file(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        // Schema inference off: read everything as string.
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(normalize_headers(df)?)
}

/// Trim and lower-case every column name.
fn normalize_headers(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.trim().to_lowercase())
        .collect();
    df.set_column_names(names)?;
    Ok(df)
}

/// Check that every required column is present, naming the absent ones.
fn validate_schema(df: &DataFrame) -> Result<()> {
    let present: HashSet<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(ToString::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort();
        Err(DataError::SchemaMismatch { missing })
    }
}
