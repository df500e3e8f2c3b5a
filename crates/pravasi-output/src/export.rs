//! The migration master artifact.
//!
//! One run produces one artifact: the full district/month feature history
//! plus the model's in-sample predictions, index-aligned. The serving layer
//! reads this file verbatim; nothing here is merged or appended, each run
//! fully replaces the previous artifact.

use crate::geocode::{GeoPoint, Geocoder};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during artifact assembly and export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Predictions and historical records are not index-aligned.
    #[error("prediction count {predictions} does not match historical count {historical}")]
    LengthMismatch {
        /// Number of historical records.
        historical: usize,
        /// Number of predictions.
        predictions: usize,
    },

    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialized output is not valid UTF-8.
    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Polars error.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options for the historical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One aggregated (district, month) feature row of the artifact.
///
/// Coordinate fields stay absent from the JSON until
/// [`MigrationMaster::annotate_coordinates`] fills them in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MigrationRecord {
    /// Normalized district name.
    pub district: String,

    /// Month key, `YYYY-MM`.
    pub month: String,

    /// Count of migration events in the group.
    pub migration_events: i64,

    /// Summed 5-17 age-bracket count.
    pub age_5_17: i64,

    /// Summed 17+ age-bracket count.
    pub age_17_plus: i64,

    /// Dense month ordinal used as a model feature.
    pub month_idx: u32,

    /// Origin longitude, set by coordinate annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng_origin: Option<f64>,

    /// Origin latitude, set by coordinate annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_origin: Option<f64>,

    /// Destination longitude, set by coordinate annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng_dest: Option<f64>,

    /// Destination latitude, set by coordinate annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat_dest: Option<f64>,
}

/// The durable export consumed by the serving layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MigrationMaster {
    /// Ordered historical feature records.
    pub historical: Vec<MigrationRecord>,

    /// In-sample predictions, `predictions_next_period[i]` corresponding to
    /// `historical[i]`.
    pub predictions_next_period: Vec<f64>,
}

impl MigrationMaster {
    /// Assemble an artifact, enforcing index alignment.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::LengthMismatch`] when the sequences disagree
    /// in length.
    pub fn new(
        historical: Vec<MigrationRecord>,
        predictions_next_period: Vec<f64>,
    ) -> Result<Self, ExportError> {
        if historical.len() != predictions_next_period.len() {
            return Err(ExportError::LengthMismatch {
                historical: historical.len(),
                predictions: predictions_next_period.len(),
            });
        }
        Ok(Self {
            historical,
            predictions_next_period,
        })
    }

    /// Assemble an artifact from the encoded feature table and predictions.
    ///
    /// Row `i` of `features` becomes `historical[i]`; `predictions[i]` must
    /// be the model output for that row.
    ///
    /// # Errors
    ///
    /// Returns an error on missing/mistyped columns or a length mismatch.
    pub fn from_features(
        features: &DataFrame,
        predictions: Vec<f64>,
    ) -> Result<Self, ExportError> {
        let districts = features.column("district")?.str()?.clone();
        let months = features.column("month")?.str()?.clone();
        let events = features.column("migration_events")?.cast(&DataType::Int64)?;
        let events = events.i64()?.clone();
        let young = features.column("age_5_17")?.cast(&DataType::Int64)?;
        let young = young.i64()?.clone();
        let adult = features.column("age_17_plus")?.cast(&DataType::Int64)?;
        let adult = adult.i64()?.clone();
        let month_idx = features.column("month_idx")?.cast(&DataType::UInt32)?;
        let month_idx = month_idx.u32()?.clone();

        let mut historical = Vec::with_capacity(features.height());
        for i in 0..features.height() {
            historical.push(MigrationRecord {
                district: districts.get(i).unwrap_or_default().to_string(),
                month: months.get(i).unwrap_or_default().to_string(),
                migration_events: events.get(i).unwrap_or_default(),
                age_5_17: young.get(i).unwrap_or_default(),
                age_17_plus: adult.get(i).unwrap_or_default(),
                month_idx: month_idx.get(i).unwrap_or_default(),
                lng_origin: None,
                lat_origin: None,
                lng_dest: None,
                lat_dest: None,
            });
        }

        Self::new(historical, predictions)
    }

    /// Number of historical records (equal to the number of predictions).
    pub fn len(&self) -> usize {
        self.historical.len()
    }

    /// True when the artifact has no records.
    pub fn is_empty(&self) -> bool {
        self.historical.is_empty()
    }

    /// Fill in origin coordinates per district and a fixed destination.
    ///
    /// `geocoder` must be total; districts it does not know map to its
    /// explicit default point. Annotation is idempotent and only touches
    /// the coordinate fields.
    pub fn annotate_coordinates(&mut self, geocoder: &dyn Geocoder, destination: GeoPoint) {
        for record in &mut self.historical {
            let origin = geocoder.locate(&record.district);
            record.lng_origin = Some(origin.lng);
            record.lat_origin = Some(origin.lat);
            record.lng_dest = Some(destination.lng);
            record.lat_dest = Some(destination.lat);
        }
    }

    /// Export the historical table to a string in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in &self.historical {
                    wtr.serialize(record)?;
                }
                Ok(String::from_utf8(
                    wtr.into_inner().map_err(|e| e.into_error())?,
                )?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Persist the artifact as pretty JSON, creating parent directories.
    ///
    /// Fully replaces any existing artifact at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.export_to_string(ExportFormat::PrettyJson)?)?;
        Ok(())
    }

    /// Read an artifact back from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_json(path: &Path) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(district: &str, month: &str, events: i64) -> MigrationRecord {
        MigrationRecord {
            district: district.to_string(),
            month: month.to_string(),
            migration_events: events,
            age_5_17: 10,
            age_17_plus: 40,
            month_idx: 0,
            lng_origin: None,
            lat_origin: None,
            lng_dest: None,
            lat_dest: None,
        }
    }

    struct TableGeocoder;

    impl Geocoder for TableGeocoder {
        fn locate(&self, district: &str) -> GeoPoint {
            match district {
                "patna" => GeoPoint::new(85.1376, 25.5941),
                _ => GeoPoint::new(78.0, 20.5),
            }
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = MigrationMaster::new(vec![record("patna", "2024-01", 1)], vec![]).unwrap_err();
        match err {
            ExportError::LengthMismatch {
                historical,
                predictions,
            } => {
                assert_eq!(historical, 1);
                assert_eq!(predictions, 0);
            }
            other => panic!("expected LengthMismatch, got {other}"),
        }
    }

    #[test]
    fn test_from_features_preserves_row_order() {
        let features = DataFrame::new(vec![
            Series::new("district".into(), ["mumbai", "patna"].as_slice()).into(),
            Series::new("month".into(), ["2024-01", "2024-02"].as_slice()).into(),
            Series::new("migration_events".into(), [2i64, 5].as_slice()).into(),
            Series::new("age_5_17".into(), [10i64, 20].as_slice()).into(),
            Series::new("age_17_plus".into(), [30i64, 40].as_slice()).into(),
            Series::new("month_idx".into(), [0u32, 1].as_slice()).into(),
        ])
        .unwrap();

        let master = MigrationMaster::from_features(&features, vec![2.1, 4.9]).unwrap();
        assert_eq!(master.len(), 2);
        assert_eq!(master.historical[0].district, "mumbai");
        assert_eq!(master.historical[1].migration_events, 5);
        assert_eq!(master.predictions_next_period, vec![2.1, 4.9]);
    }

    #[test]
    fn test_coordinates_absent_until_annotated() {
        let master =
            MigrationMaster::new(vec![record("patna", "2024-01", 1)], vec![1.0]).unwrap();
        let json = master.export_to_string(ExportFormat::Json).unwrap();
        assert!(!json.contains("lng_origin"));
    }

    #[test]
    fn test_annotation_uses_geocoder_and_default() {
        let mut master = MigrationMaster::new(
            vec![record("patna", "2024-01", 1), record("unknownville", "2024-01", 0)],
            vec![1.0, 0.0],
        )
        .unwrap();

        master.annotate_coordinates(&TableGeocoder, GeoPoint::new(77.5946, 12.9716));

        assert_eq!(master.historical[0].lng_origin, Some(85.1376));
        assert_eq!(master.historical[1].lng_origin, Some(78.0));
        assert_eq!(master.historical[1].lat_origin, Some(20.5));
        for rec in &master.historical {
            assert_eq!(rec.lng_dest, Some(77.5946));
            assert_eq!(rec.lat_dest, Some(12.9716));
        }
    }

    #[test]
    fn test_csv_export_contains_records() {
        let master = MigrationMaster::new(
            vec![record("patna", "2024-01", 3), record("mumbai", "2024-02", 1)],
            vec![3.0, 1.0],
        )
        .unwrap();

        let csv = master.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.contains("patna"));
        assert!(csv.contains("mumbai"));
        assert!(csv.contains("2024-01"));
        assert!(csv.contains("migration_events"));
    }

    #[test]
    fn test_csv_export_keeps_non_ascii_districts() {
        let master = MigrationMaster::new(
            vec![record("māndya", "2024-01", 1)],
            vec![1.0],
        )
        .unwrap();

        let csv = master.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.contains("māndya"));
    }

    #[test]
    fn test_pretty_json_has_both_top_level_fields() {
        let master =
            MigrationMaster::new(vec![record("patna", "2024-01", 1)], vec![1.5]).unwrap();
        let json = master.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("\"historical\""));
        assert!(json.contains("\"predictions_next_period\""));
        assert!(json.contains("  ")); // indented
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let master = MigrationMaster::new(
            vec![record("patna", "2024-01", 2)],
            vec![1.8],
        )
        .unwrap();

        let dir = std::env::temp_dir()
            .join("pravasi_output_tests")
            .join("roundtrip");
        let path = dir.join("migration_master.json");
        master.write_json(&path).unwrap();

        let restored = MigrationMaster::read_json(&path).unwrap();
        assert_eq!(master, restored);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_overwrites_previous_artifact() {
        let dir = std::env::temp_dir()
            .join("pravasi_output_tests")
            .join("overwrite");
        let path = dir.join("migration_master.json");

        let first = MigrationMaster::new(
            vec![record("patna", "2024-01", 1), record("patna", "2024-02", 2)],
            vec![1.0, 2.0],
        )
        .unwrap();
        first.write_json(&path).unwrap();

        let second = MigrationMaster::new(vec![record("mumbai", "2024-03", 9)], vec![9.0]).unwrap();
        second.write_json(&path).unwrap();

        let restored = MigrationMaster::read_json(&path).unwrap();
        assert_eq!(restored, second);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
