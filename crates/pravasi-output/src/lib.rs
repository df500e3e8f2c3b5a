#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pravasi-ai/pravasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod geocode;

pub use export::{ExportError, ExportFormat, MigrationMaster, MigrationRecord};
pub use geocode::{GeoPoint, Geocoder};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
