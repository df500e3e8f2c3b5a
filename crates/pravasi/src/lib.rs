#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pravasi-ai/pravasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod geo;
pub mod pipeline;

// Re-export main types from sub-crates
pub use pravasi_data as data;
pub use pravasi_features as features;
pub use pravasi_model as model;
pub use pravasi_output as output;

pub use config::PipelineConfig;
pub use geo::{DEFAULT_ORIGIN, DESTINATION, StaticGeocoder};
pub use pipeline::{PipelineError, PipelineReport, run};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
