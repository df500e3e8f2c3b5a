#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pravasi-ai/pravasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod encode;
pub mod error;
pub mod proxy;

pub use aggregate::aggregate_features;
pub use encode::{FEATURE_COLUMNS, FeatureMatrix, TARGET_COLUMN, encode_month_index, feature_matrix};
pub use error::{FeatureError, Result};
pub use proxy::{MIGRATION_FLAG, detect_migrations, flag_migrations, prepare_observations};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
