#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pravasi-ai/pravasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod estimator;
pub mod gbdt;

pub use error::{ModelError, Result};
pub use estimator::{FittedModel, RegressionEstimator};
pub use gbdt::{GbdtConfig, GbdtModel, GbdtRegressor};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
