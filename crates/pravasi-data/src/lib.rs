#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pravasi-ai/pravasi/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;

pub use error::{DataError, Result};
pub use loader::{REQUIRED_COLUMNS, load_observations};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
