//! Report repository abstraction.
//!
//! Every storage backend (JSON file, in-memory for testing) implements
//! [`ReportStore`]. The rest of the codebase depends only on the trait.

pub mod error;
pub mod report;

pub use error::StoreError;
pub use report::{push_bounded, ReportStore, DEFAULT_MAX_REPORTS};
