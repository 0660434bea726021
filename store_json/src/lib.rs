//! JSON file storage backend for factcheck reports.
//!
//! Implements [`ReportStore`](factcheck_store::ReportStore) over a single
//! pretty-printed JSON array on disk. The whole collection is held in memory
//! and the file is rewritten on every append.

pub mod reports;

pub use reports::{JsonReportStore, REPORTS_FILE_NAME};
