//! Fundamental types for the factcheck service.
//!
//! Shared by every other crate in the workspace: the persisted [`Report`]
//! record and the per-request verdict types returned by the verify endpoint.

pub mod report;
pub mod time;
pub mod verdict;

pub use report::{Report, ReportId, ANONYMOUS_REPORTER};
pub use verdict::{HeuristicVerdict, Verdict, VerdictResult, VerdictSource, SUGGESTED_CHECKS};
