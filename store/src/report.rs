//! Report storage trait and the bounded newest-first insertion rule.

use std::collections::VecDeque;

use factcheck_types::Report;

use crate::StoreError;

/// Default cap on the number of retained reports.
pub const DEFAULT_MAX_REPORTS: usize = 1000;

/// Owner of the report collection.
///
/// Reports are kept newest first. Implementations serialize mutation so
/// concurrent appends never interleave.
pub trait ReportStore: Send + Sync {
    /// Store a report at the front of the collection, evicting the oldest
    /// report once the capacity is exceeded. Returns the report as stored.
    fn append(&self, report: Report) -> Result<Report, StoreError>;

    /// All reports, newest first.
    fn list(&self) -> Result<Vec<Report>, StoreError>;

    /// Number of stored reports.
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Insert `report` at the front of `reports`, keeping at most `capacity`.
///
/// Ids must strictly decrease from front to back, so an id that does not
/// exceed the current newest id is bumped to `newest + 1`. Returns the stored
/// report and the evicted one, if any.
pub fn push_bounded(
    reports: &mut VecDeque<Report>,
    capacity: usize,
    mut report: Report,
) -> (Report, Option<Report>) {
    if let Some(newest) = reports.front() {
        if report.id <= newest.id {
            report.id = newest.id.next();
        }
    }
    reports.push_front(report.clone());
    let evicted = if reports.len() > capacity {
        reports.pop_back()
    } else {
        None
    };
    (report, evicted)
}
