//! Nullable report store: thread-safe in-memory storage for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use factcheck_store::{push_bounded, ReportStore, StoreError, DEFAULT_MAX_REPORTS};
use factcheck_types::Report;

/// An in-memory report store with the same ordering and eviction rules as
/// the file backend. Writes can be made to fail on demand.
pub struct NullReportStore {
    capacity: usize,
    reports: Mutex<VecDeque<Report>>,
    fail_writes: AtomicBool,
}

impl NullReportStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_REPORTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            reports: Mutex::new(VecDeque::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent appends fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for NullReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore for NullReportStore {
    fn append(&self, report: Report) -> Result<Report, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write failure".into()));
        }
        let mut reports = self.reports.lock().map_err(|_| StoreError::Poisoned)?;
        let (stored, _) = push_bounded(&mut reports, self.capacity, report);
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<Report>, StoreError> {
        let reports = self.reports.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(reports.iter().cloned().collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.reports.lock().map_err(|_| StoreError::Poisoned)?.len())
    }
}
