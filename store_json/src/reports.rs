//! File-backed report repository.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use factcheck_store::{push_bounded, ReportStore, StoreError};
use factcheck_types::Report;
use tracing::{debug, warn};

/// File name of the store inside the data directory.
pub const REPORTS_FILE_NAME: &str = "reports.json";

/// Reports persisted as one JSON array, newest first.
///
/// The in-memory collection and the file are only touched under `reports`'
/// lock, so the file always mirrors the last successful append.
pub struct JsonReportStore {
    path: PathBuf,
    capacity: usize,
    reports: Mutex<VecDeque<Report>>,
}

impl JsonReportStore {
    /// Open the store at `{data_dir}/reports.json`, creating the directory.
    pub fn open_in_dir(data_dir: &Path, capacity: usize) -> Result<Self, StoreError> {
        Self::open(data_dir.join(REPORTS_FILE_NAME), capacity)
    }

    /// Open the store file at `path`.
    ///
    /// A missing, unreadable, or unparseable file yields an empty collection;
    /// only failure to create the parent directory is an error.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut reports = load_reports(&path);
        if reports.len() > capacity {
            warn!(
                "report store {} holds {} entries, keeping newest {}",
                path.display(),
                reports.len(),
                capacity
            );
            reports.truncate(capacity);
        }

        Ok(Self {
            path,
            capacity,
            reports: Mutex::new(reports),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full collection to a sibling temp file, flush it to disk,
    /// then rename it over the store file.
    fn persist(&self, reports: &VecDeque<Report>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(reports)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn load_reports(path: &Path) -> VecDeque<Report> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no report store at {}, starting empty", path.display());
            return VecDeque::new();
        }
        Err(e) => {
            warn!("failed to read report store {}: {e}, starting empty", path.display());
            return VecDeque::new();
        }
    };
    match serde_json::from_slice::<VecDeque<Report>>(&bytes) {
        Ok(reports) => reports,
        Err(e) => {
            warn!("report store {} is corrupted: {e}, starting empty", path.display());
            VecDeque::new()
        }
    }
}

impl ReportStore for JsonReportStore {
    fn append(&self, report: Report) -> Result<Report, StoreError> {
        let mut reports = self.reports.lock().map_err(|_| StoreError::Poisoned)?;
        let (stored, evicted) = push_bounded(&mut reports, self.capacity, report);

        if let Err(e) = self.persist(&reports) {
            reports.pop_front();
            if let Some(evicted) = evicted {
                reports.push_back(evicted);
            }
            return Err(e);
        }
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
