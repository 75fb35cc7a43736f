use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::IngestError;

/// Append-only sink for classification report lines.
///
/// Implementations serialize writers: each call either lands as one complete
/// line or not at all, never interleaved with another caller's line.
pub trait ReportSink: Send + Sync {
    fn append_line(&self, line: &str) -> Result<(), IngestError>;
}

/// Appends lines to a file, opening it for each record.
#[derive(Debug)]
pub struct FileReportSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn append_line(&self, line: &str) -> Result<(), IngestError> {
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| IngestError::io(&self.path, e))?;
        file.write_all(record.as_bytes())
            .map_err(|e| IngestError::io(&self.path, e))
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ReportSink for MemoryReportSink {
    fn append_line(&self, line: &str) -> Result<(), IngestError> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
        Ok(())
    }
}
