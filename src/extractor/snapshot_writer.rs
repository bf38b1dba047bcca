use crate::config::OutputConfig;
use crate::error::{ChainSnapError, Result};
use crate::extractor::{ExtractedRecord, ExtractionProgress};
use chrono::{DateTime, Local};
use csv::{Terminator, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const SNAPSHOT_HEADER: [&str; 2] = ["address", "tokenId"];

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SnapshotOutcome {
    Written { path: PathBuf, records: usize },
    NoMatches,
    WriteFailed { message: String },
}

impl SnapshotOutcome {
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            SnapshotOutcome::Written { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input_directory: PathBuf,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub rows_scanned: usize,
    pub records_extracted: usize,
    pub snapshot: SnapshotOutcome,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub issues: Vec<String>,
}

impl RunReport {
    pub fn from_progress(
        input_directory: &Path,
        progress: &ExtractionProgress,
        snapshot: SnapshotOutcome,
        started_at: DateTime<Local>,
    ) -> Self {
        let mut issues = progress.errors.clone();
        if let SnapshotOutcome::WriteFailed { ref message } = snapshot {
            issues.push(message.clone());
        }

        Self {
            input_directory: input_directory.to_path_buf(),
            files_found: progress.total_files,
            files_processed: progress.files_processed,
            files_skipped: progress.files_skipped,
            files_failed: progress.files_failed,
            rows_scanned: progress.rows_scanned,
            records_extracted: progress.records.len(),
            snapshot,
            started_at,
            duration: progress.elapsed(),
            issues,
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.snapshot.output_path()
    }
}

pub struct SnapshotWriter {
    output_directory: PathBuf,
    file_prefix: String,
}

impl SnapshotWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            output_directory: config.directory.clone(),
            file_prefix: config.file_prefix.clone(),
        }
    }

    pub fn snapshot_path(&self, timestamp: &str) -> PathBuf {
        self.output_directory
            .join(format!("{}-{}.csv", self.file_prefix, timestamp))
    }

    /// Writes `records` in order under a fixed `address,tokenId` header and
    /// returns the new file's path.
    ///
    /// A failed write leaves no partial snapshot behind.
    pub fn write(&self, records: &[ExtractedRecord], timestamp: &str) -> Result<PathBuf> {
        let path = self.snapshot_path(timestamp);

        match write_records(&path, records) {
            Ok(()) => {
                debug!(path = %path.display(), records = records.len(), "snapshot written");
                Ok(path)
            }
            Err(source) => {
                self.cleanup_on_error(&path);
                Err(ChainSnapError::OutputWrite {
                    path: path.display().to_string(),
                    source,
                })
            }
        }
    }

    fn cleanup_on_error(&self, path: &Path) {
        if path.is_file() {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove partial snapshot");
            }
        }
    }
}

fn write_records(path: &Path, records: &[ExtractedRecord]) -> std::result::Result<(), csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)?;

    writer.write_record(SNAPSHOT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
