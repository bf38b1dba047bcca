use crate::config::InputConfig;
use crate::error::{ChainSnapError, Result};
use crate::scanner::file_filter::FileFilter;
use crate::ui::output::format_bytes;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct LogFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl LogFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            filename,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct LogScanner {
    filter: FileFilter,
}

impl LogScanner {
    pub fn new(config: &InputConfig) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(config)?,
        })
    }

    /// Lists the log files directly inside `root`, sorted by path.
    ///
    /// Subdirectories are never entered. The sort makes the processing order,
    /// and therefore the snapshot row order, independent of the platform's
    /// directory listing order.
    pub fn discover<P: AsRef<Path>>(&self, root: P) -> Result<Vec<LogFile>> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(ChainSnapError::InputDirectoryMissing {
                path: root_path.display().to_string(),
            });
        }

        let mut log_files = Vec::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };

            if let Some(log_file) = self.process_entry(&entry) {
                log_files.push(log_file);
            }
        }

        if log_files.is_empty() {
            return Err(ChainSnapError::NoLogFiles {
                directory: root_path.display().to_string(),
                pattern: self.filter.pattern().to_string(),
            });
        }

        log_files.sort_by(|a, b| a.path.cmp(&b.path));

        debug!(
            directory = %root_path.display(),
            files = log_files.len(),
            "discovered log files"
        );

        Ok(log_files)
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<LogFile> {
        if !entry.file_type().is_file() || !self.filter.is_log_file(entry.path()) {
            return None;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        Some(LogFile::new(entry.path().to_path_buf(), size))
    }

    pub fn get_statistics(&self, log_files: &[LogFile]) -> ScanStatistics {
        let (largest_file_size, largest_file_path) = log_files
            .iter()
            .max_by_key(|f| f.size)
            .map(|f| (f.size, f.path.clone()))
            .unwrap_or((0, PathBuf::new()));

        ScanStatistics {
            total_files: log_files.len(),
            total_size: log_files.iter().map(|f| f.size).sum(),
            largest_file_size,
            largest_file_path,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file_path: PathBuf,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Total files: {}\n  Total size: {}\n",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                "  Largest file: {} ({})\n",
                self.largest_file_path.display(),
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}
