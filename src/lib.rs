pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, OutputConfig};
pub use error::{ChainSnapError, Result, Severity, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractedRecord, ExtractionProgress, FileExtraction, FileOutcome, RecordExtractor, RunReport,
    SnapshotOutcome, SnapshotWriter, TRANSFER_EVENT_SIGNATURE,
};
pub use scanner::{LogFile, LogScanner};
pub use ui::{OutputFormatter, OutputMode};

use chrono::Local;
use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

/// Main library interface: one snapshot run over a directory of log exports.
pub struct ChainSnap {
    config: Config,
    output_formatter: OutputFormatter,
}

impl ChainSnap {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    /// Create ChainSnap instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Scans every log file and writes the snapshot, stamped with the local
    /// time at which scanning finished.
    ///
    /// Only a missing input directory or an empty one is returned as an
    /// error. Problems with individual files, rows or the final write are
    /// reported as they happen and recorded in the [`RunReport`].
    pub fn run(&self) -> Result<RunReport> {
        self.execute(|| snapshot_timestamp(&self.config.output.timestamp_format))
    }

    /// Same as [`ChainSnap::run`] with a fixed snapshot timestamp.
    pub fn run_with_timestamp(&self, timestamp: &str) -> Result<RunReport> {
        self.execute(|| timestamp.to_string())
    }

    fn execute<F>(&self, timestamp: F) -> Result<RunReport>
    where
        F: FnOnce() -> String,
    {
        let started_at = Local::now();
        self.output_formatter
            .start_operation("Starting blockchain log processing");

        let log_files = self.discover_log_files()?;
        self.output_formatter
            .info(&format!("Found {} CSV files to process", log_files.len()));

        let progress = self.extract_records(&log_files);
        let snapshot = self.write_snapshot(&progress.records, &timestamp());

        let report = RunReport::from_progress(
            &self.config.input.directory,
            &progress,
            snapshot,
            started_at,
        );

        info!(
            files = report.files_found,
            records = report.records_extracted,
            issues = report.issues.len(),
            "run finished"
        );

        Ok(report)
    }

    /// Lists the files a run would process, without opening any of them.
    pub fn discover_log_files(&self) -> Result<Vec<LogFile>> {
        let scanner = LogScanner::new(&self.config.input)?;
        let log_files = scanner.discover(&self.config.input.directory)?;

        let stats = scanner.get_statistics(&log_files);
        self.output_formatter.debug(&stats.display_summary());

        Ok(log_files)
    }

    fn extract_records(&self, log_files: &[LogFile]) -> ExtractionProgress {
        let extractor = RecordExtractor::new();
        let mut progress = ExtractionProgress::new(log_files.len());

        for (position, log_file) in log_files.iter().enumerate() {
            self.output_formatter
                .file_progress(position + 1, log_files.len(), &log_file.filename);

            let extraction = extractor.extract_file(&log_file.path);
            for issue in &extraction.issues {
                self.output_formatter.report_issue(issue);
            }
            let (rows_scanned, records) = (extraction.rows_scanned, extraction.records.len());

            progress.absorb(extraction);
            self.output_formatter.debug(&format!(
                "{}: {} rows scanned, {} records extracted ({:.0}% of files done)",
                log_file.filename,
                rows_scanned,
                records,
                progress.percentage()
            ));
        }

        progress
    }

    fn write_snapshot(&self, records: &[ExtractedRecord], timestamp: &str) -> SnapshotOutcome {
        if records.is_empty() {
            return SnapshotOutcome::NoMatches;
        }

        let writer = SnapshotWriter::new(&self.config.output);
        match writer.write(records, timestamp) {
            Ok(path) => {
                self.output_formatter.success(&format!(
                    "Successfully wrote {} records to {}",
                    records.len(),
                    path.display()
                ));
                SnapshotOutcome::Written {
                    path,
                    records: records.len(),
                }
            }
            Err(e) => {
                self.output_formatter.print_user_friendly_error(&e);
                SnapshotOutcome::WriteFailed {
                    message: e.user_message(),
                }
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ChainSnapError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Formats the current local time, falling back to the default layout when
/// `format` contains a specifier chrono cannot render.
fn snapshot_timestamp(format: &str) -> String {
    let now = Local::now();
    let mut timestamp = String::new();
    if write!(timestamp, "{}", now.format(format)).is_err() {
        warn!(format, "invalid timestamp format, using the default");
        timestamp = now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
    }
    timestamp
}
