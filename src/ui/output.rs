use crate::error::{ChainSnapError, Severity, UserFriendlyError};
use crate::extractor::{RunReport, SnapshotOutcome};
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

const SEPARATOR_WIDTH: usize = 60;

/// What a message is, which decides how it looks and whether `-q`/`-v` hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Start,
    Info,
    Success,
    Suggestion,
    Debug,
    Warning,
    Error,
}

impl Level {
    /// `None` for messages that are shown even in quiet mode.
    fn min_verbosity(self) -> Option<u8> {
        match self {
            Level::Warning | Level::Error => None,
            Level::Debug => Some(1),
            _ => Some(0),
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Level::Start => "STARTING",
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Suggestion => "SUGGESTION",
            Level::Debug => "DEBUG",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    fn json_name(self) -> &'static str {
        match self {
            Level::Start => "operation_start",
            _ => self.label(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Level::Start => "start",
            Level::Info => "info",
            Level::Success => "success",
            Level::Suggestion => "suggestion",
            Level::Debug => "debug",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// The run's reporting channel. Everything goes to stdout so a caller can
/// follow a run by reading a single stream.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = mode == OutputMode::Human
            && !quiet
            && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Start, operation);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// One line per input file, `Processing file i/n: name`.
    pub fn file_progress(&self, index: usize, total: usize, filename: &str) {
        if !self.shows(Level::Info) {
            return;
        }

        match self.mode {
            OutputMode::Json => self.print_json(&serde_json::json!({
                "type": "progress",
                "file": filename,
                "index": index,
                "total": total
            })),
            _ => println!("Processing file {}/{}: {}", index, total, filename),
        }
    }

    /// Reports a per-file or per-row diagnostic at its own severity.
    pub fn report_issue(&self, issue: &ChainSnapError) {
        match issue.severity() {
            Severity::Warning => self.warning(&issue.user_message()),
            Severity::Error => self.error(&issue.user_message()),
        }
    }

    pub fn print_user_friendly_error(&self, error: &ChainSnapError) {
        self.report_issue(error);
        if let Some(suggestion) = error.suggestion() {
            self.emit(Level::Suggestion, &suggestion);
        }
    }

    pub fn print_run_summary(&self, report: &RunReport) {
        if self.mode == OutputMode::Json {
            match serde_json::to_string_pretty(report) {
                Ok(json) => println!("{}", json),
                Err(e) => self.error(&format!("Could not serialize run report: {}", e)),
            }
            return;
        }

        match &report.snapshot {
            SnapshotOutcome::Written { path, records } => {
                self.print_completion("Processing complete!");
                self.print_stat("Total records extracted", self.highlight(records));
                self.print_stat("Output file", self.highlight(path.display()));
            }
            SnapshotOutcome::NoMatches => {
                self.print_completion("No matching records found across all files");
            }
            // Already reported when the write failed.
            SnapshotOutcome::WriteFailed { .. } => return,
        }

        if self.quiet {
            return;
        }

        self.print_stat(
            "Files processed",
            format!("{}/{}", report.files_processed, report.files_found),
        );
        if report.files_skipped > 0 {
            self.print_stat("Files skipped", report.files_skipped);
        }
        if report.files_failed > 0 {
            self.print_stat("Files failed", report.files_failed);
        }
        self.print_stat("Rows scanned", report.rows_scanned);
        self.print_stat("Time taken", format_duration(report.duration));
        if !report.issues.is_empty() {
            self.print_stat("Issues", report.issues.len());
        }
        if self.mode == OutputMode::Human {
            self.print_separator();
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Json => self.print_json(&serde_json::json!({
                "type": "header",
                "title": title
            })),
            OutputMode::Human if self.use_colors => {
                println!("\n{}\n", style(title).bold().cyan())
            }
            _ => println!("=== {} ===", title),
        }
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(SEPARATOR_WIDTH)).dim());
        } else {
            println!("{}", "-".repeat(SEPARATOR_WIDTH));
        }
    }

    fn shows(&self, level: Level) -> bool {
        match level.min_verbosity() {
            None => true,
            Some(min) => !self.quiet && self.verbose_level >= min,
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.shows(level) {
            return;
        }

        match self.mode {
            OutputMode::Human => println!("{}", self.human_line(level, message)),
            OutputMode::Plain => println!("{}: {}", level.tag(), message),
            OutputMode::Json => self.print_json(&serde_json::json!({
                "type": "message",
                "level": level.json_name(),
                "message": message,
                "timestamp": chrono::Local::now().to_rfc3339()
            })),
        }
    }

    fn human_line(&self, level: Level, message: &str) -> String {
        if !self.use_colors {
            return match level {
                Level::Start => format!("> {}", message),
                Level::Debug => format!("  DEBUG: {}", message),
                Level::Info => format!("Info: {}", message),
                Level::Success => format!("Success: {}", message),
                Level::Suggestion => format!("Suggestion: {}", message),
                Level::Warning => format!("Warning: {}", message),
                Level::Error => format!("Error: {}", message),
            };
        }

        match level {
            Level::Start => format!("{}{}", ROCKET, style(message).bold()),
            Level::Debug => format!("  {}", style(message).dim()),
            Level::Info => format!("{}{}", INFO, style(message).cyan()),
            Level::Success => format!("{}{}", CHECKMARK, style(message).green().bold()),
            Level::Suggestion => {
                format!("{}{}", INFO, style(format!("Suggestion: {}", message)).cyan())
            }
            Level::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
            Level::Error => format!("{}{}", CROSS, style(message).red().bold()),
        }
    }

    fn print_json(&self, value: &serde_json::Value) {
        println!("{}", value);
    }

    fn print_completion(&self, headline: &str) {
        match self.mode {
            OutputMode::Plain => println!("COMPLETED: {}", headline),
            _ if self.use_colors => {
                println!();
                self.print_separator();
                println!("{} {}", style(headline).green().bold(), CHECKMARK);
            }
            _ => {
                println!();
                self.print_separator();
                println!("{}", headline);
            }
        }
    }

    fn print_stat(&self, label: &str, value: impl std::fmt::Display) {
        match self.mode {
            OutputMode::Plain => println!("{}: {}", label, value),
            _ => println!("  {}: {}", label, value),
        }
    }

    fn highlight(&self, value: impl std::fmt::Display) -> String {
        if self.use_colors {
            style(value.to_string()).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit + 1 < UNITS.len() {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

pub(crate) fn format_duration(duration: Duration) -> String {
    match duration.as_secs() {
        0 => format!("{}ms", duration.as_millis()),
        secs if secs < 60 => format!("{}s", secs),
        secs => format!("{}m {}s", secs / 60, secs % 60),
    }
}
