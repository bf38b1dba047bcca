use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainSnapError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Directory {path} not found")]
    InputDirectoryMissing { path: String },

    #[error("No files matching {pattern} found in {directory}")]
    NoLogFiles { directory: String, pattern: String },

    #[error("File not found {path}")]
    FileNotFound { path: String },

    #[error("Error processing {path}: {message}")]
    FileProcessing { path: String, message: String },

    #[error("Empty file {path}")]
    EmptyFile { path: String },

    #[error("Missing required columns in {path}: {}", columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },

    #[error("Row {row} in {path} has insufficient columns")]
    ShortRow { path: String, row: usize },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// How loudly a diagnostic should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
    fn severity(&self) -> Severity;
}

impl UserFriendlyError for ChainSnapError {
    fn user_message(&self) -> String {
        match self {
            ChainSnapError::InputDirectoryMissing { path } => {
                format!("Directory {} not found", path)
            }
            ChainSnapError::NoLogFiles { directory, pattern } => {
                format!("No files matching {} found in {}", pattern, directory)
            }
            ChainSnapError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ChainSnapError::MissingColumns { path, columns } => {
                format!(
                    "Missing required columns in {}: {}",
                    path,
                    columns.join(", ")
                )
            }
            ChainSnapError::OutputWrite { path, source } => {
                format!("Error writing output file {}: {}", path, source)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ChainSnapError::InputDirectoryMissing { .. } => Some(
                "Download the event log exports into the input directory, or point --input-dir at them.".to_string()
            ),
            ChainSnapError::NoLogFiles { .. } => Some(
                "Check that the exported logs use the expected file extension.".to_string()
            ),
            ChainSnapError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all values are valid.".to_string()
            ),
            ChainSnapError::OutputWrite { .. } => Some(
                "Ensure the output directory exists and is writable.".to_string()
            ),
            _ => None,
        }
    }

    fn severity(&self) -> Severity {
        match self {
            ChainSnapError::EmptyFile { .. }
            | ChainSnapError::MissingColumns { .. }
            | ChainSnapError::ShortRow { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<glob::PatternError> for ChainSnapError {
    fn from(error: glob::PatternError) -> Self {
        ChainSnapError::Config {
            message: format!("Invalid file pattern: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChainSnapError>;
