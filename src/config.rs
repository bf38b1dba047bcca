use crate::error::{ChainSnapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub timestamp_format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("chain-logs"),
            pattern: "*.csv".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "snapshot".to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ChainSnapError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ChainSnapError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ChainSnapError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    /// Only an explicitly named file is read; without one the built-in
    /// defaults apply unchanged.
    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.input.directory = input_dir.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ChainSnapError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ChainSnapError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.directory.as_os_str().is_empty() {
            return Err(ChainSnapError::Config {
                message: "Input directory must not be empty".to_string(),
            });
        }

        glob::Pattern::new(&self.input.pattern)?;

        if self.output.directory.as_os_str().is_empty() {
            return Err(ChainSnapError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        if self.output.file_prefix.is_empty() {
            return Err(ChainSnapError::Config {
                message: "Output file prefix must not be empty".to_string(),
            });
        }

        if self.output.file_prefix.contains(['/', '\\']) {
            return Err(ChainSnapError::Config {
                message: format!(
                    "Output file prefix cannot contain path separators: {}",
                    self.output.file_prefix
                ),
            });
        }

        self.validate_timestamp_format()
    }

    fn validate_timestamp_format(&self) -> Result<()> {
        let format = &self.output.timestamp_format;
        if format.is_empty() {
            return Err(ChainSnapError::Config {
                message: "Timestamp format must not be empty".to_string(),
            });
        }

        // Unknown specifiers surface as a formatting error, not a panic.
        let sample = chrono::Local::now();
        let mut rendered = String::new();
        if std::fmt::write(&mut rendered, format_args!("{}", sample.format(format))).is_err() {
            return Err(ChainSnapError::Config {
                message: format!("Invalid timestamp format: {}", format),
            });
        }

        if rendered.contains(['/', '\\']) {
            return Err(ChainSnapError::Config {
                message: format!(
                    "Timestamp format would put a path separator in the file name: {}",
                    format
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
