use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chainsnap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a token holder snapshot from exported Transfer event logs")]
#[command(
    long_about = "ChainSnap scans the CSV event log exports in ./chain-logs, keeps the ERC-721 \
                  Transfer events, and writes the receiving address and decimal token id of \
                  each one to snapshot-<timestamp>.csv."
)]
#[command(after_help = "EXAMPLES:\n  \
    chainsnap\n  \
    chainsnap --input-dir exports/mainnet --output-dir snapshots\n  \
    chainsnap --output-format json --quiet\n  \
    chainsnap --config chainsnap.toml --generate-config")]
pub struct Cli {
    /// Directory holding the exported log files (defaults to ./chain-logs)
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the snapshot file is written to (defaults to .)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for progress and results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only warnings, errors and the result)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List the files that would be processed without reading or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Write a sample configuration file to --config (or chainsnap.toml)")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.input_dir.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
