use chainsnap::{ChainSnap, ChainSnapError, Cli, OutputFormatter, OutputMode, UserFriendlyError};
use clap::Parser;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    // Every outcome, a rejected configuration included, is reported on
    // stdout and ends with status 0.
    let chainsnap = match ChainSnap::from_cli(&cli) {
        Ok(chainsnap) => chainsnap,
        Err(e) => {
            print_startup_error(&e);
            return 0;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&chainsnap);
    }

    match chainsnap.run() {
        Ok(report) => chainsnap.output_formatter().print_run_summary(&report),
        Err(e) => chainsnap.handle_error(&e),
    }

    0
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "chainsnap.toml".to_string());

    match ChainSnap::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  chainsnap --config {}", config_path);
            0
        }
        Err(e) => {
            println!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                println!("Suggestion: {}", suggestion);
            }
            0
        }
    }
}

fn handle_dry_run(chainsnap: &ChainSnap) -> i32 {
    let formatter = chainsnap.output_formatter();
    let config = chainsnap.config();

    formatter.print_header("Dry run");
    formatter.info("DRY RUN MODE - No files will be read or written");

    formatter.info("Configuration that would be used:");
    println!("  Input directory: {}", config.input.directory.display());
    println!("  File pattern: {}", config.input.pattern);
    println!("  Output directory: {}", config.output.directory.display());
    println!(
        "  Snapshot name: {}-<{}>.csv",
        config.output.file_prefix, config.output.timestamp_format
    );

    formatter.print_separator();

    match chainsnap.discover_log_files() {
        Ok(log_files) => {
            formatter.info(&format!("{} CSV files would be processed:", log_files.len()));
            for log_file in &log_files {
                println!("  {} ({} bytes)", log_file.display_path(), log_file.size);
            }
            formatter.print_separator();
            formatter.success("Dry run completed successfully");
        }
        Err(e) => chainsnap.handle_error(&e),
    }

    0
}

fn print_startup_error(error: &ChainSnapError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "warn,chainsnap=debug",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
