//! helpdesk - Helpdesk ticketing backend
//!
//! This is the main entry point for the helpdesk CLI application.
//! It parses command-line arguments, loads configuration, sets up logging
//! and dispatches to the appropriate command handler.

use clap::Parser;
use helpdesk::cli::{Cli, OutputFormatter, commands};
use helpdesk::config::Config;
use helpdesk::error::{HelpdeskError, Result};
use std::process;
use tracing_subscriber::EnvFilter;

/// Main entry point for the helpdesk CLI
fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    // Execute the command and handle errors
    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Load configuration, initialize logging and run the command
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);
    tracing::debug!(
        "Loaded configuration: storage {}, {} token(s)",
        config.storage.path.display(),
        config.tokens.len()
    );

    commands::dispatch(cli.command, config, formatter)
}

/// Install the tracing subscriber
///
/// `--verbose` forces debug; otherwise `RUST_LOG` wins over `log.level`.
fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Report an error to the user
fn handle_error(error: &HelpdeskError, formatter: &OutputFormatter) {
    formatter.error(&error.to_string());
    tracing::debug!("Command failed: {error:?}");
}
