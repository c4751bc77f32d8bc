//! Command-line interface
//!
//! Operator tooling around the service: storage setup, category
//! administration, configuration checks and the HTTP server itself.

pub mod commands;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Helpdesk ticketing backend
#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./helpdesk.{yaml,toml,json} when present)
    #[arg(short, long, global = true, env = "HELPDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the storage directories
    Init,

    /// Run the HTTP API
    #[cfg(feature = "api")]
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Manage ticket categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Load and validate the configuration
    CheckConfig,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add a category
    Add {
        name: String,

        /// Create the category deactivated
        #[arg(long)]
        inactive: bool,
    },

    /// List categories
    List,

    /// Remove a category no ticket references
    Remove { id: String },
}
