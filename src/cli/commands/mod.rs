//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod inspect;
mod serve;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions, Settings};
use crate::dataset::{LoadOutcome, TableLoader};

#[derive(Parser)]
#[command(name = "crime-api")]
#[command(about = "Read-only HTTP API over Karnataka crime statistics")]
#[command(version)]
pub struct Cli {
    /// Crime data file to load (overrides config file)
    #[arg(long, short = 'd', global = true, env = "CRIME_API_DATA")]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data file and serve the HTTP API
    Serve {
        /// Address to bind: port, host, or host:port (default: from config, else 0.0.0.0:5000)
        #[arg(short, long, env = "CRIME_API_BIND")]
        bind: Option<String>,
    },

    /// Load the data file and print what the API would serve
    Inspect {
        /// Print a single JSON document instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Load the dataset described by `settings`.
fn load_dataset(settings: &Settings) -> LoadOutcome {
    TableLoader::new()
        .with_delimiter(settings.delimiter)
        .load(&settings.data_path)
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data: cli.data,
    };
    let settings = load_settings_with_options(options)
        .await
        .context("Invalid configuration")?;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Inspect { json } => inspect::cmd_inspect(&settings, json),
    }
}
