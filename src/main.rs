//! CLI entry point for the astro-biblio tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;
mod progress;

use app_config::load_default_file_config;
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");

    let loaded = load_default_file_config()?;
    if let Some(path) = loaded.path.as_deref() {
        debug!(path = %path.display(), found = loaded.config.is_some(), "Config file");
    }
    let config = loaded.config.unwrap_or_default();

    match &cli.command {
        Command::Countries(args) => {
            commands::run_countries_command(args, &config, cli.quiet).await
        }
        Command::Resolve(args) => commands::run_resolve_command(args, &config).await,
        Command::Years(args) => commands::run_years_command(args, &config),
    }
}
