//! Scribble - hand-drawn tic-tac-toe for the terminal.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use scribble::cli::{Cli, Command};
use scribble::{AppConfig, run_replay, tui};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.seed, cli.log_file);

    init_tracing(config.log_file())?;
    info!(seed = ?config.seed(), "Configuration ready");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => tui::run_tui(&config).await,
        Command::Replay { moves } => {
            println!("{}", run_replay(&config, &moves)?);
            Ok(())
        }
    }
}

/// Sends logs to a file so they never interfere with the terminal UI.
fn init_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
