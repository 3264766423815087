//! Crypto price indicator CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use coinwatch_config::load_config;
use coinwatch_monitor::{setup_logging, LogOptions};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config);

    // Setup logging
    let logging = loaded.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    let level = cli
        .log_level
        .as_ref()
        .map(|l| l.as_str())
        .unwrap_or(logging.level.as_str());
    let _guard = setup_logging(LogOptions {
        level,
        json: cli.json_logs || logging.is_json(),
        file: logging.file.as_deref().map(Path::new),
        // The dashboard owns the terminal
        console: !matches!(cli.command, Commands::Dashboard(_)),
    });

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config, loaded).await;
    }

    let config = loaded
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    config.validate().context("Invalid configuration")?;

    // Execute command
    match cli.command {
        Commands::Dashboard(args) => cli::commands::dashboard::run(args, config).await,
        Commands::Report(args) => cli::commands::report::run(args, config).await,
        Commands::Schedule(args) => cli::commands::schedule::run(args, config).await,
        Commands::Indicators(args) => cli::commands::indicators::run(args, config).await,
        Commands::ValidateConfig => Ok(()),
    }
}
