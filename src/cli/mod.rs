//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coinwatch")]
#[command(author, version, about = "Crypto price indicators: live dashboard and daily reports")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the configuration)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Live terminal dashboard
    Dashboard(DashboardArgs),
    /// Generate the daily report
    Report(ReportArgs),
    /// Generate the daily report every day at the publish hour
    Schedule(ScheduleArgs),
    /// Print the current indicators once
    Indicators(IndicatorsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    /// Price file (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Seconds between reloads (overrides dashboard.refresh_secs)
    #[arg(long)]
    pub refresh_secs: Option<u64>,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Price file (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Report as of the end of this day (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output directory (overrides report.output_dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Publish even outside the configured publish hour
    #[arg(long)]
    pub force: bool,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(clap::Args)]
pub struct ScheduleArgs {
    /// Price file (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output directory (overrides report.output_dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct IndicatorsArgs {
    /// Price file (overrides data.path)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
