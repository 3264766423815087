//! Configuration structures.

use chrono::{Local, NaiveDateTime, Utc};
use coinwatch_indicators::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Longest accepted report window, ten years.
pub const MAX_WINDOW_HOURS: i64 = 24 * 366 * 10;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Invalid configuration values.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("data.assets must list at least one asset")]
    NoAssets,

    #[error("data.assets contains '{0}' more than once")]
    DuplicateAsset(String),

    #[error("data.delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),

    #[error("{field} must be greater than 0")]
    ZeroValue { field: &'static str },

    #[error("report.publish_hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),

    #[error("report.window_hours must be at most {max}, got {0}", max = MAX_WINDOW_HOURS)]
    WindowTooLong(i64),
}

impl AppConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.data.assets.is_empty() {
            return Err(ConfigValidationError::NoAssets);
        }
        for (i, asset) in self.data.assets.iter().enumerate() {
            if self.data.assets[..i].contains(asset) {
                return Err(ConfigValidationError::DuplicateAsset(asset.clone()));
            }
        }
        if !self.data.delimiter.is_ascii() {
            return Err(ConfigValidationError::InvalidDelimiter(self.data.delimiter));
        }

        let positive = [
            ("indicators.rsi_period", self.indicators.rsi_period as u64),
            ("indicators.rolling_window", self.indicators.rolling_window as u64),
            ("dashboard.refresh_secs", self.dashboard.refresh_secs),
            ("dashboard.tick_ms", self.dashboard.tick_ms),
            ("report.window_hours", self.report.window_hours.max(0) as u64),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigValidationError::ZeroValue { field });
            }
        }

        if self.report.window_hours > MAX_WINDOW_HOURS {
            return Err(ConfigValidationError::WindowTooLong(self.report.window_hours));
        }

        if let Some(hour) = self.report.publish_hour {
            if hour > 23 {
                return Err(ConfigValidationError::InvalidHour(hour));
            }
        }

        Ok(())
    }

    /// Render the effective configuration.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "coinwatch".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Price feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Semicolon-delimited price file
    pub path: PathBuf,
    /// Asset for each price column, in file order
    pub assets: Vec<String>,
    pub delimiter: char,
}

impl DataSettings {
    /// Delimiter as a byte for the CSV reader.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b';'
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bitcoin_data_mult.csv"),
            assets: ["bitcoin", "ethereum", "binance_coin", "solana", "cardano", "chainlink"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            delimiter: ';',
        }
    }
}

/// Indicator parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub rolling_window: usize,
}

impl IndicatorSettings {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rsi_period: self.rsi_period,
            rolling_window: self.rolling_window,
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            rsi_period: engine.rsi_period,
            rolling_window: engine.rolling_window,
        }
    }
}

/// Live dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Seconds between data reloads
    pub refresh_secs: u64,
    /// Input poll interval
    pub tick_ms: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 60,
            tick_ms: 250,
        }
    }
}

/// Which wall clock defines "now" and calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    #[default]
    Local,
    Utc,
}

impl ClockSource {
    /// Current wall-clock time, comparable with feed timestamps.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            ClockSource::Local => Local::now().naive_local(),
            ClockSource::Utc => Utc::now().naive_utc(),
        }
    }
}

/// Static report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    /// Trailing window for descriptive statistics
    pub window_hours: i64,
    /// Only publish scheduled reports during this hour, if set
    pub publish_hour: Option<u32>,
    pub clock: ClockSource,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
            window_hours: 24,
            publish_hour: None,
            clock: ClockSource::Local,
        }
    }
}
