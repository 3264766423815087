//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, ClockSource, ConfigValidationError, DashboardSettings, DataSettings,
    IndicatorSettings, LoggingConfig, ReportSettings, MAX_WINDOW_HOURS,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables use the `COINWATCH` prefix with `__` between
/// section and key, e.g. `COINWATCH__DASHBOARD__REFRESH_SECS=30`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("COINWATCH")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("data.assets")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
