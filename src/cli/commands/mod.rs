//! CLI command implementations.

pub mod dashboard;
pub mod indicators;
pub mod report;
pub mod schedule;
pub mod validate;

use anyhow::{Context, Result};
use coinwatch_config::AppConfig;
use coinwatch_data::CsvPriceSource;
use coinwatch_indicators::IndicatorEngine;
use std::path::Path;

/// Price source for the configured file, or `data` when given.
pub(crate) fn price_source(config: &AppConfig, data: Option<&Path>) -> Result<CsvPriceSource> {
    let path = data.unwrap_or(config.data.path.as_path());
    let source = CsvPriceSource::new(path, config.data.assets.clone())
        .with_context(|| format!("Cannot open price file {}", path.display()))?
        .with_delimiter(config.data.delimiter_byte());
    Ok(source)
}

pub(crate) fn engine(config: &AppConfig) -> IndicatorEngine {
    IndicatorEngine::new(config.indicators.engine_config())
}
