//! Indicator engine producing one snapshot per refresh cycle.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use coinwatch_core::traits::{Indicator, ScalarIndicator};
use coinwatch_core::types::{PriceMatrix, PriceSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::momentum::Rsi;
use crate::moving_average::RollingMean;
use crate::volatility::{MaxDrawdown, Volatility};
use crate::window::WindowSummary;

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RSI lookback
    pub rsi_period: usize,
    /// Rolling mean window
    pub rolling_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: Rsi::DEFAULT_PERIOD,
            rolling_window: RollingMean::DEFAULT_WINDOW,
        }
    }
}

/// Indicators of one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetIndicators {
    pub asset: String,
    pub last_price: Option<f64>,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub latest_rsi: f64,
    /// RSI, aligned with the price axis
    pub rsi: Vec<f64>,
    /// Rolling mean, aligned with the price axis
    pub rolling_mean: Vec<f64>,
}

/// Everything one refresh cycle shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub generated_at: NaiveDateTime,
    pub config: EngineConfig,
    /// Price data the indicators were computed from
    pub prices: PriceMatrix,
    pub assets: Vec<AssetIndicators>,
    pub correlation: CorrelationMatrix,
    pub today: WindowSummary,
    pub yesterday: WindowSummary,
}

impl IndicatorSnapshot {
    /// Indicators of one asset.
    pub fn asset(&self, name: &str) -> Option<&AssetIndicators> {
        self.assets.iter().find(|a| a.asset == name)
    }

    pub fn volatility_by_asset(&self) -> BTreeMap<String, f64> {
        self.by_asset(|a| a.volatility_pct)
    }

    pub fn max_drawdown_by_asset(&self) -> BTreeMap<String, f64> {
        self.by_asset(|a| a.max_drawdown_pct)
    }

    pub fn latest_rsi_by_asset(&self) -> BTreeMap<String, f64> {
        self.by_asset(|a| a.latest_rsi)
    }

    fn by_asset(&self, f: impl Fn(&AssetIndicators) -> f64) -> BTreeMap<String, f64> {
        self.assets.iter().map(|a| (a.asset.clone(), f(a))).collect()
    }
}

/// Stateless indicator engine.
///
/// Holds only parameters; every call to [`snapshot`](Self::snapshot)
/// recomputes everything from the matrix it is handed.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: EngineConfig,
    rsi: Rsi,
    rolling_mean: RollingMean,
    volatility: Volatility,
    drawdown: MaxDrawdown,
}

impl IndicatorEngine {
    /// Create an engine. Panics if a period is zero.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rsi: Rsi::new(config.rsi_period),
            rolling_mean: RollingMean::new(config.rolling_window),
            volatility: Volatility::new(),
            drawdown: MaxDrawdown::new(),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Indicators of a single series.
    pub fn asset_indicators(&self, series: PriceSeries<'_>) -> AssetIndicators {
        let prices = series.prices();
        if let Err(e) = self.rsi.validate_data(prices) {
            debug!(asset = series.asset(), error = %e, "RSI not yet defined");
        }
        let rsi = self.rsi.calculate(prices);

        AssetIndicators {
            asset: series.asset().to_string(),
            last_price: series.last().map(|(_, p)| p),
            volatility_pct: self.volatility.compute(prices),
            max_drawdown_pct: self.drawdown.compute(prices),
            latest_rsi: Rsi::latest(&rsi),
            rolling_mean: self.rolling_mean.calculate(prices),
            rsi,
        }
    }

    /// Compute the full snapshot for `matrix` as of `now`.
    pub fn snapshot(&self, matrix: PriceMatrix, now: NaiveDateTime) -> IndicatorSnapshot {
        let assets: Vec<AssetIndicators> = matrix
            .iter_series()
            .map(|series| self.asset_indicators(series))
            .collect();
        let correlation = correlation_matrix(&matrix);
        let today = WindowSummary::today(&matrix, now);
        let yesterday = WindowSummary::yesterday(&matrix, now);

        debug!(
            assets = assets.len(),
            samples = matrix.len(),
            today_samples = today.samples,
            "Computed indicator snapshot"
        );

        IndicatorSnapshot {
            generated_at: now,
            config: self.config,
            prices: matrix,
            assets,
            correlation,
            today,
            yesterday,
        }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
