//! Price indicators over aligned crypto price series.
//!
//! This crate provides the indicator engine:
//! - Volatility (sample standard deviation of returns) and maximum drawdown
//! - Momentum (RSI over simple rolling means of gains and losses)
//! - Rolling mean
//! - Pairwise return correlation
//! - Calendar-day and trailing window summaries
//!
//! Every function is pure. Positions or values that cannot be computed are
//! reported as `NaN` (series and scalars) or `None` (window summaries).

pub mod correlation;
pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod simd;
pub mod volatility;
pub mod window;

pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use engine::{AssetIndicators, EngineConfig, IndicatorEngine, IndicatorSnapshot};
pub use momentum::Rsi;
pub use moving_average::RollingMean;
pub use volatility::{pct_change, MaxDrawdown, Volatility};
pub use window::{AssetWindowSummary, WindowStatus, WindowSummary};
