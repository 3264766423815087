//! Core data types.

mod matrix;
mod series;

pub use matrix::{hours_before, PriceMatrix};
pub use series::PriceSeries;

/// Timestamp format used by the price feed (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
