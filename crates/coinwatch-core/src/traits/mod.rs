//! Core traits.

mod indicator;
mod price_source;

pub use indicator::{Indicator, ScalarIndicator};
pub use price_source::PriceSource;
