//! Core types and traits for coinwatch.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceMatrix, PriceSeries)
//! - Core traits for indicators and price sources
//! - Error types for loading and indicator warm-up

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, IndicatorError};
pub use traits::*;
pub use types::*;
