//! Price feed loading.

mod clean;
mod csv_source;

pub use clean::{clean_price, PriceFormatError};
pub use csv_source::CsvPriceSource;

use coinwatch_core::error::DataError;
use coinwatch_core::traits::PriceSource;
use coinwatch_core::types::PriceMatrix;
use std::path::Path;

/// Load a semicolon-delimited price file for the given assets.
pub fn load_prices(path: &Path, assets: &[String]) -> Result<PriceMatrix, DataError> {
    let source = CsvPriceSource::new(path, assets.to_vec())?;
    source.load()
}
