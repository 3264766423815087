//! Semicolon-delimited CSV price source.

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use coinwatch_core::error::DataError;
use coinwatch_core::traits::PriceSource;
use coinwatch_core::types::{PriceMatrix, TIMESTAMP_FORMAT};

use crate::clean::clean_price;

/// One parsed row before gap filling.
struct RawRow {
    timestamp: NaiveDateTime,
    prices: Vec<Option<f64>>,
}

/// CSV price source.
///
/// Rows look like `timestamp;price1;...;priceN` with no header. The asset
/// list is configuration; column `i + 1` holds the price of `assets[i]`.
pub struct CsvPriceSource {
    path: PathBuf,
    assets: Vec<String>,
    delimiter: u8,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(path: impl AsRef<Path>, assets: Vec<String>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            assets,
            delimiter: b';',
        })
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Configured assets.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Parse rows from any reader, then order and gap-fill them.
    pub fn parse<R: Read>(&self, reader: R) -> Result<PriceMatrix, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataError::ParseError {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                message: e.to_string(),
            })?;
            if let Some(row) = self.parse_record(&record)? {
                rows.push(row);
            }
        }

        // Sort by timestamp, keeping file order for equal stamps
        rows.sort_by_key(|row| row.timestamp);

        self.forward_fill(rows)
    }

    fn parse_record(&self, record: &StringRecord) -> Result<Option<RawRow>, DataError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|field| field.trim().is_empty()) {
            return Ok(None);
        }

        let stamp = record.get(0).unwrap_or_default().trim();
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|e| {
            DataError::ParseError {
                line,
                message: format!("invalid timestamp '{}': {}", stamp, e),
            }
        })?;

        let mut prices = vec![None; self.assets.len()];
        for (i, field) in record.iter().skip(1).enumerate() {
            if i >= self.assets.len() {
                if field.trim().is_empty() {
                    continue;
                }
                return Err(DataError::ParseError {
                    line,
                    message: format!(
                        "{} price columns for {} configured assets",
                        record.len() - 1,
                        self.assets.len()
                    ),
                });
            }
            prices[i] = clean_price(field).map_err(|e| DataError::ParseError {
                line,
                message: format!("{} ({})", e, self.assets[i]),
            })?;
        }

        Ok(Some(RawRow { timestamp, prices }))
    }

    /// Carry the last seen price forward into gaps.
    ///
    /// Leading rows where some asset has never had a price are dropped so
    /// every remaining row is fully defined.
    fn forward_fill(&self, rows: Vec<RawRow>) -> Result<PriceMatrix, DataError> {
        let n = self.assets.len();
        let mut last: Vec<Option<f64>> = vec![None; n];
        let mut timestamps = Vec::with_capacity(rows.len());
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); n];
        let mut dropped = 0usize;
        let mut filled = 0usize;

        for row in rows {
            for (slot, value) in last.iter_mut().zip(row.prices) {
                match value {
                    Some(price) => *slot = Some(price),
                    None if slot.is_some() => filled += 1,
                    None => {}
                }
            }

            if last.iter().all(Option::is_some) {
                timestamps.push(row.timestamp);
                for (column, value) in columns.iter_mut().zip(&last) {
                    column.push(value.unwrap_or(f64::NAN));
                }
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!(dropped, "Dropped leading rows with no prior price for some asset");
        }
        if filled > 0 {
            debug!(filled, "Forward-filled missing prices");
        }

        PriceMatrix::new(self.assets.clone(), timestamps, columns)
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self) -> Result<PriceMatrix, DataError> {
        let file = File::open(&self.path).map_err(|e| DataError::Read(e.to_string()))?;
        let matrix = self.parse(file)?;

        if matrix.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        info!(
            path = %self.path.display(),
            rows = matrix.len(),
            assets = matrix.assets().len(),
            "Loaded price matrix"
        );
        Ok(matrix)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(assets: &[&str]) -> CsvPriceSource {
        CsvPriceSource {
            path: PathBuf::new(),
            assets: assets.iter().map(|a| a.to_string()).collect(),
            delimiter: b';',
        }
    }

    #[test]
    fn test_parse_locale_prices() {
        let data = "2024-03-01 10:00:00;67\u{202F}123,45;3\u{202F}456,78\n\
                    2024-03-01 10:05:00;67\u{202F}200,00;3\u{202F}460,10\n";
        let matrix = source(&["bitcoin", "ethereum"]).parse(data.as_bytes()).unwrap();

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.prices("bitcoin").unwrap(), &[67123.45, 67200.0]);
        assert_eq!(matrix.prices("ethereum").unwrap(), &[3456.78, 3460.10]);
    }

    #[test]
    fn test_forward_fill_gaps() {
        let data = "2024-03-01 10:00:00;100,0;10,0\n\
                    2024-03-01 10:05:00;;11,0\n\
                    2024-03-01 10:10:00;102,0\n";
        let matrix = source(&["bitcoin", "ethereum"]).parse(data.as_bytes()).unwrap();

        assert_eq!(matrix.prices("bitcoin").unwrap(), &[100.0, 100.0, 102.0]);
        assert_eq!(matrix.prices("ethereum").unwrap(), &[10.0, 11.0, 11.0]);
    }

    #[test]
    fn test_leading_gaps_are_dropped() {
        let data = "2024-03-01 10:00:00;100,0;\n\
                    2024-03-01 10:05:00;101,0;10,0\n";
        let matrix = source(&["bitcoin", "ethereum"]).parse(data.as_bytes()).unwrap();

        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.prices("bitcoin").unwrap(), &[101.0]);
    }

    #[test]
    fn test_rows_are_sorted() {
        let data = "2024-03-01 10:05:00;2,0\n\
                    2024-03-01 10:00:00;1,0\n";
        let matrix = source(&["bitcoin"]).parse(data.as_bytes()).unwrap();

        assert_eq!(matrix.prices("bitcoin").unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let data = "2024-03-01 10:00:00;1,0\n\
                    yesterday;2,0\n";
        let err = source(&["bitcoin"]).parse(data.as_bytes()).unwrap_err();

        match err {
            DataError::ParseError { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("yesterday"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_price_is_error() {
        let data = "2024-03-01 10:00:00;abc\n";
        let err = source(&["bitcoin"]).parse(data.as_bytes()).unwrap_err();

        match err {
            DataError::ParseError { line, message } => {
                assert_eq!(line, 1);
                assert_eq!(message, "invalid price 'abc' (bitcoin)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_columns_are_error() {
        let data = "2024-03-01 10:00:00;1,0;2,0\n";
        assert!(source(&["bitcoin"]).parse(data.as_bytes()).is_err());
    }

    #[test]
    fn test_trailing_delimiter_is_tolerated() {
        let data = "2024-03-01 10:00:00;1,0;\n";
        let matrix = source(&["bitcoin"]).parse(data.as_bytes()).unwrap();
        assert_eq!(matrix.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = CsvPriceSource::new("/definitely/not/here.csv", vec![]);
        assert!(matches!(result, Err(DataError::NotFound(_))));
    }
}
