//! Error types for coinwatch.

use thiserror::Error;

/// Price source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("No data available")]
    NoDataAvailable,

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u64, message: String },

    #[error("Misaligned price matrix: {0}")]
    Misaligned(String),

    #[error("Read error: {0}")]
    Read(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_mentions_line() {
        let err = DataError::ParseError {
            line: 7,
            message: "bad price".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error at line 7: bad price");
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = IndicatorError::InsufficientData {
            required: 15,
            available: 3,
        };
        assert_eq!(err.to_string(), "Insufficient data: need 15 points, have 3");
    }
}
