//! Locale-specific number cleaning.

use thiserror::Error;

/// Characters used as thousands separators in the feed.
const GROUP_SEPARATORS: [char; 3] = ['\u{202F}', '\u{00A0}', ' '];

/// Why a price cell was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceFormatError {
    #[error("invalid price '{0}'")]
    Invalid(String),

    #[error("price out of range '{0}'")]
    OutOfRange(String),
}

/// Parse a price written with a decimal comma and optional group separators.
///
/// `"67\u{202F}123,45"` parses as `67123.45`. Empty cells are gaps and
/// return `Ok(None)`. Negative and non-finite values are rejected.
pub fn clean_price(raw: &str) -> Result<Option<f64>, PriceFormatError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !GROUP_SEPARATORS.contains(c))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Ok(None);
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| PriceFormatError::Invalid(raw.trim().to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PriceFormatError::OutOfRange(raw.trim().to_string()));
    }

    Ok(Some(value))
}
