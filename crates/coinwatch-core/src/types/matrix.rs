//! Aligned multi-asset price data.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::PriceSeries;
use crate::error::DataError;

/// Named collection of price series sharing one timestamp axis.
///
/// Columns are stored in configured asset order. Every column has the same
/// length as the timestamp axis and timestamps never decrease; both are
/// checked by [`PriceMatrix::new`] and preserved by every method that
/// derives a new matrix. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceMatrix")]
pub struct PriceMatrix {
    assets: Vec<String>,
    timestamps: Vec<NaiveDateTime>,
    columns: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawPriceMatrix {
    assets: Vec<String>,
    timestamps: Vec<NaiveDateTime>,
    columns: Vec<Vec<f64>>,
}

impl TryFrom<RawPriceMatrix> for PriceMatrix {
    type Error = DataError;

    fn try_from(raw: RawPriceMatrix) -> Result<Self, Self::Error> {
        Self::new(raw.assets, raw.timestamps, raw.columns)
    }
}

/// The instant `hours` before `end`.
///
/// Saturates at [`NaiveDateTime::MIN`], so an oversized window covers the
/// whole history instead of overflowing.
pub fn hours_before(end: NaiveDateTime, hours: i64) -> NaiveDateTime {
    TimeDelta::try_hours(hours)
        .and_then(|span| end.checked_sub_signed(span))
        .unwrap_or(NaiveDateTime::MIN)
}

impl PriceMatrix {
    /// Build a matrix from an asset list, a timestamp axis and one price column per asset.
    pub fn new(
        assets: Vec<String>,
        timestamps: Vec<NaiveDateTime>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, DataError> {
        if assets.len() != columns.len() {
            return Err(DataError::Misaligned(format!(
                "{} assets but {} price columns",
                assets.len(),
                columns.len()
            )));
        }

        for (i, asset) in assets.iter().enumerate() {
            if assets[..i].contains(asset) {
                return Err(DataError::Misaligned(format!("duplicate asset '{}'", asset)));
            }
        }

        for (asset, column) in assets.iter().zip(&columns) {
            if column.len() != timestamps.len() {
                return Err(DataError::Misaligned(format!(
                    "column '{}' has {} prices for {} timestamps",
                    asset,
                    column.len(),
                    timestamps.len()
                )));
            }
        }

        if let Some(i) = timestamps.windows(2).position(|w| w[1] < w[0]) {
            return Err(DataError::Misaligned(format!(
                "timestamp {} precedes {}",
                timestamps[i + 1],
                timestamps[i]
            )));
        }

        Ok(Self {
            assets,
            timestamps,
            columns,
        })
    }

    /// Matrix with the given assets and no samples.
    pub fn empty(assets: Vec<String>) -> Self {
        let columns = vec![Vec::new(); assets.len()];
        Self {
            assets,
            timestamps: Vec::new(),
            columns,
        }
    }

    /// Asset names in column order.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Shared timestamp axis.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Number of samples (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Prices of one asset.
    pub fn prices(&self, asset: &str) -> Option<&[f64]> {
        let idx = self.assets.iter().position(|a| a == asset)?;
        Some(&self.columns[idx])
    }

    /// Series view of one asset.
    pub fn series(&self, asset: &str) -> Option<PriceSeries<'_>> {
        let idx = self.assets.iter().position(|a| a == asset)?;
        Some(PriceSeries::new(
            &self.assets[idx],
            &self.timestamps,
            &self.columns[idx],
        ))
    }

    /// Iterate over every asset series in column order.
    pub fn iter_series(&self) -> impl Iterator<Item = PriceSeries<'_>> {
        self.assets
            .iter()
            .zip(&self.columns)
            .map(|(asset, column)| PriceSeries::new(asset, &self.timestamps, column))
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// Samples with `start <= timestamp < end`.
    pub fn window(&self, start: NaiveDateTime, end: NaiveDateTime) -> PriceMatrix {
        let lo = self.timestamps.partition_point(|t| *t < start);
        let hi = self.timestamps.partition_point(|t| *t < end).max(lo);
        self.slice(lo, hi)
    }

    /// Samples strictly after `hours` before `end`. Later samples are kept.
    pub fn trailing(&self, hours: i64, end: NaiveDateTime) -> PriceMatrix {
        let cutoff = hours_before(end, hours);
        let lo = self.timestamps.partition_point(|t| *t <= cutoff);
        self.slice(lo, self.len())
    }

    fn slice(&self, lo: usize, hi: usize) -> PriceMatrix {
        PriceMatrix {
            assets: self.assets.clone(),
            timestamps: self.timestamps[lo..hi].to_vec(),
            columns: self.columns.iter().map(|c| c[lo..hi].to_vec()).collect(),
        }
    }
}
