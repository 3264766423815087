//! Single-asset price series view.

use chrono::NaiveDateTime;

/// Ordered (timestamp, price) pairs for one asset.
///
/// A series is always borrowed from a [`PriceMatrix`](super::PriceMatrix),
/// so every series taken from the same matrix shares one timestamp axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSeries<'a> {
    asset: &'a str,
    timestamps: &'a [NaiveDateTime],
    prices: &'a [f64],
}

impl<'a> PriceSeries<'a> {
    pub(crate) fn new(asset: &'a str, timestamps: &'a [NaiveDateTime], prices: &'a [f64]) -> Self {
        debug_assert_eq!(timestamps.len(), prices.len());
        Self {
            asset,
            timestamps,
            prices,
        }
    }

    /// Asset name.
    pub fn asset(&self) -> &'a str {
        self.asset
    }

    /// Timestamps of the series.
    pub fn timestamps(&self) -> &'a [NaiveDateTime] {
        self.timestamps
    }

    /// Prices, index-aligned with [`timestamps`](Self::timestamps).
    pub fn prices(&self) -> &'a [f64] {
        self.prices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// First (timestamp, price) pair.
    pub fn first(&self) -> Option<(NaiveDateTime, f64)> {
        Some((*self.timestamps.first()?, *self.prices.first()?))
    }

    /// Last (timestamp, price) pair.
    pub fn last(&self) -> Option<(NaiveDateTime, f64)> {
        Some((*self.timestamps.last()?, *self.prices.last()?))
    }

    /// Iterate over (timestamp, price) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + 'a {
        self.timestamps
            .iter()
            .copied()
            .zip(self.prices.iter().copied())
    }
}
