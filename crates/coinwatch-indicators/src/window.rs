//! Calendar-day and trailing window summaries.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use coinwatch_core::traits::ScalarIndicator;
use coinwatch_core::types::{hours_before, PriceMatrix};
use serde::{Deserialize, Serialize};

use crate::volatility::Volatility;

/// Whether a window is still accumulating samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    /// Window contains the reference instant; its last price is the current price.
    Open,
    /// Window has ended; its last price is the close.
    Closed,
}

impl WindowStatus {
    /// Label for the last price in the window.
    pub fn end_price_label(&self) -> &'static str {
        match self {
            WindowStatus::Open => "Current price",
            WindowStatus::Closed => "Close price",
        }
    }
}

/// Per-asset figures for one window. `None` means not yet available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetWindowSummary {
    pub asset: String,
    /// First price in the window
    pub open: Option<f64>,
    /// Last price in the window (current or close, see [`WindowStatus`])
    pub end_price: Option<f64>,
    /// `(end - open) / open * 100`
    pub evolution_pct: Option<f64>,
    /// Volatility of the window's own samples
    pub volatility_pct: Option<f64>,
}

/// Summary of all assets over `[start, end)`. Trailing summaries exclude
/// `start` itself, see [`WindowSummary::trailing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub label: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: WindowStatus,
    /// Number of samples inside the window
    pub samples: usize,
    pub assets: Vec<AssetWindowSummary>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn next_midnight(date: NaiveDate) -> NaiveDateTime {
    date.succ_opt().map(midnight).unwrap_or(NaiveDateTime::MAX)
}

impl WindowSummary {
    /// Summarize the samples of `matrix` inside `[start, end)`.
    pub fn summarize(
        matrix: &PriceMatrix,
        label: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: WindowStatus,
    ) -> Self {
        Self::from_window(&matrix.window(start, end), label, start, end, status)
    }

    fn from_window(
        window: &PriceMatrix,
        label: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: WindowStatus,
    ) -> Self {
        let volatility = Volatility::new();

        let assets = window
            .iter_series()
            .map(|series| {
                let open = series.first().map(|(_, p)| p);
                let end_price = series.last().map(|(_, p)| p);
                let evolution_pct = match (open, end_price) {
                    (Some(o), Some(e)) if o != 0.0 => finite((e - o) / o * 100.0),
                    _ => None,
                };
                AssetWindowSummary {
                    asset: series.asset().to_string(),
                    open,
                    end_price,
                    evolution_pct,
                    volatility_pct: finite(volatility.compute(series.prices())),
                }
            })
            .collect();

        Self {
            label: label.into(),
            start,
            end,
            status,
            samples: window.len(),
            assets,
        }
    }

    /// The calendar day containing `now`, still open.
    pub fn today(matrix: &PriceMatrix, now: NaiveDateTime) -> Self {
        Self::day(matrix, now.date(), now).with_label("Today")
    }

    /// The calendar day before the one containing `now`, completed.
    pub fn yesterday(matrix: &PriceMatrix, now: NaiveDateTime) -> Self {
        let date = now.date().pred_opt().unwrap_or(now.date());
        Self::day(matrix, date, now).with_label("Yesterday")
    }

    /// An arbitrary calendar day; open if `now` falls inside it.
    pub fn day(matrix: &PriceMatrix, date: NaiveDate, now: NaiveDateTime) -> Self {
        let start = midnight(date);
        let end = next_midnight(date);
        let status = if now >= start && now < end {
            WindowStatus::Open
        } else {
            WindowStatus::Closed
        };
        Self::summarize(matrix, date.to_string(), start, end, status)
    }

    /// The `hours` before `now`, open.
    ///
    /// Holds the rows of [`PriceMatrix::trailing`]: strictly after the
    /// cutoff, which is stored as `start`, with no upper bound.
    pub fn trailing(matrix: &PriceMatrix, hours: i64, now: NaiveDateTime) -> Self {
        let start = hours_before(now, hours);
        Self::from_window(
            &matrix.trailing(hours, now),
            format!("Last {}h", hours),
            start,
            NaiveDateTime::MAX,
            WindowStatus::Open,
        )
    }

    fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// True when the window holds no samples yet.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }

    /// Figures for one asset.
    pub fn asset(&self, name: &str) -> Option<&AssetWindowSummary> {
        self.assets.iter().find(|a| a.asset == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample() -> PriceMatrix {
        PriceMatrix::new(
            vec!["bitcoin".to_string(), "cardano".to_string()],
            vec![at(9, 8), at(9, 20), at(10, 0), at(10, 6), at(10, 12)],
            vec![
                vec![60000.0, 61200.0, 60000.0, 63000.0, 66000.0],
                vec![0.0, 0.0, 0.5, 0.45, 0.55],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_today_is_open() {
        let summary = WindowSummary::today(&sample(), at(10, 13));
        assert_eq!(summary.status, WindowStatus::Open);
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.label, "Today");

        let btc = summary.asset("bitcoin").unwrap();
        assert_eq!(btc.open, Some(60000.0));
        assert_eq!(btc.end_price, Some(66000.0));
        assert!((btc.evolution_pct.unwrap() - 10.0).abs() < 1e-9);
        assert!(btc.volatility_pct.unwrap() >= 0.0);
    }

    #[test]
    fn test_yesterday_is_closed() {
        let summary = WindowSummary::yesterday(&sample(), at(10, 13));
        assert_eq!(summary.status, WindowStatus::Closed);
        assert_eq!(summary.samples, 2);

        let btc = summary.asset("bitcoin").unwrap();
        assert_eq!(btc.end_price, Some(61200.0));
        assert!((btc.evolution_pct.unwrap() - 2.0).abs() < 1e-9);
        // Two samples, one return
        assert_eq!(btc.volatility_pct, Some(0.0));
    }

    #[test]
    fn test_zero_open_price_has_no_evolution() {
        let summary = WindowSummary::yesterday(&sample(), at(10, 13));
        let ada = summary.asset("cardano").unwrap();
        assert_eq!(ada.open, Some(0.0));
        assert_eq!(ada.evolution_pct, None);
        assert_eq!(ada.volatility_pct, None);
    }

    #[test]
    fn test_empty_window_is_not_yet_available() {
        let summary = WindowSummary::today(&sample(), at(12, 9));
        assert!(summary.is_empty());
        assert_eq!(summary.assets.len(), 2);
        for asset in &summary.assets {
            assert_eq!(asset.open, None);
            assert_eq!(asset.end_price, None);
            assert_eq!(asset.evolution_pct, None);
            assert_eq!(asset.volatility_pct, None);
        }
    }

    #[test]
    fn test_past_day_is_closed_and_current_day_open() {
        let m = sample();
        let past = WindowSummary::day(&m, NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(), at(10, 1));
        assert_eq!(past.status, WindowStatus::Closed);
        assert_eq!(past.status.end_price_label(), "Close price");

        let current = WindowSummary::day(&m, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(), at(10, 1));
        assert_eq!(current.status, WindowStatus::Open);
        assert_eq!(current.status.end_price_label(), "Current price");
    }

    #[test]
    fn test_trailing_window_includes_now() {
        let summary = WindowSummary::trailing(&sample(), 24, at(10, 12));
        // 9th 12:00 < t
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.start, at(9, 12));
        assert_eq!(summary.asset("bitcoin").unwrap().end_price, Some(66000.0));
    }

    #[test]
    fn test_trailing_matches_matrix_rows() {
        let m = sample();
        // Cutoff lands exactly on the 9th 20:00 sample, which is left out
        let summary = WindowSummary::trailing(&m, 16, at(10, 12));
        assert_eq!(summary.samples, m.trailing(16, at(10, 12)).len());
        assert_eq!(summary.samples, 3);
        assert_eq!(summary.asset("bitcoin").unwrap().open, Some(60000.0));

        // A reference before the last sample still counts the later rows
        let early = WindowSummary::trailing(&m, 12, at(10, 1));
        assert_eq!(early.samples, 4);
    }

    #[test]
    fn test_oversized_trailing_window_covers_history() {
        let summary = WindowSummary::trailing(&sample(), 10_000_000_000, at(10, 12));
        assert_eq!(summary.samples, 5);
        assert_eq!(summary.start, NaiveDateTime::MIN);
    }
}
