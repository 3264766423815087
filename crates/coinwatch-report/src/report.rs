//! Daily report.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use coinwatch_core::types::{hours_before, PriceMatrix, TIMESTAMP_FORMAT};
use coinwatch_indicators::{CorrelationMatrix, IndicatorEngine, WindowSummary};
use serde::Serialize;

use crate::statistics::{describe, DescriptiveStats};

const RULE_HEAVY: &str = "═══════════════════════════════════════════════════════════════════════════════════════════════\n";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────────────────────────────────────────────\n";

/// Whole-history indicators of one asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetOverview {
    pub asset: String,
    pub last_price: Option<f64>,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub latest_rsi: f64,
}

/// Plot-ready series of one asset over the report window.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub asset: String,
    pub prices: Vec<f64>,
    /// Rolling mean with warm-up taken from the full history
    pub rolling_mean: Vec<f64>,
}

/// Complete daily report.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub generated_at: NaiveDateTime,
    pub window_hours: i64,
    /// Samples strictly after this instant are in the window
    pub window_start: NaiveDateTime,
    pub samples: usize,
    pub stats: Vec<DescriptiveStats>,
    pub assets: Vec<AssetOverview>,
    pub today: WindowSummary,
    pub yesterday: WindowSummary,
    pub correlation: CorrelationMatrix,
    #[serde(skip)]
    chart_timestamps: Vec<NaiveDateTime>,
    #[serde(skip)]
    charts: Vec<ChartSeries>,
}

impl DailyReport {
    /// Build the report for `matrix` as of `now`.
    ///
    /// The statistics and charts cover the samples in the trailing
    /// `window_hours` before `now`.
    pub fn build(
        matrix: PriceMatrix,
        now: NaiveDateTime,
        window_hours: i64,
        engine: &IndicatorEngine,
    ) -> Self {
        let window = matrix.trailing(window_hours, now);
        // The trailing window is a suffix of the matrix
        let offset = matrix.len() - window.len();

        let stats = window
            .iter_series()
            .map(|series| describe(series.asset(), series.prices()))
            .collect();

        let snapshot = engine.snapshot(matrix, now);

        let charts = snapshot
            .assets
            .iter()
            .zip(window.iter_series())
            .map(|(indicators, series)| ChartSeries {
                asset: series.asset().to_string(),
                prices: series.prices().to_vec(),
                rolling_mean: indicators.rolling_mean[offset..].to_vec(),
            })
            .collect();

        let assets = snapshot
            .assets
            .iter()
            .map(|a| AssetOverview {
                asset: a.asset.clone(),
                last_price: a.last_price,
                volatility_pct: a.volatility_pct,
                max_drawdown_pct: a.max_drawdown_pct,
                latest_rsi: a.latest_rsi,
            })
            .collect();

        Self {
            generated_at: now,
            window_hours,
            window_start: hours_before(now, window_hours),
            samples: window.len(),
            stats,
            assets,
            today: snapshot.today,
            yesterday: snapshot.yesterday,
            correlation: snapshot.correlation,
            chart_timestamps: window.timestamps().to_vec(),
            charts,
        }
    }

    /// Build the report as it would have looked at the end of `date`.
    ///
    /// Samples after the reference instant are ignored. A date that has
    /// not ended yet uses `now` as the reference.
    pub fn for_date(
        matrix: PriceMatrix,
        date: NaiveDate,
        now: NaiveDateTime,
        window_hours: i64,
        engine: &IndicatorEngine,
    ) -> Self {
        let end_of_day = date
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN) - Duration::seconds(1))
            .unwrap_or(NaiveDateTime::MAX);
        let reference = end_of_day.min(now);
        let upto_end = reference
            .checked_add_signed(Duration::seconds(1))
            .unwrap_or(NaiveDateTime::MAX);
        let upto = matrix.window(NaiveDateTime::MIN, upto_end);
        Self::build(upto, reference, window_hours, engine)
    }

    pub fn charts(&self) -> &[ChartSeries] {
        &self.charts
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(RULE_HEAVY);
        s.push_str("                                      DAILY REPORT\n");
        s.push_str(RULE_HEAVY);
        s.push('\n');

        s.push_str(&format!(
            "  Generated:  {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        ));
        s.push_str(&format!(
            "  Window:     last {}h (after {})\n",
            self.window_hours,
            self.window_start.format(TIMESTAMP_FORMAT)
        ));
        s.push_str(&format!("  Samples:    {}\n\n", self.samples));

        s.push_str(&format!(
            "DESCRIPTIVE STATISTICS (last {}h)\n",
            self.window_hours
        ));
        s.push_str(RULE_LIGHT);
        s.push_str(&format!(
            "  {:<14}{:>6}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}\n",
            "Asset", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        ));
        for st in &self.stats {
            s.push_str(&format!(
                "  {:<14}{:>6}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}{:>12}\n",
                st.asset,
                st.count,
                opt(st.mean, 2),
                opt(st.std, 2),
                opt(st.min, 2),
                opt(st.p25, 2),
                opt(st.p50, 2),
                opt(st.p75, 2),
                opt(st.max, 2),
            ));
        }
        s.push('\n');

        s.push_str("INDICATORS (full history)\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!(
            "  {:<14}{:>14}{:>14}{:>16}{:>10}\n",
            "Asset", "Last price", "Volatility", "Max drawdown", "RSI"
        ));
        for a in &self.assets {
            s.push_str(&format!(
                "  {:<14}{:>14}{:>14}{:>16}{:>10}\n",
                a.asset,
                opt(a.last_price, 2),
                pct(a.volatility_pct),
                pct(a.max_drawdown_pct),
                num(a.latest_rsi, 1),
            ));
        }
        s.push('\n');

        push_window(&mut s, &self.today);
        push_window(&mut s, &self.yesterday);

        s.push_str("RETURN CORRELATION\n");
        s.push_str(RULE_LIGHT);
        s.push_str(&format!("  {:<14}", ""));
        for asset in self.correlation.assets() {
            s.push_str(&format!("{:>14}", short(asset)));
        }
        s.push('\n');
        for (asset, row) in self.correlation.assets().iter().zip(self.correlation.values()) {
            s.push_str(&format!("  {:<14}", asset));
            for value in row {
                s.push_str(&format!("{:>14}", num(*value, 2)));
            }
            s.push('\n');
        }
        s.push('\n');

        s.push_str(RULE_HEAVY);

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Window prices of every asset, one column per asset.
    pub fn price_chart_csv(&self) -> String {
        let mut csv = String::from("timestamp");
        for chart in &self.charts {
            csv.push(',');
            csv.push_str(&chart.asset);
        }
        csv.push('\n');

        for (i, ts) in self.chart_timestamps.iter().enumerate() {
            csv.push_str(&ts.format(TIMESTAMP_FORMAT).to_string());
            for chart in &self.charts {
                csv.push(',');
                csv.push_str(&cell(chart.prices[i]));
            }
            csv.push('\n');
        }
        csv
    }

    /// Window prices and rolling mean of one asset.
    pub fn asset_chart_csv(&self, asset: &str) -> Option<String> {
        let chart = self.charts.iter().find(|c| c.asset == asset)?;

        let mut csv = String::from("timestamp,price,rolling_mean\n");
        for ((ts, price), mean) in self
            .chart_timestamps
            .iter()
            .zip(&chart.prices)
            .zip(&chart.rolling_mean)
        {
            csv.push_str(&format!(
                "{},{},{}\n",
                ts.format(TIMESTAMP_FORMAT),
                cell(*price),
                cell(*mean)
            ));
        }
        Some(csv)
    }
}

fn push_window(s: &mut String, window: &WindowSummary) {
    let state = if window.is_empty() {
        "no data yet".to_string()
    } else {
        format!("{} samples", window.samples)
    };
    s.push_str(&format!(
        "{} ({}, {})\n",
        window.label.to_uppercase(),
        window.start.date(),
        state
    ));
    s.push_str(RULE_LIGHT);
    s.push_str(&format!(
        "  {:<14}{:>14}{:>16}{:>12}{:>14}\n",
        "Asset",
        "Open",
        window.status.end_price_label(),
        "Evolution",
        "Volatility"
    ));
    for a in &window.assets {
        s.push_str(&format!(
            "  {:<14}{:>14}{:>16}{:>12}{:>14}\n",
            a.asset,
            opt(a.open, 2),
            opt(a.end_price, 2),
            a.evolution_pct.map(pct).unwrap_or_else(na),
            a.volatility_pct.map(pct).unwrap_or_else(na),
        ));
    }
    s.push('\n');
}

fn na() -> String {
    "n/a".to_string()
}

fn num(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", decimals, value)
    } else {
        na()
    }
}

fn opt(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| num(v, decimals)).unwrap_or_else(na)
}

fn pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        na()
    }
}

fn cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

fn short(asset: &str) -> &str {
    asset.get(..12).unwrap_or(asset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// Hourly samples from the 1st 00:00 through the 3rd 11:00.
    fn matrix() -> PriceMatrix {
        let n = 60;
        let timestamps = (0..n).map(|i| at(1, 0) + Duration::hours(i)).collect();
        let btc = (0..n).map(|i| 60000.0 + i as f64 * 10.0).collect();
        let eth = (0..n)
            .map(|i| 3000.0 + if i % 2 == 0 { 5.0 } else { -5.0 })
            .collect();
        PriceMatrix::new(
            vec!["bitcoin".to_string(), "ethereum".to_string()],
            timestamps,
            vec![btc, eth],
        )
        .unwrap()
    }

    #[test]
    fn test_build_covers_trailing_window() {
        let now = at(3, 11);
        let report = DailyReport::build(matrix(), now, 24, &IndicatorEngine::default());

        // Strictly after the 2nd 11:00 through the 3rd 11:00
        assert_eq!(report.samples, 24);
        assert_eq!(report.stats.len(), 2);
        assert_eq!(report.stats[0].count, 24);
        assert_eq!(report.stats[0].max, Some(60590.0));
        assert_eq!(report.stats[0].min, Some(60360.0));

        assert_eq!(report.today.samples, 12);
        assert_eq!(report.yesterday.samples, 24);

        let btc = &report.charts()[0];
        assert_eq!(btc.prices.len(), 24);
        assert_eq!(btc.rolling_mean.len(), 24);
        // Warm-up comes from earlier history
        assert!(btc.rolling_mean.iter().all(|m| m.is_finite()));
    }

    #[test]
    fn test_for_date_ignores_later_samples() {
        let report = DailyReport::for_date(
            matrix(),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            at(3, 11),
            24,
            &IndicatorEngine::default(),
        );

        assert_eq!(report.generated_at.date(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(report.samples, 24);
        assert_eq!(report.assets[0].last_price, Some(60230.0));
        assert_eq!(report.yesterday.samples, 0);
    }

    #[test]
    fn test_summary_sections() {
        let report = DailyReport::build(matrix(), at(3, 11), 24, &IndicatorEngine::default());
        let summary = report.summary();

        assert!(summary.contains("DAILY REPORT"));
        assert!(summary.contains("DESCRIPTIVE STATISTICS (last 24h)"));
        assert!(summary.contains("TODAY"));
        assert!(summary.contains("Current price"));
        assert!(summary.contains("YESTERDAY"));
        assert!(summary.contains("Close price"));
        assert!(summary.contains("bitcoin"));
        assert!(summary.contains("RETURN CORRELATION"));
    }

    #[test]
    fn test_empty_window_shows_na() {
        let report = DailyReport::build(matrix(), at(9, 0), 24, &IndicatorEngine::default());
        assert_eq!(report.samples, 0);
        assert_eq!(report.stats[0].count, 0);

        let summary = report.summary();
        assert!(summary.contains("n/a"));
        assert!(summary.contains("no data yet"));
    }

    #[test]
    fn test_chart_csv() {
        let report = DailyReport::build(matrix(), at(3, 11), 2, &IndicatorEngine::default());

        let combined = report.price_chart_csv();
        let lines: Vec<&str> = combined.lines().collect();
        assert_eq!(lines[0], "timestamp,bitcoin,ethereum");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2024-07-03 11:00:00,60590,2995");

        let btc = report.asset_chart_csv("bitcoin").unwrap();
        assert!(btc.starts_with("timestamp,price,rolling_mean\n"));
        assert_eq!(btc.lines().count(), 3);
        assert!(report.asset_chart_csv("dogecoin").is_none());
    }

    #[test]
    fn test_json_nan_is_null() {
        let single = matrix().window(at(1, 0), at(1, 1));
        let report = DailyReport::build(single, at(1, 0), 24, &IndicatorEngine::default());
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // One sample: no volatility
        assert!(value["assets"][0]["volatility_pct"].is_null());
        assert!(value.get("charts").is_none());
    }

    #[test]
    fn test_oversized_window_covers_whole_history() {
        let single = matrix().window(at(1, 0), at(1, 1));
        let report = DailyReport::build(single, at(1, 0), 10_000_000_000, &IndicatorEngine::default());
        assert_eq!(report.samples, 1);
        assert_eq!(report.window_start, NaiveDateTime::MIN);

        let report = DailyReport::build(matrix(), at(3, 11), i64::MAX, &IndicatorEngine::default());
        assert_eq!(report.samples, 60);
        assert_eq!(report.charts()[0].rolling_mean.len(), 60);
        assert!(report.summary().contains("DAILY REPORT"));
    }
}
