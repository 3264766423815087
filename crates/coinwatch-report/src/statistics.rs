//! Descriptive statistics.

use coinwatch_indicators::simd::{mean_simd, sum_sq_dev_simd};
use serde::{Deserialize, Serialize};

/// Count, moments and quartiles of one asset's prices over a window.
///
/// Every value except `count` is `None` when the window holds no prices;
/// `std` additionally needs two prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub asset: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Describe the finite values of `prices`.
pub fn describe(asset: &str, prices: &[f64]) -> DescriptiveStats {
    let mut sorted: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    if count == 0 {
        return DescriptiveStats {
            asset: asset.to_string(),
            count,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        };
    }

    let mean = mean_simd(&sorted);
    let std = (count > 1).then(|| (sum_sq_dev_simd(&sorted, mean) / (count - 1) as f64).sqrt());

    DescriptiveStats {
        asset: asset.to_string(),
        count,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        p25: Some(quantile(&sorted, 0.25)),
        p50: Some(quantile(&sorted, 0.50)),
        p75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// Linearly interpolated quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_describe_known_sample() {
        let stats = describe("bitcoin", &[100.0, 105.0, 102.0, 108.0, 103.0]);

        assert_eq!(stats.count, 5);
        assert!(approx(stats.mean, 103.6));
        // var = (12.96 + 1.96 + 2.56 + 19.36 + 0.36) / 4 = 9.3
        assert!(approx(stats.std, 9.3_f64.sqrt()));
        assert_eq!(stats.min, Some(100.0));
        assert!(approx(stats.p25, 102.0));
        assert!(approx(stats.p50, 103.0));
        assert!(approx(stats.p75, 105.0));
        assert_eq!(stats.max, Some(108.0));
    }

    #[test]
    fn test_quartiles_interpolate() {
        let stats = describe("eth", &[1.0, 2.0, 3.0, 4.0]);
        assert!(approx(stats.p25, 1.75));
        assert!(approx(stats.p50, 2.5));
        assert!(approx(stats.p75, 3.25));
    }

    #[test]
    fn test_single_value_has_no_std() {
        let stats = describe("sol", &[42.0]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, None);
        assert_eq!(stats.p50, Some(42.0));
    }

    #[test]
    fn test_empty_window() {
        let stats = describe("ada", &[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.max, None);
    }

    #[test]
    fn test_nan_is_skipped() {
        let stats = describe("link", &[f64::NAN, 10.0, 20.0]);
        assert_eq!(stats.count, 2);
        assert!(approx(stats.mean, 15.0));
    }
}
