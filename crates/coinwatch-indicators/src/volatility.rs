//! Volatility and drawdown.

use coinwatch_core::traits::ScalarIndicator;

use crate::simd::{mean_simd, sum_sq_dev_simd};

/// Period-over-period fractional change, index-aligned with `prices`.
///
/// Position 0 is `NaN`, as is any change measured from a zero price.
pub fn pct_change(prices: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return result;
    }

    result.push(f64::NAN);
    for pair in prices.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if prev == 0.0 {
            result.push(f64::NAN);
        } else {
            result.push((curr - prev) / prev);
        }
    }

    result
}

/// Sample standard deviation (n - 1 denominator) of the finite values.
///
/// `NaN` when nothing is finite; a single value has zero dispersion.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    match finite.len() {
        0 => f64::NAN,
        1 => 0.0,
        n => {
            let mean = mean_simd(&finite);
            (sum_sq_dev_simd(&finite, mean) / (n - 1) as f64).sqrt()
        }
    }
}

/// Returns-based volatility in percent.
///
/// The standard deviation of period-over-period returns. Forward-filled
/// flat periods are ordinary zero returns.
#[derive(Debug, Clone, Default)]
pub struct Volatility;

impl Volatility {
    pub fn new() -> Self {
        Self
    }
}

impl ScalarIndicator for Volatility {
    fn compute(&self, data: &[f64]) -> f64 {
        if data.len() < self.min_points() {
            return f64::NAN;
        }
        sample_std_dev(&pct_change(data)) * 100.0
    }

    fn min_points(&self) -> usize {
        2
    }
}

/// Maximum drawdown in percent.
///
/// The most negative `(price - peak) / peak` over the series, where `peak`
/// is the running maximum. Always `<= 0`; a zero peak contributes no
/// drawdown. `NaN` for an empty series.
#[derive(Debug, Clone, Default)]
pub struct MaxDrawdown;

impl MaxDrawdown {
    pub fn new() -> Self {
        Self
    }

    /// Drawdown at every point, in percent.
    pub fn series(data: &[f64]) -> Vec<f64> {
        let mut peak = f64::NEG_INFINITY;
        data.iter()
            .map(|&price| {
                peak = peak.max(price);
                if peak > 0.0 {
                    (price - peak) / peak * 100.0
                } else {
                    0.0
                }
            })
            .collect()
    }
}

impl ScalarIndicator for MaxDrawdown {
    fn compute(&self, data: &[f64]) -> f64 {
        if data.len() < self.min_points() {
            return f64::NAN;
        }
        Self::series(data).into_iter().fold(0.0, f64::min)
    }

    fn min_points(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_change() {
        let result = pct_change(&[100.0, 110.0, 99.0]);
        assert!(result[0].is_nan());
        assert!((result[1] - 0.10).abs() < 1e-12);
        assert!((result[2] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_pct_change_from_zero_is_undefined() {
        let result = pct_change(&[0.0, 5.0, 10.0]);
        assert!(result[1].is_nan());
        assert!((result[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_known_value() {
        // returns: +10%, -10%
        let vol = Volatility::new().compute(&[100.0, 110.0, 99.0]);
        let expected = (0.02_f64).sqrt() * 100.0; // sample variance of [0.1, -0.1] = 0.02
        assert!((vol - expected).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_undefined_below_two_points() {
        assert!(Volatility::new().compute(&[]).is_nan());
        assert!(Volatility::new().compute(&[100.0]).is_nan());
    }

    #[test]
    fn test_volatility_two_points_is_zero() {
        let vol = Volatility::new().compute(&[100.0, 105.0]);
        assert_eq!(vol, 0.0);
    }

    #[test]
    fn test_volatility_non_negative() {
        let data: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.7).cos() * 3.0)
            .collect();
        assert!(Volatility::new().compute(&data) >= 0.0);
    }

    #[test]
    fn test_flat_series_has_zero_volatility() {
        assert_eq!(Volatility::new().compute(&[42.0; 10]), 0.0);
    }

    #[test]
    fn test_max_drawdown_example() {
        let mdd = MaxDrawdown::new().compute(&[100.0, 105.0, 102.0, 108.0, 103.0]);
        // (103 - 108) / 108
        assert!((mdd - (-4.6296)).abs() < 1e-3);
    }

    #[test]
    fn test_max_drawdown_non_decreasing_is_zero() {
        assert_eq!(MaxDrawdown::new().compute(&[1.0, 2.0, 2.0, 5.0]), 0.0);
        assert_eq!(MaxDrawdown::new().compute(&[7.0]), 0.0);
    }

    #[test]
    fn test_max_drawdown_empty_is_undefined() {
        assert!(MaxDrawdown::new().compute(&[]).is_nan());
    }

    #[test]
    fn test_max_drawdown_zero_peak() {
        let series = MaxDrawdown::series(&[0.0, 0.0, 4.0, 2.0]);
        assert_eq!(series[..2], [0.0, 0.0]);
        assert!((series[3] + 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_drawdown_never_positive() {
        let data: Vec<f64> = (0..50)
            .map(|i| 50.0 + (i as f64 * 0.4).sin() * 10.0)
            .collect();
        assert!(MaxDrawdown::new().compute(&data) <= 0.0);
    }
}
