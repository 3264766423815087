//! Cross-asset correlation.

use coinwatch_core::types::PriceMatrix;
use serde::{Deserialize, Serialize};

use crate::simd::{mean_simd, sum_cross_dev_simd, sum_sq_dev_simd};
use crate::volatility::pct_change;

/// Pearson correlation over the positions where both inputs are finite.
///
/// `NaN` with fewer than two such positions or when either side has no
/// variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .unzip();

    if xs.len() < 2 {
        return f64::NAN;
    }

    let mean_x = mean_simd(&xs);
    let mean_y = mean_simd(&ys);
    let sxx = sum_sq_dev_simd(&xs, mean_x);
    let syy = sum_sq_dev_simd(&ys, mean_y);
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }

    let sxy = sum_cross_dev_simd(&xs, &ys, mean_x, mean_y);
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric asset-by-asset correlation matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    assets: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Asset names, indexing both rows and columns.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Row-major coefficients.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Coefficient for a pair of assets.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.assets.iter().position(|x| x == a)?;
        let j = self.assets.iter().position(|x| x == b)?;
        Some(self.values[i][j])
    }
}

/// Correlation of every pair of asset return series.
///
/// Correlates period returns, not price levels. The diagonal is exactly 1
/// for assets whose returns vary and `NaN` otherwise.
pub fn correlation_matrix(matrix: &PriceMatrix) -> CorrelationMatrix {
    let returns: Vec<Vec<f64>> = matrix
        .iter_series()
        .map(|series| pct_change(series.prices()))
        .collect();

    let n = returns.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&returns[i], &returns[j]);
            if i == j {
                values[i][i] = if r.is_nan() { f64::NAN } else { 1.0 };
            } else {
                values[i][j] = r;
                values[j][i] = r;
            }
        }
    }

    CorrelationMatrix {
        assets: matrix.assets().to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn matrix(columns: Vec<(&str, Vec<f64>)>) -> PriceMatrix {
        let len = columns[0].1.len();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let timestamps = (0..len).map(|i| start + Duration::minutes(i as i64)).collect();
        let (assets, prices): (Vec<String>, Vec<Vec<f64>>) = columns
            .into_iter()
            .map(|(name, p)| (name.to_string(), p))
            .unzip();
        PriceMatrix::new(assets, timestamps, prices).unwrap()
    }

    #[test]
    fn test_pearson_perfect() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let z = vec![8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &z) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_skips_undefined_pairs() {
        let x = vec![f64::NAN, 1.0, 2.0, 3.0];
        let y = vec![5.0, 1.0, 2.0, f64::NAN];
        // Only (1,1) and (2,2) remain
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_needs_two_points() {
        assert!(pearson(&[1.0], &[1.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }

    #[test]
    fn test_pearson_constant_side_is_undefined() {
        assert!(pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_nan());
    }

    #[test]
    fn test_matrix_symmetric_unit_diagonal() {
        let m = matrix(vec![
            ("bitcoin", vec![100.0, 102.0, 101.0, 105.0, 104.0, 108.0]),
            ("ethereum", vec![10.0, 10.1, 10.3, 10.2, 10.6, 10.5]),
            ("solana", vec![1.0, 0.9, 1.1, 1.0, 1.2, 1.1]),
        ]);
        let corr = correlation_matrix(&m);

        let n = corr.assets().len();
        for i in 0..n {
            assert_eq!(corr.values()[i][i], 1.0);
            for j in 0..n {
                let (a, b) = (corr.values()[i][j], corr.values()[j][i]);
                assert_eq!(a.to_bits(), b.to_bits());
                assert!((-1.0..=1.0).contains(&a));
            }
        }
    }

    #[test]
    fn test_matrix_uses_returns() {
        // Same returns at different price levels correlate perfectly
        let m = matrix(vec![
            ("a", vec![100.0, 110.0, 99.0, 108.9]),
            ("b", vec![1.0, 1.1, 0.99, 1.089]),
        ]);
        let corr = correlation_matrix(&m);
        assert!((corr.get("a", "b").unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_asset_has_undefined_diagonal() {
        let m = matrix(vec![
            ("stable", vec![1.0, 1.0, 1.0, 1.0]),
            ("bitcoin", vec![1.0, 2.0, 1.5, 3.0]),
        ]);
        let corr = correlation_matrix(&m);
        assert!(corr.get("stable", "stable").unwrap().is_nan());
        assert!(corr.get("stable", "bitcoin").unwrap().is_nan());
        assert_eq!(corr.get("bitcoin", "bitcoin"), Some(1.0));
        assert!(corr.get("bitcoin", "dogecoin").is_none());
    }
}
