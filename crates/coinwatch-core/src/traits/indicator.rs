//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Series indicator.
///
/// Produces one output per input point. Positions that cannot be computed
/// yet (warm-up, insufficient history) hold an undefined marker instead of
/// being dropped, so output index `i` always corresponds to input index `i`.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input prices, oldest first
    ///
    /// # Returns
    /// A vector with the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required for the first defined value.
    fn period(&self) -> usize;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Indicator reducing a whole series to one number.
///
/// Returns `f64::NAN` when the series is too short.
pub trait ScalarIndicator: Send + Sync {
    /// Compute the value for the given data.
    fn compute(&self, data: &[f64]) -> f64;

    /// Get the minimum data points required.
    fn min_points(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        type Output = f64;

        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            // Trailing sum, undefined during warm-up
            (0..data.len())
                .map(|i| {
                    if i + 1 < self.period {
                        f64::NAN
                    } else {
                        data[i + 1 - self.period..=i].iter().sum()
                    }
                })
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }
    }

    #[test]
    fn test_indicator_validation() {
        let indicator = TestIndicator { period: 5 };

        assert!(indicator.validate_data(&[1.0, 2.0, 3.0]).is_err());
        assert!(indicator.validate_data(&[1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
    }

    #[test]
    fn test_indicator_output_is_aligned() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result[0].is_nan() && result[1].is_nan());
        assert!((result[2] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[4] - 12.0).abs() < 0.001); // 3+4+5
    }
}
