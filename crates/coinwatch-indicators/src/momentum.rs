//! Momentum indicators.

use coinwatch_core::traits::Indicator;

use crate::moving_average::RollingMean;
use crate::simd::gains_losses_simd;

/// Relative Strength Index (RSI).
///
/// Average gains and losses are simple rolling means over `period` price
/// changes. Output is index-aligned with the input: position `i` uses the
/// `period` changes ending at `i`, so positions `0..period` are `NaN`, and a
/// series shorter than `period` is `NaN` throughout.
///
/// With no losses in the window the RSI is clamped to 100, or 50 when the
/// window is completely flat.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Default lookback.
    pub const DEFAULT_PERIOD: usize = 14;

    /// Create a new RSI indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI from average gain and average loss.
    pub fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
        }
    }

    /// Value at the most recent position, `NaN` when undefined or empty.
    pub fn latest(values: &[f64]) -> f64 {
        values.last().copied().unwrap_or(f64::NAN)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        let (gains, losses) = gains_losses_simd(data);

        let smoother = RollingMean::new(self.period);
        let avg_gains = smoother.calculate(&gains);
        let avg_losses = smoother.calculate(&losses);

        // Change j moves data[j] -> data[j + 1]
        for (j, (&gain, &loss)) in avg_gains.iter().zip(avg_losses.iter()).enumerate() {
            if gain.is_nan() || loss.is_nan() {
                continue;
            }
            result[j + 1] = Self::from_averages(gain, loss);
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period changes
    }
}
