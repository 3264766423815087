//! Rolling mean.

use coinwatch_core::traits::Indicator;

use crate::simd::sum_simd;

/// Simple rolling mean.
///
/// Output `i` is the arithmetic mean of the `window` values ending at `i`;
/// the first `window - 1` outputs are `NaN`. Each window is summed on its
/// own rather than with a running sum, so non-negative inputs (such as RSI
/// gains and losses) always give non-negative means.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
}

impl RollingMean {
    /// Default window used for the moving-average view.
    pub const DEFAULT_WINDOW: usize = 7;

    /// Create a new rolling mean over `window` points.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self { window }
    }
}

impl Default for RollingMean {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl Indicator for RollingMean {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.window {
            return result;
        }

        let window_f64 = self.window as f64;
        for (i, window) in data.windows(self.window).enumerate() {
            result[i + self.window - 1] = sum_simd(window) / window_f64;
        }

        result
    }

    fn period(&self) -> usize {
        self.window
    }
}
