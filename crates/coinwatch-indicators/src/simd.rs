//! SIMD building blocks for the indicators.
//!
//! These helpers use the `wide` crate for portable SIMD and are shared by
//! the volatility, momentum, correlation and report statistics code.

use wide::f64x4;

#[inline]
fn load(data: &[f64], idx: usize) -> f64x4 {
    f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
}

/// Sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        simd_sum += load(data, i * 4);
    }

    let mut result = simd_sum.reduce_add();

    // Handle remaining elements
    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// Arithmetic mean, `NaN` for an empty slice.
pub fn mean_simd(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    sum_simd(data) / data.len() as f64
}

/// Sum of squared deviations from `mean`.
pub fn sum_sq_dev_simd(data: &[f64], mean: f64) -> f64 {
    let chunks = data.len() / 4;
    let mean_vec = f64x4::splat(mean);
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let diff = load(data, i * 4) - mean_vec;
        simd_sum += diff * diff;
    }

    let mut result = simd_sum.reduce_add();

    for &value in &data[(chunks * 4)..] {
        let diff = value - mean;
        result += diff * diff;
    }

    result
}

/// Sum of cross deviations `(a - mean_a) * (b - mean_b)`.
pub fn sum_cross_dev_simd(a: &[f64], b: &[f64], mean_a: f64, mean_b: f64) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / 4;
    let ma = f64x4::splat(mean_a);
    let mb = f64x4::splat(mean_b);
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        simd_sum += (load(a, idx) - ma) * (load(b, idx) - mb);
    }

    let mut result = simd_sum.reduce_add();

    for i in (chunks * 4)..len {
        result += (a[i] - mean_a) * (b[i] - mean_b);
    }

    result
}

/// Split first differences into gains and losses.
///
/// Both outputs have `data.len() - 1` entries; entry `j` describes the move
/// from `data[j]` to `data[j + 1]`. Losses are reported as positive values.
pub fn gains_losses_simd(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if data.len() < 2 {
        return (vec![], vec![]);
    }

    let moves = data.len() - 1;
    let mut gains = Vec::with_capacity(moves);
    let mut losses = Vec::with_capacity(moves);
    let zero = f64x4::splat(0.0);

    let chunks = moves / 4;
    for i in 0..chunks {
        let idx = i * 4;
        let diff = load(data, idx + 1) - load(data, idx);

        gains.extend(diff.max(zero).to_array());
        losses.extend((-diff).max(zero).to_array());
    }

    for i in (chunks * 4)..moves {
        let change = data[i + 1] - data[i];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (gains, losses)
}
