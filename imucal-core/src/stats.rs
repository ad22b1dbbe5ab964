//! Summary Statistics over Raw and Scaled Readings
//!
//! ## Overview
//!
//! Small pure helpers shared by the initial guess and by the progress
//! reporting of a `Calibration`:
//! - `average`: arithmetic mean
//! - `variance` / `std_deviation`: sample (n - 1) variance and its root
//! - `percentile_to_value`: nearest-rank percentile over sorted data
//!
//! All functions return `None` instead of dividing by zero, so callers decide
//! what an empty or single-element input means for them.
//!
//! ## Nearest-Rank Percentile
//!
//! ```text
//! sorted = [v0, v1, ..., v(n-1)]
//! index  = round(p / 100 * (n - 1))
//! value  = sorted[index]
//! ```
//!
//! For `0..=99` the 1st percentile is `round(0.99) = 1` and the 99th is
//! `round(98.01) = 98`.

use alloc::vec::Vec;

/// Arithmetic mean, `None` for an empty slice
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with Bessel's correction, `None` below two values
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = average(values)?;
    let sum: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some(sum / (values.len() - 1) as f64)
}

/// Sample standard deviation
pub fn std_deviation(values: &[f64]) -> Option<f64> {
    variance(values).map(libm::sqrt)
}

/// Index of percentile `p` in a sorted sequence of `len` values
///
/// `p` is clamped to `[0, 100]`.
pub fn percentile_index(p: f64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let p = p.clamp(0.0, 100.0);
    let index = libm::round(p / 100.0 * (len - 1) as f64) as usize;
    Some(index.min(len - 1))
}

/// Value at percentile `p` of already sorted data
pub fn percentile_to_value(sorted: &[f64], p: f64) -> Option<f64> {
    percentile_index(p, sorted.len()).map(|i| sorted[i])
}

/// Sort `values` ascending and pick the value at each requested percentile
pub fn percentiles<const N: usize>(mut values: Vec<f64>, ps: [f64; N]) -> Option<[f64; N]> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let mut out = [0.0; N];
    for (slot, p) in out.iter_mut().zip(ps) {
        *slot = percentile_to_value(&values, p)?;
    }
    Some(out)
}
