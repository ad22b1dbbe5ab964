//! Statistics Constants
//!
//! Percentile bounds for the initial guess.

/// Lower percentile for the per-axis minimum guess.
///
/// Using the 1st percentile instead of the true minimum keeps a single
/// spurious reading from stretching the axis range.
pub const DEFAULT_LOW_PERCENTILE: f64 = 1.0;

/// Upper percentile for the per-axis maximum guess.
pub const DEFAULT_HIGH_PERCENTILE: f64 = 99.0;

/// Minimum number of distinct samples for percentile estimation and
/// sample variance.
pub const MIN_SAMPLES_FOR_GUESS: usize = 2;
