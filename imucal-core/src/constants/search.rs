//! Search Constants
//!
//! Parameters of the coordinate-ascent loop.

// ===== PARAMETER LAYOUT =====

/// Number of sensor axes (X, Y, Z).
pub const AXIS_COUNT: usize = 3;

/// Number of calibration parameters: one (min, max) pair per axis.
pub const PARAM_COUNT: usize = 2 * AXIS_COUNT;

// ===== HILL CLIMBING =====

/// Fixed step applied to a single parameter, in raw sensor units.
///
/// Raw readings are integers, so one unit is the smallest move that can
/// change which side of a bound a reading falls on.
pub const DEFAULT_STEP: f64 = 1.0;

/// Upper bound on outer passes for one phase.
///
/// Realistic magnetometer logs converge in tens to low hundreds of passes.
/// Hitting this bound means the search is cycling and is reported as
/// `NonConvergence`.
pub const DEFAULT_MAX_PASSES: usize = 10_000;

// ===== TWO-PHASE SEARCH =====

/// Size of the evenly spaced subsample used for the first, cheap phase.
pub const DEFAULT_SUBSAMPLE_SIZE: usize = 300;
