//! Constants for the calibration search
//!
//! Numeric defaults live here instead of inline magic numbers, grouped by
//! the part of the algorithm that consumes them:
//! - **Search**: step size, pass budget, subsample size
//! - **Statistics**: percentiles and sample-count minimums
//! - **Buffers**: fixed buffer sizes of the sample reader
//!
//! `OptimizerConfig::default()` is assembled from these values.

/// Hill-climb step size, pass budget and two-phase subsampling.
pub mod search;

/// Percentile bounds and minimum sample counts for the initial guess.
pub mod statistics;

/// Buffer sizes for line-oriented sample ingestion.
pub mod buffers;

pub use search::{AXIS_COUNT, DEFAULT_MAX_PASSES, DEFAULT_STEP, DEFAULT_SUBSAMPLE_SIZE, PARAM_COUNT};

pub use statistics::{DEFAULT_HIGH_PERCENTILE, DEFAULT_LOW_PERCENTILE, MIN_SAMPLES_FOR_GUESS};

pub use buffers::{LINE_BUFFER_SIZE, READ_BUFFER_SIZE};
