//! IMU min/max calibration by coordinate-ascent search
//!
//! Finds, for each axis of a three-axis sensor, the raw reading that maps to
//! -1 and the one that maps to +1, so that every scaled reading lies on the
//! unit sphere as closely as possible.
//!
//! Works on a batch of raw integer readings collected while the sensor is
//! rotated through many orientations at rest:
//! - Initial guess from the 1st/99th percentile of each axis
//! - Hill climbing over the six range endpoints, one endpoint at a time
//! - Coarse pass on a regular subsample, then refinement on the full set
//!
//! ```no_run
//! use imucal_core::{SampleSet, calibrate};
//!
//! let samples = SampleSet::load([[-980, 12, 40], [1010, -3, 22], [15, 995, -8]]);
//!
//! match calibrate(&samples) {
//!     Ok(params) => println!("{}", params),
//!     Err(e) => eprintln!("calibration failed: {}", e),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod calibration;
pub mod constants;
pub mod errors;
pub mod optimizer;
pub mod sample;
pub mod stats;
pub mod stream;
pub mod traits;

// Public API
pub use calibration::{score, Calibration, CalibrationParams, MagnitudeStats};
pub use errors::{CalibrationError, CalibrationResult};
pub use optimizer::{
    calibrate, initial_guess, optimize, LogObserver, OptimizationOutcome, Optimizer,
    OptimizerConfig, PassRecorder, PassReport, Phase, SearchStrategy,
};
pub use sample::{load, Sample, SampleSet};
pub use traits::{NoopObserver, ProgressObserver};

#[cfg(feature = "std")]
pub use stream::read_samples;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
