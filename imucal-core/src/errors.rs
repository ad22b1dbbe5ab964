//! Error Types for Calibration Failures
//!
//! ## Design Philosophy
//!
//! The search loop is pure computation, so every failure it can report is
//! known up front and fits in a small `Copy` enum:
//!
//! 1. **No Heap Allocation**: messages are `&'static str`, payloads are plain
//!    numbers. Errors can be returned from the hot loop without allocating.
//!
//! 2. **Actionable Information**: each variant carries what the caller needs
//!    to react, e.g. the axis that collapsed or the last params reached before
//!    the pass budget ran out.
//!
//! ## Error Categories
//!
//! ### Data Problems
//! - `InsufficientData`: fewer than two samples, too few for percentiles or
//!   the spread of scaled magnitudes
//! - `DegenerateAxis`: an axis range of zero width, scaling would divide by zero
//! - `Parse` / `LineTooLong`: a raw input line could not be read as a sample
//!
//! ### Search Problems
//! - `NonConvergence`: the outer-pass budget was exhausted
//! - `InvalidParameterIndex`: an increment addressed a parameter outside 0..6
//! - `InvalidConfig`: optimizer settings that cannot drive a search
//!
//! ## Error Handling Strategy
//!
//! ```rust,no_run
//! use imucal_core::{CalibrationError, SampleSet, calibrate};
//!
//! let samples = SampleSet::load([[1, 2, 3], [4, 5, 6]]);
//! match calibrate(&samples) {
//!     Ok(params) => println!("{}", params),
//!     Err(CalibrationError::NonConvergence { last, .. }) => {
//!         // Still worth showing for diagnosis
//!         eprintln!("gave up at {}", last);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use thiserror_no_std::Error;

use crate::calibration::CalibrationParams;

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration errors - kept small and `Copy`
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// An axis has zero width (min == max) so it cannot be scaled
    #[error("Degenerate range on axis {axis}: min and max are both {value}")]
    DegenerateAxis {
        /// Axis index (0 = X, 1 = Y, 2 = Z)
        axis: usize,
        /// The shared min/max value
        value: f64,
    },

    /// Not enough samples to estimate percentiles or variance
    #[error("Insufficient data: need {required} samples, have {available}")]
    InsufficientData {
        /// Minimum number of distinct samples needed
        required: usize,
        /// Number of distinct samples supplied
        available: usize,
    },

    /// The search did not reach a fixed point within the pass budget
    #[error("No convergence after {passes} passes, last params: {last}")]
    NonConvergence {
        /// Outer passes executed
        passes: usize,
        /// Last-known-good parameters
        last: CalibrationParams,
    },

    /// Parameter index outside 0..6
    #[error("Invalid parameter index {index}, expected 0..6")]
    InvalidParameterIndex {
        /// The rejected index
        index: usize,
    },

    /// Optimizer settings rejected before the search started
    #[error("Invalid optimizer config: {reason}")]
    InvalidConfig {
        /// What is wrong with the config
        reason: &'static str,
    },

    /// Input line without three integer components
    #[error("Parse error on line {line}: expected three integer components")]
    Parse {
        /// 1-based line number
        line: usize,
    },

    /// Input line longer than the reader's line buffer
    #[error("Line {line} exceeds the line buffer")]
    LineTooLong {
        /// 1-based line number
        line: usize,
    },

    /// I/O failure while reading samples
    #[cfg(feature = "std")]
    #[error("I/O error: {kind}")]
    Io {
        /// Kind of the underlying I/O error
        kind: std::io::ErrorKind,
    },
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CalibrationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io { kind: err.kind() }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::DegenerateAxis { axis, value } => {
                defmt::write!(fmt, "Degenerate axis {} at {}", axis, value)
            }
            Self::InsufficientData { required, available } => {
                defmt::write!(fmt, "Need {} samples, have {}", required, available)
            }
            Self::NonConvergence { passes, .. } => {
                defmt::write!(fmt, "No convergence after {} passes", passes)
            }
            Self::InvalidParameterIndex { index } => {
                defmt::write!(fmt, "Invalid parameter index {}", index)
            }
            Self::InvalidConfig { reason } => defmt::write!(fmt, "Invalid config: {}", reason),
            Self::Parse { line } => defmt::write!(fmt, "Parse error on line {}", line),
            Self::LineTooLong { line } => defmt::write!(fmt, "Line {} too long", line),
            #[cfg(feature = "std")]
            Self::Io { .. } => defmt::write!(fmt, "I/O error"),
        }
    }
}
