//! Progress Reports and Stock Observers
//!
//! A `PassReport` is the snapshot handed to a `ProgressObserver`: which phase
//! is running, how many passes it has finished, and where the calibration
//! stands. Its `Display` output is the classic progress line:
//!
//! ```text
//! -512 498 -530 470 -601 389        0.9981  0.0215 -0.0005
//! └─ params, padded to 32 columns   mean    std-dev score
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::{
    calibration::{format_info_line, Calibration, CalibrationParams, MagnitudeStats},
    traits::ProgressObserver,
};

/// Which sample set a tuning run works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Evenly spaced subsample, for a cheap first approach
    Subsample,
    /// Every sample
    Full,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subsample => f.write_str("subsample"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Snapshot of the search after one outer pass
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    /// Phase the pass belongs to
    pub phase: Phase,
    /// Passes finished in this phase (0 = starting point)
    pub pass: usize,
    /// Params reached
    pub params: CalibrationParams,
    /// Magnitude statistics and score of `params`
    pub stats: MagnitudeStats,
    /// Number of samples the score was computed over
    pub samples: usize,
}

impl PassReport {
    /// Snapshot `calibration` as pass `pass` of `phase`
    pub fn new(phase: Phase, pass: usize, calibration: &Calibration) -> Self {
        Self {
            phase,
            pass,
            params: calibration.params(),
            stats: calibration.stats(),
            samples: calibration.samples().len(),
        }
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_info_line(f, &self.params, &self.stats)
    }
}

/// Forwards every report to the `log` facade
///
/// The starting point of a phase is logged at info level, later passes at
/// debug level. Without the `log` feature this observer does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_pass(&mut self, report: &PassReport) {
        if report.pass == 0 {
            log_info!("{} phase start ({} samples): {}", report.phase, report.samples, report);
        } else {
            log_debug!("{} pass {}: {}", report.phase, report.pass, report);
        }
    }
}

/// Keeps every report it receives
#[derive(Debug, Clone, Default)]
pub struct PassRecorder {
    reports: Vec<PassReport>,
}

impl PassRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports in the order they arrived
    pub fn reports(&self) -> &[PassReport] {
        &self.reports
    }

    /// Scores in the order they arrived
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.reports.iter().map(|r| r.stats.score)
    }

    /// Most recent report
    pub fn last(&self) -> Option<&PassReport> {
        self.reports.last()
    }

    /// Take the recorded reports
    pub fn into_reports(self) -> Vec<PassReport> {
        self.reports
    }
}

impl ProgressObserver for PassRecorder {
    fn on_pass(&mut self, report: &PassReport) {
        self.reports.push(*report);
    }
}
