//! Progress Reporting Hook
//!
//! The optimizer calls an observer once with the starting calibration of a
//! phase and once after every outer pass. Observers only watch: they cannot
//! steer or stop the search.
//!
//! Any `FnMut(&PassReport)` closure is an observer, so ad-hoc reporting needs
//! no new type:
//!
//! ```rust
//! use imucal_core::{Optimizer, SampleSet};
//! use imucal_core::optimizer::PassReport;
//!
//! let samples = SampleSet::load([[-100, 0, 0], [100, 0, 0], [0, -100, 0],
//!                                [0, 100, 0], [0, 0, -100], [0, 0, 100]]);
//! let mut lines = Vec::new();
//! let mut observer = |report: &PassReport| lines.push(report.to_string());
//!
//! let optimizer = Optimizer::default();
//! let params = optimizer.initial_guess(&samples).unwrap();
//! optimizer.optimize_with(params, &samples, &mut observer).unwrap();
//! assert!(!lines.is_empty());
//! ```

use crate::optimizer::PassReport;

/// Receives a snapshot after each outer pass of the search
pub trait ProgressObserver {
    /// Called with the calibration reached so far
    fn on_pass(&mut self, report: &PassReport);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&PassReport),
{
    fn on_pass(&mut self, report: &PassReport) {
        self(report)
    }
}

/// Observer that ignores every report
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_pass(&mut self, _report: &PassReport) {}
}
