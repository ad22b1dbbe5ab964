//! Calibration Search
//!
//! ## Overview
//!
//! The optimizer turns a batch of raw samples into six calibration bounds:
//!
//! ```text
//! SampleSet ──▶ initial_guess ──▶ tune(subsample) ──▶ tune(full set) ──▶ params
//!               1st/99th pct.     cheap first pass     accurate finish
//! ```
//!
//! ### Initial Guess
//!
//! Per axis the 1st and 99th percentile of the raw values (nearest rank).
//! Percentiles rather than true extremes, so a single glitch reading cannot
//! stretch an axis.
//!
//! ### Tuning
//!
//! Deterministic coordinate ascent. Each outer pass moves the six parameters
//! one at a time (see [`SearchStrategy`]), then compares the params with
//! those at the start of the pass. Identical params mean no single-parameter
//! step improves the score any more, and the phase is done.
//!
//! Every accepted step strictly increases a score that is bounded above by
//! zero, so in exact arithmetic the loop ends. The pass budget
//! (`max_passes`) covers floating-point corner cases; running out of it is
//! reported as `NonConvergence` with the last params reached.
//!
//! ### Two Phases
//!
//! Scoring costs one pass over all samples, and early passes move the bounds
//! a long way. Running those passes on a ~300 sample evenly spaced subsample
//! and only polishing on the full set gives the same answer for a fraction of
//! the work on large logs.
//!
//! ## Usage
//!
//! ```rust
//! use imucal_core::{Optimizer, OptimizerConfig, SampleSet};
//! use imucal_core::optimizer::LogObserver;
//!
//! let samples = SampleSet::load([
//!     [-480, 20, 15], [520, 20, 15], [20, -470, 15],
//!     [20, 510, 15], [20, 20, -495], [20, 20, 525],
//! ]);
//!
//! let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
//! let outcome = optimizer.calibrate_with(&samples, &mut LogObserver).unwrap();
//! assert!(outcome.calibration.score() > -1e-3);
//! ```

mod config;
mod report;
mod search;

pub use config::{OptimizerConfig, SearchStrategy};
pub use report::{LogObserver, PassRecorder, PassReport, Phase};

use crate::{
    calibration::{Calibration, CalibrationParams},
    constants::{AXIS_COUNT, MIN_SAMPLES_FOR_GUESS},
    errors::{CalibrationError, CalibrationResult},
    sample::SampleSet,
    stats,
    traits::{NoopObserver, ProgressObserver},
};

/// Final calibration of a tuning run and the work it took
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    /// Converged calibration, bound to the samples of the last phase
    pub calibration: Calibration,
    /// Outer passes executed, summed over all phases
    pub passes: usize,
}

/// Coordinate-ascent calibration search
#[derive(Debug, Clone, Copy, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Create an optimizer, rejecting invalid settings
    pub fn new(config: OptimizerConfig) -> CalibrationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active settings
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Percentile-based starting params
    ///
    /// Needs at least two samples. Fails with `DegenerateAxis` when the
    /// low and high percentile of an axis coincide.
    pub fn initial_guess(&self, samples: &SampleSet) -> CalibrationResult<CalibrationParams> {
        if samples.len() < MIN_SAMPLES_FOR_GUESS {
            return Err(CalibrationError::InsufficientData {
                required: MIN_SAMPLES_FOR_GUESS,
                available: samples.len(),
            });
        }

        let mut ranges = [(0.0, 0.0); AXIS_COUNT];
        for (axis, range) in ranges.iter_mut().enumerate() {
            let [low, high] = stats::percentiles(
                samples.axis_values(axis),
                [self.config.low_percentile, self.config.high_percentile],
            )
            .ok_or(CalibrationError::InsufficientData {
                required: MIN_SAMPLES_FOR_GUESS,
                available: 0,
            })?;

            if low == high {
                return Err(CalibrationError::DegenerateAxis { axis, value: low });
            }
            *range = (low, high);
        }

        let params = CalibrationParams::from_axis_ranges(ranges);
        log_debug!("initial guess from {} samples: {}", samples.len(), params);
        Ok(params)
    }

    /// Run coordinate ascent from `start` until no single step improves it
    ///
    /// The observer sees the starting point (pass 0) and the result of every
    /// outer pass.
    pub fn tune<O>(
        &self,
        start: Calibration,
        phase: Phase,
        observer: &mut O,
    ) -> CalibrationResult<OptimizationOutcome>
    where
        O: ProgressObserver + ?Sized,
    {
        let mut cal = start;
        let mut passes = 0;
        observer.on_pass(&PassReport::new(phase, passes, &cal));

        loop {
            if passes >= self.config.max_passes {
                log_warn!(
                    "{} phase did not converge after {} passes: {}",
                    phase,
                    passes,
                    cal
                );
                return Err(CalibrationError::NonConvergence {
                    passes,
                    last: cal.params(),
                });
            }

            let pass_start = cal.params();
            cal = match self.config.strategy {
                SearchStrategy::RayWalk => search::ray_walk_pass(cal, self.config.step)?,
                SearchStrategy::BestOfThree => search::best_of_three_pass(cal, self.config.step)?,
            };
            passes += 1;
            observer.on_pass(&PassReport::new(phase, passes, &cal));

            if cal.params() == pass_start {
                log_debug!("{} phase converged after {} passes", phase, passes);
                return Ok(OptimizationOutcome { calibration: cal, passes });
            }
        }
    }

    /// Tune `initial` against `samples` in a single phase
    pub fn optimize(
        &self,
        initial: CalibrationParams,
        samples: &SampleSet,
    ) -> CalibrationResult<CalibrationParams> {
        self.optimize_with(initial, samples, &mut NoopObserver)
    }

    /// Like [`optimize`](Self::optimize), reporting progress to `observer`
    pub fn optimize_with<O>(
        &self,
        initial: CalibrationParams,
        samples: &SampleSet,
        observer: &mut O,
    ) -> CalibrationResult<CalibrationParams>
    where
        O: ProgressObserver + ?Sized,
    {
        let start = Calibration::new(initial, samples.clone())?;
        self.tune(start, Phase::Full, observer)
            .map(|outcome| outcome.calibration.params())
    }

    /// Guess, then tune (two-phase when configured and worthwhile)
    pub fn calibrate(&self, samples: &SampleSet) -> CalibrationResult<CalibrationParams> {
        self.calibrate_with(samples, &mut NoopObserver)
            .map(|outcome| outcome.calibration.params())
    }

    /// Like [`calibrate`](Self::calibrate), reporting progress to `observer`
    pub fn calibrate_with<O>(
        &self,
        samples: &SampleSet,
        observer: &mut O,
    ) -> CalibrationResult<OptimizationOutcome>
    where
        O: ProgressObserver + ?Sized,
    {
        let guess = self.initial_guess(samples)?;
        log_info!("calibrating {} samples, initial guess {}", samples.len(), guess);

        let mut start = Calibration::new(guess, samples.clone())?;
        let mut passes = 0;

        if self.config.two_phase && samples.len() > self.config.subsample_size {
            let subsample = samples.regular_sample(self.config.subsample_size);
            let rough = self.tune(start.rebind(&subsample)?, Phase::Subsample, observer)?;
            passes += rough.passes;
            start = rough.calibration.rebind(samples)?;
        }

        let mut outcome = self.tune(start, Phase::Full, observer)?;
        outcome.passes += passes;
        log_info!(
            "calibration finished after {} passes: {}",
            outcome.passes,
            outcome.calibration
        );
        Ok(outcome)
    }
}

/// Percentile-based starting params with default settings
pub fn initial_guess(samples: &SampleSet) -> CalibrationResult<CalibrationParams> {
    Optimizer::default().initial_guess(samples)
}

/// Single-phase coordinate ascent with default settings
pub fn optimize(
    initial: CalibrationParams,
    samples: &SampleSet,
) -> CalibrationResult<CalibrationParams> {
    Optimizer::default().optimize(initial, samples)
}

/// Guess plus two-phase tuning with default settings
pub fn calibrate(samples: &SampleSet) -> CalibrationResult<CalibrationParams> {
    Optimizer::default().calibrate(samples)
}
