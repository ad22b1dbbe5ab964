//! Optimizer Configuration
//!
//! All knobs of a calibration run in one `Copy` struct. The defaults
//! reproduce the classic behaviour: 1st/99th percentile guess, unit steps,
//! greedy ray walk, a 300-sample first phase followed by a full-set phase.
//!
//! ```rust
//! use imucal_core::optimizer::{OptimizerConfig, SearchStrategy};
//!
//! let config = OptimizerConfig::default()
//!     .with_strategy(SearchStrategy::BestOfThree)
//!     .with_max_passes(500)
//!     .with_two_phase(false);
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    constants::{
        DEFAULT_HIGH_PERCENTILE, DEFAULT_LOW_PERCENTILE, DEFAULT_MAX_PASSES, DEFAULT_STEP,
        DEFAULT_SUBSAMPLE_SIZE, MIN_SAMPLES_FOR_GUESS,
    },
    errors::{CalibrationError, CalibrationResult},
};

/// How a single parameter is moved during one outer pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStrategy {
    /// Keep stepping in one direction while the score strictly improves,
    /// first upwards, then downwards if going up gained nothing
    #[default]
    RayWalk,
    /// Take at most one step: the best of `-step`, no change, `+step`
    ///
    /// Cheaper per pass but needs many more passes to cross a large
    /// distance. Ties keep the current value.
    BestOfThree,
}

/// Settings for `Optimizer`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Fixed step added to or subtracted from one parameter, in raw units
    pub step: f64,

    /// Outer passes allowed per phase before giving up with `NonConvergence`
    pub max_passes: usize,

    /// Per-parameter move rule
    pub strategy: SearchStrategy,

    /// Percentile used for each axis minimum in the initial guess
    pub low_percentile: f64,

    /// Percentile used for each axis maximum in the initial guess
    pub high_percentile: f64,

    /// Target size of the evenly spaced subsample for the first phase
    pub subsample_size: usize,

    /// Tune on the subsample before tuning on the full set
    pub two_phase: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            max_passes: DEFAULT_MAX_PASSES,
            strategy: SearchStrategy::RayWalk,
            low_percentile: DEFAULT_LOW_PERCENTILE,
            high_percentile: DEFAULT_HIGH_PERCENTILE,
            subsample_size: DEFAULT_SUBSAMPLE_SIZE,
            two_phase: true,
        }
    }
}

impl OptimizerConfig {
    /// Tune on the full set only
    ///
    /// Slower on large logs, but every pass sees every sample.
    pub fn single_phase() -> Self {
        Self {
            two_phase: false,
            ..Self::default()
        }
    }

    /// Historical one-step-per-parameter search
    pub fn best_of_three() -> Self {
        Self {
            strategy: SearchStrategy::BestOfThree,
            ..Self::default()
        }
    }

    /// Set the parameter step
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the per-phase pass budget
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Set the search strategy
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the initial-guess percentiles
    pub fn with_percentiles(mut self, low: f64, high: f64) -> Self {
        self.low_percentile = low;
        self.high_percentile = high;
        self
    }

    /// Set the first-phase subsample size
    pub fn with_subsample_size(mut self, size: usize) -> Self {
        self.subsample_size = size;
        self
    }

    /// Enable or disable the subsample phase
    pub fn with_two_phase(mut self, enabled: bool) -> Self {
        self.two_phase = enabled;
        self
    }

    /// Reject settings that cannot drive a search
    pub fn validate(&self) -> CalibrationResult<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(CalibrationError::InvalidConfig {
                reason: "step must be positive and finite",
            });
        }
        if self.max_passes == 0 {
            return Err(CalibrationError::InvalidConfig {
                reason: "max_passes must be at least 1",
            });
        }
        if !(0.0..=100.0).contains(&self.low_percentile)
            || !(0.0..=100.0).contains(&self.high_percentile)
        {
            return Err(CalibrationError::InvalidConfig {
                reason: "percentiles must lie in [0, 100]",
            });
        }
        if self.low_percentile >= self.high_percentile {
            return Err(CalibrationError::InvalidConfig {
                reason: "low percentile must be below high percentile",
            });
        }
        if self.two_phase && self.subsample_size < MIN_SAMPLES_FOR_GUESS {
            return Err(CalibrationError::InvalidConfig {
                reason: "subsample_size too small for a first phase",
            });
        }
        Ok(())
    }
}
