//! Calibration Parameters and Sphericity Scoring
//!
//! ## Overview
//!
//! A calibration is six numbers: a (min, max) pair for each axis. Scaling maps
//! each axis range linearly onto `[-1, 1]`:
//!
//! ```text
//! scaled[a] = (raw[a] - min[a]) / (max[a] - min[a]) * 2 - 1
//! ```
//!
//! A sensor rotated through every orientation in a constant field (earth's
//! magnetic field, gravity) traces a sphere. With the right bounds every
//! scaled reading has unit length, so the fit is scored by how far the scaled
//! magnitudes stray from 1:
//!
//! ```text
//! score = -mean((|scaled| - 1)^2)
//! ```
//!
//! The score is never positive; 0 means every reading lands on the unit
//! sphere. The optimizer maximizes it.
//!
//! ## Parameter Layout
//!
//! ```text
//! index:  0      1      2      3      4      5
//!         x_min  x_max  y_min  y_max  z_min  z_max
//! ```
//!
//! ## Immutability
//!
//! `Calibration` never changes after construction. `increment` and `rebind`
//! build new instances, so a calibration captured at the start of a pass is
//! still valid when the pass ends and can be compared against.
//!
//! Scaled magnitudes and the score are computed once in the constructor. The
//! search asks for the score of every candidate at least twice (once as the
//! new candidate, once as the incumbent), and evaluating it is the dominant
//! cost of the whole run.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use crate::{
    constants::{AXIS_COUNT, MIN_SAMPLES_FOR_GUESS, PARAM_COUNT},
    errors::{CalibrationError, CalibrationResult},
    sample::{Sample, SampleSet},
    stats,
};

/// Six calibration bounds: (min, max) for X, Y and Z
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CalibrationParams {
    values: [f64; PARAM_COUNT],
}

impl CalibrationParams {
    /// Wrap six values laid out as `[x_min, x_max, y_min, y_max, z_min, z_max]`
    pub const fn new(values: [f64; PARAM_COUNT]) -> Self {
        Self { values }
    }

    /// Build from one `(min, max)` pair per axis
    pub fn from_axis_ranges(ranges: [(f64, f64); AXIS_COUNT]) -> Self {
        let mut values = [0.0; PARAM_COUNT];
        for (axis, (min, max)) in ranges.into_iter().enumerate() {
            values[2 * axis] = min;
            values[2 * axis + 1] = max;
        }
        Self { values }
    }

    /// All six values
    pub fn values(&self) -> [f64; PARAM_COUNT] {
        self.values
    }

    /// `(min, max)` of one axis
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 3`.
    pub fn axis_range(&self, axis: usize) -> (f64, f64) {
        (self.values[2 * axis], self.values[2 * axis + 1])
    }

    /// Copy with one value shifted by `delta`
    pub fn incremented(&self, index: usize, delta: f64) -> CalibrationResult<Self> {
        if index >= PARAM_COUNT {
            return Err(CalibrationError::InvalidParameterIndex { index });
        }
        let mut values = self.values;
        values[index] += delta;
        Ok(Self { values })
    }

    /// Reject axes whose range has zero (or non-finite) width
    pub fn check_ranges(&self) -> CalibrationResult<()> {
        for axis in 0..AXIS_COUNT {
            let (min, max) = self.axis_range(axis);
            let width = max - min;
            if width == 0.0 || !width.is_finite() {
                return Err(CalibrationError::DegenerateAxis { axis, value: min });
            }
        }
        Ok(())
    }

    /// Scale one raw reading into the normalized `[-1, 1]` cube
    ///
    /// Each output component depends only on the matching input component.
    /// The ranges must have been checked with `check_ranges`.
    pub fn scale(&self, sample: &Sample) -> [f64; AXIS_COUNT] {
        let raw = sample.to_f64();
        let mut scaled = [0.0; AXIS_COUNT];
        for axis in 0..AXIS_COUNT {
            let (min, max) = self.axis_range(axis);
            scaled[axis] = (raw[axis] - min) / (max - min) * 2.0 - 1.0;
        }
        scaled
    }

    /// Euclidean length of the scaled reading
    pub fn scaled_magnitude(&self, sample: &Sample) -> f64 {
        let [x, y, z] = self.scale(sample);
        libm::sqrt(x * x + y * y + z * z)
    }
}

impl Index<usize> for CalibrationParams {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl From<[f64; PARAM_COUNT]> for CalibrationParams {
    fn from(values: [f64; PARAM_COUNT]) -> Self {
        Self { values }
    }
}

impl fmt::Display for CalibrationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Distribution of scaled magnitudes under one calibration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagnitudeStats {
    /// Mean scaled magnitude (1.0 for a perfect fit)
    pub mean: f64,
    /// Sample standard deviation of scaled magnitudes
    pub std_dev: f64,
    /// Negative mean squared deviation from 1.0
    pub score: f64,
}

impl MagnitudeStats {
    /// Needs at least two magnitudes for the sample standard deviation
    fn from_magnitudes(magnitudes: &[f64]) -> CalibrationResult<Self> {
        let insufficient = CalibrationError::InsufficientData {
            required: MIN_SAMPLES_FOR_GUESS,
            available: magnitudes.len(),
        };
        let mean = stats::average(magnitudes).ok_or(insufficient)?;
        let std_dev = stats::std_deviation(magnitudes).ok_or(insufficient)?;

        let deviations: f64 = magnitudes.iter().map(|m| (m - 1.0) * (m - 1.0)).sum();
        let mean_squared = deviations / magnitudes.len() as f64;
        Ok(Self {
            mean,
            std_dev,
            // 0.0 - x keeps a perfect fit at +0.0 rather than -0.0
            score: 0.0 - mean_squared,
        })
    }
}

/// One progress line: params padded to 32 columns, then mean, std-dev, score
pub(crate) fn format_info_line(
    f: &mut fmt::Formatter<'_>,
    params: &CalibrationParams,
    stats: &MagnitudeStats,
) -> fmt::Result {
    write!(
        f,
        "{:<32} {:7.4} {:7.4} {:7.4}",
        params.to_string(),
        stats.mean,
        stats.std_dev,
        stats.score
    )
}

/// Calibration bound to the samples it is scored against
///
/// Equality compares params only.
#[derive(Clone)]
pub struct Calibration {
    params: CalibrationParams,
    samples: SampleSet,
    magnitudes: Vec<f64>,
    stats: MagnitudeStats,
}

impl Calibration {
    /// Bind `params` to `samples` and score them
    ///
    /// Fails with `DegenerateAxis` when an axis range has zero width and with
    /// `InsufficientData` when `samples` holds fewer than two readings, since
    /// the spread of the magnitudes is undefined below that.
    pub fn new(params: CalibrationParams, samples: SampleSet) -> CalibrationResult<Self> {
        params.check_ranges()?;
        if samples.len() < MIN_SAMPLES_FOR_GUESS {
            return Err(CalibrationError::InsufficientData {
                required: MIN_SAMPLES_FOR_GUESS,
                available: samples.len(),
            });
        }

        let magnitudes: Vec<f64> = samples
            .iter()
            .map(|sample| params.scaled_magnitude(sample))
            .collect();
        let stats = MagnitudeStats::from_magnitudes(&magnitudes)?;

        Ok(Self { params, samples, magnitudes, stats })
    }

    /// The six bounds
    pub fn params(&self) -> CalibrationParams {
        self.params
    }

    /// Samples this calibration is scored against
    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    /// Scale one raw reading into the normalized cube
    pub fn scale(&self, sample: &Sample) -> [f64; AXIS_COUNT] {
        self.params.scale(sample)
    }

    /// Length of one scaled reading
    pub fn scaled_magnitude(&self, sample: &Sample) -> f64 {
        self.params.scaled_magnitude(sample)
    }

    /// Scaled readings of the bound samples, in sample order
    pub fn scaled_readings(&self) -> impl Iterator<Item = [f64; AXIS_COUNT]> + '_ {
        self.samples.iter().map(|sample| self.params.scale(sample))
    }

    /// Scaled magnitudes of the bound samples, in sample order
    pub fn scaled_magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Mean, spread and score of the scaled magnitudes
    pub fn stats(&self) -> MagnitudeStats {
        self.stats
    }

    /// Mean scaled magnitude
    pub fn mean_magnitude(&self) -> f64 {
        self.stats.mean
    }

    /// Standard deviation of scaled magnitudes
    pub fn std_dev_magnitude(&self) -> f64 {
        self.stats.std_dev
    }

    /// Fitness: `-mean((magnitude - 1)^2)`, higher is better, at most 0
    pub fn score(&self) -> f64 {
        self.stats.score
    }

    /// New calibration with parameter `index` shifted by `delta`, same samples
    pub fn increment(&self, index: usize, delta: f64) -> CalibrationResult<Self> {
        Self::new(self.params.incremented(index, delta)?, self.samples.clone())
    }

    /// Same params scored against another sample set
    pub fn rebind(&self, samples: &SampleSet) -> CalibrationResult<Self> {
        Self::new(self.params, samples.clone())
    }

    /// Progress line: params, mean magnitude, std-dev, score
    pub fn info_string(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Calibration {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_info_line(f, &self.params, &self.stats)
    }
}

impl fmt::Debug for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calibration")
            .field("params", &self.params)
            .field("samples", &self.samples.len())
            .field("score", &self.stats.score)
            .finish()
    }
}

/// Score `params` against `samples` without keeping the calibration
pub fn score(params: CalibrationParams, samples: &SampleSet) -> CalibrationResult<f64> {
    Calibration::new(params, samples.clone()).map(|cal| cal.score())
}
