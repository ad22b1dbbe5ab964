//! Shared helpers for integration tests
//!
//! - Deterministic pseudo-random generator (no external RNG in tests)
//! - Sensor model that distorts the unit sphere per axis
//! - Tolerance assertions

#![allow(dead_code)]

use imucal_core::{CalibrationParams, Sample, SampleSet};

/// Linear congruential generator, fixed seed for reproducible data
pub struct TestRng {
    seed: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        f64::from(self.seed) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform in [-amplitude, amplitude)
    pub fn noise(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}

/// Per-axis distortion of an ideal sensor: raw = offset + scale * unit
#[derive(Debug, Clone, Copy)]
pub struct SensorModel {
    pub scale: [f64; 3],
    pub offset: [f64; 3],
    /// Peak uniform noise added before rounding, in raw units
    pub noise: f64,
}

impl SensorModel {
    /// Typical consumer accelerometer: uneven gains, a few dozen counts of bias
    pub fn consumer_grade() -> Self {
        Self {
            scale: [1000.0, 950.0, 1100.0],
            offset: [30.0, -45.0, 12.0],
            noise: 0.0,
        }
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Params that undo this distortion exactly
    pub fn ideal_params(&self) -> CalibrationParams {
        CalibrationParams::from_axis_ranges([
            (self.offset[0] - self.scale[0], self.offset[0] + self.scale[0]),
            (self.offset[1] - self.scale[1], self.offset[1] + self.scale[1]),
            (self.offset[2] - self.scale[2], self.offset[2] + self.scale[2]),
        ])
    }

    /// Raw reading for a unit vector
    pub fn reading(&self, unit: [f64; 3], rng: &mut TestRng) -> Sample {
        let mut raw = |axis: usize| {
            let value = self.offset[axis] + self.scale[axis] * unit[axis] + rng.noise(self.noise);
            value.round() as i32
        };
        Sample::new(raw(0), raw(1), raw(2))
    }

    /// `count` readings spread evenly over the sphere (Fibonacci lattice)
    pub fn sphere(&self, count: usize, rng: &mut TestRng) -> SampleSet {
        let golden = core::f64::consts::PI * (3.0 - 5.0f64.sqrt());
        (0..count)
            .map(|i| {
                let z = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
                let r = (1.0 - z * z).sqrt();
                let theta = golden * i as f64;
                self.reading([r * theta.cos(), r * theta.sin(), z], rng)
            })
            .collect()
    }
}

/// Assert `|actual - expected| <= tolerance`
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (actual, expected, tolerance): (f64, f64, f64) = ($actual, $expected, $tolerance);
        assert!(
            (actual - expected).abs() <= tolerance,
            "{} = {}, expected {} +/- {}",
            stringify!($actual),
            actual,
            expected,
            tolerance
        );
    }};
}
