//! Example 02: Calibrating Synthetic Data
//!
//! This example demonstrates how to:
//! - Simulate an accelerometer with per-axis gain and offset errors
//! - Compare the two-phase search with a single full-set phase
//! - Inspect per-pass progress with a `PassRecorder`

use imucal_core::{
    Calibration, CalibrationParams, Optimizer, OptimizerConfig, PassRecorder, Phase, SampleSet,
};

const GAIN: [f64; 3] = [1000.0, 950.0, 1100.0];
const OFFSET: [f64; 3] = [30.0, -45.0, 12.0];

/// Points of a Fibonacci lattice on the unit sphere, distorted per axis
fn simulate(count: usize) -> SampleSet {
    let golden = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    (0..count)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - z * z).sqrt();
            let theta = golden * i as f64;
            let unit = [r * theta.cos(), r * theta.sin(), z];
            let raw = |axis: usize| (OFFSET[axis] + GAIN[axis] * unit[axis]).round() as i32;
            [raw(0), raw(1), raw(2)]
        })
        .collect()
}

fn run(name: &str, config: OptimizerConfig, samples: &SampleSet) {
    let optimizer = match Optimizer::new(config) {
        Ok(optimizer) => optimizer,
        Err(e) => {
            println!("{}: {}", name, e);
            return;
        }
    };

    let mut recorder = PassRecorder::new();
    match optimizer.calibrate_with(samples, &mut recorder) {
        Ok(outcome) => {
            let subsample_passes = recorder
                .into_reports()
                .into_iter()
                .filter(|r| r.phase == Phase::Subsample && r.pass > 0)
                .count();
            println!("{}:", name);
            println!("  passes: {} ({} on the subsample)", outcome.passes, subsample_passes);
            println!("  {}", outcome.calibration);
        }
        Err(e) => println!("{}: {}", name, e),
    }
}

fn main() {
    println!("=== Synthetic Sphere Calibration ===\n");

    let samples = simulate(5000);
    println!("{} distinct samples\n", samples.len());

    let ideal = CalibrationParams::from_axis_ranges([
        (OFFSET[0] - GAIN[0], OFFSET[0] + GAIN[0]),
        (OFFSET[1] - GAIN[1], OFFSET[1] + GAIN[1]),
        (OFFSET[2] - GAIN[2], OFFSET[2] + GAIN[2]),
    ]);
    if let Ok(cal) = Calibration::new(ideal, samples.clone()) {
        println!("ideal:\n  {}\n", cal);
    }

    run("two-phase ray walk", OptimizerConfig::default(), &samples);
    run("single-phase ray walk", OptimizerConfig::single_phase(), &samples);
    run("best of three", OptimizerConfig::best_of_three(), &samples);
}
