//! Example 01: Calibrate a Sensor Log from Stdin
//!
//! Reads raw readings (`x y z` or `x,y,z` per line) from stdin, prints the
//! progress line of every pass to stderr and the final six bounds to stdout:
//!
//! ```text
//! cargo run --example 01_calibrate_stdin < readings.txt
//! ```
//!
//! On failure the error goes to stderr; if the search ran out of passes the
//! last params reached are still printed.

use std::io;
use std::process::ExitCode;

use imucal_core::{read_samples, CalibrationError, Optimizer, PassReport};

fn main() -> ExitCode {
    let samples = match read_samples(io::stdin().lock()) {
        Ok(samples) => samples,
        Err(e) => {
            eprintln!("error reading samples: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut progress = |report: &PassReport| eprintln!("{}", report);

    match Optimizer::default().calibrate_with(&samples, &mut progress) {
        Ok(outcome) => {
            println!("{}", outcome.calibration.params());
            ExitCode::SUCCESS
        }
        Err(CalibrationError::NonConvergence { passes, last }) => {
            eprintln!("no convergence after {} passes", passes);
            println!("{}", last);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("calibration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
