//! Single-Pass Coordinate Moves
//!
//! One outer pass visits the six parameters in order and moves each one with
//! the configured strategy while holding the others fixed.
//!
//! ## Ray Walk
//!
//! ```text
//! cal ──+step──▶ c1 ──+step──▶ c2 ──+step──▶ c3
//!       better        better        not better  → keep c2
//! ```
//!
//! Upwards is tried first; downwards only when the very first upward step
//! failed to improve. Candidates whose axis range collapses to zero width
//! cannot be scored and end the walk like a non-improving step.
//!
//! ## Best of Three
//!
//! ```text
//! [cal - step, cal, cal + step]  → highest score, ties keep cal
//! ```

use crate::{
    calibration::Calibration,
    constants::PARAM_COUNT,
    errors::{CalibrationError, CalibrationResult},
};

/// Candidate one step away, or `None` if it would have a zero-width axis
fn neighbour(
    cal: &Calibration,
    index: usize,
    delta: f64,
) -> CalibrationResult<Option<Calibration>> {
    match cal.increment(index, delta) {
        Ok(candidate) => Ok(Some(candidate)),
        Err(CalibrationError::DegenerateAxis { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Walk parameter `index` by `delta` while the score strictly improves
///
/// Returns the last improving calibration, or `None` when the first step
/// already fails to improve.
pub(crate) fn try_direction(
    cal: &Calibration,
    index: usize,
    delta: f64,
) -> CalibrationResult<Option<Calibration>> {
    let mut improved: Option<Calibration> = None;

    loop {
        let current = improved.as_ref().unwrap_or(cal);
        let candidate = match neighbour(current, index, delta)? {
            Some(candidate) => candidate,
            None => return Ok(improved),
        };

        // NaN never compares greater, so it ends the walk too
        if !(candidate.score() > current.score()) {
            return Ok(improved);
        }
        improved = Some(candidate);
    }
}

/// One outer pass of greedy ray walks over all six parameters
pub(crate) fn ray_walk_pass(cal: Calibration, step: f64) -> CalibrationResult<Calibration> {
    let mut cal = cal;
    for index in 0..PARAM_COUNT {
        cal = match try_direction(&cal, index, step)? {
            Some(better) => better,
            None => try_direction(&cal, index, -step)?.unwrap_or(cal),
        };
    }
    Ok(cal)
}

/// One outer pass choosing the best of down / unchanged / up per parameter
pub(crate) fn best_of_three_pass(cal: Calibration, step: f64) -> CalibrationResult<Calibration> {
    let mut cal = cal;
    for index in 0..PARAM_COUNT {
        let down = neighbour(&cal, index, -step)?;
        let up = neighbour(&cal, index, step)?;

        for candidate in [down, up].into_iter().flatten() {
            if candidate.score() > cal.score() {
                cal = candidate;
            }
        }
    }
    Ok(cal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calibration::CalibrationParams, sample::SampleSet};

    /// Points on the axes at distance 10; the optimum is +-10 on every axis
    fn axis_points() -> SampleSet {
        SampleSet::load([[10, 0, 0], [-10, 0, 0], [0, 10, 0], [0, -10, 0], [0, 0, 10], [0, 0, -10]])
    }

    fn calibration(values: [f64; 6]) -> Calibration {
        Calibration::new(CalibrationParams::new(values), axis_points()).unwrap()
    }

    #[test]
    fn ray_walks_until_no_improvement() {
        // x max too small: walking up reaches 10 and stops there
        let cal = calibration([-10.0, 6.0, -10.0, 10.0, -10.0, 10.0]);
        let walked = try_direction(&cal, 1, 1.0).unwrap().unwrap();
        assert_eq!(walked.params()[1], 10.0);
        assert!(walked.score() > cal.score());
    }

    #[test]
    fn non_improving_first_step_is_no_change() {
        let cal = calibration([-10.0, 10.0, -10.0, 10.0, -10.0, 10.0]);
        assert!(try_direction(&cal, 0, 1.0).unwrap().is_none());
        assert!(try_direction(&cal, 0, -1.0).unwrap().is_none());
    }

    #[test]
    fn walk_stops_before_collapsing_an_axis() {
        let cal = calibration([-10.0, -9.0, -10.0, 10.0, -10.0, 10.0]);
        // Moving x max down would hit width 0 on the first step
        assert!(try_direction(&cal, 1, -1.0).unwrap().is_none());
    }

    #[test]
    fn down_is_walked_when_up_fails() {
        let cal = calibration([-10.0, 14.0, -10.0, 10.0, -10.0, 10.0]);
        assert!(try_direction(&cal, 1, 1.0).unwrap().is_none());

        let walked = try_direction(&cal, 1, -1.0).unwrap().unwrap();
        assert_eq!(walked.params()[1], 10.0);
    }

    #[test]
    fn ray_walk_pass_improves_score() {
        let cal = calibration([-10.0, 14.0, -10.0, 10.0, -10.0, 10.0]);
        let next = ray_walk_pass(cal.clone(), 1.0).unwrap();
        assert!(next.score() > cal.score());
    }

    #[test]
    fn ray_walk_pass_keeps_optimum() {
        let cal = calibration([-10.0, 10.0, -10.0, 10.0, -10.0, 10.0]);
        let next = ray_walk_pass(cal.clone(), 1.0).unwrap();
        assert_eq!(next, cal);
    }

    #[test]
    fn best_of_three_moves_at_most_one_step() {
        let cal = calibration([-10.0, 14.0, -10.0, 10.0, -10.0, 10.0]);
        let next = best_of_three_pass(cal.clone(), 1.0).unwrap();

        assert!(next.score() > cal.score());
        for i in 0..6 {
            assert!((next.params()[i] - cal.params()[i]).abs() <= 1.0);
        }
    }

    #[test]
    fn best_of_three_keeps_optimum() {
        let cal = calibration([-10.0, 10.0, -10.0, 10.0, -10.0, 10.0]);
        let next = best_of_three_pass(cal.clone(), 1.0).unwrap();
        assert_eq!(next, cal);
    }
}
