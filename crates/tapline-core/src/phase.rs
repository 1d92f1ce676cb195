//! Phase unwrapping for per-bin phase sequences.
//!
//! Phase values from a transform's argument function are confined to a
//! principal branch. [`unwrap_phase`] reconstructs a continuous curve by
//! carrying the shortest angular step between consecutive samples, so jumps of
//! π or more are replaced by their 2π-complement while the net rotation count
//! is preserved.
//!
//! Reference: Ghiglia & Pritt, "Two-Dimensional Phase Unwrapping" (1998), ch. 3.

use std::f64::consts::{PI, TAU};

/// Reduce an angle into `[-π, π)`.
pub fn wrap_to_pi(angle: f64) -> f64 {
    let mut x = (angle + PI) % TAU;
    if x < 0.0 {
        x += TAU;
    }
    x - PI
}

/// Signed shortest step from `from` to `to`, reduced into `[-π, π)`.
pub fn angle_diff(from: f64, to: f64) -> f64 {
    wrap_to_pi(to - from)
}

/// Unwrap a sequence of wrapped phases in radians.
///
/// `out[0] = phase[0]`, and each following value moves from the previous
/// output by the shortest step to the next wrapped input:
///
/// ```text
/// out[i] = out[i-1] - angle_diff(phase[i], wrap(out[i-1]))
/// ```
///
/// # Example
/// ```rust
/// use std::f64::consts::PI;
/// use tapline_core::phase::unwrap_phase;
///
/// let unwrapped = unwrap_phase(&[0.0, -PI, -2.0 * PI]);
/// assert!((unwrapped[1] - PI).abs() < 1e-9);
/// assert!((unwrapped[2] - 2.0 * PI).abs() < 1e-9);
/// ```
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let Some(&first) = phase.first() else {
        return Vec::new();
    };

    let mut unwrapped = Vec::with_capacity(phase.len());
    unwrapped.push(first);

    let mut previous = first;
    for &next in &phase[1..] {
        previous -= angle_diff(next, wrap_to_pi(previous));
        unwrapped.push(previous);
    }

    unwrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-7, "index {i}: expected {e}, got {a}");
        }
    }

    #[test]
    fn adds_full_turns_on_pi_jumps() {
        let got = unwrap_phase(&[0.0, -PI, -2.0 * PI, -3.0 * PI, -3.5 * PI]);
        assert_close(&got, &[0.0, PI, 2.0 * PI, 3.0 * PI, 2.5 * PI]);
    }

    #[test]
    fn alternating_pi_settles_on_pi() {
        let got = unwrap_phase(&[0.0, -PI, PI, -PI]);
        assert_close(&got, &[0.0, PI, PI, PI]);
    }

    #[test]
    fn small_steps_pass_through() {
        let input = [0.0, PI, 2.0 + PI, 3.0 + PI];
        assert_close(&unwrap_phase(&input), &input);
    }

    #[test]
    fn wrapped_linear_ramp_is_restored() {
        let ideal: Vec<f64> = (0..64).map(|i| i as f64 * 0.4).collect();
        let wrapped: Vec<f64> = ideal.iter().map(|&v| wrap_to_pi(v)).collect();
        assert_close(&unwrap_phase(&wrapped), &ideal);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(unwrap_phase(&[]).is_empty());
    }

    #[test]
    fn wrap_to_pi_range() {
        assert!((wrap_to_pi(PI) + PI).abs() < 1e-12);
        assert!((wrap_to_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_to_pi(-0.5) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn angle_diff_takes_short_way_round() {
        let d = angle_diff(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-12, "got {d}");
    }
}
