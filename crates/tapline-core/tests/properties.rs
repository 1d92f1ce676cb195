//! Property-based tests for tapline-core.
//!
//! Checks design invariants (tap parity, coefficient bounds, phase
//! continuity, probe stability) over randomized parameters with proptest.

use proptest::prelude::*;
use tapline_core::{
    Filter, FirFilter, PassType, RcCircuit, SineWave, Window, normalize, phase_shift, to_db,
    unwrap_phase, wrap_to_pi,
};

fn pass_type(variant: usize) -> PassType {
    if variant % 2 == 0 { PassType::Low } else { PassType::High }
}

fn window(variant: usize) -> Window {
    if variant % 2 == 0 { Window::Blackman } else { Window::Rectangular }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Optimal sizing always lands on an odd tap count whose transition
    /// length never exceeds the one requested.
    #[test]
    fn optimal_tap_count_is_odd(
        sampling_rate in 100u32..200_000,
        attenuation in 1.0f64..120.0,
        transition in 1u32..5000,
    ) {
        let taps = FirFilter::optimal_tap_count(sampling_rate, attenuation, transition).unwrap();
        prop_assert_eq!(taps % 2, 1);
        let reached = FirFilter::transition_length(sampling_rate, attenuation, taps).unwrap();
        prop_assert!(reached <= transition, "taps={} reached={} wanted={}", taps, reached, transition);
    }

    /// Normalized coefficients stay finite, bounded, and peak at exactly 1.
    #[test]
    fn fir_coefficients_are_bounded(
        sampling_rate in 50u32..4000,
        cutoff_fraction in 0.01f64..0.99,
        taps in 3usize..64,
        pass in 0usize..2,
        win in 0usize..2,
    ) {
        let nyquist = sampling_rate / 2;
        let cutoff = ((f64::from(nyquist) * cutoff_fraction) as u32).clamp(1, nyquist - 1);
        let taps = taps.min(sampling_rate as usize);
        let filter = FirFilter::new(pass_type(pass), cutoff, taps, window(win), sampling_rate).unwrap();

        prop_assert_eq!(filter.tap_count(), taps);
        let mut peak = 0.0f64;
        for &c in filter.coefficients() {
            prop_assert!(c.is_finite() && (-1.0..=1.0).contains(&c), "coefficient {}", c);
            peak = peak.max(c.abs());
        }
        prop_assert!(peak == 0.0 || (peak - 1.0).abs() < 1e-12);
    }

    /// RC output stays finite and never exceeds the input peak by more than
    /// the high-pass overshoot bound.
    #[test]
    fn rc_apply_is_stable(
        cutoff in 1u32..20_000,
        pass in 0usize..2,
        input in prop::collection::vec(-1.0f64..=1.0, 1..512),
    ) {
        let filter = RcCircuit::new(pass_type(pass), cutoff, 48000).unwrap();
        let output = filter.apply(&input);
        prop_assert_eq!(output.len(), input.len());
        for &y in &output {
            prop_assert!(y.is_finite() && y.abs() <= 2.0, "output {}", y);
        }
    }

    /// Unwrapping re-wraps to the input and never jumps by π or more.
    #[test]
    fn unwrap_is_continuous(
        phases in prop::collection::vec(-3.0f64..3.0, 1..128),
    ) {
        let unwrapped = unwrap_phase(&phases);
        prop_assert_eq!(unwrapped.len(), phases.len());
        prop_assert_eq!(unwrapped[0], phases[0]);
        for pair in unwrapped.windows(2) {
            prop_assert!((pair[1] - pair[0]).abs() <= std::f64::consts::PI + 1e-9);
        }
        for (u, p) in unwrapped.iter().zip(&phases) {
            let diff = wrap_to_pi(u - p);
            prop_assert!(diff.abs() < 1e-9, "{} vs {}", u, p);
        }
    }

    /// A wave compared with itself is in phase once scaled to unit amplitude.
    #[test]
    fn sine_is_in_phase_with_itself(
        sampling_rate in 8u32..96_000,
        divisor in 2u32..64,
    ) {
        let frequency = (sampling_rate / divisor).max(1);
        let wave = SineWave::new(sampling_rate).unwrap().generate_period(frequency, 1.0).unwrap();
        prop_assert_eq!(wave.len(), (sampling_rate as usize).div_ceil(frequency as usize));
        let shift = phase_shift(&wave, &wave).unwrap();
        prop_assert!(shift.is_finite() && (0.0..=std::f64::consts::PI).contains(&shift));
    }

    /// Normalization puts the largest magnitude at exactly 0 dB.
    #[test]
    fn normalized_peak_is_zero_db(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..64),
    ) {
        prop_assume!(values.iter().any(|v| *v != 0.0));
        let peak = normalize(&values).iter().fold(0.0f64, |m, v| m.max(v.abs()));
        prop_assert!(to_db(peak).abs() < 1e-9);
    }
}
