//! Sampling utilities: Nyquist limit, peak normalization, dB conversion and
//! the cross-correlation phase estimate used by the sine-probe response.
//!
//! All functions are pure and allocation happens only where a new sequence is
//! returned.

use crate::{Error, Result};

/// Highest frequency representable at `sampling_rate_hz` (integer half).
///
/// # Example
/// ```rust
/// use tapline_core::sampling::nyquist_frequency;
///
/// assert_eq!(nyquist_frequency(48000), 24000);
/// assert_eq!(nyquist_frequency(44101), 22050);
/// ```
#[inline]
pub fn nyquist_frequency(sampling_rate_hz: u32) -> u32 {
    sampling_rate_hz / 2
}

/// Largest absolute value in `samples`, or 0 for an empty slice.
pub fn max_abs_value(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0, |max, &s| max.max(s.abs()))
}

/// Scale `values` so that the largest absolute value becomes 1.
///
/// An all-zero (or empty) input is returned unchanged.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let max = max_abs_value(values);
    if max == 0.0 {
        return values.to_vec();
    }
    values.iter().map(|v| v / max).collect()
}

/// Convert a linear magnitude ratio to decibels: `20·log10(value)`.
///
/// Zero maps to negative infinity; no floor is applied.
#[inline]
pub fn to_db(value: f64) -> f64 {
    20.0 * value.log10()
}

/// Estimate the angular offset between two equal-length waves.
///
/// ```text
/// shift = 2 · mean(wave1[i] · wave2[i])
/// phase = acos(clamp(shift, -1, 1))
/// ```
///
/// The result lies in `[0, π]`: the estimate cannot tell a lead from a lag and
/// folds differences beyond π back into range.
pub fn phase_shift(wave1: &[f64], wave2: &[f64]) -> Result<f64> {
    if wave1.len() != wave2.len() {
        return Err(Error::invalid(
            "wave2",
            format!(
                "length {} differs from wave1 length {}",
                wave2.len(),
                wave1.len()
            ),
        ));
    }
    if wave1.is_empty() {
        return Err(Error::invalid("wave1", "must not be empty"));
    }

    let correlation: f64 = wave1.iter().zip(wave2).map(|(a, b)| a * b).sum();
    let shift = 2.0 * correlation / wave1.len() as f64;

    Ok(shift.clamp(-1.0, 1.0).acos())
}
