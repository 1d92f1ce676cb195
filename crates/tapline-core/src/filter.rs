//! The narrow interface shared by the FIR and IIR designers.

use crate::response::FilterResponse;
use crate::sampling::nyquist_frequency;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which end of the spectrum a filter passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassType {
    /// Pass frequencies below the cutoff.
    #[default]
    Low,
    /// Pass frequencies above the cutoff.
    High,
}

impl PassType {
    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            PassType::Low => "low",
            PassType::High => "high",
        }
    }
}

/// A designed filter: immutable coefficients plus response evaluation.
///
/// Implementors hold only their construction parameters and the derived
/// coefficients, so a filter can be shared across threads and evaluated
/// concurrently.
pub trait Filter: Send + Sync {
    /// Cutoff frequency in Hz.
    fn cutoff_frequency(&self) -> u32;

    /// Sampling rate in Hz.
    fn sampling_rate(&self) -> u32;

    /// Pass type the filter was designed for.
    fn pass_type(&self) -> PassType;

    /// Filter coefficients (FIR taps or IIR recursion terms).
    fn coefficients(&self) -> &[f64];

    /// Response for every integer frequency in `[from_hz, to_hz)`.
    ///
    /// Fails when `from_hz < 1`, `to_hz <= from_hz`, or `to_hz` exceeds the
    /// Nyquist frequency.
    fn calculate_response_range(&self, from_hz: u32, to_hz: u32) -> Result<FilterResponse>;

    /// Response from 1 Hz up to (excluding) the Nyquist frequency.
    fn calculate_response(&self) -> Result<FilterResponse> {
        self.calculate_response_range(1, nyquist_frequency(self.sampling_rate()))
    }
}

/// Check the cutoff/sampling-rate pair every designer requires.
pub(crate) fn validate_cutoff(cutoff_frequency_hz: u32, sampling_rate_hz: u32) -> Result<()> {
    if cutoff_frequency_hz < 1 {
        return Err(Error::invalid("cutoff_frequency_hz", "must be >= 1"));
    }
    if sampling_rate_hz < 1 {
        return Err(Error::invalid("sampling_rate_hz", "must be >= 1"));
    }
    let nyquist = nyquist_frequency(sampling_rate_hz);
    if cutoff_frequency_hz >= nyquist {
        return Err(Error::invalid(
            "cutoff_frequency_hz",
            format!(
                "{cutoff_frequency_hz} Hz must be below the Nyquist frequency {nyquist} Hz"
            ),
        ));
    }
    Ok(())
}

/// Check a requested response range against the sampling rate.
pub(crate) fn validate_range(from_hz: u32, to_hz: u32, sampling_rate_hz: u32) -> Result<()> {
    if from_hz < 1 {
        return Err(Error::invalid("from_hz", "must be >= 1"));
    }
    if to_hz <= from_hz {
        return Err(Error::invalid(
            "to_hz",
            format!("{to_hz} Hz must be above from_hz {from_hz} Hz"),
        ));
    }
    let nyquist = nyquist_frequency(sampling_rate_hz);
    if to_hz > nyquist {
        return Err(Error::invalid(
            "to_hz",
            format!("{to_hz} Hz exceeds the Nyquist frequency {nyquist} Hz"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_must_be_below_nyquist() {
        assert!(validate_cutoff(99, 200).is_ok());
        assert!(validate_cutoff(100, 200).is_err());
        assert!(validate_cutoff(0, 200).is_err());
        assert!(validate_cutoff(10, 0).is_err());
    }

    #[test]
    fn range_bounds() {
        assert!(validate_range(1, 24000, 48000).is_ok());
        assert!(validate_range(0, 100, 48000).is_err());
        assert!(validate_range(100, 100, 48000).is_err());
        assert!(validate_range(1, 24001, 48000).is_err());
    }
}
