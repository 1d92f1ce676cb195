//! Single-period sine generator used to probe filters and to build the
//! Nyquist carrier for the high-pass shift.
//!
//! ```text
//! period = ceil(sampling_rate / frequency)
//! x[i]   = amplitude · sin(2π·i / period + phase_offset),  i in [0, period)
//! ```

use crate::sampling::nyquist_frequency;
use crate::{Error, Result};
use std::f64::consts::PI;

/// Sine wave generator bound to a sampling rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SineWave {
    sampling_rate_hz: u32,
}

impl SineWave {
    /// Create a generator for `sampling_rate_hz` (must be >= 1).
    pub fn new(sampling_rate_hz: u32) -> Result<Self> {
        if sampling_rate_hz < 1 {
            return Err(Error::invalid("sampling_rate_hz", "must be >= 1"));
        }
        Ok(Self { sampling_rate_hz })
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate_hz
    }

    /// Number of samples spanned by one period of `frequency_hz`.
    ///
    /// Fails when the frequency is 0 or above the Nyquist frequency.
    pub fn period_len(&self, frequency_hz: u32) -> Result<usize> {
        if frequency_hz < 1 {
            return Err(Error::invalid("frequency_hz", "must be >= 1"));
        }
        let nyquist = nyquist_frequency(self.sampling_rate_hz);
        if frequency_hz > nyquist {
            return Err(Error::invalid(
                "frequency_hz",
                format!("{frequency_hz} Hz exceeds the Nyquist frequency {nyquist} Hz"),
            ));
        }

        Ok(self.sampling_rate_hz.div_ceil(frequency_hz) as usize)
    }

    /// One period of a sine starting at phase 0.
    pub fn generate_period(&self, frequency_hz: u32, amplitude: f64) -> Result<Vec<f64>> {
        self.generate_period_shifted(frequency_hz, amplitude, 0.0)
    }

    /// One period of a sine starting at `phase_offset` radians.
    pub fn generate_period_shifted(
        &self,
        frequency_hz: u32,
        amplitude: f64,
        phase_offset: f64,
    ) -> Result<Vec<f64>> {
        if amplitude.is_nan() || amplitude < 0.0 {
            return Err(Error::invalid("amplitude", "must be >= 0"));
        }

        let period = self.period_len(frequency_hz)?;
        Ok((0..period)
            .map(|i| amplitude * (2.0 * PI * i as f64 / period as f64 + phase_offset).sin())
            .collect())
    }
}
