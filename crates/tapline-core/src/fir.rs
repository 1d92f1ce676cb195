//! FIR low-pass/high-pass design by the frequency-sampling method.
//!
//! Coefficients are synthesized in five steps:
//!
//! 1. Sample an ideal brick-wall low-pass response on a circular spectrum of
//!    `sampling_rate` one-Hz bins (high-pass designs use the mirrored
//!    prototype with cutoff `nyquist - cutoff`).
//! 2. Inverse-transform it; the real part is a kernel symmetric about index 0.
//! 3. Re-center: concatenate the negative-time tail of the buffer with its
//!    causal head to get exactly `tap_count` samples.
//! 4. For high-pass, modulate by a Nyquist carrier so the passband moves to
//!    the upper end of the spectrum.
//! 5. Apply the window and scale to unit peak.
//!
//! The Fred Harris rule of thumb relates attenuation, transition width and
//! tap count:
//!
//! ```text
//! transition = ceil(attenuation · nyquist / (22 · taps))
//! taps       = ceil(attenuation · nyquist / (22 · transition)), rounded up to odd
//! ```

use crate::fft::{self, Fft, to_complex_vector};
use crate::filter::{Filter, PassType, validate_cutoff, validate_range};
use crate::response::{FilterResponse, ResponsePoint};
use crate::sampling::{nyquist_frequency, normalize, to_db};
use crate::sine::SineWave;
use crate::window::Window;
use crate::{Error, Result};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Finite impulse response filter designed from an ideal response.
#[derive(Debug, Clone, PartialEq)]
pub struct FirFilter {
    pass_type: PassType,
    cutoff_frequency_hz: u32,
    sampling_rate_hz: u32,
    window: Window,
    coefficients: Vec<f64>,
}

impl FirFilter {
    /// Design a filter with `tap_count` coefficients.
    ///
    /// # Arguments
    /// * `pass_type` - Low- or high-pass
    /// * `cutoff_frequency_hz` - Band edge, 1 to `nyquist - 1` Hz
    /// * `tap_count` - Number of coefficients, 1 to `sampling_rate_hz`
    /// * `window` - Window applied to the truncated kernel
    /// * `sampling_rate_hz` - Sampling rate in Hz
    pub fn new(
        pass_type: PassType,
        cutoff_frequency_hz: u32,
        tap_count: usize,
        window: Window,
        sampling_rate_hz: u32,
    ) -> Result<Self> {
        validate_cutoff(cutoff_frequency_hz, sampling_rate_hz)?;

        let mut filter = Self {
            pass_type,
            cutoff_frequency_hz,
            sampling_rate_hz,
            window,
            coefficients: Vec::new(),
        };
        filter.coefficients = filter.calculate_coefficients(tap_count)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pass = pass_type.name(),
            cutoff_frequency_hz,
            sampling_rate_hz,
            tap_count,
            window = window.name(),
            "fir_design: coefficients synthesized"
        );

        Ok(filter)
    }

    /// Window applied during synthesis.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Number of coefficients.
    pub fn tap_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Ideal brick-wall response sampled at every Hz of the circular spectrum.
    ///
    /// Bin `i` is 1 when `i < c` or `i >= sampling_rate - c`, else 0, where
    /// `c` is the cutoff for low-pass and `nyquist - cutoff` for high-pass.
    /// The sequence is mirror-symmetric: `r[i] == r[len - 1 - i]`.
    pub fn ideal_frequency_response(&self) -> Vec<f64> {
        let n = self.sampling_rate_hz;
        let modelling_cutoff = match self.pass_type {
            PassType::Low => self.cutoff_frequency_hz,
            PassType::High => nyquist_frequency(n) - self.cutoff_frequency_hz,
        };

        (0..n)
            .map(|i| {
                if i < modelling_cutoff || i >= n - modelling_cutoff {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Run the full synthesis pipeline for `tap_count` taps.
    fn calculate_coefficients(&self, tap_count: usize) -> Result<Vec<f64>> {
        if tap_count < 1 {
            return Err(Error::invalid("tap_count", "must be >= 1"));
        }
        let n = self.sampling_rate_hz as usize;
        if tap_count > n {
            return Err(Error::invalid(
                "tap_count",
                format!("{tap_count} exceeds the sampling rate {n}"),
            ));
        }

        let time_domain = fft::inverse(&to_complex_vector(&self.ideal_frequency_response()))?;

        // Negative time lives at the end of the circular buffer. Odd counts
        // take the extra sample on the causal side so index 0 sits centered.
        let half = tap_count / 2;
        let head_len = tap_count - half;
        let coefficients: Vec<f64> = time_domain[n - half..]
            .iter()
            .chain(&time_domain[..head_len])
            .map(|c| c.re)
            .collect();

        let shifted = self.shift_coefficients(coefficients)?;
        Ok(normalize(&self.window.apply(&shifted)?))
    }

    /// Move a low-pass prototype's passband to the upper end of the spectrum.
    ///
    /// Multiplies by one period of a sine at `sampling_rate / 2` with a
    /// quarter-period offset (a ±1 alternation), cycled over the kernel.
    /// Low-pass coefficients are returned untouched.
    fn shift_coefficients(&self, mut coefficients: Vec<f64>) -> Result<Vec<f64>> {
        if self.pass_type == PassType::High {
            let sine = SineWave::new(self.sampling_rate_hz)?;
            let carrier =
                sine.generate_period_shifted(self.sampling_rate_hz / 2, 1.0, PI / 2.0)?;
            for (c, m) in coefficients.iter_mut().zip(carrier.iter().cycle()) {
                *c *= m;
            }
        }
        Ok(coefficients)
    }

    /// Transition width (Hz) reachable with `tap_count` taps at
    /// `attenuation_db`.
    pub fn transition_length(
        sampling_rate_hz: u32,
        attenuation_db: f64,
        tap_count: usize,
    ) -> Result<u32> {
        validate_sizing_rate(sampling_rate_hz)?;
        validate_attenuation(attenuation_db)?;
        if tap_count < 1 {
            return Err(Error::invalid("tap_count", "must be >= 1"));
        }
        let nyquist = f64::from(nyquist_frequency(sampling_rate_hz));
        Ok((attenuation_db * nyquist / (22.0 * tap_count as f64)).ceil() as u32)
    }

    /// Smallest odd tap count reaching `attenuation_db` within
    /// `transition_length_hz`.
    ///
    /// Always odd so the kernel is symmetric about a center tap.
    pub fn optimal_tap_count(
        sampling_rate_hz: u32,
        attenuation_db: f64,
        transition_length_hz: u32,
    ) -> Result<usize> {
        validate_sizing_rate(sampling_rate_hz)?;
        validate_attenuation(attenuation_db)?;
        if transition_length_hz < 1 {
            return Err(Error::invalid("transition_length_hz", "must be >= 1"));
        }
        let nyquist = f64::from(nyquist_frequency(sampling_rate_hz));
        let count =
            (attenuation_db * nyquist / (22.0 * f64::from(transition_length_hz))).ceil() as usize;
        Ok(if count % 2 == 0 { count + 1 } else { count })
    }
}

fn validate_sizing_rate(sampling_rate_hz: u32) -> Result<()> {
    if nyquist_frequency(sampling_rate_hz) < 1 {
        return Err(Error::invalid(
            "sampling_rate_hz",
            format!("{sampling_rate_hz} Hz leaves no band below Nyquist"),
        ));
    }
    Ok(())
}

fn validate_attenuation(attenuation_db: f64) -> Result<()> {
    if !attenuation_db.is_finite() || attenuation_db <= 0.0 {
        return Err(Error::invalid(
            "attenuation_db",
            format!("{attenuation_db} must be a positive finite value"),
        ));
    }
    Ok(())
}

impl Filter for FirFilter {
    fn cutoff_frequency(&self) -> u32 {
        self.cutoff_frequency_hz
    }

    fn sampling_rate(&self) -> u32 {
        self.sampling_rate_hz
    }

    fn pass_type(&self) -> PassType {
        self.pass_type
    }

    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Zero-pad the taps to one bin per Hz, transform, and read magnitude
    /// and wrapped phase per bin. Magnitudes are normalized to the peak of
    /// the requested range before dB conversion.
    fn calculate_response_range(&self, from_hz: u32, to_hz: u32) -> Result<FilterResponse> {
        validate_range(from_hz, to_hz, self.sampling_rate_hz)?;

        let n = self.sampling_rate_hz as usize;
        let fft = Fft::new(n)?;
        let mut spectrum = to_complex_vector(&self.coefficients);
        spectrum.resize(n, Complex::new(0.0, 0.0));
        fft.process(&mut spectrum, fft::Direction::Forward)?;

        let bins = &spectrum[from_hz as usize..to_hz as usize];
        let magnitudes: Vec<f64> = bins.iter().map(|c| c.norm()).collect();
        let points = normalize(&magnitudes)
            .into_iter()
            .zip(bins)
            .zip(from_hz..to_hz)
            .map(|((magnitude, bin), frequency_hz)| ResponsePoint {
                frequency_hz,
                magnitude_db: to_db(magnitude),
                phase_rad: bin.arg(),
            })
            .collect::<Vec<_>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(bins = points.len(), from_hz, to_hz, "fir_response: sweep complete");

        Ok(FilterResponse::new(points))
    }
}
