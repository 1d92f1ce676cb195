//! Caller-facing filter specification and one-shot design.
//!
//! A [`FilterSpec`] is a plain value: built (or deserialized from TOML) on
//! every parameter change, validated, then turned into a [`Design`]. Nothing
//! is cached between designs; recomputation is the unit of consistency.

use crate::filter::{Filter, PassType, validate_cutoff};
use crate::fir::FirFilter;
use crate::iir::RcCircuit;
use crate::response::FilterResponse;
use crate::window::Window;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default sampling rate in Hz.
pub const DEFAULT_SAMPLING_RATE_HZ: u32 = 48000;
/// Default cutoff frequency in Hz.
pub const DEFAULT_CUTOFF_FREQUENCY_HZ: u32 = 200;
/// Default stop-band attenuation in dB.
pub const DEFAULT_ATTENUATION_DB: f64 = 25.0;
/// Default transition width in Hz.
pub const DEFAULT_TRANSITION_LENGTH_HZ: u32 = 100;
/// Default explicit tap count.
pub const DEFAULT_TAP_COUNT: usize = 200;

/// FIR or IIR design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Windowed frequency-sampling FIR.
    #[default]
    Fir,
    /// Single-pole RC circuit IIR.
    Iir,
}

impl FilterKind {
    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Fir => "fir",
            FilterKind::Iir => "iir",
        }
    }
}

/// How the FIR tap count is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TapSizing {
    /// Explicit number of taps.
    Fixed {
        /// Number of taps (>= 1).
        tap_count: usize,
    },
    /// Smallest odd tap count meeting the attenuation over the transition.
    Optimal {
        /// Desired stop-band attenuation in dB.
        attenuation_db: f64,
        /// Width of the transition band in Hz.
        transition_length_hz: u32,
    },
}

impl Default for TapSizing {
    fn default() -> Self {
        TapSizing::Optimal {
            attenuation_db: DEFAULT_ATTENUATION_DB,
            transition_length_hz: DEFAULT_TRANSITION_LENGTH_HZ,
        }
    }
}

/// Everything needed to design one filter.
///
/// `window` and `taps` only apply to FIR designs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// FIR or IIR.
    #[serde(default)]
    pub kind: FilterKind,
    /// Low- or high-pass.
    #[serde(default)]
    pub pass_type: PassType,
    /// Cutoff in Hz, strictly below Nyquist.
    pub cutoff_frequency_hz: u32,
    /// Sampling rate in Hz.
    pub sampling_rate_hz: u32,
    /// FIR window.
    #[serde(default)]
    pub window: Window,
    /// FIR tap count selection.
    #[serde(default)]
    pub taps: TapSizing,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            kind: FilterKind::Fir,
            pass_type: PassType::Low,
            cutoff_frequency_hz: DEFAULT_CUTOFF_FREQUENCY_HZ,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            window: Window::Blackman,
            taps: TapSizing::default(),
        }
    }
}

impl FilterSpec {
    /// Resolve the FIR tap count.
    pub fn tap_count(&self) -> Result<usize> {
        match self.taps {
            TapSizing::Fixed { tap_count } => Ok(tap_count),
            TapSizing::Optimal {
                attenuation_db,
                transition_length_hz,
            } => FirFilter::optimal_tap_count(
                self.sampling_rate_hz,
                attenuation_db,
                transition_length_hz,
            ),
        }
    }

    /// Check every invariant without designing anything.
    pub fn validate(&self) -> Result<()> {
        validate_cutoff(self.cutoff_frequency_hz, self.sampling_rate_hz)?;
        if self.kind == FilterKind::Fir {
            let taps = self.tap_count()?;
            if taps < 1 {
                return Err(Error::invalid("tap_count", "must be >= 1"));
            }
            if taps > self.sampling_rate_hz as usize {
                return Err(Error::invalid(
                    "tap_count",
                    format!("{taps} exceeds the sampling rate {}", self.sampling_rate_hz),
                ));
            }
        }
        Ok(())
    }

    /// Construct the designer this spec describes.
    pub fn build(&self) -> Result<Box<dyn Filter>> {
        self.validate()?;
        Ok(match self.kind {
            FilterKind::Fir => Box::new(FirFilter::new(
                self.pass_type,
                self.cutoff_frequency_hz,
                self.tap_count()?,
                self.window,
                self.sampling_rate_hz,
            )?),
            FilterKind::Iir => Box::new(RcCircuit::new(
                self.pass_type,
                self.cutoff_frequency_hz,
                self.sampling_rate_hz,
            )?),
        })
    }

    /// Design the filter and evaluate its full response.
    pub fn design(&self) -> Result<Design> {
        let filter = self.build()?;
        Ok(Design {
            spec: *self,
            coefficients: filter.coefficients().to_vec(),
            response: filter.calculate_response()?,
        })
    }
}

/// Coefficients and response computed from one spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    /// Spec the design was computed from.
    pub spec: FilterSpec,
    /// FIR taps or IIR recursion coefficients.
    pub coefficients: Vec<f64>,
    /// Response from 1 Hz to Nyquist − 1 Hz.
    pub response: FilterResponse,
}
