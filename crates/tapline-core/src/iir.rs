//! First-order IIR filters derived from analog RC networks.
//!
//! Low-pass (series R, shunt C) and high-pass (series C, shunt R) circuits
//! are discretized with the backward Euler rule `dV/dt ≈ (V[n] − V[n−1]) / T`:
//!
//! ```text
//!   Vin --R--+-- Vout          Vin --C--+-- Vout
//!            |                          |
//!            C                          R
//!            |                          |
//!           gnd                        gnd
//!
//! RC = 1 / (2π · cutoff),  T = 1 / sampling_rate
//!
//! low-pass:  Vout[n] = a·Vin[n] + b·Vout[n−1]
//!            a = 1 / (RC/T + 1),  b = (RC/T) / (RC/T + 1)
//!
//! high-pass: Vout[n] = a·Vin[n] − a·Vin[n−1] + a·Vout[n−1]
//!            a = RC / (T + RC)
//! ```
//!
//! Both share the general recursion
//! `Vout[n] = c0·Vin[n] + c1·Vin[n−1] + c2·Vout[n−1]`.
//!
//! The response is measured rather than derived: each integer frequency is
//! probed with one period of a unit-amplitude sine. The phase estimate comes
//! from [`phase_shift`] and is therefore limited to `[0, π]` with no sign.

use crate::filter::{Filter, PassType, validate_cutoff, validate_range};
use crate::response::{FilterResponse, ResponsePoint};
use crate::sampling::{max_abs_value, phase_shift, to_db};
use crate::sine::SineWave;
use crate::Result;
use std::f64::consts::PI;

/// RC time constant giving a −3 dB point at `cutoff_frequency_hz`.
#[inline]
pub fn rc_constant(cutoff_frequency_hz: u32) -> f64 {
    1.0 / (2.0 * PI * f64::from(cutoff_frequency_hz))
}

/// Single-pole RC/CR circuit filter.
#[derive(Debug, Clone, PartialEq)]
pub struct RcCircuit {
    pass_type: PassType,
    cutoff_frequency_hz: u32,
    sampling_rate_hz: u32,
    coefficients: [f64; 3],
}

impl RcCircuit {
    /// Design a circuit of the given pass type.
    ///
    /// Fails unless `1 <= cutoff_frequency_hz < nyquist(sampling_rate_hz)`.
    pub fn new(pass_type: PassType, cutoff_frequency_hz: u32, sampling_rate_hz: u32) -> Result<Self> {
        validate_cutoff(cutoff_frequency_hz, sampling_rate_hz)?;

        let rc = rc_constant(cutoff_frequency_hz);
        let t = 1.0 / f64::from(sampling_rate_hz);
        let coefficients = match pass_type {
            PassType::Low => {
                let rct = rc / t;
                [1.0 / (rct + 1.0), 0.0, rct / (rct + 1.0)]
            }
            PassType::High => {
                let a = rc / (t + rc);
                [a, -a, a]
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pass = pass_type.name(),
            cutoff_frequency_hz,
            sampling_rate_hz,
            ?coefficients,
            "rc_design: coefficients derived"
        );

        Ok(Self {
            pass_type,
            cutoff_frequency_hz,
            sampling_rate_hz,
            coefficients,
        })
    }

    /// Low-pass RC circuit.
    pub fn low_pass(cutoff_frequency_hz: u32, sampling_rate_hz: u32) -> Result<Self> {
        Self::new(PassType::Low, cutoff_frequency_hz, sampling_rate_hz)
    }

    /// High-pass CR circuit.
    pub fn high_pass(cutoff_frequency_hz: u32, sampling_rate_hz: u32) -> Result<Self> {
        Self::new(PassType::High, cutoff_frequency_hz, sampling_rate_hz)
    }

    /// Two-term form `[a, b]` of `Vout[n] = a·Vin[n] + b·Vout[n−1]`.
    ///
    /// Only the low-pass circuit has no `Vin[n−1]` term; high-pass returns
    /// `None`.
    pub fn two_term_coefficients(&self) -> Option<[f64; 2]> {
        match self.pass_type {
            PassType::Low => Some([self.coefficients[0], self.coefficients[2]]),
            PassType::High => None,
        }
    }

    /// Run the recursion over `samples`.
    ///
    /// The first output is seeded with the first input; state lives only for
    /// the duration of this call.
    pub fn apply(&self, samples: &[f64]) -> Vec<f64> {
        let [c0, c1, c2] = self.coefficients;
        let Some(&first) = samples.first() else {
            return Vec::new();
        };

        let mut output = Vec::with_capacity(samples.len());
        output.push(first);

        let mut previous_in = first;
        let mut previous_out = first;
        for &sample in &samples[1..] {
            previous_out = c0 * sample + c1 * previous_in + c2 * previous_out;
            previous_in = sample;
            output.push(previous_out);
        }

        output
    }
}

impl Filter for RcCircuit {
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

    fn calculate_response_range(&self, from_hz: u32, to_hz: u32) -> Result<FilterResponse> {
        validate_range(from_hz, to_hz, self.sampling_rate_hz)?;

        let sine = SineWave::new(self.sampling_rate_hz)?;
        let points = (from_hz..to_hz)
            .map(|frequency_hz| {
                let probe = sine.generate_period(frequency_hz, 1.0)?;
                let filtered = self.apply(&probe);
                Ok(ResponsePoint {
                    frequency_hz,
                    magnitude_db: to_db(max_abs_value(&filtered)),
                    phase_rad: phase_shift(&probe, &filtered)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(bins = points.len(), from_hz, to_hz, "rc_response: sine sweep complete");

        Ok(FilterResponse::new(points))
    }
}
