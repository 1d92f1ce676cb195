//! Window functions applied to truncated FIR kernels.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Blackman window
    #[default]
    Blackman,
}

impl Window {
    /// Get window coefficients
    ///
    /// Blackman uses the symmetric form
    /// `0.42 − 0.5·cos(2πi/(N−1)) + 0.08·cos(4πi/(N−1))`. A one-point window
    /// is `[1.0]` for both variants.
    pub fn coefficients(&self, size: usize) -> Result<Vec<f64>> {
        if size < 1 {
            return Err(Error::invalid("window_size", "must be >= 1"));
        }

        let coeffs = match self {
            Window::Rectangular => vec![1.0; size],
            Window::Blackman if size == 1 => vec![1.0],
            Window::Blackman => {
                let span = (size - 1) as f64;
                (0..size)
                    .map(|i| {
                        let x = 2.0 * PI * i as f64 / span;
                        0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
                    })
                    .collect()
            }
        };
        Ok(coeffs)
    }

    /// Multiply `coefficients` elementwise by a window of the same length.
    pub fn apply(&self, coefficients: &[f64]) -> Result<Vec<f64>> {
        let window = self.coefficients(coefficients.len())?;
        Ok(coefficients
            .iter()
            .zip(window)
            .map(|(c, w)| c * w)
            .collect())
    }

    /// Approximate stop-band attenuation (dB) when windowing a truncated
    /// ideal kernel.
    pub fn expected_attenuation_db(&self) -> f64 {
        match self {
            Window::Rectangular => -21.0,
            Window::Blackman => -74.0,
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Window::Rectangular => "rectangular",
            Window::Blackman => "blackman",
        }
    }
}
