//! Forward and inverse discrete Fourier transform over complex sequences.
//!
//! Backed by `rustfft`, which handles any length (not only powers of two) in
//! O(N log N). The inverse transform is **unnormalized**: a forward/inverse
//! round trip scales the signal by N. Every consumer in this crate measures
//! inverse results relatively (peak normalization or dB), so no 1/N factor is
//! applied here.

use crate::{Error, Result};
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use std::sync::Arc;

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Time domain to frequency domain.
    Forward,
    /// Frequency domain to time domain (unnormalized).
    Inverse,
}

/// Planned transform for a fixed length, reusable across calls.
pub struct Fft {
    forward: Arc<dyn rustfft::Fft<f64>>,
    inverse: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Plan forward and inverse transforms of `size` points.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::invalid("size", "transform length must be >= 1"));
        }

        let mut planner = FftPlanner::new();
        Ok(Self {
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
            size,
        })
    }

    /// Transform length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `buffer` in place.
    ///
    /// `buffer.len()` must equal [`Fft::size`].
    pub fn process(&self, buffer: &mut [Complex<f64>], direction: Direction) -> Result<()> {
        if buffer.len() != self.size {
            return Err(Error::invalid(
                "buffer",
                format!("length {} differs from planned size {}", buffer.len(), self.size),
            ));
        }

        match direction {
            Direction::Forward => self.forward.process(buffer),
            Direction::Inverse => self.inverse.process(buffer),
        }
        Ok(())
    }
}

/// Transform `samples` in the given direction, returning a new sequence of
/// the same length.
pub fn transform(samples: &[Complex<f64>], direction: Direction) -> Result<Vec<Complex<f64>>> {
    let fft = Fft::new(samples.len())?;
    let mut buffer = samples.to_vec();
    fft.process(&mut buffer, direction)?;
    Ok(buffer)
}

/// Forward transform.
pub fn direct(samples: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
    transform(samples, Direction::Forward)
}

/// Inverse transform without 1/N scaling.
pub fn inverse(samples: &[Complex<f64>]) -> Result<Vec<Complex<f64>>> {
    transform(samples, Direction::Inverse)
}

/// Lift real samples into complex ones with zero imaginary parts.
pub fn to_complex_vector(samples: &[f64]) -> Vec<Complex<f64>> {
    samples.iter().map(|&x| Complex::new(x, 0.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::normalize;
    use std::f64::consts::PI;

    #[test]
    fn roundtrip_scales_by_length() {
        let input: Vec<f64> = (0..100).map(|i| (2.0 * PI * 3.0 * i as f64 / 100.0).sin()).collect();
        let spectrum = direct(&to_complex_vector(&input)).unwrap();
        let restored = inverse(&spectrum).unwrap();

        for (x, y) in input.iter().zip(&restored) {
            assert!((x * 100.0 - y.re).abs() < 1e-9, "{x} vs {}", y.re);
            assert!(y.im.abs() < 1e-9);
        }
    }

    #[test]
    fn roundtrip_matches_after_normalization() {
        let input = vec![0.3, -1.2, 0.8, 0.1, -0.4, 0.9, 0.0];
        let restored: Vec<f64> = inverse(&direct(&to_complex_vector(&input)).unwrap())
            .unwrap()
            .iter()
            .map(|c| c.re)
            .collect();

        for (a, b) in normalize(&input).iter().zip(normalize(&restored).iter()) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn dc_lands_in_bin_zero() {
        let spectrum = direct(&to_complex_vector(&[1.0; 16])).unwrap();
        assert!((spectrum[0].re - 16.0).abs() < 1e-12);
        for bin in &spectrum[1..] {
            assert!(bin.norm() < 1e-9);
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            direct(&[]),
            Err(Error::InvalidArgument { name: "size", .. })
        ));
    }

    #[test]
    fn planned_size_mismatch_is_rejected() {
        let fft = Fft::new(8).unwrap();
        let mut buffer = vec![Complex::new(0.0, 0.0); 4];
        assert!(fft.process(&mut buffer, Direction::Forward).is_err());
    }

    #[test]
    fn to_complex_vector_zeroes_imaginary() {
        let c = to_complex_vector(&[1.5, -2.0]);
        assert_eq!(c, vec![Complex::new(1.5, 0.0), Complex::new(-2.0, 0.0)]);
    }
}
