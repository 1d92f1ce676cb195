//! Frequency/phase response container shared by the FIR and IIR designers.

use crate::phase::unwrap_phase;
use serde::{Deserialize, Serialize};

/// Magnitude and phase at one integer frequency bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponsePoint {
    /// Frequency of this bin in Hz.
    pub frequency_hz: u32,
    /// Magnitude relative to the peak gain, in dB (≤ 0).
    pub magnitude_db: f64,
    /// Phase in radians as measured (wrapped for FIR, `[0, π]` for IIR).
    pub phase_rad: f64,
}

/// Response over consecutive integer frequency bins.
///
/// Produced by `Filter::calculate_response`, one point per Hz from 1 Hz up to
/// (but excluding) the Nyquist frequency. Phases are stored as measured;
/// [`FilterResponse::phases`] returns the unwrapped curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResponse {
    points: Vec<ResponsePoint>,
}

impl FilterResponse {
    /// Wrap already-measured points.
    ///
    /// Points are expected in ascending, consecutive frequency order.
    pub fn new(points: Vec<ResponsePoint>) -> Self {
        Self { points }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the response holds no bins.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points in frequency order.
    pub fn points(&self) -> &[ResponsePoint] {
        &self.points
    }

    /// Iterate over points.
    pub fn iter(&self) -> std::slice::Iter<'_, ResponsePoint> {
        self.points.iter()
    }

    /// Point at an exact frequency, if it lies in the measured range.
    pub fn at(&self, frequency_hz: u32) -> Option<&ResponsePoint> {
        let first = self.points.first()?.frequency_hz;
        let index = frequency_hz.checked_sub(first)? as usize;
        self.points.get(index)
    }

    /// Bin frequencies in Hz.
    pub fn frequencies(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.frequency_hz).collect()
    }

    /// Magnitudes in dB.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.magnitude_db).collect()
    }

    /// Phases exactly as measured.
    pub fn wrapped_phases(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.phase_rad).collect()
    }

    /// Phases passed through [`unwrap_phase`].
    pub fn phases(&self) -> Vec<f64> {
        unwrap_phase(&self.wrapped_phases())
    }

    /// Smallest finite magnitude over `[from_hz, to_hz)`, or 0 when the window
    /// holds no finite value.
    ///
    /// Used to scale magnitude plots: -∞ bins (exact zeros) are skipped.
    pub fn min_magnitude_db(&self, from_hz: u32, to_hz: u32) -> f64 {
        finite_min(self.window(from_hz, to_hz).map(|p| p.magnitude_db))
    }

    /// Largest finite magnitude over `[from_hz, to_hz)`, or 0 when the window
    /// holds no finite value above 0.
    pub fn max_magnitude_db(&self, from_hz: u32, to_hz: u32) -> f64 {
        finite_max(self.window(from_hz, to_hz).map(|p| p.magnitude_db))
    }

    /// Smallest finite unwrapped phase over `[from_hz, to_hz)`, or 0 when the
    /// window holds no finite value.
    ///
    /// Unwrapping runs over the whole response so the window sees the same
    /// curve as [`FilterResponse::phases`].
    pub fn min_phase_rad(&self, from_hz: u32, to_hz: u32) -> f64 {
        finite_min(self.windowed_phases(from_hz, to_hz))
    }

    /// Largest finite unwrapped phase over `[from_hz, to_hz)`, or 0 when the
    /// window holds no finite value above 0.
    pub fn max_phase_rad(&self, from_hz: u32, to_hz: u32) -> f64 {
        finite_max(self.windowed_phases(from_hz, to_hz))
    }

    /// Frequency where the magnitude first crosses −3 dB below the peak.
    ///
    /// For a rising (high-pass) curve the last crossing from below is
    /// returned instead, so both pass types report their band edge.
    pub fn cutoff_3db(&self) -> Option<u32> {
        let peak = self
            .points
            .iter()
            .map(|p| p.magnitude_db)
            .filter(|m| m.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if !peak.is_finite() {
            return None;
        }
        let target = peak - 3.0;

        let first = self.points.first()?;
        let last = self.points.last()?;
        if first.magnitude_db >= last.magnitude_db {
            self.points
                .iter()
                .find(|p| p.magnitude_db <= target)
                .map(|p| p.frequency_hz)
        } else {
            self.points
                .iter()
                .rev()
                .find(|p| p.magnitude_db <= target)
                .map(|p| p.frequency_hz)
        }
    }

    fn window(&self, from_hz: u32, to_hz: u32) -> impl Iterator<Item = &ResponsePoint> {
        self.points
            .iter()
            .filter(move |p| p.frequency_hz >= from_hz && p.frequency_hz < to_hz)
    }

    fn windowed_phases(&self, from_hz: u32, to_hz: u32) -> impl Iterator<Item = f64> {
        self.points
            .iter()
            .zip(self.phases())
            .filter(move |(p, _)| p.frequency_hz >= from_hz && p.frequency_hz < to_hz)
            .map(|(_, phase)| phase)
    }
}

fn finite_min(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(0.0, f64::min)
}

fn finite_max(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).fold(0.0, f64::max)
}

impl<'a> IntoIterator for &'a FilterResponse {
    type Item = &'a ResponsePoint;
    type IntoIter = std::slice::Iter<'a, ResponsePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
