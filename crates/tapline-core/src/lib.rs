//! Tapline Core - FIR and RC-circuit filter design
//!
//! This crate designs low-pass and high-pass filters from a cutoff frequency
//! and sampling rate, then evaluates their magnitude and phase response bin by
//! bin:
//!
//! - [`fir`] - Windowed-sinc FIR design via inverse FFT of an ideal response
//! - [`iir`] - First-order RC circuit discretized into a one-pole recurrence
//! - [`fft`] - Complex FFT wrapper over `rustfft`
//! - [`window`] - Rectangular and Blackman tapering windows
//! - [`sine`] - Single-period sine generator used for probing
//! - [`sampling`] - Nyquist, normalization, dB and phase-shift helpers
//! - [`phase`] - Phase wrapping and unwrapping
//! - [`response`] - Per-frequency response container
//! - [`spec`] - Serializable filter description and one-shot design
//! - [`session`] - Editable design state with an explicit commit step
//!
//! ## Example
//!
//! ```rust
//! use tapline_core::{Filter, FirFilter, PassType, Window};
//!
//! let filter = FirFilter::new(PassType::Low, 500, 201, Window::Blackman, 48000)?;
//! let response = filter.calculate_response_range(1, 2000)?;
//!
//! let passband = response.at(100).map(|p| p.magnitude_db);
//! let stopband = response.at(1500).map(|p| p.magnitude_db);
//! assert!(passband > stopband);
//! # Ok::<(), tapline_core::Error>(())
//! ```
//!
//! ## Sizing a FIR filter
//!
//! ```rust
//! use tapline_core::FirFilter;
//!
//! // 40 dB of attenuation across a 100 Hz transition at 48 kHz
//! let taps = FirFilter::optimal_tap_count(48000, 40.0, 100)?;
//! assert_eq!(taps, 437);
//! assert_eq!(FirFilter::transition_length(48000, 40.0, taps)?, 100);
//! # Ok::<(), tapline_core::Error>(())
//! ```
//!
//! # Logging
//!
//! Enable the `tracing` feature to emit `tracing::debug!` events whenever a
//! filter is designed or a session commits.

pub mod error;
pub mod fft;
pub mod filter;
pub mod fir;
pub mod iir;
pub mod phase;
pub mod response;
pub mod sampling;
pub mod session;
pub mod sine;
pub mod spec;
pub mod window;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use filter::{Filter, PassType};
pub use fir::FirFilter;
pub use iir::{RcCircuit, rc_constant};
pub use phase::{unwrap_phase, wrap_to_pi};
pub use response::{FilterResponse, ResponsePoint};
pub use sampling::{nyquist_frequency, normalize, phase_shift, to_db};
pub use session::DesignSession;
pub use sine::SineWave;
pub use spec::{Design, FilterKind, FilterSpec, TapSizing};
pub use window::Window;
