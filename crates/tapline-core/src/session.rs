//! Editable design state with an explicit commit step.
//!
//! Setters only touch the draft; [`DesignSession::commit`] validates it and
//! recomputes coefficients and response once, however many fields changed in
//! between. FIR sizing parameters stay linked the way an interactive editor
//! expects:
//!
//! - optimal sizing on: attenuation/transition/sampling-rate edits re-derive
//!   the tap count
//! - optimal sizing off: tap count/attenuation edits re-derive the transition
//!   length

use crate::filter::PassType;
use crate::fir::FirFilter;
use crate::spec::{
    DEFAULT_ATTENUATION_DB, DEFAULT_TAP_COUNT, DEFAULT_TRANSITION_LENGTH_HZ, Design, FilterKind,
    FilterSpec, TapSizing,
};
use crate::window::Window;
use crate::Result;

/// Draft filter parameters plus the last committed design.
#[derive(Debug, Clone)]
pub struct DesignSession {
    kind: FilterKind,
    pass_type: PassType,
    cutoff_frequency_hz: u32,
    sampling_rate_hz: u32,
    window: Window,
    attenuation_db: f64,
    transition_length_hz: u32,
    tap_count: usize,
    use_optimal_tap_count: bool,
    dirty: bool,
    committed: Option<Design>,
}

impl Default for DesignSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DesignSession {
    /// Session seeded with the default spec and nothing committed.
    pub fn new() -> Self {
        Self::from_spec(&FilterSpec::default())
    }

    /// Session seeded from an existing spec.
    pub fn from_spec(spec: &FilterSpec) -> Self {
        let (attenuation_db, transition_length_hz, tap_count, use_optimal_tap_count) =
            match spec.taps {
                TapSizing::Fixed { tap_count } => (
                    DEFAULT_ATTENUATION_DB,
                    FirFilter::transition_length(spec.sampling_rate_hz, DEFAULT_ATTENUATION_DB, tap_count)
                        .unwrap_or(DEFAULT_TRANSITION_LENGTH_HZ),
                    tap_count,
                    false,
                ),
                TapSizing::Optimal {
                    attenuation_db,
                    transition_length_hz,
                } => (
                    attenuation_db,
                    transition_length_hz,
                    spec.tap_count().unwrap_or(DEFAULT_TAP_COUNT),
                    true,
                ),
            };

        Self {
            kind: spec.kind,
            pass_type: spec.pass_type,
            cutoff_frequency_hz: spec.cutoff_frequency_hz,
            sampling_rate_hz: spec.sampling_rate_hz,
            window: spec.window,
            attenuation_db,
            transition_length_hz,
            tap_count,
            use_optimal_tap_count,
            dirty: true,
            committed: None,
        }
    }

    /// Spec built from the current draft.
    pub fn spec(&self) -> FilterSpec {
        FilterSpec {
            kind: self.kind,
            pass_type: self.pass_type,
            cutoff_frequency_hz: self.cutoff_frequency_hz,
            sampling_rate_hz: self.sampling_rate_hz,
            window: self.window,
            taps: if self.use_optimal_tap_count {
                TapSizing::Optimal {
                    attenuation_db: self.attenuation_db,
                    transition_length_hz: self.transition_length_hz,
                }
            } else {
                TapSizing::Fixed {
                    tap_count: self.tap_count,
                }
            },
        }
    }

    /// Whether the draft differs from the last committed design.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Last successfully committed design.
    pub fn design(&self) -> Option<&Design> {
        self.committed.as_ref()
    }

    /// Validate the draft and recompute the design if anything changed.
    ///
    /// On failure the previous design is kept and the session stays dirty.
    pub fn commit(&mut self) -> Result<&Design> {
        let design = match self.committed.take() {
            Some(design) if !self.dirty => design,
            previous => {
                let spec = self.spec();
                match spec.design() {
                    Ok(design) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            kind = spec.kind.name(),
                            pass = spec.pass_type.name(),
                            cutoff_frequency_hz = spec.cutoff_frequency_hz,
                            sampling_rate_hz = spec.sampling_rate_hz,
                            coefficients = design.coefficients.len(),
                            bins = design.response.len(),
                            "session_commit: design recomputed"
                        );
                        design
                    }
                    Err(err) => {
                        self.committed = previous;
                        return Err(err);
                    }
                }
            }
        };

        self.dirty = false;
        Ok(self.committed.insert(design))
    }

    /// Filter kind.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Set the filter kind.
    pub fn set_kind(&mut self, kind: FilterKind) {
        if kind != self.kind {
            self.kind = kind;
            self.dirty = true;
        }
    }

    /// Pass type.
    pub fn pass_type(&self) -> PassType {
        self.pass_type
    }

    /// Set the pass type.
    pub fn set_pass_type(&mut self, pass_type: PassType) {
        if pass_type != self.pass_type {
            self.pass_type = pass_type;
            self.dirty = true;
        }
    }

    /// Cutoff frequency in Hz.
    pub fn cutoff_frequency(&self) -> u32 {
        self.cutoff_frequency_hz
    }

    /// Set the cutoff frequency. Range is checked on commit.
    pub fn set_cutoff_frequency(&mut self, cutoff_frequency_hz: u32) {
        if cutoff_frequency_hz != self.cutoff_frequency_hz {
            self.cutoff_frequency_hz = cutoff_frequency_hz;
            self.dirty = true;
        }
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> u32 {
        self.sampling_rate_hz
    }

    /// Set the sampling rate, re-deriving the linked FIR sizing parameter.
    pub fn set_sampling_rate(&mut self, sampling_rate_hz: u32) -> Result<()> {
        if sampling_rate_hz == self.sampling_rate_hz {
            return Ok(());
        }
        self.relink(
            sampling_rate_hz,
            self.attenuation_db,
            self.transition_length_hz,
            self.tap_count,
        )?;
        self.sampling_rate_hz = sampling_rate_hz;
        self.dirty = true;
        Ok(())
    }

    /// FIR window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Set the FIR window.
    pub fn set_window(&mut self, window: Window) {
        if window != self.window {
            self.window = window;
            self.dirty = true;
        }
    }

    /// Desired stop-band attenuation in dB.
    pub fn attenuation_db(&self) -> f64 {
        self.attenuation_db
    }

    /// Set the attenuation, re-deriving tap count or transition length.
    pub fn set_attenuation_db(&mut self, attenuation_db: f64) -> Result<()> {
        if attenuation_db == self.attenuation_db {
            return Ok(());
        }
        self.relink(
            self.sampling_rate_hz,
            attenuation_db,
            self.transition_length_hz,
            self.tap_count,
        )?;
        self.attenuation_db = attenuation_db;
        self.dirty = true;
        Ok(())
    }

    /// Transition width in Hz.
    pub fn transition_length(&self) -> u32 {
        self.transition_length_hz
    }

    /// Set the transition width; with optimal sizing the tap count follows.
    pub fn set_transition_length(&mut self, transition_length_hz: u32) -> Result<()> {
        if transition_length_hz == self.transition_length_hz {
            return Ok(());
        }
        if self.use_optimal_tap_count {
            self.tap_count = FirFilter::optimal_tap_count(
                self.sampling_rate_hz,
                self.attenuation_db,
                transition_length_hz,
            )?;
        }
        self.transition_length_hz = transition_length_hz;
        self.dirty = true;
        Ok(())
    }

    /// Current FIR tap count.
    pub fn tap_count(&self) -> usize {
        self.tap_count
    }

    /// Set an explicit tap count; the transition length follows.
    ///
    /// Ignored while optimal sizing is on, since the count is derived.
    pub fn set_tap_count(&mut self, tap_count: usize) -> Result<()> {
        if tap_count == self.tap_count || self.use_optimal_tap_count {
            return Ok(());
        }
        self.transition_length_hz =
            FirFilter::transition_length(self.sampling_rate_hz, self.attenuation_db, tap_count)?;
        self.tap_count = tap_count;
        self.dirty = true;
        Ok(())
    }

    /// Whether the tap count is derived from attenuation and transition.
    pub fn use_optimal_tap_count(&self) -> bool {
        self.use_optimal_tap_count
    }

    /// Toggle optimal sizing; turning it on re-derives the tap count.
    pub fn set_use_optimal_tap_count(&mut self, enabled: bool) -> Result<()> {
        if enabled == self.use_optimal_tap_count {
            return Ok(());
        }
        if enabled {
            self.tap_count = FirFilter::optimal_tap_count(
                self.sampling_rate_hz,
                self.attenuation_db,
                self.transition_length_hz,
            )?;
        }
        self.use_optimal_tap_count = enabled;
        self.dirty = true;
        Ok(())
    }

    /// Recompute whichever sizing value is derived, committing it only when
    /// the computation succeeds.
    fn relink(
        &mut self,
        sampling_rate_hz: u32,
        attenuation_db: f64,
        transition_length_hz: u32,
        tap_count: usize,
    ) -> Result<()> {
        if self.use_optimal_tap_count {
            self.tap_count =
                FirFilter::optimal_tap_count(sampling_rate_hz, attenuation_db, transition_length_hz)?;
        } else {
            self.transition_length_hz =
                FirFilter::transition_length(sampling_rate_hz, attenuation_db, tap_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_session() -> DesignSession {
        DesignSession::from_spec(&FilterSpec {
            sampling_rate_hz: 8000,
            cutoff_frequency_hz: 1000,
            taps: TapSizing::Fixed { tap_count: 51 },
            ..FilterSpec::default()
        })
    }

    #[test]
    fn new_session_uses_optimal_sizing() {
        let session = DesignSession::new();
        assert!(session.use_optimal_tap_count());
        assert_eq!(session.tap_count(), 273);
        assert!(session.is_dirty());
        assert!(session.design().is_none());
    }

    #[test]
    fn commit_clears_dirty_flag() {
        let mut session = small_session();
        let len = session.commit().unwrap().coefficients.len();
        assert_eq!(len, 51);
        assert!(!session.is_dirty());
        assert!(session.design().is_some());
    }

    #[test]
    fn unchanged_setter_keeps_session_clean() {
        let mut session = small_session();
        session.commit().unwrap();
        session.set_cutoff_frequency(1000);
        session.set_window(Window::Blackman);
        session.set_pass_type(PassType::Low);
        assert!(!session.is_dirty());
    }

    #[test]
    fn setters_batch_until_commit() {
        let mut session = small_session();
        session.commit().unwrap();
        session.set_pass_type(PassType::High);
        session.set_cutoff_frequency(2000);
        assert!(session.is_dirty());
        assert_eq!(session.design().unwrap().spec.pass_type, PassType::Low);

        let design = session.commit().unwrap();
        assert_eq!(design.spec.pass_type, PassType::High);
        assert_eq!(design.spec.cutoff_frequency_hz, 2000);
    }

    #[test]
    fn failed_commit_keeps_previous_design() {
        let mut session = small_session();
        session.commit().unwrap();
        session.set_cutoff_frequency(4000);
        assert!(session.commit().is_err());
        assert!(session.is_dirty());
        assert_eq!(session.design().unwrap().spec.cutoff_frequency_hz, 1000);
    }

    #[test]
    fn fixed_tap_count_drives_transition_length() {
        let mut session = small_session();
        session.set_tap_count(101).unwrap();
        assert_eq!(
            session.transition_length(),
            FirFilter::transition_length(8000, DEFAULT_ATTENUATION_DB, 101).unwrap()
        );
    }

    #[test]
    fn optimal_sizing_follows_transition_length() {
        let mut session = DesignSession::new();
        session.set_transition_length(10).unwrap();
        assert_eq!(session.tap_count(), 2729);
        assert_eq!(session.tap_count() % 2, 1);
    }

    #[test]
    fn enabling_optimal_sizing_recomputes_taps() {
        let mut session = small_session();
        session.set_transition_length(100).unwrap();
        assert_eq!(session.tap_count(), 51);
        session.set_use_optimal_tap_count(true).unwrap();
        assert_eq!(
            session.tap_count(),
            FirFilter::optimal_tap_count(8000, DEFAULT_ATTENUATION_DB, 100).unwrap()
        );
    }

    #[test]
    fn tap_count_is_derived_while_optimal() {
        let mut session = DesignSession::new();
        session.set_tap_count(11).unwrap();
        assert_eq!(session.tap_count(), 273);
    }

    #[test]
    fn invalid_attenuation_leaves_state_untouched() {
        let mut session = DesignSession::new();
        assert!(session.set_attenuation_db(-1.0).is_err());
        assert_eq!(session.attenuation_db(), DEFAULT_ATTENUATION_DB);
        assert_eq!(session.tap_count(), 273);
    }

    #[test]
    fn sampling_rate_change_relinks_taps() {
        let mut session = DesignSession::new();
        session.set_sampling_rate(96000).unwrap();
        assert_eq!(session.tap_count(), 547);
    }

    #[test]
    fn zero_sampling_rate_is_rejected_in_both_sizing_modes() {
        let mut optimal = DesignSession::new();
        assert!(optimal.set_sampling_rate(0).is_err());
        assert_eq!(optimal.sampling_rate(), 48000);
        assert_eq!(optimal.tap_count(), 273);

        let mut fixed = small_session();
        let transition = fixed.transition_length();
        assert!(fixed.set_sampling_rate(0).is_err());
        assert_eq!(fixed.sampling_rate(), 8000);
        assert_eq!(fixed.transition_length(), transition);
    }

    #[test]
    fn spec_reflects_draft() {
        let mut session = DesignSession::new();
        session.set_kind(FilterKind::Iir);
        session.set_use_optimal_tap_count(false).unwrap();
        let spec = session.spec();
        assert_eq!(spec.kind, FilterKind::Iir);
        assert_eq!(spec.taps, TapSizing::Fixed { tap_count: 273 });
    }
}
