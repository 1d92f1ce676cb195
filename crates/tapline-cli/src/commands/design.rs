//! Filter design command.

use crate::spec_file;
use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tapline_core::{Design, FilterKind, FilterSpec, PassType, TapSizing, Window};
use tapline_core::spec::{DEFAULT_ATTENUATION_DB, DEFAULT_TRANSITION_LENGTH_HZ};

/// Filter kinds for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliKind {
    Fir,
    Iir,
}

impl From<CliKind> for FilterKind {
    fn from(k: CliKind) -> Self {
        match k {
            CliKind::Fir => FilterKind::Fir,
            CliKind::Iir => FilterKind::Iir,
        }
    }
}

/// Pass types for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliPass {
    Low,
    High,
}

impl From<CliPass> for PassType {
    fn from(p: CliPass) -> Self {
        match p {
            CliPass::Low => PassType::Low,
            CliPass::High => PassType::High,
        }
    }
}

/// FIR windows for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliWindow {
    Rectangular,
    Blackman,
}

impl From<CliWindow> for Window {
    fn from(w: CliWindow) -> Self {
        match w {
            CliWindow::Rectangular => Window::Rectangular,
            CliWindow::Blackman => Window::Blackman,
        }
    }
}

/// Output encodings
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Whitespace-separated decimal text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Args)]
pub struct DesignArgs {
    /// TOML spec file; flags override its fields
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Filter kind
    #[arg(long, value_enum)]
    kind: Option<CliKind>,

    /// Low- or high-pass
    #[arg(long, value_enum)]
    pass: Option<CliPass>,

    /// Cutoff frequency in Hz
    #[arg(long)]
    cutoff: Option<u32>,

    /// Sampling rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// FIR window
    #[arg(long, value_enum)]
    window: Option<CliWindow>,

    /// Explicit FIR tap count (disables optimal sizing)
    #[arg(long, conflicts_with_all = ["attenuation", "transition"])]
    taps: Option<usize>,

    /// Stop-band attenuation in dB for optimal sizing
    #[arg(long)]
    attenuation: Option<f64>,

    /// Transition width in Hz for optimal sizing
    #[arg(long)]
    transition: Option<u32>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print unwrapped instead of wrapped phase
    #[arg(long)]
    unwrap_phase: bool,

    /// Skip the response section
    #[arg(long)]
    coefficients_only: bool,
}

impl DesignArgs {
    /// Start from the spec file (or defaults) and apply flag overrides.
    fn resolve_spec(&self) -> anyhow::Result<FilterSpec> {
        let mut spec = match &self.spec {
            Some(path) => spec_file::load(path)?,
            None => FilterSpec::default(),
        };

        if let Some(kind) = self.kind {
            spec.kind = kind.into();
        }
        if let Some(pass) = self.pass {
            spec.pass_type = pass.into();
        }
        if let Some(cutoff) = self.cutoff {
            spec.cutoff_frequency_hz = cutoff;
        }
        if let Some(sample_rate) = self.sample_rate {
            spec.sampling_rate_hz = sample_rate;
        }
        if let Some(window) = self.window {
            spec.window = window.into();
        }

        if let Some(tap_count) = self.taps {
            spec.taps = TapSizing::Fixed { tap_count };
        } else if self.attenuation.is_some() || self.transition.is_some() {
            let (attenuation_db, transition_length_hz) = match spec.taps {
                TapSizing::Optimal {
                    attenuation_db,
                    transition_length_hz,
                } => (attenuation_db, transition_length_hz),
                TapSizing::Fixed { .. } => (DEFAULT_ATTENUATION_DB, DEFAULT_TRANSITION_LENGTH_HZ),
            };
            spec.taps = TapSizing::Optimal {
                attenuation_db: self.attenuation.unwrap_or(attenuation_db),
                transition_length_hz: self.transition.unwrap_or(transition_length_hz),
            };
        }

        Ok(spec)
    }
}

pub fn run(args: DesignArgs) -> anyhow::Result<()> {
    let spec = args.resolve_spec()?;
    tracing::info!(
        kind = spec.kind.name(),
        pass = spec.pass_type.name(),
        cutoff_frequency_hz = spec.cutoff_frequency_hz,
        sampling_rate_hz = spec.sampling_rate_hz,
        "designing filter"
    );

    let design = spec.design().context("filter design failed")?;

    let rendered = match args.format {
        OutputFormat::Text => render_text(&design, args.unwrap_phase, args.coefficients_only),
        OutputFormat::Json => serde_json::to_string_pretty(&design)? + "\n",
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Render a design as `#`-commented sections of whitespace-separated values.
fn render_text(design: &Design, unwrap_phase: bool, coefficients_only: bool) -> String {
    let spec = &design.spec;
    let mut out = format!(
        "# {} {}-pass, cutoff {} Hz, sampling rate {} Hz\n",
        spec.kind.name(),
        spec.pass_type.name(),
        spec.cutoff_frequency_hz,
        spec.sampling_rate_hz
    );
    if spec.kind == FilterKind::Fir {
        out.push_str(&format!(
            "# window {} (stop band about {} dB)\n",
            spec.window.name(),
            spec.window.expected_attenuation_db()
        ));
    }
    if let Some(edge) = design.response.cutoff_3db() {
        out.push_str(&format!("# -3 dB at {edge} Hz\n"));
    }

    out.push_str(&format!("# coefficients ({})\n", design.coefficients.len()));
    for c in &design.coefficients {
        out.push_str(&format!("{c:.12}\n"));
    }

    if !coefficients_only {
        let phases = if unwrap_phase {
            design.response.phases()
        } else {
            design.response.wrapped_phases()
        };
        out.push_str("# response: frequency_hz magnitude_db phase_rad\n");
        for (point, phase) in design.response.iter().zip(phases) {
            out.push_str(&format!(
                "{} {:.6} {:.6}\n",
                point.frequency_hz, point.magnitude_db, phase
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: DesignArgs,
    }

    fn parse(argv: &[&str]) -> DesignArgs {
        Wrapper::parse_from(std::iter::once("design").chain(argv.iter().copied())).args
    }

    #[test]
    fn defaults_without_flags() {
        let spec = parse(&[]).resolve_spec().unwrap();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn flags_override_fields() {
        let spec = parse(&["--kind", "iir", "--pass", "high", "--cutoff", "900"])
            .resolve_spec()
            .unwrap();
        assert_eq!(spec.kind, FilterKind::Iir);
        assert_eq!(spec.pass_type, PassType::High);
        assert_eq!(spec.cutoff_frequency_hz, 900);
    }

    #[test]
    fn explicit_taps_switch_to_fixed_sizing() {
        let spec = parse(&["--taps", "51"]).resolve_spec().unwrap();
        assert_eq!(spec.taps, TapSizing::Fixed { tap_count: 51 });
    }

    #[test]
    fn attenuation_keeps_default_transition() {
        let spec = parse(&["--attenuation", "60"]).resolve_spec().unwrap();
        assert_eq!(
            spec.taps,
            TapSizing::Optimal {
                attenuation_db: 60.0,
                transition_length_hz: DEFAULT_TRANSITION_LENGTH_HZ,
            }
        );
    }

    #[test]
    fn taps_conflict_with_optimal_flags() {
        let result = Wrapper::try_parse_from(["design", "--taps", "51", "--transition", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn text_output_lists_every_coefficient_and_bin() {
        let spec = FilterSpec {
            kind: FilterKind::Iir,
            cutoff_frequency_hz: 100,
            sampling_rate_hz: 1000,
            ..FilterSpec::default()
        };
        let design = spec.design().unwrap();
        let text = render_text(&design, false, false);
        let data_lines = text.lines().filter(|l| !l.starts_with('#')).count();
        assert_eq!(data_lines, 3 + 499);

        assert!(!text.contains("# window"));

        let coefficients_only = render_text(&design, false, true);
        assert_eq!(coefficients_only.lines().filter(|l| !l.starts_with('#')).count(), 3);
    }

    #[test]
    fn fir_header_reports_window_attenuation() {
        let spec = FilterSpec {
            window: Window::Rectangular,
            cutoff_frequency_hz: 500,
            sampling_rate_hz: 4000,
            taps: TapSizing::Fixed { tap_count: 21 },
            ..FilterSpec::default()
        };
        let text = render_text(&spec.design().unwrap(), true, true);
        assert!(text.contains("# window rectangular (stop band about -21 dB)"), "{text}");
        assert!(text.ends_with('\n'));
    }
}
