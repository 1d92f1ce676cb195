//! FIR sizing command.

use clap::Args;
use tapline_core::FirFilter;

#[derive(Args)]
pub struct TapsArgs {
    /// Sampling rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Stop-band attenuation in dB
    #[arg(long, default_value = "25.0")]
    attenuation: f64,

    /// Transition width in Hz
    #[arg(long, default_value = "100")]
    transition: u32,
}

pub fn run(args: TapsArgs) -> anyhow::Result<()> {
    let taps = FirFilter::optimal_tap_count(args.sample_rate, args.attenuation, args.transition)?;
    let transition = FirFilter::transition_length(args.sample_rate, args.attenuation, taps)?;

    tracing::info!(taps, transition, "optimal sizing");

    println!("taps {taps}");
    println!("transition_length_hz {transition}");
    Ok(())
}
