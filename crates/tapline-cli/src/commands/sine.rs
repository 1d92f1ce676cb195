//! Sine period command.

use clap::Args;
use tapline_core::SineWave;

#[derive(Args)]
pub struct SineArgs {
    /// Frequency in Hz
    #[arg(long)]
    frequency: u32,

    /// Sampling rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Peak amplitude
    #[arg(long, default_value = "1.0")]
    amplitude: f64,

    /// Phase offset in radians
    #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
    phase: f64,
}

pub fn run(args: SineArgs) -> anyhow::Result<()> {
    let generator = SineWave::new(args.sample_rate)?;
    let period = generator.generate_period_shifted(args.frequency, args.amplitude, args.phase)?;

    for sample in period {
        println!("{sample:.12}");
    }
    Ok(())
}
