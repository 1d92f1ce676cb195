//! Tapline CLI - Command-line interface for the Tapline filter designer.

mod commands;
mod spec_file;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tapline")]
#[command(author, version, about = "FIR and RC filter designer", long_about = None)]
struct Cli {
    /// Log design steps to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a filter and print its coefficients and response
    Design(commands::design::DesignArgs),

    /// Compute the optimal FIR tap count for an attenuation target
    Taps(commands::taps::TapsArgs),

    /// Print one period of a sine wave
    Sine(commands::sine::SineArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Design(args) => commands::design::run(args),
        Commands::Taps(args) => commands::taps::run(args),
        Commands::Sine(args) => commands::sine::run(args),
    }
}
