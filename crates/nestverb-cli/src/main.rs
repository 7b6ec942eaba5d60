//! nestverb CLI - render, measure and inspect the nested lattice reverb.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nestverb")]
#[command(author, version, about = "Nested all-pass lattice reverb", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// Render and measure the impulse response
    Impulse(commands::impulse::ImpulseArgs),

    /// Show a topology and its parameters
    Info(commands::info::InfoArgs),
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
