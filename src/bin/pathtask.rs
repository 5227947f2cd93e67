//! pathtask CLI - generate, inspect, simulate, and play path-choice rounds
//!
//! This CLI provides a unified interface for:
//! - Sampling validated rounds at any level
//! - Showing the curriculum for an orientation
//! - Simulating participants and reporting accuracy
//! - Playing a session in the terminal

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pathtask")]
#[command(version, about = "Two-path concept learning task", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate validated rounds
    Generate(pathtask::cli::commands::generate::GenerateArgs),

    /// Show the curriculum for an orientation
    Curriculum(pathtask::cli::commands::curriculum::CurriculumArgs),

    /// Simulate participants through full sessions
    Simulate(Box<pathtask::cli::commands::simulate::SimulateArgs>),

    /// Play a session in the terminal
    Play(pathtask::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate(args) => pathtask::cli::commands::generate::execute(args),
        Commands::Curriculum(args) => pathtask::cli::commands::curriculum::execute(args),
        Commands::Simulate(args) => pathtask::cli::commands::simulate::execute(*args),
        Commands::Play(args) => pathtask::cli::commands::play::execute(args),
    }
}
