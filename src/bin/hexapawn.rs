//! Hexapawn CLI - MENACE matchbox learners on a 3x3 board
//!
//! This CLI provides:
//! - Self-play training of a First and a Second agent
//! - Playing against a trained agent on the terminal
//! - Inspecting an agent's matchboxes

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexapawn")]
#[command(version, about = "MENACE matchbox learners playing Hexapawn", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train both agents by self-play
    Train(hexapawn::cli::commands::train::TrainArgs),

    /// Play against a trained agent
    Play(hexapawn::cli::commands::play::PlayArgs),

    /// Print the matchboxes of a trained agent
    Inspect(hexapawn::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => hexapawn::cli::commands::train::execute(args),
        Commands::Play(args) => hexapawn::cli::commands::play::execute(args),
        Commands::Inspect(args) => hexapawn::cli::commands::inspect::execute(args),
    }
}
