//! qlearn CLI - Train and inspect Q-learning agents on a corridor environment

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qlearn")]
#[command(version, about = "Q-learning agents on a toy corridor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a tabular or linear agent
    Train(qlearning_kit::cli::commands::train::TrainArgs),

    /// Load a saved agent and print its policy
    Inspect(qlearning_kit::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qlearning_kit::cli::commands::train::execute(args),
        Commands::Inspect(args) => qlearning_kit::cli::commands::inspect::execute(args),
    }
}
