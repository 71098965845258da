//! dropfour CLI - train, evaluate, and compare tree-backed Connect Four
//! agents

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dropfour")]
#[command(version, about = "Connect Four Q-learning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent against a scripted or trained opponent
    Train(dropfour::cli::commands::train::TrainArgs),

    /// Evaluate a trained agent without learning
    Evaluate(dropfour::cli::commands::evaluate::EvaluateArgs),

    /// Compare two trained agents head-to-head
    Compare(dropfour::cli::commands::compare::CompareArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => dropfour::cli::commands::train::execute(args),
        Commands::Evaluate(args) => dropfour::cli::commands::evaluate::execute(args),
        Commands::Compare(args) => dropfour::cli::commands::compare::execute(args),
    }
}
