//! Train command - train a tree-backed agent against an opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{AgentConfig, App},
    cli::{build_opponent, parse_seat, print_summary},
    pipeline::{MatchRunner, ProgressObserver, TrainingConfig},
    types::{BoardSize, defaults},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent through self-play episodes", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'g', default_value_t = 10_000)]
    pub episodes: usize,

    /// Which seat the agent occupies (`1` or `2`)
    #[arg(long, default_value = "1")]
    pub agent_seat: String,

    /// Opponent: `random`, `lookahead`, or a path to a saved tree
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Board rows
    #[arg(long, default_value_t = 5)]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = 5)]
    pub cols: usize,

    /// Output file for the trained tree
    #[arg(long, short = 'O')]
    pub output: PathBuf,

    /// Existing tree to continue training from; falls back to a fresh
    /// tree when the file cannot be read
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Learning rate (alpha)
    #[arg(long, default_value_t = defaults::LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount factor (gamma)
    #[arg(long, default_value_t = defaults::DISCOUNT)]
    pub discount: f64,

    /// Terminal reward magnitude
    #[arg(long, default_value_t = defaults::REWARD)]
    pub reward: f64,

    /// Initial action value for unvisited moves
    #[arg(long, default_value_t = defaults::INITIAL_VALUE)]
    pub initial_value: f64,

    /// Exploration probability at the start of training
    #[arg(long, default_value_t = defaults::MAX_EXPLORE_RATE)]
    pub max_explore: f64,

    /// Exploration probability at the end of training
    #[arg(long, default_value_t = defaults::MIN_EXPLORE_RATE)]
    pub min_explore: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing the run result as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_seat = parse_seat(&args.agent_seat)?;
    let board_size = BoardSize::new(args.rows, args.cols)?;

    let mut agent_config = AgentConfig::new(board_size)
        .with_initial_value(args.initial_value)
        .with_reward(args.reward)
        .with_learning_rate(args.learning_rate)
        .with_discount(args.discount);
    if let Some(seed) = args.seed {
        agent_config = agent_config.with_seed(seed);
    }

    let app = App::new();
    let mut agent = match &args.resume {
        Some(path) => app.load_agent_or_fresh(agent_seat, path, &agent_config)?,
        None => app.create_agent(agent_seat, &agent_config)?,
    };
    let mut opponent = build_opponent(
        &app,
        &args.opponent,
        agent_seat.opponent(),
        args.seed.map(|s| s.wrapping_add(1)),
    )?;

    let config = TrainingConfig {
        episodes: args.episodes,
        agent_seat,
        training: true,
        max_explore_rate: args.max_explore,
        min_explore_rate: args.min_explore,
        seed: args.seed,
    };

    let mut runner = MatchRunner::new(config);
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new(agent_seat)));
    }

    println!(
        "training on a {board_size} board against '{}' for {} episodes",
        opponent.name(),
        args.episodes
    );
    let result = runner.run(&mut agent, &mut opponent)?;
    print_summary(&agent, &result);

    app.save_agent(&agent, &args.output)
        .with_context(|| format!("failed to save trained tree to {:?}", args.output))?;
    println!("saved trained tree to {:?}", args.output);

    if let Some(summary) = &args.summary {
        result
            .save(summary)
            .with_context(|| format!("failed to write summary to {summary:?}"))?;
    }

    Ok(())
}
