//! Compare command - pit two trained trees against each other

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    agent::Player,
    app::App,
    cli::print_summary,
    game::Seat,
    pipeline::{MatchRunner, ProgressObserver, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Compare two trained agents head-to-head")]
pub struct CompareArgs {
    /// Tree playing as player 1
    pub tree_one: PathBuf,

    /// Tree playing as player 2
    pub tree_two: PathBuf,

    /// Number of episodes
    #[arg(long, short = 'g', default_value_t = 1_000)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: CompareArgs) -> Result<()> {
    let app = App::new();
    let mut first = app.load_agent(Seat::One, &args.tree_one, args.seed)?;
    let mut second = Player::learner(app.load_agent(
        Seat::Two,
        &args.tree_two,
        args.seed.map(|s| s.wrapping_add(1)),
    )?);

    let config = TrainingConfig {
        episodes: args.episodes,
        agent_seat: Seat::One,
        training: false,
        max_explore_rate: 0.0,
        min_explore_rate: 0.0,
        seed: args.seed,
    };

    let mut runner = MatchRunner::new(config);
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new(Seat::One)));
    }

    let result = runner.run(&mut first, &mut second)?;
    print_summary(&first, &result);

    Ok(())
}
