//! Evaluate command - play a trained tree against an opponent without
//! learning

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::OutcomeSeries,
    app::App,
    cli::{build_opponent, parse_seat, print_summary},
    pipeline::{MatchRunner, ProgressObserver, TrainingConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent against an opponent")]
pub struct EvaluateArgs {
    /// Path to the trained tree
    pub tree: PathBuf,

    /// Which seat the agent occupies (`1` or `2`)
    #[arg(long, default_value = "1")]
    pub agent_seat: String,

    /// Opponent: `random`, `lookahead`, or a path to a saved tree
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Number of evaluation episodes
    #[arg(long, short = 'g', default_value_t = 1_000)]
    pub episodes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let agent_seat = parse_seat(&args.agent_seat)?;

    let app = App::new();
    let mut agent = app.load_agent(agent_seat, &args.tree, args.seed)?;
    let mut opponent = build_opponent(
        &app,
        &args.opponent,
        agent_seat.opponent(),
        args.seed.map(|s| s.wrapping_add(1)),
    )?;

    let config = TrainingConfig {
        episodes: args.episodes,
        agent_seat,
        training: false,
        max_explore_rate: 0.0,
        min_explore_rate: 0.0,
        seed: args.seed,
    };

    let mut runner = MatchRunner::new(config);
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new(agent_seat)));
    }

    let result = runner.run(&mut agent, &mut opponent)?;
    print_summary(&agent, &result);

    let series = OutcomeSeries::from(result.outcomes.clone());
    if let Some(final_fraction) = series.cumulative_win_fraction(agent_seat).last() {
        println!("final cumulative win fraction: {final_fraction:.3}");
    }

    Ok(())
}
