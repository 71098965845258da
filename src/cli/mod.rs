//! CLI infrastructure for the dropfour toolkit
//!
//! Provides the command-line interface for training, evaluating, and
//! comparing tree-backed Connect Four agents.

pub mod commands;

use std::path::Path;

use crate::{
    Error, Result,
    agent::{Player, QAgent},
    app::App,
    game::Seat,
};

/// Parse a seat token such as `1`, `p2`, or `second`.
pub(crate) fn parse_seat(value: &str) -> Result<Seat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "p1" | "first" | "one" => Ok(Seat::One),
        "2" | "p2" | "second" | "two" => Ok(Seat::Two),
        other => Err(Error::ParseSeat {
            input: other.to_string(),
        }),
    }
}

/// Build an opponent from its CLI spec: a named baseline or a path to a
/// persisted tree.
pub(crate) fn build_opponent(
    app: &App,
    spec: &str,
    seat: Seat,
    seed: Option<u64>,
) -> Result<Player> {
    match spec.trim().to_ascii_lowercase().as_str() {
        "random" => Ok(Player::random(seed)),
        "lookahead" => Ok(Player::lookahead(seed)),
        _ => {
            let path = Path::new(spec);
            if path.exists() {
                let agent = app.load_agent(seat, path, seed)?;
                Ok(Player::learner(agent))
            } else {
                Err(Error::ParseOpponent {
                    input: spec.to_string(),
                    expected: "random, lookahead, or a path to a saved tree".to_string(),
                })
            }
        }
    }
}

/// Print the outcome summary in W/D/L form, from the agent's perspective.
pub(crate) fn print_summary(agent: &QAgent, result: &crate::pipeline::TrainingResult) {
    let seat = agent.seat();
    println!(
        "played {} games as {}: {} wins ({:.1}%), {} draws ({:.1}%), {} losses ({:.1}%)",
        result.total_episodes,
        seat,
        result.wins,
        result.win_rate * 100.0,
        result.draws,
        result.draw_rate * 100.0,
        result.losses,
        result.loss_rate * 100.0,
    );
    println!("tree size: {} positions", agent.tree().node_count());
}
