//! Player roles as one sum type
//!
//! Every participant in a match is a `Player`: the learning agent, a
//! uniform-random baseline, a one-ply lookahead heuristic, or a scripted
//! column filler. Dispatch happens through a single `choose_move`
//! operation so the match runner stays agnostic of who is playing.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    agent::QAgent,
    game::{GameState, Outcome, Seat},
    types::Move,
};

/// A participant in a Connect Four match.
pub enum Player {
    /// Picks uniformly at random among the legal moves.
    Random { rng: StdRng },
    /// One-ply heuristic: wins immediately when possible, otherwise blocks
    /// the opponent's immediate win, otherwise plays randomly.
    Lookahead { rng: StdRng },
    /// Always drops into the lowest open cell of one column; falls back to
    /// the first legal move once the column is full. Deterministic.
    Column { col: usize },
    /// The tree-backed learning agent.
    Learner(QAgent),
}

impl Player {
    pub fn random(seed: Option<u64>) -> Self {
        Player::Random {
            rng: seeded_rng(seed),
        }
    }

    pub fn lookahead(seed: Option<u64>) -> Self {
        Player::Lookahead {
            rng: seeded_rng(seed),
        }
    }

    pub fn column(col: usize) -> Self {
        Player::Column { col }
    }

    pub fn learner(agent: QAgent) -> Self {
        Player::Learner(agent)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Player::Random { .. } => "random",
            Player::Lookahead { .. } => "lookahead",
            Player::Column { .. } => "column",
            Player::Learner(_) => "learner",
        }
    }

    /// Choose a move for the side to move and apply it to `game`.
    ///
    /// `training` and `explore_rate` only matter for the learner variant;
    /// scripted players ignore them.
    pub fn choose_move(
        &mut self,
        game: &mut GameState,
        training: bool,
        explore_rate: f64,
    ) -> crate::Result<Move> {
        match self {
            Player::Random { rng } => {
                let mv = *game
                    .legal_moves()
                    .choose(rng)
                    .ok_or(crate::Error::NoLegalMoves)?;
                game.record(mv)?;
                Ok(mv)
            }
            Player::Lookahead { rng } => {
                let mv = match lookahead_move(game) {
                    Some(mv) => mv,
                    None => *game
                        .legal_moves()
                        .choose(rng)
                        .ok_or(crate::Error::NoLegalMoves)?,
                };
                game.record(mv)?;
                Ok(mv)
            }
            Player::Column { col } => {
                let legal = game.legal_moves();
                let mv = legal
                    .iter()
                    .filter(|m| m.col == *col)
                    .min_by_key(|m| m.row)
                    .or_else(|| legal.first())
                    .copied()
                    .ok_or(crate::Error::NoLegalMoves)?;
                game.record(mv)?;
                Ok(mv)
            }
            Player::Learner(agent) => agent.select_and_apply(game, training, explore_rate),
        }
    }

    /// Prepare for a fresh game. Only the learner carries per-game state
    /// (its tree cursor).
    pub fn reset(&mut self) {
        if let Player::Learner(agent) = self {
            agent.reset_cursor();
        }
    }

    /// Seed the player's generator, if it has one.
    pub fn set_seed(&mut self, seed: u64) {
        match self {
            Player::Random { rng } | Player::Lookahead { rng } => {
                *rng = StdRng::seed_from_u64(seed);
            }
            Player::Column { .. } => {}
            Player::Learner(agent) => agent.set_seed(seed),
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// One-ply probe: a winning move for the side to move, else a block of the
/// opponent's winning move.
fn lookahead_move(game: &GameState) -> Option<Move> {
    let seat: Seat = game.side_to_move();

    for &mv in game.legal_moves() {
        let mut probe = game.clone();
        if probe.record(mv).is_ok()
            && probe.winner() == Some(Outcome::Win(seat))
        {
            return Some(mv);
        }
    }

    let opponent = seat.opponent();
    for &mv in game.legal_moves() {
        let mut probe = game.clone();
        if probe.record_forced(mv, opponent).is_ok()
            && probe.winner() == Some(Outcome::Win(opponent))
        {
            return Some(mv);
        }
    }

    None
}
