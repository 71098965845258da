//! Match runner: drives repeated episodes between the learning agent and
//! an opponent, applies the TD backup after each finished game, and decays
//! the exploration probability linearly across the run.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    agent::{Player, QAgent},
    game::{GameState, Outcome, Seat},
    ports::Observer,
    types::defaults,
};

/// Linearly decaying exploration probability.
///
/// Starts at `max` and loses `(max - min) / episodes` after every episode,
/// reaching `min` once all episodes have been played.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExploreSchedule {
    current: f64,
    step: f64,
    min: f64,
}

impl ExploreSchedule {
    pub fn new(max: f64, min: f64, episodes: usize) -> Self {
        let step = if episodes == 0 {
            0.0
        } else {
            (max - min) / episodes as f64
        };
        ExploreSchedule {
            current: max,
            step,
            min,
        }
    }

    /// The exploration probability for the upcoming episode.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Decay after an episode completes.
    pub fn advance(&mut self) {
        self.current -= self.step;
    }

    pub fn min(&self) -> f64 {
        self.min
    }
}

/// Configuration for one training or evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Which seat the learning agent occupies
    pub agent_seat: Seat,

    /// Whether the agent learns (grows its tree and applies TD backups)
    pub training: bool,

    /// Exploration probability at the start of the run
    pub max_explore_rate: f64,

    /// Exploration probability at the end of the run
    pub min_explore_rate: f64,

    /// Random seed threaded into both players
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            agent_seat: Seat::One,
            training: true,
            max_explore_rate: defaults::MAX_EXPLORE_RATE,
            min_explore_rate: defaults::MIN_EXPLORE_RATE,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Validate episode count and exploration range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the run cannot decay
    /// the exploration probability as specified.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "episodes must be positive".to_string(),
            });
        }
        for (name, value) in [
            ("max_explore_rate", self.max_explore_rate),
            ("min_explore_rate", self.min_explore_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} must be within [0, 1]"),
                });
            }
        }
        if self.min_explore_rate > self.max_explore_rate {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "min_explore_rate {} exceeds max_explore_rate {}",
                    self.min_explore_rate, self.max_explore_rate
                ),
            });
        }
        Ok(())
    }
}

/// Result of a run, counted from the agent's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Number of wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Per-episode winners in play order
    pub outcomes: Vec<Outcome>,
}

impl TrainingResult {
    /// Create a new result from an ordered outcome log.
    pub fn new(agent_seat: Seat, outcomes: Vec<Outcome>) -> Self {
        let total = outcomes.len();
        let wins = outcomes.iter().filter(|o| o.is_win_for(agent_seat)).count();
        let draws = outcomes.iter().filter(|&&o| o == Outcome::Draw).count();
        let losses = total - wins - draws;
        let rate = |n: usize| {
            if total > 0 {
                n as f64 / total as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes: total,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            outcomes,
        }
    }

    /// Save result to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from a JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Drives episodes between a learning agent and one opponent.
pub struct MatchRunner {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchRunner {
    /// Create a new runner for the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner.
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Play the configured number of episodes.
    ///
    /// Each episode starts from a freshly constructed game; the agent's
    /// tree carries over between episodes (only its cursor is reset).
    /// When training, the finished game's move sequence is backed up
    /// through the tree before the next episode begins.
    pub fn run(&mut self, agent: &mut QAgent, opponent: &mut Player) -> Result<TrainingResult> {
        self.config.validate()?;
        self.seed_pair(agent, opponent);

        let agent_seat = self.config.agent_seat;
        let mut schedule = ExploreSchedule::new(
            self.config.max_explore_rate,
            self.config.min_explore_rate,
            self.config.episodes,
        );
        let mut outcomes = Vec::with_capacity(self.config.episodes);

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            for observer in &mut self.observers {
                observer.on_episode_start(episode)?;
            }

            let mut game = GameState::new(agent.tree().board_size());
            agent.reset_cursor();
            opponent.reset();

            let outcome = self.play_episode(&mut game, agent, opponent, schedule.current())?;

            if self.config.training {
                apply_update(agent, game.move_sequence(), outcome)?;
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
            outcomes.push(outcome);
            schedule.advance();
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(agent_seat, outcomes))
    }

    fn seed_pair(&self, agent: &mut QAgent, opponent: &mut Player) {
        if let Some(seed) = self.config.seed {
            agent.set_seed(seed);
            opponent.set_seed(seed.wrapping_add(1));
        }
    }

    fn play_episode(
        &mut self,
        game: &mut GameState,
        agent: &mut QAgent,
        opponent: &mut Player,
        explore_rate: f64,
    ) -> Result<Outcome> {
        let winner = loop {
            if let Some(outcome) = game.winner() {
                break outcome;
            }
            if game.side_to_move() == self.config.agent_seat {
                agent.select_and_apply(game, self.config.training, explore_rate)?;
            } else {
                // Opponents never learn here; a trained opponent plays
                // pure exploitation.
                opponent.choose_move(game, false, 0.0)?;
            }
        };
        Ok(winner)
    }
}

/// Back up a finished game into the agent's tree.
///
/// A player-1 agent updates from the root at index 0; a player-2 agent
/// starts at the root's child for the opponent's opening move, index 1.
fn apply_update(agent: &mut QAgent, moves: &[crate::types::Move], outcome: Outcome) -> Result<()> {
    let seat = agent.seat();
    let tree = agent.tree_mut();
    let root = tree.root();
    match seat {
        Seat::One => tree.update_along_path(root, moves, Seat::One, outcome, 0),
        Seat::Two => {
            let opening = *moves.first().ok_or(Error::EmptyMoveSequence)?;
            let start = tree
                .find_child(root, opening)
                .ok_or(Error::MissingPathNode {
                    row: opening.row,
                    col: opening.col,
                    index: 0,
                })?;
            tree.update_along_path(start, moves, Seat::Two, outcome, 1)
        }
    }
}
