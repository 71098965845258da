//! Observer implementations for training pipelines

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    game::{Outcome, Seat},
    ports::Observer,
};

/// Progress bar observer - shows a live W/D/L tally while training
pub struct ProgressObserver {
    agent_seat: Seat,
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer counting from the given seat's
    /// perspective.
    pub fn new(agent_seat: Seat) -> Self {
        Self {
            agent_seat,
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(seat) if seat == self.agent_seat => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }
}

/// Metrics observer - tracks running outcome counts
pub struct MetricsObserver {
    agent_seat: Seat,
    wins: usize,
    draws: usize,
    losses: usize,
    total_episodes: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer for the given seat.
    pub fn new(agent_seat: Seat) -> Self {
        Self {
            agent_seat,
            wins: 0,
            draws: 0,
            losses: 0,
            total_episodes: 0,
        }
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    /// Win rate so far
    pub fn win_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_episodes as f64
        }
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Win(seat) if seat == self.agent_seat => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        self.total_episodes += 1;
        Ok(())
    }
}

/// Outcome log observer - records the ordered list of per-episode winners.
///
/// This is the only data the statistics consumer receives; it has no
/// structural access to the tree.
#[derive(Default)]
pub struct OutcomeLogObserver {
    outcomes: Vec<Outcome>,
}

impl OutcomeLogObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The winners recorded so far, in play order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }
}

impl Observer for OutcomeLogObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: Outcome) -> Result<()> {
        self.outcomes.push(outcome);
        Ok(())
    }
}
