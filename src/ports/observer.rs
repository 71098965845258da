//! Observer port - abstraction for training observation
//!
//! Observers can be composed to collect different data during a training
//! or evaluation run without coupling the match runner to output formats.
//!
//! The methods are called in this order:
//! 1. `on_training_start(total_episodes)` - once at the beginning
//! 2. Per episode: `on_episode_start(episode)`, then
//!    `on_episode_end(episode, outcome)`
//! 3. `on_training_end()` - once at the end

use crate::{Result, game::Outcome};

/// Observer trait for monitoring match runs.
///
/// All methods have no-op defaults; implementations override what they
/// need.
pub trait Observer: Send {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (0-based index).
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a decisive outcome or draw.
    fn on_episode_end(&mut self, _episode: usize, _outcome: Outcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
