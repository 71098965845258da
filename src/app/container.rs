//! Dependency injection container for the dropfour application.
//!
//! The container owns infrastructure dependencies (the tree repository)
//! and provides factory methods for creating and persisting agents.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    agent::QAgent,
    game::{GameState, Seat},
    ports::TreeRepository,
    tree::GameTree,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ```
/// use dropfour::app::{AgentConfig, App};
/// use dropfour::game::Seat;
/// use dropfour::types::BoardSize;
///
/// let app = App::new();
/// let config = AgentConfig::new(BoardSize::new(5, 5)?).with_seed(42);
/// let agent = app.create_agent(Seat::One, &config)?;
/// # Ok::<(), dropfour::Error>(())
/// ```
pub struct App {
    tree_repository: Arc<dyn TreeRepository + Send + Sync>,
    default_seed: Option<u64>,
}

impl App {
    /// Create an app with production defaults: MessagePack persistence and
    /// a non-deterministic RNG.
    pub fn new() -> Self {
        Self {
            tree_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies,
    /// primarily for tests.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the tree repository.
    pub fn tree_repository(&self) -> Arc<dyn TreeRepository + Send + Sync> {
        Arc::clone(&self.tree_repository)
    }

    /// Create a fresh agent for the given seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration's hyperparameters are out of
    /// range.
    pub fn create_agent(&self, seat: Seat, config: &AgentConfig) -> Result<QAgent> {
        config.validate()?;
        let opening = GameState::new(config.board_size);
        let tree = GameTree::new(
            config.board_size,
            config.initial_value,
            config.reward,
            config.learning_rate,
            config.discount,
            opening.legal_moves(),
        );
        Ok(self.seeded(QAgent::from_tree(seat, tree), config.seed))
    }

    /// Load an agent's tree from the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or corrupt. The failure is
    /// recoverable; see [`App::load_agent_or_fresh`].
    pub fn load_agent(&self, seat: Seat, path: &Path, seed: Option<u64>) -> Result<QAgent> {
        let tree = self.tree_repository.load(path)?;
        Ok(self.seeded(QAgent::from_tree(seat, tree), seed))
    }

    /// Load an agent, falling back to a freshly initialized one if the
    /// persisted tree cannot be read.
    pub fn load_agent_or_fresh(
        &self,
        seat: Seat,
        path: &Path,
        config: &AgentConfig,
    ) -> Result<QAgent> {
        match self.load_agent(seat, path, config.seed) {
            Ok(agent) => Ok(agent),
            Err(_) => self.create_agent(seat, config),
        }
    }

    /// Persist an agent's tree.
    pub fn save_agent(&self, agent: &QAgent, path: &Path) -> Result<()> {
        self.tree_repository.save(agent.tree(), path)
    }

    fn seeded(&self, agent: QAgent, seed: Option<u64>) -> QAgent {
        match seed.or(self.default_seed) {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for apps with custom dependencies.
pub struct AppBuilder {
    tree_repository: Option<Arc<dyn TreeRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    fn new() -> Self {
        Self {
            tree_repository: None,
            default_seed: None,
        }
    }

    /// Use a custom repository implementation.
    pub fn with_repository<R>(mut self, repository: R) -> Self
    where
        R: TreeRepository + Send + Sync + 'static,
    {
        self.tree_repository = Some(Arc::new(repository));
        self
    }

    /// Seed every agent the app creates unless overridden per agent.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app.
    pub fn build(self) -> App {
        App {
            tree_repository: self
                .tree_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, types::BoardSize};

    fn config() -> AgentConfig {
        AgentConfig::new(BoardSize::new(5, 5).unwrap())
    }

    #[test]
    fn test_create_agent_builds_root_over_bottom_row() {
        let app = App::for_testing().with_default_seed(1).build();
        let agent = app.create_agent(Seat::One, &config()).unwrap();
        assert_eq!(agent.tree().action_values(agent.tree().root()).len(), 5);
    }

    #[test]
    fn test_create_agent_rejects_bad_config() {
        let app = App::new();
        let bad = config().with_reward(-3.0);
        assert!(app.create_agent(Seat::One, &bad).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let agent = app.create_agent(Seat::One, &config()).unwrap();

        let path = Path::new("agents/p1");
        app.save_agent(&agent, path).unwrap();
        let loaded = app.load_agent(Seat::One, path, None).unwrap();
        assert_eq!(loaded.tree().node_count(), agent.tree().node_count());
    }

    #[test]
    fn test_load_or_fresh_falls_back() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let agent = app
            .load_agent_or_fresh(Seat::Two, Path::new("missing"), &config())
            .unwrap();
        assert_eq!(agent.seat(), Seat::Two);
        assert_eq!(agent.tree().node_count(), 1);
    }
}
