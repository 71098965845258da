//! Configuration types for agent creation.

use crate::{
    Error, Result,
    types::{BoardSize, defaults},
};

/// Configuration for creating a learning agent.
///
/// Provides a builder-style API and validates the tree invariants
/// (`reward > 0`, learning rate and discount within `[0, 1]`) before any
/// tree is built.
///
/// # Examples
///
/// ```
/// use dropfour::app::AgentConfig;
/// use dropfour::types::BoardSize;
///
/// let config = AgentConfig::new(BoardSize::new(5, 5)?)
///     .with_learning_rate(0.3)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), dropfour::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Board dimensions shared by every node of the tree
    pub board_size: BoardSize,
    /// Initial action value for unvisited moves
    pub initial_value: f64,
    /// Terminal reward magnitude
    pub reward: f64,
    /// Learning rate (alpha)
    pub learning_rate: f64,
    /// Discount factor (gamma)
    pub discount: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with the default hyperparameters.
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            initial_value: defaults::INITIAL_VALUE,
            reward: defaults::REWARD,
            learning_rate: defaults::LEARNING_RATE,
            discount: defaults::DISCOUNT,
            seed: None,
        }
    }

    pub fn with_initial_value(mut self, initial_value: f64) -> Self {
        self.initial_value = initial_value;
        self
    }

    pub fn with_reward(mut self, reward: f64) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the hyperparameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `reward` is not positive
    /// and finite, or if `learning_rate` or `discount` fall outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(self.reward > 0.0 && self.reward.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: format!("reward {} must be positive and finite", self.reward),
            });
        }
        for (name, value) in [
            ("learning_rate", self.learning_rate),
            ("discount", self.discount),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} must be within [0, 1]"),
                });
            }
        }
        if !self.initial_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("initial value {} must be finite", self.initial_value),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AgentConfig {
        AgentConfig::new(BoardSize::new(5, 5).unwrap())
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_reward_must_be_positive() {
        assert!(base().with_reward(0.0).validate().is_err());
        assert!(base().with_reward(-1.0).validate().is_err());
        assert!(base().with_reward(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_rates_must_be_in_unit_interval() {
        assert!(base().with_learning_rate(1.1).validate().is_err());
        assert!(base().with_discount(-0.1).validate().is_err());
        assert!(base().with_learning_rate(1.0).validate().is_ok());
        assert!(base().with_discount(0.0).validate().is_ok());
    }
}
