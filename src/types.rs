//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest board dimension for which four-in-a-row is an interesting game.
pub const MIN_DIMENSION: usize = 5;

/// A move on the board, given as (row, column) coordinates.
///
/// Row 0 is the bottom of each column; a coordinate only becomes playable
/// once every cell below it in the same column is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Check whether this move lies on a board of the given size.
    pub fn in_bounds(&self, size: BoardSize) -> bool {
        self.row < size.rows && self.col < size.cols
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Validated board dimensions, shared by every node of one game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    rows: usize,
    cols: usize,
}

impl BoardSize {
    /// Create a new board size, validating both dimensions are at least
    /// [`MIN_DIMENSION`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] if either dimension is
    /// below the minimum.
    pub fn new(rows: usize, cols: usize) -> Result<Self, crate::Error> {
        if rows >= MIN_DIMENSION && cols >= MIN_DIMENSION {
            Ok(BoardSize { rows, cols })
        } else {
            Err(crate::Error::InvalidBoardSize { rows, cols })
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Default hyperparameters for the learning agent.
pub mod defaults {
    /// Initial action value assigned to every legal move of a fresh node.
    pub const INITIAL_VALUE: f64 = 0.0;

    /// Terminal reward magnitude for a decisive outcome.
    pub const REWARD: f64 = 10.0;

    /// Learning rate (alpha) for the TD update.
    pub const LEARNING_RATE: f64 = 0.2;

    /// Discount factor (gamma) for bootstrapped targets.
    pub const DISCOUNT: f64 = 0.9;

    /// Exploration probability at the start of training.
    pub const MAX_EXPLORE_RATE: f64 = 1.0;

    /// Exploration probability at the end of training.
    pub const MIN_EXPLORE_RATE: f64 = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_validation() {
        assert!(BoardSize::new(5, 5).is_ok());
        assert!(BoardSize::new(6, 7).is_ok());
        assert!(BoardSize::new(4, 7).is_err());
        assert!(BoardSize::new(7, 4).is_err());
        assert!(BoardSize::new(0, 0).is_err());
    }

    #[test]
    fn test_move_bounds() {
        let size = BoardSize::new(5, 5).unwrap();
        assert!(Move::new(0, 0).in_bounds(size));
        assert!(Move::new(4, 4).in_bounds(size));
        assert!(!Move::new(5, 0).in_bounds(size));
        assert!(!Move::new(0, 5).in_bounds(size));
    }
}
