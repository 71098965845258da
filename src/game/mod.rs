//! Connect Four game state: board representation, legal-move tracking,
//! and win/draw detection.

pub mod board;
pub mod state;

pub use board::{Cell, Outcome, Seat};
pub use state::GameState;
