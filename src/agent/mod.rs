//! Players: the learning agent and its scripted opponents.

pub mod learner;
pub mod players;

pub use learner::{Cursor, QAgent};
pub use players::Player;
