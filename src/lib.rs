//! Connect Four engine with a tabular Q-learning agent
//!
//! This crate provides:
//! - A gravity-aware Connect Four game state with win/draw detection
//! - An arena-backed decision tree storing per-position action values
//! - A learning agent with an explore/exploit policy and TD backups
//! - A match runner for self-play training against scripted opponents
//! - Persistence adapters for trained trees

pub mod adapters;
pub mod agent;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod tree;
pub mod types;

pub use agent::{Cursor, Player, QAgent};
pub use error::{Error, Result};
pub use game::{GameState, Outcome, Seat};
pub use pipeline::{ExploreSchedule, MatchRunner, TrainingConfig, TrainingResult};
pub use tree::{GameTree, NodeId};
pub use types::{BoardSize, Move};
