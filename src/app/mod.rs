//! Application layer: agent configuration and dependency wiring.

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
