//! CLI subcommands.

pub mod compare;
pub mod evaluate;
pub mod train;
