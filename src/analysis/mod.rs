//! Statistical summaries of played games.

pub mod stats;

pub use stats::OutcomeSeries;
