//! Training and evaluation pipeline.

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, OutcomeLogObserver, ProgressObserver};
pub use training::{ExploreSchedule, MatchRunner, TrainingConfig, TrainingResult};
