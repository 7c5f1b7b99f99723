//! Session and training pipeline
//!
//! This module provides:
//! - The session that owns the current game and drives both agents
//! - Self-play training with per-game summaries
//! - Observers that record what happens during play

pub mod observers;
pub mod session;
pub mod training;

pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
    StepObservation,
};
pub use session::{Session, SharedSession};
pub use training::{GameSummary, SideSummary, TrainingReport};

pub use crate::ports::Observer;
