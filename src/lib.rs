//! Hexapawn with MENACE matchbox learners
//!
//! This crate provides:
//! - Hexapawn rules on a 3x3 board with goal-line and blocked-side wins
//! - MENACE agents that learn by adding and removing beads from matchboxes
//! - A session that drives self-play training and human play
//! - Observers for progress bars, metrics and JSONL game logs
//! - Learning-curve export and a small command-line front end

pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod hexapawn;
pub mod menace;
pub mod pipeline;
pub mod ports;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use types::CanonicalKey;
