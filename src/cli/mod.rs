//! CLI infrastructure for the Hexapawn trainer
//!
//! This module provides the command-line interface for training agents by
//! self-play, playing against them and inspecting their matchboxes.

pub mod commands;
pub mod output;
