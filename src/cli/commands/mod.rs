//! CLI subcommands

pub mod inspect;
pub mod play;
pub mod train;

use anyhow::{Context, Result};

use crate::{
    app::{AgentConfig, SessionConfig},
    pipeline::{Session, TrainingReport},
};

/// Build a seeded self-play session and train it for `games` games
pub(crate) fn pretrained_session(games: usize, seed: Option<u64>) -> Result<(Session, TrainingReport)> {
    let config = SessionConfig {
        games,
        seed,
        first: AgentConfig::new(),
        second: AgentConfig::new(),
    };
    let mut session = config
        .build_session()
        .context("Failed to create agents")?;
    let report = session
        .train(games, |_| {})
        .context("Self-play training failed")?;
    Ok((session, report))
}
