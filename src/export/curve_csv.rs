//! CSV export of learning curves
//!
//! One row per training game with each side's cumulative record, suitable
//! for plotting how quickly the second player learns to win.

use std::path::Path;

use serde::Serialize;

use crate::{Result, hexapawn::TerminalResult, pipeline::GameSummary};

/// A single row in the learning-curve CSV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveRecord {
    /// 1-based game number
    pub game: usize,
    pub result: String,
    pub moves: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub first_win_rate: f64,
    pub second_win_rate: f64,
}

impl From<&GameSummary> for CurveRecord {
    fn from(summary: &GameSummary) -> Self {
        let result = match summary.result {
            TerminalResult::FirstWins => "first",
            TerminalResult::SecondWins => "second",
            TerminalResult::Draw => "draw",
            TerminalResult::InProgress => "in-progress",
        };
        Self {
            game: summary.game_index + 1,
            result: result.to_string(),
            moves: summary.moves,
            first_wins: summary.first.wins,
            second_wins: summary.second.wins,
            first_win_rate: summary.first.win_rate,
            second_win_rate: summary.second.win_rate,
        }
    }
}

/// Write one CSV row per game summary, returning the number of rows written
pub fn write_learning_curve<P: AsRef<Path>>(path: P, games: &[GameSummary]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    for summary in games {
        writer.serialize(CurveRecord::from(summary))?;
    }
    writer.flush()?;
    Ok(games.len())
}
