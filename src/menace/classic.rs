//! Classic MENACE reinforcement
//!
//! Fixed bead adjustments per game outcome, applied to every move the agent
//! made during the game.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    hexapawn::{Side, TerminalResult},
    types::reinforcement,
};

/// Outcome of a finished game from one agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Classify a terminal result relative to `own_side`.
    ///
    /// Returns `None` while the game is still in progress.
    pub fn classify(result: TerminalResult, own_side: Side) -> Option<Self> {
        match result {
            TerminalResult::InProgress => None,
            TerminalResult::Draw => Some(Outcome::Draw),
            TerminalResult::FirstWins | TerminalResult::SecondWins => {
                if result.winner() == Some(own_side) {
                    Some(Outcome::Win)
                } else {
                    Some(Outcome::Loss)
                }
            }
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
        };
        f.write_str(text)
    }
}

/// MENACE reinforcement values.
///
/// `loss` is stored signed: the default `-1` removes one bead per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementValues {
    pub win: i16,
    pub draw: i16,
    pub loss: i16,
}

impl ReinforcementValues {
    /// Bead adjustment for an outcome
    pub fn delta(&self, outcome: Outcome) -> i32 {
        let value = match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        };
        i32::from(value)
    }
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: reinforcement::WIN,
            draw: reinforcement::DRAW,
            loss: reinforcement::LOSS,
        }
    }
}

impl fmt::Display for ReinforcementValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win={},draw={},loss={}", self.win, self.draw, self.loss)
    }
}

impl FromStr for ReinforcementValues {
    type Err = crate::Error;

    /// Parse `win=3,draw=1,loss=-1`. Omitted keys keep their defaults.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = ReinforcementValues::default();
        let error = |reason: String| crate::Error::ParseReinforcement {
            input: s.to_string(),
            reason,
        };

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, raw) = part
                .split_once('=')
                .ok_or_else(|| error(format!("expected name=value, got '{part}'")))?;
            let value: i16 = raw
                .trim()
                .parse()
                .map_err(|_| error(format!("'{}' is not an integer", raw.trim())))?;
            match name.trim().to_ascii_lowercase().as_str() {
                "win" => values.win = value,
                "draw" => values.draw = value,
                "loss" => values.loss = value,
                other => return Err(error(format!("unknown outcome '{other}'"))),
            }
        }

        Ok(values)
    }
}
