//! Moves and game results

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::board::{Coord, Side};

/// A pawn move from one square to another.
///
/// Identity is the `(from, to)` pair. The capture flag only describes the move,
/// so a move parsed as `a1-b2` still matches the legal capture `a1xb2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    from: Coord,
    to: Coord,
    capture: bool,
}

impl Move {
    pub fn new(from: Coord, to: Coord, capture: bool) -> Self {
        Move { from, to, capture }
    }

    /// A straight advance onto an empty square
    pub fn advance(from: Coord, to: Coord) -> Self {
        Self::new(from, to, false)
    }

    /// A diagonal capture of an opposing pawn
    pub fn capture(from: Coord, to: Coord) -> Self {
        Self::new(from, to, true)
    }

    pub fn from(&self) -> Coord {
        self.from
    }

    pub fn to(&self) -> Coord {
        self.to
    }

    pub fn is_capture(&self) -> bool {
        self.capture
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.capture { 'x' } else { '-' };
        write!(f, "{}{separator}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = crate::Error;

    /// Parse `a1-a2` or `a2xb3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parse_error = || crate::Error::ParseMove {
            input: s.to_string(),
        };

        let chars: Vec<char> = trimmed.chars().collect();
        if chars.len() != 5 {
            return Err(parse_error());
        }

        let capture = match chars[2] {
            '-' => false,
            'x' | 'X' => true,
            _ => return Err(parse_error()),
        };

        let from: Coord = chars[..2]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| parse_error())?;
        let to: Coord = chars[3..]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| parse_error())?;
        Ok(Move::new(from, to, capture))
    }
}

/// Result tag stored on every board state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerminalResult {
    #[default]
    InProgress,
    FirstWins,
    SecondWins,
    /// Part of the result vocabulary, but the movement rules never produce it.
    Draw,
}

impl TerminalResult {
    /// Result for a win by `side` (`Neutral` maps to a draw)
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::First => TerminalResult::FirstWins,
            Side::Second => TerminalResult::SecondWins,
            Side::Neutral => TerminalResult::Draw,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != TerminalResult::InProgress
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            TerminalResult::FirstWins => Some(Side::First),
            TerminalResult::SecondWins => Some(Side::Second),
            TerminalResult::InProgress | TerminalResult::Draw => None,
        }
    }
}

impl fmt::Display for TerminalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TerminalResult::InProgress => "in progress",
            TerminalResult::FirstWins => "first wins",
            TerminalResult::SecondWins => "second wins",
            TerminalResult::Draw => "draw",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn move_identity_ignores_capture_flag() {
        let plain = Move::advance(sq("a1"), sq("b2"));
        let capture = Move::capture(sq("a1"), sq("b2"));
        assert_eq!(plain, capture);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&capture));
    }

    #[test]
    fn move_text_form() {
        let mv: Move = "a1-a2".parse().unwrap();
        assert_eq!(mv.from(), sq("a1"));
        assert_eq!(mv.to(), sq("a2"));
        assert!(!mv.is_capture());
        assert_eq!(mv.to_string(), "a1-a2");

        let capture: Move = " b2xc3 ".parse().unwrap();
        assert!(capture.is_capture());
        assert_eq!(capture.to_string(), "b2xc3");

        assert!("a1a2".parse::<Move>().is_err());
        assert!("a1-d2".parse::<Move>().is_err());
        assert!("a1+a2".parse::<Move>().is_err());
    }

    #[test]
    fn result_helpers() {
        assert!(!TerminalResult::InProgress.is_terminal());
        assert!(TerminalResult::Draw.is_terminal());
        assert_eq!(TerminalResult::FirstWins.winner(), Some(Side::First));
        assert_eq!(TerminalResult::Draw.winner(), None);
        assert_eq!(
            TerminalResult::win_for(Side::Second),
            TerminalResult::SecondWins
        );
    }
}
