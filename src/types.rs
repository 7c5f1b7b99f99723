//! Newtype wrappers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hexapawn::BoardState;

/// Lookup key for a matchbox.
///
/// Nine occupancy characters in row-major order (`F`, `S` or `.`), an
/// underscore, then the side to move. The same layout with different sides to
/// move produces different keys.
///
/// # Examples
///
/// ```
/// use hexapawn::hexapawn::BoardState;
/// use hexapawn::types::CanonicalKey;
///
/// let key = BoardState::initial().canonical_key();
/// assert_eq!(key.as_str(), "FFF...SSS_F");
///
/// // Parsing validates the format
/// let parsed = CanonicalKey::parse("FFF...SSS_F").unwrap();
/// assert_eq!(parsed, key);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Parse and validate a key from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not describe a board state.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let state = BoardState::from_key(s)?;
        Ok(Self::from_state(&state))
    }

    pub(crate) fn from_state(state: &BoardState) -> Self {
        CanonicalKey(format!(
            "{}_{}",
            state.encode(),
            state.to_move().to_char()
        ))
    }

    /// Rebuild the board state this key was taken from.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed.
    pub fn state(&self) -> Result<BoardState, crate::Error> {
        BoardState::from_key(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Beads placed on every legal move when a matchbox is first opened.
pub const DEFAULT_INITIAL_BEADS: u32 = 3;

/// Bead count every legal move is reset to once a matchbox is exhausted.
pub const EXHAUSTED_RESET_BEADS: u32 = 1;

/// Default reinforcement values.
pub mod reinforcement {
    /// Default bead adjustment for a win.
    pub const WIN: i16 = 3;

    /// Default bead adjustment for a draw.
    pub const DRAW: i16 = 1;

    /// Default bead adjustment for a loss.
    pub const LOSS: i16 = -1;
}
