//! Board state representation and the Hexapawn movement rules

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::game::{Move, TerminalResult};
use crate::types::CanonicalKey;

/// Rows and columns on the board
pub const BOARD_SIZE: usize = 3;

/// Owner of a square, or the side whose turn it is.
///
/// `First` starts on row 0 and advances toward row 2; `Second` starts on row 2
/// and advances toward row 0. `Neutral` marks an empty square and never holds
/// the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
    Neutral,
}

impl Side {
    /// Get the opposing side (`Neutral` has none)
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
            Side::Neutral => Side::Neutral,
        }
    }

    /// Row delta of a straight advance
    pub fn forward(self) -> isize {
        match self {
            Side::First => 1,
            Side::Second => -1,
            Side::Neutral => 0,
        }
    }

    /// Row this side's pawns start on
    pub fn home_row(self) -> Option<usize> {
        match self {
            Side::First => Some(0),
            Side::Second => Some(BOARD_SIZE - 1),
            Side::Neutral => None,
        }
    }

    /// Row a pawn of this side must reach to win
    pub fn goal_row(self) -> Option<usize> {
        self.opponent().home_row()
    }

    pub fn to_char(self) -> char {
        match self {
            Side::First => 'F',
            Side::Second => 'S',
            Side::Neutral => '.',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'F' | 'f' => Some(Side::First),
            'S' | 's' => Some(Side::Second),
            '.' => Some(Side::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Side::First => "first",
            Side::Second => "second",
            Side::Neutral => "neutral",
        };
        f.write_str(text)
    }
}

impl FromStr for Side {
    type Err = crate::Error;

    /// Parse a playing side. `Neutral` is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "f" | "1" | "p1" => Ok(Side::First),
            "second" | "s" | "2" | "p2" => Ok(Side::Second),
            _ => Err(crate::Error::ParseSide {
                input: s.to_string(),
            }),
        }
    }
}

/// A square on the board, `(row, col)` with both components in `0..=2`.
///
/// Text form is a column letter followed by a row number: `a1` is `(0, 0)`,
/// `c3` is `(2, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, validating it lies on the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidCoord`] if either component is > 2.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if Self::is_valid(row as isize, col as isize) {
            Ok(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(crate::Error::InvalidCoord { row, col })
        }
    }

    /// Whether `(row, col)` lies on the board
    pub fn is_valid(row: isize, col: isize) -> bool {
        (0..BOARD_SIZE as isize).contains(&row) && (0..BOARD_SIZE as isize).contains(&col)
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// The square `(row + drow, col + dcol)`, if it is on the board
    pub fn offset(self, drow: isize, dcol: isize) -> Option<Coord> {
        let row = self.row as isize + drow;
        let col = self.col as isize + dcol;
        Self::is_valid(row, col).then(|| Coord {
            row: row as u8,
            col: col as u8,
        })
    }

    /// All nine squares in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| {
            (0..BOARD_SIZE).map(move |col| Coord {
                row: row as u8,
                col: col as u8,
            })
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Coord {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || crate::Error::ParseCoord {
            input: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(parse_error());
        };

        let col = match file.to_ascii_lowercase() {
            'a' => 0,
            'b' => 1,
            'c' => 2,
            _ => return Err(parse_error()),
        };
        let row = match rank {
            '1' => 0,
            '2' => 1,
            '3' => 2,
            _ => return Err(parse_error()),
        };
        Coord::new(row, col)
    }
}

/// Complete position: occupancy, side to move and the stored result.
///
/// Values are immutable; [`BoardState::apply`] returns a new state and never
/// touches the receiver. The type is `Copy` since it is only 11 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    cells: [[Side; BOARD_SIZE]; BOARD_SIZE],
    to_move: Side,
    result: TerminalResult,
}

impl BoardState {
    /// Standard opening: First pawns on row 0, Second pawns on row 2, First to move.
    pub fn initial() -> Self {
        let mut cells = [[Side::Neutral; BOARD_SIZE]; BOARD_SIZE];
        cells[0] = [Side::First; BOARD_SIZE];
        cells[BOARD_SIZE - 1] = [Side::Second; BOARD_SIZE];
        BoardState {
            cells,
            to_move: Side::First,
            result: TerminalResult::InProgress,
        }
    }

    /// Build a position from explicit rows (row 0 first).
    ///
    /// The result is classified the same way [`BoardState::apply`] would,
    /// treating the opponent of `to_move` as the side that just moved.
    ///
    /// # Errors
    ///
    /// Returns an error if `to_move` is `Side::Neutral`.
    pub fn from_rows(
        cells: [[Side; BOARD_SIZE]; BOARD_SIZE],
        to_move: Side,
    ) -> Result<Self, crate::Error> {
        if to_move == Side::Neutral {
            return Err(crate::Error::InvalidConfiguration {
                message: "the neutral side cannot hold the turn".to_string(),
            });
        }
        Ok(BoardState {
            cells,
            to_move,
            result: classify(&cells, to_move),
        })
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn result(&self) -> TerminalResult {
        self.result
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    pub fn winner(&self) -> Option<Side> {
        self.result.winner()
    }

    /// Occupant of a square
    pub fn side_at(&self, coord: Coord) -> Side {
        self.cells[coord.row()][coord.col()]
    }

    /// Number of pawns `side` still has
    pub fn pawn_count(&self, side: Side) -> usize {
        Coord::all().filter(|&c| self.side_at(c) == side).count()
    }

    /// Legal moves for the side to move; empty once the game is over.
    ///
    /// Sources are visited row-major, and for each source the candidates are
    /// tried in the order: advance, capture toward the lower column, capture
    /// toward the higher column.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        moves_for(&self.cells, self.to_move)
    }

    /// Apply a legal move and return the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] on a terminal state and
    /// [`crate::Error::IllegalMove`] if `mv` is not in [`Self::legal_moves`].
    pub fn apply(&self, mv: Move) -> Result<BoardState, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let legal = self
            .legal_moves()
            .into_iter()
            .find(|candidate| *candidate == mv)
            .ok_or_else(|| crate::Error::IllegalMove {
                mv,
                state: self.encode(),
            })?;

        let mover = self.to_move;
        let mut cells = self.cells;
        cells[legal.from().row()][legal.from().col()] = Side::Neutral;
        cells[legal.to().row()][legal.to().col()] = mover;

        let to_move = mover.opponent();
        Ok(BoardState {
            cells,
            to_move,
            result: classify(&cells, to_move),
        })
    }

    /// Nine occupancy characters, row-major
    pub fn encode(&self) -> String {
        Coord::all().map(|c| self.side_at(c).to_char()).collect()
    }

    /// Matchbox key: occupancy plus the side to move
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_state(self)
    }

    /// Parse a state from its canonical key form (`FFF...SSS_F`).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed.
    pub fn from_key(key: &str) -> Result<Self, crate::Error> {
        key.parse()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    /// Parse nine occupancy characters followed by the side to move.
    ///
    /// Whitespace, `/` and `_` are ignored, so `"FFF/.../SSS F"` and the
    /// canonical key `"FFF...SSS_F"` describe the same state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '_')
            .collect();
        let cell_count = BOARD_SIZE * BOARD_SIZE;
        if cleaned.len() != cell_count + 1 {
            return Err(crate::Error::ParseBoard {
                input: s.to_string(),
                reason: format!(
                    "expected {} cells and a side to move, got {} characters",
                    cell_count,
                    cleaned.len()
                ),
            });
        }

        let mut cells = [[Side::Neutral; BOARD_SIZE]; BOARD_SIZE];
        for (i, &c) in cleaned.iter().take(cell_count).enumerate() {
            cells[i / BOARD_SIZE][i % BOARD_SIZE] =
                Side::from_char(c).ok_or_else(|| crate::Error::ParseBoard {
                    input: s.to_string(),
                    reason: format!("invalid character '{c}' at cell {i}"),
                })?;
        }

        let to_move = match Side::from_char(cleaned[cell_count]) {
            Some(side @ (Side::First | Side::Second)) => side,
            _ => {
                return Err(crate::Error::ParseBoard {
                    input: s.to_string(),
                    reason: format!("invalid side to move '{}'", cleaned[cell_count]),
                });
            }
        };

        Self::from_rows(cells, to_move)
    }
}

/// Candidate moves for `side`, ignoring whether the game has ended.
fn moves_for(cells: &[[Side; BOARD_SIZE]; BOARD_SIZE], side: Side) -> Vec<Move> {
    let forward = side.forward();
    let opponent = side.opponent();
    let mut moves = Vec::new();

    for from in Coord::all().filter(|c| cells[c.row()][c.col()] == side) {
        if let Some(to) = from.offset(forward, 0)
            && cells[to.row()][to.col()] == Side::Neutral
        {
            moves.push(Move::advance(from, to));
        }
        for dcol in [-1, 1] {
            if let Some(to) = from.offset(forward, dcol)
                && cells[to.row()][to.col()] == opponent
            {
                moves.push(Move::capture(from, to));
            }
        }
    }

    moves
}

/// Classify a position where the opponent of `to_move` has just moved.
///
/// Goal-line arrival is checked before the blocked rule, mover first.
fn classify(cells: &[[Side; BOARD_SIZE]; BOARD_SIZE], to_move: Side) -> TerminalResult {
    let mover = to_move.opponent();
    let reached_goal = |side: Side| {
        side.goal_row()
            .is_some_and(|row| cells[row].iter().any(|&cell| cell == side))
    };

    if reached_goal(mover) {
        TerminalResult::win_for(mover)
    } else if reached_goal(to_move) {
        TerminalResult::win_for(to_move)
    } else if moves_for(cells, to_move).is_empty() {
        TerminalResult::win_for(mover)
    } else {
        TerminalResult::InProgress
    }
}
