//! Hexapawn game implementation

pub mod board;
pub mod game;

pub use board::{BOARD_SIZE, BoardState, Coord, Side};
pub use game::{Move, TerminalResult};
