//! Common test utilities for the hexapawn test suite.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use hexapawn::{
    hexapawn::{BoardState, Move, Side, TerminalResult},
    ports::Observer,
    types::CanonicalKey,
};
use rand::{Rng, rngs::StdRng};

/// Play uniformly random legal moves from `state` until the game ends.
///
/// Returns the final state and the number of moves played.
pub fn random_playout(mut state: BoardState, rng: &mut StdRng) -> (BoardState, usize) {
    let mut moves = 0;
    while !state.is_terminal() {
        let legal = state.legal_moves();
        assert!(!legal.is_empty(), "non-terminal state without legal moves");
        let mv = legal[rng.random_range(0..legal.len())];
        state = state.apply(mv).expect("legal move must apply");
        moves += 1;
    }
    (state, moves)
}

/// Parse a move, panicking on bad test input
pub fn mv(s: &str) -> Move {
    s.parse().expect("test move should parse")
}

/// Parse a board, panicking on bad test input
pub fn board(s: &str) -> BoardState {
    s.parse().expect("test board should parse")
}

/// Observer that records every event as a short string
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl Observer for EventLog {
    fn on_training_start(&mut self, total_games: usize) -> hexapawn::Result<()> {
        self.push(format!("training_start {total_games}"));
        Ok(())
    }

    fn on_game_start(&mut self, game_num: usize) -> hexapawn::Result<()> {
        self.push(format!("game_start {game_num}"));
        Ok(())
    }

    fn on_state_changed(&mut self, state: &BoardState) -> hexapawn::Result<()> {
        self.push(format!("state {}", state.canonical_key()));
        Ok(())
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        _state: &BoardState,
        mv: Move,
        weights_before: Option<&[(Move, u32)]>,
    ) -> hexapawn::Result<()> {
        let source = if weights_before.is_some() { "agent" } else { "external" };
        self.push(format!("move {game_num}.{step_num} {mv} {source}"));
        Ok(())
    }

    fn on_weights_updated(
        &mut self,
        _game_num: usize,
        side: Side,
        key: &CanonicalKey,
        _weights_after: &[(Move, u32)],
    ) -> hexapawn::Result<()> {
        self.push(format!("weights {side} {key}"));
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, result: TerminalResult) -> hexapawn::Result<()> {
        self.push(format!("game_end {game_num} {result}"));
        Ok(())
    }

    fn on_training_end(&mut self) -> hexapawn::Result<()> {
        self.push("training_end".to_string());
        Ok(())
    }
}
