//! Observer port - notifications from a session to its collaborators
//!
//! A front end (progress bar, game log, UI) implements this trait to hear
//! about state changes, moves, weight updates and finished games without the
//! session knowing how they are presented.

use crate::{
    Result,
    hexapawn::{BoardState, Move, Side, TerminalResult},
    types::CanonicalKey,
};

/// Observer trait for monitoring a session
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once, only when training
/// 2. For each game:
///    - `on_game_start(game_num)` then `on_state_changed(initial)`
///    - per move: `on_move(...)` then `on_state_changed(next)`
///    - after the final move: `on_weights_updated(...)` for every updated
///      matchbox, then `on_game_end(game_num, result)`
/// 3. `on_training_end()` - once, only when training
///
/// # Examples
///
/// ```no_run
/// use hexapawn::{hexapawn::TerminalResult, ports::Observer};
///
/// struct Tally {
///     games: usize,
/// }
///
/// impl Observer for Tally {
///     fn on_game_end(&mut self, _game_num: usize, _result: TerminalResult) -> hexapawn::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before a training run.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a new game starts (0-based index within the session).
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called whenever the session's current state is replaced.
    fn on_state_changed(&mut self, _state: &BoardState) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// # Parameters
    ///
    /// * `state` - Board state before the move
    /// * `mv` - The move, with its capture flag resolved by the engine
    /// * `weights_before` - Bead counts of the mover's matchbox when an agent
    ///   chose the move, `None` for externally chosen moves
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _state: &BoardState,
        _mv: Move,
        _weights_before: Option<&[(Move, u32)]>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called for each matchbox an agent reinforced after a game.
    fn on_weights_updated(
        &mut self,
        _game_num: usize,
        _side: Side,
        _key: &CanonicalKey,
        _weights_after: &[(Move, u32)],
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal state.
    fn on_game_end(&mut self, _game_num: usize, _result: TerminalResult) -> Result<()> {
        Ok(())
    }

    /// Called once after a training run.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
