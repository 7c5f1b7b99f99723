//! Session orchestrator: one current game and an optional agent per side

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::training::{GameSummary, SideSummary, TrainingReport};
use crate::{
    Error, Result,
    hexapawn::{BoardState, Move, Side, TerminalResult},
    menace::MenaceAgent,
    ports::Observer,
    types::CanonicalKey,
};

/// A session behind the single lock shared by every caller
pub type SharedSession = Arc<Mutex<Session>>;

/// Matchbox contents of one side's key after learning
type WeightUpdate = (Side, CanonicalKey, Vec<(Move, u32)>);

/// Holds the authoritative board state and drives play and learning.
///
/// A side without an agent is driven externally through [`Session::make_move`].
pub struct Session {
    state: BoardState,
    first: Option<MenaceAgent>,
    second: Option<MenaceAgent>,
    observers: Vec<Box<dyn Observer>>,
    /// Index of the current game
    game_num: usize,
    /// Moves played in the current game
    step_num: usize,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state.canonical_key())
            .field("first", &self.first)
            .field("second", &self.second)
            .field("observers", &self.observers.len())
            .field("game_num", &self.game_num)
            .finish()
    }
}

impl Session {
    /// A session in the opening position with no agents attached
    pub fn new() -> Self {
        Self {
            state: BoardState::initial(),
            first: None,
            second: None,
            observers: Vec::new(),
            game_num: 0,
            step_num: 0,
        }
    }

    /// A session with an agent on each side
    pub fn with_agents(first: MenaceAgent, second: MenaceAgent) -> Self {
        let mut session = Self::new();
        session.first = Some(first);
        session.second = Some(second);
        session
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Move the session behind a mutex for multi-caller front ends
    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Attach an agent to `side`, returning the one it replaces.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] for `Side::Neutral`.
    pub fn attach_agent(&mut self, side: Side, agent: MenaceAgent) -> Result<Option<MenaceAgent>> {
        let slot = self.slot_mut(side).ok_or_else(|| Error::InvalidConfiguration {
            message: "agents can only play the first or second side".to_string(),
        })?;
        Ok(slot.replace(agent))
    }

    /// Remove the agent from `side`, leaving it to an external actor
    pub fn detach_agent(&mut self, side: Side) -> Option<MenaceAgent> {
        self.slot_mut(side).and_then(Option::take)
    }

    pub fn agent(&self, side: Side) -> Option<&MenaceAgent> {
        match side {
            Side::First => self.first.as_ref(),
            Side::Second => self.second.as_ref(),
            Side::Neutral => None,
        }
    }

    pub fn agent_mut(&mut self, side: Side) -> Option<&mut MenaceAgent> {
        self.slot_mut(side).and_then(Option::as_mut)
    }

    fn slot_mut(&mut self, side: Side) -> Option<&mut Option<MenaceAgent>> {
        match side {
            Side::First => Some(&mut self.first),
            Side::Second => Some(&mut self.second),
            Side::Neutral => None,
        }
    }

    /// Current board state
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn to_move(&self) -> Side {
        self.state.to_move()
    }

    pub fn result(&self) -> TerminalResult {
        self.state.result()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        self.state.canonical_key()
    }

    /// Index of the current game
    pub fn game_num(&self) -> usize {
        self.game_num
    }

    /// Replace the current state with the opening position.
    ///
    /// Attached agents drop their in-progress history; beads and counters stay.
    pub fn start_new_game(&mut self) -> Result<()> {
        if self.step_num > 0 {
            self.game_num += 1;
        }
        self.step_num = 0;
        self.state = BoardState::initial();

        for agent in [self.first.as_mut(), self.second.as_mut()].into_iter().flatten() {
            agent.clear_history();
        }

        let game_num = self.game_num;
        let state = self.state;
        self.notify(|o| o.on_game_start(game_num))?;
        self.notify(|o| o.on_state_changed(&state))
    }

    /// Apply an externally chosen move.
    ///
    /// On a terminal result every attached agent learns from the game.
    ///
    /// # Errors
    /// Returns [`Error::GameOver`] if the game has ended and
    /// [`Error::IllegalMove`] if `mv` is not legal; the state is unchanged.
    /// An observer error is returned after the move and any learning have
    /// been applied.
    pub fn make_move(&mut self, mv: Move) -> Result<TerminalResult> {
        self.apply_move(mv, None)
    }

    /// Let the agent for the side to move choose and play a move.
    ///
    /// # Errors
    /// Returns [`Error::GameOver`] if the game has ended and
    /// [`Error::NoAgentForSide`] if the side to move is driven externally.
    /// Observer errors are reported as in [`Session::make_move`].
    pub fn make_ai_move(&mut self) -> Result<Move> {
        if self.state.is_terminal() {
            return Err(Error::GameOver);
        }

        let state = self.state;
        let side = state.to_move();
        let agent = self.agent_mut(side).ok_or(Error::NoAgentForSide { side })?;
        let mv = agent.select_move(&state)?;
        let weights = agent
            .matchbox(&state.canonical_key())
            .map(|matchbox| matchbox.beads().to_vec());

        self.apply_move(mv, weights)?;
        Ok(mv)
    }

    /// Play agent moves until the game ends.
    ///
    /// # Errors
    /// Propagates the first failed move, e.g. [`Error::NoAgentForSide`] when a
    /// side has no agent.
    pub fn play_one_game(&mut self) -> Result<TerminalResult> {
        while !self.state.is_terminal() {
            self.make_ai_move()?;
        }
        Ok(self.state.result())
    }

    /// Play `games` self-play games, calling `progress` after each one.
    ///
    /// # Errors
    /// Returns [`Error::NoAgentForSide`] before any game is played if either
    /// side lacks an agent.
    pub fn train<F>(&mut self, games: usize, mut progress: F) -> Result<TrainingReport>
    where
        F: FnMut(&GameSummary),
    {
        for side in [Side::First, Side::Second] {
            if self.agent(side).is_none() {
                return Err(Error::NoAgentForSide { side });
            }
        }

        info!(games, "training started");
        self.notify(|o| o.on_training_start(games))?;

        let mut summaries = Vec::with_capacity(games);
        for game_index in 0..games {
            self.start_new_game()?;
            let result = self.play_one_game()?;
            let summary = GameSummary {
                game_index,
                result,
                moves: self.step_num,
                first: self.side_summary(Side::First),
                second: self.side_summary(Side::Second),
            };
            progress(&summary);
            summaries.push(summary);
        }

        self.notify(|o| o.on_training_end())?;
        let report = TrainingReport::new(summaries);
        info!(
            games = report.total_games,
            first_wins = report.first_wins,
            second_wins = report.second_wins,
            "training finished"
        );
        Ok(report)
    }

    fn side_summary(&self, side: Side) -> SideSummary {
        self.agent(side).map(SideSummary::of).unwrap_or(SideSummary {
            wins: 0,
            games_played: 0,
            win_rate: 0.0,
        })
    }

    fn apply_move(&mut self, mv: Move, weights_before: Option<Vec<(Move, u32)>>) -> Result<TerminalResult> {
        if self.state.is_terminal() {
            return Err(Error::GameOver);
        }

        let before = self.state;
        let legal = before
            .legal_moves()
            .into_iter()
            .find(|candidate| *candidate == mv)
            .ok_or_else(|| Error::IllegalMove {
                mv,
                state: before.encode(),
            })?;
        let next = before.apply(legal)?;

        self.state = next;
        let game_num = self.game_num;
        let step_num = self.step_num;
        self.step_num += 1;
        debug!(game = game_num, step = step_num, mv = %legal, side = %before.to_move(), "move applied");

        let result = next.result();
        let updates = if result.is_terminal() {
            self.learn_from_game(result)?
        } else {
            Vec::new()
        };

        // Every observer hears about the move even if an earlier one failed;
        // the first error is reported once the session is consistent.
        let weights_before = weights_before.as_deref();
        let mut notified =
            self.notify(|o| o.on_move(game_num, step_num, &before, legal, weights_before));
        notified = notified.and(self.notify(|o| o.on_state_changed(&next)));
        if result.is_terminal() {
            for (side, key, weights) in &updates {
                let updated = self.notify(|o| o.on_weights_updated(game_num, *side, key, weights));
                notified = notified.and(updated);
            }
            notified = notified.and(self.notify(|o| o.on_game_end(game_num, result)));
        }
        notified?;
        Ok(result)
    }

    /// Reinforce every attached agent, First then Second, and collect the
    /// matchboxes that changed.
    fn learn_from_game(&mut self, result: TerminalResult) -> Result<Vec<WeightUpdate>> {
        let mut updates = Vec::new();
        for side in [Side::First, Side::Second] {
            let Some(agent) = self.agent_mut(side) else {
                continue;
            };
            let report = agent.learn(result, side)?;
            for key in report.updated_keys() {
                if let Some(matchbox) = agent.matchbox(key) {
                    updates.push((side, key.clone(), matchbox.beads().to_vec()));
                }
            }
        }
        debug!(game = self.game_num, %result, moves = self.step_num, "game finished");
        Ok(updates)
    }

    fn notify<F>(&mut self, mut event: F) -> Result<()>
    where
        F: FnMut(&mut dyn Observer) -> Result<()>,
    {
        for observer in &mut self.observers {
            event(observer.as_mut())?;
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn illegal_move_leaves_state_untouched() {
        let mut session = Session::new();
        let err = session.make_move(mv("a1-a3")).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { .. }));
        assert_eq!(*session.state(), BoardState::initial());
    }

    #[test]
    fn ai_move_without_agent_is_rejected() {
        let mut session = Session::new();
        let err = session.make_ai_move().unwrap_err();
        assert!(matches!(err, Error::NoAgentForSide { side: Side::First }));
        assert_eq!(*session.state(), BoardState::initial());
    }

    #[test]
    fn neutral_side_cannot_hold_an_agent() {
        let mut session = Session::new();
        let agent = MenaceAgent::new(Some(1)).unwrap();
        assert!(session.attach_agent(Side::Neutral, agent).is_err());
        assert!(session.agent(Side::Neutral).is_none());
    }

    #[test]
    fn game_index_advances_only_after_play() {
        let mut session = Session::with_agents(
            MenaceAgent::new(Some(1)).unwrap(),
            MenaceAgent::new(Some(2)).unwrap(),
        );
        session.start_new_game().unwrap();
        session.start_new_game().unwrap();
        assert_eq!(session.game_num(), 0);

        session.play_one_game().unwrap();
        session.start_new_game().unwrap();
        assert_eq!(session.game_num(), 1);
    }

    #[test]
    fn train_requires_both_agents() {
        let mut session = Session::new();
        session
            .attach_agent(Side::First, MenaceAgent::new(Some(1)).unwrap())
            .unwrap();

        let err = session.train(3, |_| {}).unwrap_err();
        assert!(matches!(err, Error::NoAgentForSide { side: Side::Second }));
        assert_eq!(session.agent(Side::First).unwrap().stats().games_played, 0);
    }
}
