//! MENACE agent that learns to play Hexapawn from matchboxes of beads.

use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{
    classic::{Outcome, ReinforcementValues},
    matchbox::Matchbox,
};
use crate::{
    app::AgentConfig,
    hexapawn::{BoardState, Move, Side, TerminalResult},
    types::CanonicalKey,
};

/// MENACE learning agent.
///
/// Owns its matchboxes, the `(key, move)` trail of the game in progress, its
/// cumulative results and its own random number generator.
pub struct MenaceAgent {
    matchboxes: HashMap<CanonicalKey, Matchbox>,
    history: Vec<(CanonicalKey, Move)>,
    stats: AgentStats,
    config: AgentConfig,
    rng: StdRng,
}

impl std::fmt::Debug for MenaceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("config", &self.config)
            .field("matchboxes", &self.matchboxes.len())
            .field("history", &self.history.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// What a call to [`MenaceAgent::learn`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnReport {
    pub outcome: Outcome,
    /// Beads added to (or removed from) every recorded move
    pub delta: i32,
    /// Each recorded `(key, move)` with its bead count after the update
    pub updated: Vec<(CanonicalKey, Move, u32)>,
}

impl LearnReport {
    /// Keys whose matchboxes changed, without duplicates, in game order
    pub fn updated_keys(&self) -> Vec<&CanonicalKey> {
        let mut keys: Vec<&CanonicalKey> = Vec::with_capacity(self.updated.len());
        for (key, _, _) in &self.updated {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl MenaceAgent {
    /// Create a new builder for constructing a MENACE agent.
    ///
    /// # Example
    /// ```
    /// use hexapawn::menace::MenaceAgent;
    ///
    /// let agent = MenaceAgent::builder()
    ///     .seed(42)
    ///     .initial_beads(4)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(agent.config().initial_beads, 4);
    /// ```
    pub fn builder() -> crate::menace::builder::MenaceAgentBuilder {
        crate::menace::builder::MenaceAgentBuilder::new()
    }

    /// Create a new MENACE agent with default configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(seed: Option<u64>) -> crate::Result<Self> {
        let mut builder = Self::builder();
        if let Some(s) = seed {
            builder = builder.seed(s);
        }
        builder.build()
    }

    /// Create an agent from an explicit configuration.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidConfiguration`] if validation fails.
    pub fn from_config(config: AgentConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(MenaceAgent {
            matchboxes: HashMap::new(),
            history: Vec::new(),
            stats: AgentStats::default(),
            config,
            rng: rng_for(config.seed),
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn reinforcement_values(&self) -> ReinforcementValues {
        self.config.reinforcement
    }

    /// Pick a move for `state` and record it in the game history.
    ///
    /// Opens a matchbox for unseen states. If every legal move in the box has
    /// run out of beads, each gets one bead back before the draw.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoLegalMoves`] if `state` has no legal moves.
    pub fn select_move(&mut self, state: &BoardState) -> crate::Result<Move> {
        let key = state.canonical_key();
        let legal = state.legal_moves();
        if legal.is_empty() {
            return Err(crate::Error::NoLegalMoves {
                key: key.into_string(),
            });
        }

        let initial_beads = self.config.initial_beads;
        let matchbox = self.matchboxes.entry(key.clone()).or_insert_with(|| {
            debug!(%key, moves = legal.len(), initial_beads, "opening matchbox");
            Matchbox::new(key.clone(), &legal, initial_beads)
        });

        if matchbox.restock_if_exhausted(&legal) {
            warn!(%key, "matchbox exhausted, restocking every legal move with one bead");
        }

        let mv = matchbox
            .sample_move(&legal, &mut self.rng)
            .ok_or_else(|| crate::Error::NoLegalMoves {
                key: key.to_string(),
            })?;
        trace!(%key, %mv, "selected move");

        self.history.push((key, mv));
        Ok(mv)
    }

    /// Adjust every recorded move by the reinforcement for `result`.
    ///
    /// Bead counts never drop below zero. The game history is cleared
    /// afterwards and the cumulative counters are updated.
    ///
    /// # Errors
    /// Returns [`crate::Error::GameNotFinished`] for an in-progress result;
    /// nothing is changed in that case.
    pub fn learn(&mut self, result: TerminalResult, own_side: Side) -> crate::Result<LearnReport> {
        let outcome =
            Outcome::classify(result, own_side).ok_or(crate::Error::GameNotFinished)?;
        let delta = self.config.reinforcement.delta(outcome);

        let history = std::mem::take(&mut self.history);
        let mut updated = Vec::with_capacity(history.len());
        for (key, mv) in history {
            let count = self
                .matchboxes
                .get_mut(&key)
                .and_then(|matchbox| matchbox.reinforce(mv, delta));
            match count {
                Some(count) => updated.push((key, mv, count)),
                None => warn!(%key, %mv, "recorded move has no matchbox entry"),
            }
        }

        self.stats.record(outcome);
        debug!(
            side = %own_side,
            %outcome,
            delta,
            moves = updated.len(),
            "applied reinforcement"
        );

        Ok(LearnReport {
            outcome,
            delta,
            updated,
        })
    }

    /// Forget the moves of the game in progress; beads and counters stay.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Discard every matchbox and counter.
    ///
    /// Configuration is kept and the RNG restarts from the configured seed.
    pub fn reset_learning(&mut self) {
        self.matchboxes.clear();
        self.history.clear();
        self.stats = AgentStats::default();
        self.rng = rng_for(self.config.seed);
    }

    /// Moves recorded in the game in progress
    pub fn history(&self) -> &[(CanonicalKey, Move)] {
        &self.history
    }

    /// Keys of every state this agent has opened a matchbox for, sorted
    pub fn known_keys(&self) -> Vec<&CanonicalKey> {
        let mut keys: Vec<&CanonicalKey> = self.matchboxes.keys().collect();
        keys.sort();
        keys
    }

    /// Matchbox for `key`, or `None` if the state was never visited
    pub fn matchbox(&self, key: &CanonicalKey) -> Option<&Matchbox> {
        self.matchboxes.get(key)
    }

    /// Iterate over all matchboxes in arbitrary order
    pub fn matchboxes(&self) -> impl Iterator<Item = &Matchbox> {
        self.matchboxes.values()
    }

    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    /// Wins divided by games played (0 before the first game)
    pub fn win_rate(&self) -> f64 {
        self.stats.win_rate()
    }

    /// Total beads across every matchbox
    pub fn total_beads(&self) -> u64 {
        self.matchboxes
            .values()
            .map(|matchbox| u64::from(matchbox.total_beads()))
            .sum()
    }

    /// Mean bead entropy over all matchboxes with at least one bead
    pub fn average_entropy(&self) -> f64 {
        let entropies: Vec<f64> = self
            .matchboxes
            .values()
            .filter(|matchbox| matchbox.total_beads() > 0)
            .map(Matchbox::entropy)
            .collect();
        if entropies.is_empty() {
            0.0
        } else {
            entropies.iter().sum::<f64>() / entropies.len() as f64
        }
    }
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}

/// Cumulative results of a MENACE agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    pub games_played: usize,
    pub games_won: usize,
    pub games_lost: usize,
    pub games_drawn: usize,
}

impl AgentStats {
    fn record(&mut self, outcome: Outcome) {
        self.games_played += 1;
        match outcome {
            Outcome::Win => self.games_won += 1,
            Outcome::Loss => self.games_lost += 1,
            Outcome::Draw => self.games_drawn += 1,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}
