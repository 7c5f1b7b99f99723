//! Matchbox implementation for MENACE

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    hexapawn::Move,
    types::{CanonicalKey, EXHAUSTED_RESET_BEADS},
    utils::{entropy_from_weights, weighted_index},
};

/// A matchbox holding the beads for one board state.
///
/// Moves keep the order they were added in, which is the engine's legal-move
/// order at the time the box was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchbox {
    /// Key of the board state this box belongs to
    key: CanonicalKey,
    /// Beads for each move
    beads: Vec<(Move, u32)>,
}

impl Matchbox {
    /// Open a matchbox with `base_beads` beads on every legal move.
    pub fn new(key: CanonicalKey, legal_moves: &[Move], base_beads: u32) -> Self {
        Matchbox {
            key,
            beads: legal_moves.iter().map(|&mv| (mv, base_beads)).collect(),
        }
    }

    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Get the bead count for a specific move
    pub fn bead_count(&self, mv: Move) -> Option<u32> {
        self.beads
            .iter()
            .find(|(candidate, _)| *candidate == mv)
            .map(|&(_, count)| count)
    }

    /// All (move, bead count) pairs in stored order
    pub fn beads(&self) -> &[(Move, u32)] {
        &self.beads
    }

    /// Get total bead count
    pub fn total_beads(&self) -> u32 {
        self.beads.iter().map(|&(_, count)| count).sum()
    }

    /// Entropy of the bead distribution
    pub fn entropy(&self) -> f64 {
        entropy_from_weights(self.beads.iter().map(|&(_, count)| count))
    }

    /// Beads restricted to `legal`, in stored order.
    ///
    /// Legal moves missing from the box are left out of the draw.
    pub(crate) fn legal_beads(&self, legal: &[Move]) -> Vec<(Move, u32)> {
        for &mv in legal {
            if self.bead_count(mv).is_none() {
                warn!(key = %self.key, %mv, "legal move missing from matchbox");
            }
        }
        self.beads
            .iter()
            .filter(|(mv, _)| legal.contains(mv))
            .copied()
            .collect()
    }

    /// Put [`EXHAUSTED_RESET_BEADS`] back on every legal move if they are all empty.
    ///
    /// Returns `true` when the box was restocked.
    pub(crate) fn restock_if_exhausted(&mut self, legal: &[Move]) -> bool {
        let legal_total: u64 = self
            .beads
            .iter()
            .filter(|(mv, _)| legal.contains(mv))
            .map(|&(_, count)| u64::from(count))
            .sum();
        if legal_total > 0 {
            return false;
        }

        for (mv, count) in &mut self.beads {
            if legal.contains(mv) {
                *count = EXHAUSTED_RESET_BEADS;
            }
        }
        true
    }

    /// Sample one of the `legal` moves in proportion to its beads.
    pub fn sample_move(&self, legal: &[Move], rng: &mut impl rand::Rng) -> Option<Move> {
        let items = self.legal_beads(legal);
        let weights: Vec<u32> = items.iter().map(|&(_, count)| count).collect();
        weighted_index(rng, &weights).map(|index| items[index].0)
    }

    /// Add `delta` beads to a move, clamping at zero.
    ///
    /// Returns the new count, or `None` if the move is not in this box.
    pub fn reinforce(&mut self, mv: Move, delta: i32) -> Option<u32> {
        let (_, count) = self
            .beads
            .iter_mut()
            .find(|(candidate, _)| *candidate == mv)?;
        let updated = (i64::from(*count) + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        *count = updated as u32;
        Some(*count)
    }
}
