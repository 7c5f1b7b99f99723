//! MENACE learning system
//!
//! Matchboxes of beads, one per board state, and the agent that samples from
//! them and reinforces them after each game.

pub mod agent;
pub mod builder;
pub mod classic;
pub mod matchbox;

pub use agent::{AgentStats, LearnReport, MenaceAgent};
pub use builder::MenaceAgentBuilder;
pub use classic::{Outcome, ReinforcementValues};
pub use matchbox::Matchbox;
