//! Builder pattern for MenaceAgent construction
//!
//! Provides a fluent API for configuring and creating MENACE agents,
//! following the builder pattern commonly used in Rust (e.g., std::thread::Builder).

use super::{agent::MenaceAgent, classic::ReinforcementValues};
use crate::app::AgentConfig;

/// Builder for constructing MenaceAgent instances with custom configuration.
///
/// # Examples
///
/// ```
/// use hexapawn::menace::builder::MenaceAgentBuilder;
///
/// // Defaults: 3 beads per move, win=3, draw=1, loss=-1
/// let agent = MenaceAgentBuilder::new().build().unwrap();
///
/// // Harsher punishment for losses
/// let agent = MenaceAgentBuilder::new()
///     .seed(42)
///     .loss_reinforcement(-3)
///     .build()
///     .unwrap();
/// assert_eq!(agent.reinforcement_values().loss, -3);
/// ```
#[derive(Debug, Default)]
pub struct MenaceAgentBuilder {
    config: AgentConfig,
}

impl MenaceAgentBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the bead count each legal move starts with.
    pub fn initial_beads(mut self, beads: u32) -> Self {
        self.config.initial_beads = beads;
        self
    }

    /// Set the reinforcement values for training.
    pub fn reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.config.reinforcement = values;
        self
    }

    /// Set win reinforcement value.
    pub fn win_reinforcement(mut self, value: i16) -> Self {
        self.config.reinforcement.win = value;
        self
    }

    /// Set draw reinforcement value.
    pub fn draw_reinforcement(mut self, value: i16) -> Self {
        self.config.reinforcement.draw = value;
        self
    }

    /// Set loss reinforcement value (typically negative).
    pub fn loss_reinforcement(mut self, value: i16) -> Self {
        self.config.reinforcement.loss = value;
        self
    }

    /// Build the MenaceAgent with the configured settings.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid (zero initial beads).
    pub fn build(self) -> crate::Result<MenaceAgent> {
        MenaceAgent::from_config(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_every_setting() {
        let agent = MenaceAgentBuilder::new()
            .seed(9)
            .initial_beads(5)
            .win_reinforcement(4)
            .draw_reinforcement(0)
            .loss_reinforcement(-2)
            .build()
            .unwrap();

        let config = agent.config();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.initial_beads, 5);
        assert_eq!(
            config.reinforcement,
            ReinforcementValues {
                win: 4,
                draw: 0,
                loss: -2
            }
        );
    }

    #[test]
    fn builder_rejects_zero_beads() {
        assert!(MenaceAgentBuilder::new().initial_beads(0).build().is_err());
    }
}
