//! Configuration types for agents and sessions.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    menace::{MenaceAgent, ReinforcementValues},
    pipeline::Session,
    types::DEFAULT_INITIAL_BEADS,
};

/// Configuration for creating a MENACE agent.
///
/// # Examples
///
/// ```
/// use hexapawn::app::AgentConfig;
/// use hexapawn::menace::ReinforcementValues;
///
/// let config = AgentConfig::new()
///     .with_seed(42)
///     .with_initial_beads(4)
///     .with_reinforcement(ReinforcementValues { win: 3, draw: 1, loss: -1 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Beads per legal move when a matchbox is opened
    pub initial_beads: u32,
    /// Bead adjustments per outcome
    pub reinforcement: ReinforcementValues,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with default values:
    /// - Initial beads: 3
    /// - Reinforcement: win=3, draw=1, loss=-1
    /// - Seed: None (non-deterministic)
    pub fn new() -> Self {
        Self {
            initial_beads: DEFAULT_INITIAL_BEADS,
            reinforcement: ReinforcementValues::default(),
            seed: None,
        }
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the initial bead count.
    pub fn with_initial_beads(mut self, beads: u32) -> Self {
        self.initial_beads = beads;
        self
    }

    /// Set the reinforcement values.
    pub fn with_reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.reinforcement = values;
        self
    }

    /// Check the configuration can produce a working agent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `initial_beads` is zero.
    pub fn validate(&self) -> crate::Result<()> {
        if self.initial_beads == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "initial_beads must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a self-play training session.
///
/// Loaded from JSON; every field is optional.
///
/// ```json
/// {
///   "games": 1000,
///   "seed": 7,
///   "first": { "initial_beads": 3 },
///   "second": { "reinforcement": { "win": 3, "draw": 1, "loss": -2 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of self-play games to train
    pub games: usize,
    /// Session seed; agents without their own seed derive one from it
    pub seed: Option<u64>,
    /// Agent playing the First side
    pub first: AgentConfig,
    /// Agent playing the Second side
    pub second: AgentConfig,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            games: 500,
            seed: None,
            first: AgentConfig::new(),
            second: AgentConfig::new(),
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config file {}", path.display()),
            source,
        })?;
        let config: SessionConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.first.validate()?;
        self.second.validate()
    }

    /// Agent configurations with seeds filled in from the session seed.
    ///
    /// First gets `seed`, Second gets `seed + 1`, unless they carry their own.
    pub fn resolved_agents(&self) -> (AgentConfig, AgentConfig) {
        let mut first = self.first;
        let mut second = self.second;
        if let Some(seed) = self.seed {
            first.seed = first.seed.or(Some(seed));
            second.seed = second.seed.or(Some(seed.wrapping_add(1)));
        }
        (first, second)
    }

    /// Build a session with an agent on each side.
    ///
    /// # Errors
    ///
    /// Returns an error if either agent configuration is invalid.
    pub fn build_session(&self) -> crate::Result<Session> {
        let (first, second) = self.resolved_agents();
        Ok(Session::with_agents(
            MenaceAgent::from_config(first)?,
            MenaceAgent::from_config(second)?,
        ))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
