//! Application configuration.
//!
//! Agent and session settings live here so the CLI, JSON config files and
//! library callers all build agents the same way.
//!
//! ```
//! use hexapawn::app::{AgentConfig, SessionConfig};
//!
//! let mut config = SessionConfig::new();
//! config.seed = Some(42);
//! config.first = AgentConfig::new().with_initial_beads(4);
//!
//! let mut session = config.build_session()?;
//! let report = session.train(10, |_| {})?;
//! assert_eq!(report.total_games, 10);
//! # Ok::<(), hexapawn::Error>(())
//! ```

pub mod config;

pub use config::{AgentConfig, SessionConfig};
