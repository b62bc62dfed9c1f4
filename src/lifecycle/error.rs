//! Error types for setting up and running a simulation.

use std::time::Duration;
use thiserror::Error;

/// Smallest table that still forms a ring: two philosophers sharing two forks.
pub const MIN_PHILOSOPHERS: usize = 2;

/// Errors that can occur while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Fewer philosophers than a ring needs. Reported before anything is built.
    #[error("Number of philosophers must be at least {min} (got {count})", min = MIN_PHILOSOPHERS)]
    TooFewPhilosophers { count: usize },

    /// A phase range whose minimum exceeds its maximum.
    #[error("Invalid {phase} timing: minimum {min:?} is greater than maximum {max:?}")]
    InvalidTiming {
        phase: &'static str,
        min: Duration,
        max: Duration,
    },

    /// A philosopher task panicked or was cancelled.
    #[error("Philosopher {id} task failed: {source}")]
    AgentFailed {
        id: usize,
        #[source]
        source: tokio::task::JoinError,
    },
}
