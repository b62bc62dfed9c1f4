//! Runtime orchestration and lifecycle management.
//!
//! This module contains everything around the philosophers themselves:
//!
//! - **Configuration**: table size and phase timings, validated up front
//! - **Orchestration**: spawning one task per philosopher and shutting them down
//! - **Observability setup**: initializing tracing and logging
//!
//! # Main Components
//!
//! - [`Simulation`] - The controller that owns the forks, the table and the stop signal
//! - [`SimulationError`] - Everything that can go wrong, all of it terminal
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod error;
pub mod simulation;
pub mod tracing;

pub use error::*;
pub use simulation::*;
pub use self::tracing::*;
