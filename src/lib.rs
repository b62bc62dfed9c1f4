#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Dining Philosophers
//!
//! > **Deadlock-free resource acquisition under contention, watched live.**
//!
//! `N` philosophers sit around a round table with one fork between every pair of
//! neighbours. Each of them alternates between thinking and eating, and eating takes
//! both adjacent forks. This crate runs that table with one Tokio task per
//! philosopher and redraws everyone's state on a single console line.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why resource ordering?
//!
//! The naive rule "pick up the left fork, then the right one" deadlocks as soon as
//! every philosopher holds their left fork. Instead every philosopher locks the fork
//! with the **smaller index first**. All of them agree on one global order, so no
//! cycle of waiting philosophers can ever form.
//! See [`forks::protocol`] for the details and the wraparound seat that makes it matter.
//!
//! ### What is *not* guaranteed
//!
//! Deadlock freedom, not fairness. A philosopher can in principle go hungry for a
//! long time; there is no ticket or queue beyond what the fork mutex provides.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Locks as values
//! Holding a fork *is* holding a [`ForkGuard`](forks::ForkGuard). Releasing means
//! consuming or dropping it, so a philosopher cannot put down a fork it never picked up.
//!
//! ### 2. Cooperative shutdown
//! The controller raises a [`StopSignal`](lifecycle::StopSignal) after the run time.
//! Philosophers only look at it between cycles, so nobody is interrupted mid-meal.
//!
//! ### 3. Display without torn lines
//! Each philosopher owns one atomic cell in the [`StateTable`](table::StateTable).
//! The full-line redraw runs under one output lock.
//!
//! ### 4. Observability
//! `tracing` is used for structured logs on stderr, so stdout stays reserved for the table.
//! See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`domain`])
//! [`PhilosopherState`](domain::PhilosopherState) and the think/eat
//! [`PhaseTiming`](domain::PhaseTiming) ranges.
//!
//! ### 2. The Resources ([`forks`])
//! The fork ring and the ascending-order acquisition protocol.
//!
//! ### 3. The Agents ([`philosopher`])
//! The `Thinking -> Hungry -> Eating` state machine.
//!
//! ### 4. The View ([`table`])
//! The live single-line state table.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Validation, spawning, timed shutdown and the run report.
//! - **Key items**: [`Simulation`](lifecycle::Simulation), [`SimulationError`](lifecycle::SimulationError).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Five philosophers for the default 20 seconds
//! cargo run -- 5
//!
//! # A quick run with lifecycle logs on stderr
//! RUST_LOG=info cargo run -- 3 --duration 5 --think-ms 200-400 --eat-ms 200-300
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod domain;
pub mod forks;
pub mod lifecycle;
pub mod philosopher;
pub mod table;
