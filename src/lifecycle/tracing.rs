//! # Observability & Tracing
//!
//! Structured logging for the simulation, separate from the live state table.
//!
//! ## Configuration
//!
//! The subscriber uses the compact format without module targets and writes to
//! **stderr**. Standard output belongs to the carriage-return table and the banners;
//! a log line on stdout would break the in-place redraw.
//!
//! With `RUST_LOG` unset only errors are shown.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events: start, stop signal, meal counts
//! RUST_LOG=info cargo run -- 5
//!
//! # Also one line per spawned philosopher
//! RUST_LOG=debug cargo run -- 5
//!
//! # Every transition and every fork pickup (very verbose)
//! RUST_LOG=trace cargo run -- 5 2>trace.log
//! ```
//!
//! ## What Gets Traced
//!
//! - **Controller**: `Starting simulation`, `Stop signal raised`, `Simulation finished`
//!   inside a `run` span carrying the philosopher count
//! - **Philosophers**: `Transition` events with `philosopher` and `state` fields
//! - **Forks**: `Acquiring forks`, `Fork acquired`, `Fork released` with fork indices
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
