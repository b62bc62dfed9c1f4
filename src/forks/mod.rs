//! # Forks
//!
//! The shared resources of the ring. Fork `i` sits between philosopher `i - 1`
//! and philosopher `i`, so every fork is contested by exactly two neighbours.
//!
//! - [`ForkSet`]: the `N` exclusive locks, built once per simulation.
//! - [`ForkGuard`]: proof of holding one fork. Releasing is consuming (or dropping) the guard,
//!   so a philosopher can only ever put down a fork it actually picked up.
//! - [`protocol`]: the ordering rule that turns two single-fork acquisitions into a
//!   deadlock-free pair acquisition.

pub mod protocol;

pub use protocol::*;

use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// `N` mutually exclusive forks arranged in a ring.
///
/// # Concurrency Model
/// Each fork is a `tokio::sync::Mutex<()>`. The lock is taken through an owned guard
/// so it can be held across `.await` points (a philosopher keeps both forks for the
/// whole eating sleep). Waiting for a contested fork suspends the task without
/// blocking a runtime worker.
#[derive(Debug)]
pub struct ForkSet {
    forks: Vec<Arc<Mutex<()>>>,
}

impl ForkSet {
    /// Creates `len` free forks.
    ///
    /// The ring needs at least two forks to make sense; that is checked by
    /// [`Simulation::new`](crate::lifecycle::Simulation::new) before any fork exists.
    pub fn new(len: usize) -> Self {
        Self {
            forks: (0..len).map(|_| Arc::new(Mutex::new(()))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.forks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Waits until fork `index` is free and takes it.
    ///
    /// # Panics
    /// Panics if `index >= len()`. Indices come from [`adjacent_forks`], which
    /// always stays in range.
    pub async fn acquire(&self, index: usize) -> ForkGuard {
        let guard = Arc::clone(&self.forks[index]).lock_owned().await;
        trace!(fork = index, "Fork acquired");
        ForkGuard {
            index,
            _guard: guard,
        }
    }

    /// Takes fork `index` only if it is free right now.
    pub fn try_acquire(&self, index: usize) -> Option<ForkGuard> {
        let guard = Arc::clone(&self.forks[index]).try_lock_owned().ok()?;
        Some(ForkGuard {
            index,
            _guard: guard,
        })
    }
}

/// Exclusive possession of one fork.
#[derive(Debug)]
#[must_use = "dropping the guard releases the fork immediately"]
pub struct ForkGuard {
    index: usize,
    _guard: OwnedMutexGuard<()>,
}

impl ForkGuard {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Puts the fork back on the table. Never blocks.
    pub fn release(self) {
        trace!(fork = self.index, "Fork released");
        drop(self);
    }
}
