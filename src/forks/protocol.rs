//! # Acquisition Protocol
//!
//! How a philosopher picks up its two forks without deadlocking the table.
//!
//! Philosopher `id` sits between fork `id` (left) and fork `(id + 1) % n` (right).
//! If every philosopher grabbed left then right, all `n` of them could hold their
//! left fork at once and wait forever on the right one. The wraparound seat
//! (`id = n - 1`, whose right fork is `0`) is what closes that cycle.
//!
//! The rule here is resource ordering: **always lock the smaller fork index first**.
//! Every philosopher resolves its pair to the same global order, so a chain of
//! waiting philosophers only ever waits "upwards" in fork index and can never
//! wrap back around to form a cycle.
//!
//! ```text
//! n = 4      left  right   locks
//! id 0        0     1      0 -> 1
//! id 1        1     2      1 -> 2
//! id 2        2     3      2 -> 3
//! id 3        3     0      0 -> 3   <- wraparound seat goes low-first too
//! ```

use super::{ForkGuard, ForkSet};
use tracing::trace;

/// Returns `(left, right)` for philosopher `id` at a table of `n`.
pub fn adjacent_forks(id: usize, n: usize) -> (usize, usize) {
    (id, (id + 1) % n)
}

/// Returns the two adjacent forks of `id`, smaller index first.
///
/// This compares indices instead of trusting "left first": for the last seat the
/// left fork has the *larger* index.
pub fn acquisition_order(id: usize, n: usize) -> (usize, usize) {
    let (left, right) = adjacent_forks(id, n);
    if left < right {
        (left, right)
    } else {
        (right, left)
    }
}

/// Both forks of one philosopher, held together for a meal.
#[derive(Debug)]
#[must_use = "dropping the pair releases both forks immediately"]
pub struct ForkPair {
    first: ForkGuard,
    second: ForkGuard,
}

impl ForkPair {
    /// The fork indices in the order they were locked.
    pub fn indices(&self) -> (usize, usize) {
        (self.first.index(), self.second.index())
    }

    /// Releases both forks. Release order does not matter for deadlock freedom,
    /// and releasing never waits.
    pub fn release(self) {
        let ForkPair { first, second } = self;
        second.release();
        first.release();
    }
}

impl ForkSet {
    /// Picks up both forks adjacent to philosopher `id`, smaller index first.
    ///
    /// Waits as long as a neighbour holds either fork. There is no timeout and no
    /// fairness bound beyond what the mutex provides.
    pub async fn acquire_pair(&self, id: usize) -> ForkPair {
        let (low, high) = acquisition_order(id, self.len());
        trace!(philosopher = id, first = low, second = high, "Acquiring forks");

        let first = self.acquire(low).await;
        let second = self.acquire(high).await;
        ForkPair { first, second }
    }
}
