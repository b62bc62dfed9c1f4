//! # Philosopher Agent
//!
//! One philosopher is one Tokio task running a small state machine:
//!
//! ```text
//!   +----------+  think sleep   +--------+  both forks   +--------+
//!   | Thinking | -------------> | Hungry | ------------> | Eating |
//!   +----------+                +--------+               +--------+
//!        ^                                                   |
//!        +------------------ eat sleep, release -------------+
//! ```
//!
//! The philosopher holds no fork while `Thinking` or `Hungry`, and holds both while
//! `Eating`. Each new state is published to the [`StateSink`] after it has been
//! entered and before the philosopher sleeps or waits. `Thinking` is published once
//! on arrival and again after every meal, once both forks are back on the table.
//!
//! The stop signal is only looked at between cycles. A philosopher that is asleep
//! or waiting on a fork when the signal is raised finishes its meal first.

use crate::domain::{PhaseTiming, PhilosopherState};
use crate::forks::ForkSet;
use crate::lifecycle::StopSignal;
use crate::table::StateSink;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::trace;

pub struct Philosopher {
    id: usize,
    forks: Arc<ForkSet>,
    sink: Arc<dyn StateSink>,
    stop: StopSignal,
    think: PhaseTiming,
    eat: PhaseTiming,
    rng: StdRng,
    meals: u64,
}

impl Philosopher {
    /// Creates philosopher `id` with its own entropy-seeded random generator.
    ///
    /// # Arguments
    /// * `id` - Seat at the table; the philosopher uses forks `id` and `(id + 1) % n`
    /// * `forks` - The shared fork ring
    /// * `sink` - Where state transitions are published
    /// * `stop` - Checked at the top of every cycle
    /// * `think` / `eat` - Ranges the two sleeps are drawn from
    pub fn new(
        id: usize,
        forks: Arc<ForkSet>,
        sink: Arc<dyn StateSink>,
        stop: StopSignal,
        think: PhaseTiming,
        eat: PhaseTiming,
    ) -> Self {
        Self {
            id,
            forks,
            sink,
            stop,
            think,
            eat,
            rng: StdRng::from_entropy(),
            meals: 0,
        }
    }

    /// Replaces the random generator, e.g. with a seeded one for reproducible tests.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Runs think/eat cycles until the stop signal is seen, then returns the
    /// number of meals eaten.
    pub async fn run(mut self) -> u64 {
        self.enter(PhilosopherState::Thinking);
        while !self.stop.is_stopped() {
            self.think().await;
            self.eat().await;
        }
        trace!(philosopher = self.id, meals = self.meals, "Left the table");
        self.meals
    }

    async fn think(&mut self) {
        let pause = self.think.sample(&mut self.rng);
        tokio::time::sleep(pause).await;
    }

    async fn eat(&mut self) {
        self.enter(PhilosopherState::Hungry);
        let forks = self.forks.acquire_pair(self.id).await;

        self.enter(PhilosopherState::Eating);
        let meal = self.eat.sample(&mut self.rng);
        tokio::time::sleep(meal).await;

        forks.release();
        self.meals += 1;
        self.enter(PhilosopherState::Thinking);
    }

    fn enter(&self, state: PhilosopherState) {
        trace!(philosopher = self.id, state = %state, "Transition");
        self.sink.publish(self.id, state);
    }
}

impl std::fmt::Debug for Philosopher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Philosopher")
            .field("id", &self.id)
            .field("think", &self.think)
            .field("eat", &self.eat)
            .field("meals", &self.meals)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every published transition in order.
    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<(usize, PhilosopherState)>>,
    }

    impl StateSink for RecordingSink {
        fn publish(&self, id: usize, state: PhilosopherState) {
            self.events.lock().unwrap().push((id, state));
        }
    }

    fn quick() -> PhaseTiming {
        PhaseTiming::from_millis(1, 3)
    }

    #[tokio::test]
    async fn test_stopped_philosopher_only_sits_down() {
        let sink = Arc::new(RecordingSink::default());
        let stop = StopSignal::new();
        stop.stop();

        let forks = Arc::new(ForkSet::new(2));
        let philosopher = Philosopher::new(0, forks, sink.clone(), stop, quick(), quick());
        assert_eq!(philosopher.run().await, 0);
        assert_eq!(
            *sink.events.lock().unwrap(),
            vec![(0, PhilosopherState::Thinking)]
        );
    }

    #[tokio::test]
    async fn test_transitions_follow_think_hungry_eat() {
        let sink = Arc::new(RecordingSink::default());
        let stop = StopSignal::new();
        let forks = Arc::new(ForkSet::new(3));
        let philosopher = Philosopher::new(1, forks, sink.clone(), stop.clone(), quick(), quick())
            .with_rng(StdRng::seed_from_u64(42));

        let handle = tokio::spawn(philosopher.run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        stop.stop();
        let meals = handle.await.unwrap();

        let events = sink.events.lock().unwrap();
        assert!(meals >= 1);
        assert_eq!(events.len() as u64, 1 + meals * 3);
        for (i, (id, state)) in events.iter().enumerate() {
            assert_eq!(*id, 1);
            let expected = match i % 3 {
                0 => PhilosopherState::Thinking,
                1 => PhilosopherState::Hungry,
                _ => PhilosopherState::Eating,
            };
            assert_eq!(*state, expected, "event {i}");
        }
    }

    #[tokio::test]
    async fn test_forks_are_free_after_each_meal() {
        let forks = Arc::new(ForkSet::new(2));
        let stop = StopSignal::new();
        let philosopher = Philosopher::new(
            0,
            forks.clone(),
            Arc::new(RecordingSink::default()),
            stop.clone(),
            quick(),
            quick(),
        );

        let handle = tokio::spawn(philosopher.run());
        tokio::time::sleep(Duration::from_millis(20)).await;
        stop.stop();
        handle.await.unwrap();

        assert!(forks.try_acquire(0).is_some());
        assert!(forks.try_acquire(1).is_some());
    }
}
