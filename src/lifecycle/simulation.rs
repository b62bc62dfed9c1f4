use crate::domain::{PhaseTiming, DEFAULT_EAT_TIMING, DEFAULT_THINK_TIMING};
use crate::forks::ForkSet;
use crate::lifecycle::{SimulationError, MIN_PHILOSOPHERS};
use crate::philosopher::Philosopher;
use crate::table::{StateSink, StateTable};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

/// Horizontal rule used by every banner.
const RULE: &str = "------------------------------------------------";

/// Banner printed before the first philosopher sits down.
pub fn start_banner(philosophers: usize) -> String {
    format!("{RULE}\nstarting simulation with {philosophers} philosophers\n{RULE}\n")
}

/// Banner written once the stop signal is raised, while the tasks wind down.
pub fn clearing_banner() -> String {
    format!("\n{RULE}\nsimulation finished, clearing threads..\n{RULE}\n")
}

/// Banner printed after every philosopher has left the table.
pub fn completed_banner() -> String {
    format!("\n{RULE}\nsimulation completed\n{RULE}\n")
}

// =============================================================================
// Configuration
// =============================================================================

/// Size of the table and the ranges the two sleeps are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub philosophers: usize,
    pub think: PhaseTiming,
    pub eat: PhaseTiming,
}

impl SimulationConfig {
    /// A table of `philosophers` with the default think and eat ranges.
    pub fn new(philosophers: usize) -> Self {
        Self {
            philosophers,
            think: DEFAULT_THINK_TIMING,
            eat: DEFAULT_EAT_TIMING,
        }
    }

    pub fn with_think(mut self, think: PhaseTiming) -> Self {
        self.think = think;
        self
    }

    pub fn with_eat(mut self, eat: PhaseTiming) -> Self {
        self.eat = eat;
        self
    }

    /// Checks the ring size and both timing ranges.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.philosophers < MIN_PHILOSOPHERS {
            return Err(SimulationError::TooFewPhilosophers {
                count: self.philosophers,
            });
        }
        for (phase, timing) in [("think", self.think), ("eat", self.eat)] {
            if !timing.is_valid() {
                return Err(SimulationError::InvalidTiming {
                    phase,
                    min: timing.min,
                    max: timing.max,
                });
            }
        }
        Ok(())
    }

    /// Longest single think+eat cycle this configuration allows.
    pub fn max_cycle(&self) -> Duration {
        self.think.max + self.eat.max
    }
}

// =============================================================================
// Stop signal
// =============================================================================

/// Shared "time is up" flag.
///
/// Raised once by the controller, read by every philosopher at the top of each
/// cycle. There is no way to lower it again.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// Report
// =============================================================================

/// What a finished run looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Completed meals per philosopher, in seat order.
    pub meals: Vec<u64>,
    /// Wall-clock time spent in [`Simulation::run`], including the wind-down.
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().sum()
    }

    pub fn min_meals(&self) -> u64 {
        self.meals.iter().copied().min().unwrap_or(0)
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The simulation controller.
///
/// `Simulation` is responsible for:
/// - **Validation**: rejecting an impossible table before anything is built
/// - **Wiring**: handing every philosopher the shared forks, table and stop signal
/// - **Lifecycle**: running for a fixed time, then stopping and joining every task
///
/// # Example
///
/// ```ignore
/// let simulation = Simulation::new(SimulationConfig::new(5))?;
/// let report = simulation.run(Duration::from_secs(20)).await?;
/// println!("{} meals", report.total_meals());
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    forks: Arc<ForkSet>,
    table: Arc<StateTable>,
    stop: StopSignal,
}

impl Simulation {
    /// Validates `config` and builds a simulation that draws its table on stdout.
    ///
    /// # Errors
    /// - [`SimulationError::TooFewPhilosophers`] for fewer than two philosophers
    /// - [`SimulationError::InvalidTiming`] for a range with `min > max`
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let table = StateTable::stdout(config.philosophers);
        Ok(Self::assemble(config, table))
    }

    /// Like [`Simulation::new`], but the table draws to `writer`.
    pub fn with_writer(
        config: SimulationConfig,
        writer: impl Write + Send + 'static,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let table = StateTable::new(config.philosophers, writer);
        Ok(Self::assemble(config, table))
    }

    fn assemble(config: SimulationConfig, table: StateTable) -> Self {
        Self {
            forks: Arc::new(ForkSet::new(config.philosophers)),
            table: Arc::new(table),
            stop: StopSignal::new(),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The live table, e.g. for inspecting the final states after a run.
    pub fn table(&self) -> Arc<StateTable> {
        Arc::clone(&self.table)
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Seats every philosopher, lets them dine for `duration`, then stops them.
    ///
    /// After the deadline the stop signal is raised and the table is frozen.
    /// Each philosopher finishes the cycle it is in, so this returns at most one
    /// think+eat cycle after the deadline.
    ///
    /// # Errors
    /// [`SimulationError::AgentFailed`] if a philosopher task panicked.
    #[instrument(skip(self), fields(philosophers = self.config.philosophers))]
    pub async fn run(self, duration: Duration) -> Result<SimulationReport, SimulationError> {
        let started = Instant::now();
        info!(?duration, "Starting simulation");

        let sink: Arc<dyn StateSink> = self.table.clone();
        let handles: Vec<_> = (0..self.config.philosophers)
            .map(|id| {
                let philosopher = Philosopher::new(
                    id,
                    Arc::clone(&self.forks),
                    Arc::clone(&sink),
                    self.stop.clone(),
                    self.config.think,
                    self.config.eat,
                );
                debug!(philosopher = id, "Seating philosopher");
                tokio::spawn(philosopher.run())
            })
            .collect();

        tokio::time::sleep(duration).await;

        self.stop.stop();
        self.table.freeze();
        self.table.announce(&clearing_banner());
        info!("Stop signal raised, waiting for philosophers to finish their meal");

        let mut meals = Vec::with_capacity(handles.len());
        for (id, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(eaten) => meals.push(eaten),
                Err(source) => {
                    error!(philosopher = id, error = %source, "Philosopher task failed");
                    return Err(SimulationError::AgentFailed { id, source });
                }
            }
        }

        let report = SimulationReport {
            meals,
            elapsed: started.elapsed(),
        };
        info!(
            total_meals = report.total_meals(),
            elapsed = ?report.elapsed,
            "Simulation finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_rings_below_two() {
        for count in [0, 1] {
            let err = SimulationConfig::new(count).validate().unwrap_err();
            assert!(matches!(err, SimulationError::TooFewPhilosophers { count: c } if c == count));
        }
        assert!(SimulationConfig::new(2).validate().is_ok());
    }

    #[test]
    fn test_config_rejects_inverted_timing() {
        let inverted = PhaseTiming::from_millis(30, 10);
        let err = SimulationConfig::new(3)
            .with_eat(inverted)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidTiming { phase: "eat", .. }));
    }

    #[test]
    fn test_max_cycle_adds_both_maxima() {
        let config = SimulationConfig::new(5);
        assert_eq!(config.max_cycle(), Duration::from_millis(7000));
    }

    #[test]
    fn test_stop_signal_is_shared_between_clones() {
        let signal = StopSignal::new();
        let observer = signal.clone();
        assert!(!observer.is_stopped());
        signal.stop();
        assert!(observer.is_stopped());
    }

    #[test]
    fn test_report_aggregates() {
        let report = SimulationReport {
            meals: vec![3, 1, 4],
            elapsed: Duration::ZERO,
        };
        assert_eq!(report.total_meals(), 8);
        assert_eq!(report.min_meals(), 1);
    }

    #[test]
    fn test_banners_match_console_layout() {
        assert_eq!(
            start_banner(5),
            format!("{RULE}\nstarting simulation with 5 philosophers\n{RULE}\n")
        );
        assert!(clearing_banner().starts_with('\n'));
        assert!(completed_banner().contains("simulation completed"));
        assert_eq!(RULE.len(), 48);
    }
}
