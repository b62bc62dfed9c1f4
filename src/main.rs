//! # Dining Philosophers
//!
//! Command-line entry point: parse the table size, print the banners, run the
//! [`Simulation`] for a fixed time.
//!
//! Exit codes:
//! - `0` after a completed run (and for `--help` / `--version`)
//! - `1` for a usage error (wrong argument count, non-numeric value, malformed option)
//! - `1` for a table smaller than two philosophers

use clap::Parser;
use dining_philosophers::domain::{
    PhaseTiming, DEFAULT_DURATION, DEFAULT_EAT_TIMING, DEFAULT_THINK_TIMING,
};
use dining_philosophers::lifecycle::{
    completed_banner, setup_tracing, start_banner, Simulation, SimulationConfig,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

/// Runs the dining philosophers problem with ascending-order fork acquisition.
#[derive(Debug, Parser)]
#[command(name = "dining-philosophers", version)]
struct Cli {
    /// Number of philosophers at the table (at least 2)
    #[arg(value_name = "NUMBER_OF_PHILOSOPHERS")]
    philosophers: usize,

    /// Run length in seconds
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_DURATION.as_secs())]
    duration: u64,

    /// Thinking duration range in milliseconds
    #[arg(long = "think-ms", value_name = "MIN-MAX", default_value_t = DEFAULT_THINK_TIMING)]
    think: PhaseTiming,

    /// Eating duration range in milliseconds
    #[arg(long = "eat-ms", value_name = "MIN-MAX", default_value_t = DEFAULT_EAT_TIMING)]
    eat: PhaseTiming,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap would exit with 2; usage errors here are 1
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    setup_tracing();

    let config = SimulationConfig::new(cli.philosophers)
        .with_think(cli.think)
        .with_eat(cli.eat);
    let simulation = match Simulation::new(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", start_banner(cli.philosophers));

    let report = match simulation.run(Duration::from_secs(cli.duration)).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Simulation aborted");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    print!("{}", completed_banner());
    info!(meals = ?report.meals, total = report.total_meals(), "Meals per philosopher");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dining-philosophers", "5"]).unwrap();
        assert_eq!(cli.philosophers, 5);
        assert_eq!(cli.duration, 20);
        assert_eq!(cli.think, DEFAULT_THINK_TIMING);
        assert_eq!(cli.eat, DEFAULT_EAT_TIMING);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "dining-philosophers",
            "3",
            "--duration",
            "1",
            "--think-ms",
            "10-20",
            "--eat-ms",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.duration, 1);
        assert_eq!(cli.think, PhaseTiming::from_millis(10, 20));
        assert_eq!(cli.eat, PhaseTiming::from_millis(5, 5));
    }

    #[test]
    fn test_usage_errors() {
        assert!(Cli::try_parse_from(["dining-philosophers"]).is_err());
        assert!(Cli::try_parse_from(["dining-philosophers", "3", "4"]).is_err());
        assert!(Cli::try_parse_from(["dining-philosophers", "five"]).is_err());
        assert!(Cli::try_parse_from(["dining-philosophers", "3", "--eat-ms", "9-1"]).is_err());
    }
}
