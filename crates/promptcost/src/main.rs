// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Promptcost - Monte Carlo estimate of monthly platform cost per user.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod check;
mod simulate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use promptcost_config::model::PromptCostConfig;

use crate::simulate::SimulateOptions;

/// Promptcost - Monte Carlo estimate of monthly platform cost per user.
#[derive(Parser, Debug)]
#[command(name = "promptcost", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the XDG lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation and print the cost summary.
    Simulate(SimulateArgs),
    /// Validate configuration and cost schedule without simulating.
    Check {
        /// Cost schedule table (CSV with `Type` and `Unit Cost ($)` columns).
        #[arg(long)]
        schedule: Option<PathBuf>,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Cost schedule table (CSV with `Type` and `Unit Cost ($)` columns).
    #[arg(long)]
    schedule: Option<PathBuf>,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of users to simulate.
    #[arg(long)]
    population: Option<u32>,
    /// Simulate users in parallel.
    #[arg(long)]
    parallel: bool,
    /// Write per-user results to this CSV file.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

impl From<SimulateArgs> for SimulateOptions {
    fn from(args: SimulateArgs) -> Self {
        Self {
            schedule: args.schedule,
            seed: args.seed,
            population: args.population,
            parallel: args.parallel,
            output: args.output,
            json: args.json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => promptcost_config::load_and_validate_path(path),
        None => promptcost_config::load_and_validate(),
    };
    let config: PromptCostConfig = match loaded {
        Ok(config) => config,
        Err(errors) => {
            promptcost_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let result = match cli.command {
        Some(Commands::Simulate(args)) => {
            simulate::run_simulate(&config, &SimulateOptions::from(args)).map(|_| ())
        }
        Some(Commands::Check { schedule, plain }) => {
            check::run_check(&config, cli.config.as_deref(), schedule.as_deref(), plain)
        }
        None => {
            println!("promptcost: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("promptcost: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("promptcost={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulate_args_parse() {
        let cli = Cli::try_parse_from([
            "promptcost",
            "simulate",
            "--seed",
            "9",
            "--population",
            "100",
            "--parallel",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Simulate(args)) => {
                let options = SimulateOptions::from(args);
                assert_eq!(options.seed, Some(9));
                assert_eq!(options.population, Some(100));
                assert!(options.parallel);
                assert!(options.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = promptcost_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.simulation.population_size, 5000);
    }
}
