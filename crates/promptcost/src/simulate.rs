// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `promptcost simulate` command implementation.
//!
//! Builds the cost schedule, runs the engine, prints the run summary, and
//! optionally exports the per-user result table.

use std::path::{Path, PathBuf};

use promptcost_config::model::{PromptCostConfig, SimulationConfig};
use promptcost_core::PromptCostError;
use promptcost_cost::CostSchedule;
use promptcost_sim::{CostSummary, SimulationEngine, write_csv_path};
use serde::Serialize;
use tracing::info;

/// Command-line overrides for a simulation run.
#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    /// Schedule table to use instead of the inline `[[schedule]]` entries.
    pub schedule: Option<PathBuf>,
    pub seed: Option<u64>,
    pub population: Option<u32>,
    pub parallel: bool,
    /// Where to write the per-user CSV.
    pub output: Option<PathBuf>,
    pub json: bool,
}

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub summary: CostSummary,
}

/// Load the schedule from a table path if given, else from inline config entries.
pub fn load_schedule(
    config: &PromptCostConfig,
    table: Option<&Path>,
) -> Result<CostSchedule, PromptCostError> {
    match table {
        Some(path) => CostSchedule::from_csv_path(path),
        None => CostSchedule::from_entries(&config.schedule),
    }
}

/// Apply command-line overrides on top of the loaded simulation settings.
pub fn effective_simulation(
    config: &PromptCostConfig,
    options: &SimulateOptions,
) -> SimulationConfig {
    let mut sim = config.simulation.clone();
    if let Some(seed) = options.seed {
        sim.seed = Some(seed);
    }
    if let Some(population) = options.population {
        sim.population_size = population;
    }
    sim.parallel |= options.parallel;
    sim
}

/// Run the `promptcost simulate` command and return the report it printed.
pub fn run_simulate(
    config: &PromptCostConfig,
    options: &SimulateOptions,
) -> Result<SimulationReport, PromptCostError> {
    let schedule = load_schedule(config, options.schedule.as_deref())?;
    let sim = effective_simulation(config, options);
    let engine = SimulationEngine::new(&schedule, &sim)?;

    let outcome = engine.simulate();

    if let Some(path) = &options.output {
        write_csv_path(&outcome.results, path)?;
    }

    let summary = CostSummary::from_results(&outcome.results, config.report.histogram_bins)
        .ok_or_else(|| PromptCostError::Export {
            message: "simulation produced no summarizable results".to_string(),
            source: None,
        })?;
    info!(seed = outcome.seed, users = summary.users, "summary ready");

    let report = SimulationReport {
        seed: outcome.seed,
        summary,
    };

    if options.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| PromptCostError::Export {
            message: "failed to serialize summary".to_string(),
            source: Some(Box::new(e)),
        })?;
        println!("{json}");
    } else {
        print_summary(&report);
    }

    Ok(report)
}

fn print_summary(report: &SimulationReport) {
    let summary = &report.summary;
    println!();
    println!("  Summary of results (seed {})", report.seed);
    println!("  {}", "-".repeat(56));
    println!("  {:<8} {:>20} {:>24}", "", "Total Prompts", "Total Monthly Cost ($)");
    let rows = [
        ("count", summary.prompts.count as f64, summary.monthly_cost.count as f64),
        ("mean", summary.prompts.mean, summary.monthly_cost.mean),
        ("std", summary.prompts.std, summary.monthly_cost.std),
        ("min", summary.prompts.min, summary.monthly_cost.min),
        ("25%", summary.prompts.p25, summary.monthly_cost.p25),
        ("50%", summary.prompts.median, summary.monthly_cost.median),
        ("75%", summary.prompts.p75, summary.monthly_cost.p75),
        ("max", summary.prompts.max, summary.monthly_cost.max),
    ];
    for (label, prompts, cost) in rows {
        println!("  {label:<8} {prompts:>20.2} {cost:>24.4}");
    }
    println!();
    println!(
        "  Mean monthly cost per user: ${:.2}",
        summary.monthly_cost.mean
    );
    println!();
}
