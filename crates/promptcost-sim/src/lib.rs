// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monte Carlo estimation of monthly platform cost per user.
//!
//! For each synthetic user the engine draws a heavy-tailed invocation count,
//! then for every invocation picks a priced usage model from the
//! [`CostSchedule`](promptcost_cost::CostSchedule) and draws how much of it
//! was consumed. The per-user totals form the run's result table.
//!
//! - [`engine`]: the sampling loop, sequential and rayon-parallel
//! - [`usage`]: per-kind usage distributions
//! - [`summary`]: descriptive statistics and histogram data
//! - [`export`]: CSV output

pub mod engine;
pub mod export;
pub mod summary;
pub mod usage;

pub use engine::{SimulationEngine, SimulationOutcome, run};
pub use export::{write_csv, write_csv_path};
pub use summary::{ColumnSummary, CostSummary, Histogram};
pub use usage::UsageSampler;
