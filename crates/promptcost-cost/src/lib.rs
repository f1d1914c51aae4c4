// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost schedule for the Promptcost simulator.
//!
//! This crate provides:
//! - **Cost schedule**: an immutable, non-empty table of priced usage models
//!   with uniform sampling (with replacement)
//! - **Schedule tables**: ingestion of an exported `Type` / `Unit Cost ($)` table

pub mod schedule;
pub mod table;

pub use schedule::CostSchedule;
pub use table::{TYPE_COLUMN, UNIT_COST_COLUMN};
