// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The immutable cost schedule and its uniform sampler.

use std::collections::BTreeMap;
use std::str::FromStr;

use promptcost_config::ScheduleEntryConfig;
use promptcost_core::{PromptCostError, UsageKind, UsageModel};
use rand::Rng;
use tracing::debug;

/// A non-empty, read-only sequence of priced usage models.
///
/// Entries are addressed by index only for uniform selection; their order
/// carries no meaning and duplicates are allowed. There are no mutation
/// operations after construction, so a schedule can be shared freely across
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSchedule {
    models: Vec<UsageModel>,
}

impl CostSchedule {
    /// Build a schedule from already-typed models.
    ///
    /// Fails with [`PromptCostError::EmptySchedule`] if `models` is empty.
    pub fn new(models: Vec<UsageModel>) -> Result<Self, PromptCostError> {
        if models.is_empty() {
            return Err(PromptCostError::EmptySchedule);
        }
        Ok(Self { models })
    }

    /// Build a schedule from configuration entries, parsing each `type` string.
    ///
    /// An unrecognized kind fails the whole schedule with
    /// [`PromptCostError::UnrecognizedKind`] so it is caught before any run starts.
    pub fn from_entries(entries: &[ScheduleEntryConfig]) -> Result<Self, PromptCostError> {
        let models = entries
            .iter()
            .map(|entry| {
                let kind = parse_kind(&entry.kind)?;
                debug!(
                    name = entry.name.as_deref().unwrap_or("-"),
                    %kind,
                    unit_cost = entry.unit_cost,
                    "schedule entry"
                );
                Ok(UsageModel::new(kind, entry.unit_cost))
            })
            .collect::<Result<Vec<_>, PromptCostError>>()?;
        Self::new(models)
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.models.len()
    }

    /// All entries in declaration order.
    pub fn models(&self) -> &[UsageModel] {
        &self.models
    }

    /// Select one entry uniformly at random, with replacement.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &UsageModel {
        // Non-empty by construction.
        &self.models[rng.gen_range(0..self.models.len())]
    }

    /// Number of entries per consumption kind, for logging the schedule mix.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for model in &self.models {
            *counts.entry(model.kind.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Parse a schedule `Type` string into a consumption kind.
pub(crate) fn parse_kind(raw: &str) -> Result<UsageKind, PromptCostError> {
    UsageKind::from_str(raw.trim()).map_err(|_| PromptCostError::UnrecognizedKind {
        kind: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn entry(kind: &str, unit_cost: f64) -> ScheduleEntryConfig {
        ScheduleEntryConfig {
            name: None,
            kind: kind.to_string(),
            unit_cost,
        }
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let err = CostSchedule::new(Vec::new()).unwrap_err();
        assert!(matches!(err, PromptCostError::EmptySchedule));

        let err = CostSchedule::from_entries(&[]).unwrap_err();
        assert!(matches!(err, PromptCostError::EmptySchedule));
    }

    #[test]
    fn from_entries_parses_all_kinds() {
        let schedule = CostSchedule::from_entries(&[
            entry("image_count", 0.002),
            entry("run_time", 0.0005),
            entry("input_token_count", 0.000003),
            entry(" output_token_count ", 0.000015),
        ])
        .unwrap();
        assert_eq!(schedule.size(), 4);
        let kinds: Vec<UsageKind> = schedule.models().iter().map(|m| m.kind).collect();
        assert_eq!(kinds, UsageKind::ALL.to_vec());
    }

    #[test]
    fn unrecognized_kind_is_a_configuration_error() {
        let err = CostSchedule::from_entries(&[entry("run_time", 1.0), entry("gpu_hours", 1.0)])
            .unwrap_err();
        match err {
            PromptCostError::UnrecognizedKind { kind } => assert_eq!(kind, "gpu_hours"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_entry_is_always_sampled() {
        let schedule = CostSchedule::new(vec![UsageModel::new(UsageKind::RunTime, 2.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(schedule.sample(&mut rng).kind, UsageKind::RunTime);
        }
    }

    #[test]
    fn sampling_reaches_every_entry() {
        let models: Vec<UsageModel> = UsageKind::ALL
            .iter()
            .map(|&k| UsageModel::new(k, 1.0))
            .collect();
        let schedule = CostSchedule::new(models).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut hits = [0usize; 4];
        for _ in 0..4000 {
            let sampled = schedule.sample(&mut rng);
            let idx = UsageKind::ALL.iter().position(|&k| k == sampled.kind).unwrap();
            hits[idx] += 1;
        }
        // Uniform: each of 4 entries expected ~1000 times.
        for count in hits {
            assert!((800..1200).contains(&count), "non-uniform hits: {hits:?}");
        }
    }

    #[test]
    fn duplicates_are_kept() {
        let schedule = CostSchedule::from_entries(&[
            entry("image_count", 0.01),
            entry("image_count", 0.01),
        ])
        .unwrap();
        assert_eq!(schedule.size(), 2);
        assert_eq!(schedule.kind_counts().get("image_count"), Some(&2));
    }
}
