// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Monte Carlo engine: per-user invocation counts and cost aggregation.
//!
//! Each user gets an independent ChaCha stream keyed by `(seed, user_id)`, so
//! a run is reproducible from its seed and the sequential and parallel paths
//! produce identical results.

use std::time::Instant;

use promptcost_config::{SimulationConfig, simulation_violations};
use promptcost_core::{PromptCostError, UserResult};
use promptcost_cost::CostSchedule;
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StudentT};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::usage::UsageSampler;

/// Scale applied to the Student-t draw before centering on the mean.
pub const PROMPT_SPREAD: f64 = 5.0;

/// Results of one run together with the seed that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationOutcome {
    /// Seed of the run; feeding it back through `config.seed` replays the run.
    pub seed: u64,
    /// One entry per user, ascending by `user_id`.
    pub results: Vec<UserResult>,
}

/// A validated simulation ready to run against a cost schedule.
///
/// Holds read-only borrows of the schedule and config, so one engine can be
/// run any number of times with different seeds.
#[derive(Debug, Clone)]
pub struct SimulationEngine<'a> {
    schedule: &'a CostSchedule,
    config: &'a SimulationConfig,
    sampler: UsageSampler,
    prompts: StudentT<f64>,
}

impl<'a> SimulationEngine<'a> {
    /// Validate `config` and pre-build the distributions.
    ///
    /// Fails with [`PromptCostError::InvalidConfig`] before any sampling if
    /// a range is inverted or a count is out of bounds.
    pub fn new(
        schedule: &'a CostSchedule,
        config: &'a SimulationConfig,
    ) -> Result<Self, PromptCostError> {
        let violations = simulation_violations(config);
        if !violations.is_empty() {
            return Err(PromptCostError::InvalidConfig(violations.join("; ")));
        }

        let prompts = StudentT::new(f64::from(config.degrees_of_freedom)).map_err(|e| {
            PromptCostError::InvalidConfig(format!("degrees_of_freedom: {e}"))
        })?;

        Ok(Self {
            schedule,
            config,
            sampler: UsageSampler::new(config)?,
            prompts,
        })
    }

    /// Run with `config.seed` (or a fresh OS seed) and `config.parallel`.
    pub fn simulate(&self) -> SimulationOutcome {
        let seed = self.config.seed.unwrap_or_else(|| OsRng.next_u64());
        let results = if self.config.parallel {
            self.run_parallel(seed)
        } else {
            self.run(seed)
        };
        SimulationOutcome { seed, results }
    }

    /// Simulate the whole population on the current thread.
    pub fn run(&self, seed: u64) -> Vec<UserResult> {
        let started = Instant::now();
        self.log_start(seed, false);

        let results: Vec<UserResult> = (1..=self.config.population_size)
            .map(|user_id| self.simulate_user(user_id, &mut user_stream(seed, user_id)))
            .collect();

        log_finish(&results, started);
        results
    }

    /// Simulate the population on the rayon pool.
    ///
    /// Output order and values are identical to [`SimulationEngine::run`].
    pub fn run_parallel(&self, seed: u64) -> Vec<UserResult> {
        let started = Instant::now();
        self.log_start(seed, true);

        let results: Vec<UserResult> = (1..=self.config.population_size)
            .into_par_iter()
            .map(|user_id| self.simulate_user(user_id, &mut user_stream(seed, user_id)))
            .collect();

        log_finish(&results, started);
        results
    }

    /// Simulate one user's month from the given random stream.
    pub fn simulate_user<R: Rng + ?Sized>(&self, user_id: u32, rng: &mut R) -> UserResult {
        let t = self.prompts.sample(rng);
        let invocations = invocation_count(t, self.config.mean_prompts);

        // The model is re-drawn for every invocation, so one user's month
        // mixes billing kinds.
        let total_monthly_cost = (0..invocations)
            .map(|_| {
                let model = self.schedule.sample(rng);
                model.cost_of(self.sampler.draw(model.kind, rng))
            })
            .sum();

        UserResult {
            user_id,
            total_invocations: invocations,
            total_monthly_cost,
        }
    }

    fn log_start(&self, seed: u64, parallel: bool) {
        info!(
            population = self.config.population_size,
            mean_prompts = self.config.mean_prompts,
            schedule_entries = self.schedule.size(),
            seed,
            parallel,
            "starting simulation"
        );
        debug!(kinds = ?self.schedule.kind_counts(), "schedule mix");
    }
}

fn log_finish(results: &[UserResult], started: Instant) {
    let total: f64 = results.iter().map(|r| r.total_monthly_cost).sum();
    let mean_cost = if results.is_empty() {
        0.0
    } else {
        total / results.len() as f64
    };
    info!(
        users = results.len(),
        mean_cost,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation complete"
    );
}

/// `floor(t * 5 + mean)`, clamped to at least one invocation.
pub fn invocation_count(t: f64, mean_prompts: u32) -> u64 {
    let raw = (t * PROMPT_SPREAD + f64::from(mean_prompts)).floor();
    if raw.is_nan() || raw < 1.0 {
        1
    } else {
        raw as u64
    }
}

/// Independent random stream for one user of a run.
pub fn user_stream(seed: u64, user_id: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(user_id));
    rng
}

/// Simulate `config.population_size` users against `schedule` with a fixed seed.
///
/// Either every user is simulated or an error is returned before any
/// sampling happens; there are no partial results.
pub fn run(
    schedule: &CostSchedule,
    config: &SimulationConfig,
    seed: u64,
) -> Result<Vec<UserResult>, PromptCostError> {
    let engine = SimulationEngine::new(schedule, config)?;
    Ok(if config.parallel {
        engine.run_parallel(seed)
    } else {
        engine.run(seed)
    })
}

#[cfg(test)]
mod tests {
    use promptcost_config::UsageRange;
    use promptcost_core::{UsageKind, UsageModel};

    use super::*;

    fn run_time_schedule() -> CostSchedule {
        CostSchedule::new(vec![UsageModel::new(UsageKind::RunTime, 2.0)]).unwrap()
    }

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            population_size: 50,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn invocation_count_floors_and_clamps() {
        assert_eq!(invocation_count(0.0, 40), 40);
        assert_eq!(invocation_count(0.39, 40), 41);
        assert_eq!(invocation_count(-0.01, 40), 39);
        assert_eq!(invocation_count(-100.0, 40), 1);
        assert_eq!(invocation_count(-7.9, 40), 1);
        assert_eq!(invocation_count(f64::NAN, 40), 1);
    }

    #[test]
    fn user_streams_differ_per_user_and_repeat_per_seed() {
        let a = user_stream(9, 1).next_u64();
        let b = user_stream(9, 2).next_u64();
        let c = user_stream(9, 1).next_u64();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn fixed_runtime_costs_twenty_per_invocation() {
        let schedule = run_time_schedule();
        let config = SimulationConfig {
            runtime_range: UsageRange::new(10.0, 10.0),
            ..small_config()
        };
        let results = run(&schedule, &config, 3).unwrap();
        for r in results {
            let expected = r.total_invocations as f64 * 20.0;
            assert!((r.total_monthly_cost - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn simulate_uses_configured_seed() {
        let schedule = run_time_schedule();
        let config = SimulationConfig {
            seed: Some(77),
            ..small_config()
        };
        let engine = SimulationEngine::new(&schedule, &config).unwrap();
        let outcome = engine.simulate();
        assert_eq!(outcome.seed, 77);
        assert_eq!(outcome.results, engine.run(77));
    }

    #[test]
    fn zero_degrees_of_freedom_is_invalid() {
        let schedule = run_time_schedule();
        let config = SimulationConfig {
            degrees_of_freedom: 0,
            ..small_config()
        };
        let err = SimulationEngine::new(&schedule, &config).unwrap_err();
        assert!(matches!(err, PromptCostError::InvalidConfig(msg) if msg.contains("degrees_of_freedom")));
    }
}
