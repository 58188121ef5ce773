//! Independent repeated runs of one engine.

use super::Engine;
use crate::codec::{Evaluator, Solution};
use crate::error::CvrpError;
use crate::instance::Instance;
use log::info;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one run inside a [`MultiRunReport`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    /// 0-based run index.
    pub run: usize,
    /// Seed the run was started with.
    pub seed: u64,
    /// Best chromosome of the run.
    pub best: Vec<usize>,
    /// Its fitness.
    pub fitness: f64,
    /// Generations or iterations executed.
    pub iterations: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// All runs of one engine on one instance, in run order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiRunReport {
    tag: String,
    runs: Vec<RunRecord>,
}

impl MultiRunReport {
    /// Engine label (`GA`, `TABU`, `SA`).
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Per-run records in run order.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Number of runs.
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// Best fitness of each run, in run order.
    pub fn fitnesses(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.fitness).collect()
    }

    /// Wall-clock time of each run, in run order.
    pub fn elapsed(&self) -> Vec<Duration> {
        self.runs.iter().map(|r| r.elapsed).collect()
    }

    /// The run with the lowest fitness; the earliest one on ties.
    pub fn best_run(&self) -> &RunRecord {
        let mut best = &self.runs[0];
        for r in &self.runs[1..] {
            if r.fitness < best.fitness {
                best = r;
            }
        }
        best
    }

    /// Fitness of the best run.
    pub fn best_fitness(&self) -> f64 {
        self.best_run().fitness
    }

    /// Mean fitness over all runs.
    pub fn average_fitness(&self) -> f64 {
        self.runs.iter().map(|r| r.fitness).sum::<f64>() / self.runs.len() as f64
    }

    /// Highest fitness over all runs.
    pub fn worst_fitness(&self) -> f64 {
        self.runs
            .iter()
            .map(|r| r.fitness)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Summed wall-clock time of all runs.
    pub fn total_elapsed(&self) -> Duration {
        self.runs.iter().map(|r| r.elapsed).sum()
    }

    /// Mean wall-clock time per run.
    pub fn average_elapsed(&self) -> Duration {
        self.total_elapsed() / self.runs.len() as u32
    }

    /// Decodes the overall best chromosome against `instance`.
    pub fn best_solution(&self, instance: &Instance) -> Solution {
        Evaluator::new(instance).solution(&self.best_run().best)
    }
}

/// Executes an [`Engine`] repeatedly with consecutive seeds.
///
/// Runs share nothing but the read-only instance. With the `parallel`
/// feature they execute on the rayon pool; results are identical to a
/// sequential execution because each run owns its generator.
pub struct MultiRunner;

impl MultiRunner {
    /// Runs `engine` `runs` times with seeds `engine.default_seed_base() + r`.
    ///
    /// # Errors
    /// [`CvrpError::InvalidConfig`] if `runs` is 0 or the engine
    /// configuration is invalid.
    pub fn run(
        instance: &Instance,
        engine: &Engine,
        runs: usize,
    ) -> Result<MultiRunReport, CvrpError> {
        Self::run_with_seed_base(instance, engine, runs, engine.default_seed_base())
    }

    /// Runs `engine` `runs` times with seeds `seed_base + r`.
    pub fn run_with_seed_base(
        instance: &Instance,
        engine: &Engine,
        runs: usize,
        seed_base: u64,
    ) -> Result<MultiRunReport, CvrpError> {
        if runs == 0 {
            return Err(CvrpError::InvalidConfig {
                engine: engine.tag(),
                reason: "runs must be at least 1".into(),
            });
        }
        engine.validate()?;

        let evaluator = Evaluator::new(instance);
        let one = |run: usize| -> Result<RunRecord, CvrpError> {
            let seed = seed_base + run as u64;
            let start = Instant::now();
            let outcome = engine.run_once(&evaluator, seed)?;
            let elapsed = start.elapsed();
            info!(
                "{} run {}/{} (seed {seed}): fitness = {:.2} in {:.4}s",
                engine.tag(),
                run + 1,
                runs,
                outcome.fitness,
                elapsed.as_secs_f64()
            );
            Ok(RunRecord {
                run,
                seed,
                best: outcome.best,
                fitness: outcome.fitness,
                iterations: outcome.iterations,
                elapsed,
            })
        };

        #[cfg(feature = "parallel")]
        let records = (0..runs)
            .into_par_iter()
            .map(one)
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let records = (0..runs).map(one).collect::<Result<Vec<_>, _>>()?;

        Ok(MultiRunReport {
            tag: engine.tag().to_string(),
            runs: records,
        })
    }
}
