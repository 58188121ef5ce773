//! Repeated-run statistics across engines.
//!
//! [`Engine`] puts the three searches behind one value so they can be run
//! the same way: [`MultiRunner`] executes `runs` independent runs with seeds
//! `seed_base + r`, and [`SummaryRecord`] condenses a [`MultiRunReport`] into
//! a single pipe-delimited line.
//!
//! # Example
//!
//! ```
//! use u_cvrp::ga::GaConfig;
//! use u_cvrp::harness::{Engine, MultiRunner, SummaryRecord};
//! use u_cvrp::instance::Instance;
//!
//! let inst = Instance::from_rows(
//!     10.0,
//!     vec![vec![0.0, 3.0, 4.0], vec![3.0, 0.0, 5.0], vec![4.0, 5.0, 0.0]],
//!     vec![0.0, 5.0, 5.0],
//! )
//! .unwrap();
//! let config = GaConfig::default().with_population_size(10).with_generations(5);
//! let engine = Engine::Genetic(config);
//! let report = MultiRunner::run(&inst, &engine, 3).unwrap();
//! assert_eq!(report.best_run().seed, 100);
//!
//! let line = SummaryRecord::from_report("triangle", &inst, &report).render();
//! assert!(line.starts_with("GA_SUMMARY|triangle|12.00|12.00|12.00|3|1|100|"));
//! ```

mod runner;
mod summary;

pub use runner::{MultiRunReport, MultiRunner, RunRecord};
pub use summary::SummaryRecord;

use crate::codec::Evaluator;
use crate::error::CvrpError;
use crate::ga::{GaConfig, GaRunner};
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuRunner};

/// One of the three search engines together with its configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Engine {
    /// Genetic Algorithm.
    Genetic(GaConfig),
    /// Tabu Search.
    Tabu(TabuConfig),
    /// Simulated Annealing.
    Annealing(SaConfig),
}

/// What every engine reports from a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    /// Best chromosome found.
    pub best: Vec<usize>,
    /// Its fitness.
    pub fitness: f64,
    /// Generations (GA) or iterations (Tabu, SA) executed.
    pub iterations: usize,
}

impl Engine {
    /// Short upper-case label used in summary lines.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Genetic(_) => "GA",
            Self::Tabu(_) => "TABU",
            Self::Annealing(_) => "SA",
        }
    }

    /// Seed of run 0 when none is given.
    pub fn default_seed_base(&self) -> u64 {
        match self {
            Self::Genetic(_) => 100,
            Self::Tabu(_) => 200,
            Self::Annealing(_) => 300,
        }
    }

    /// Checks the wrapped configuration.
    pub fn validate(&self) -> Result<(), CvrpError> {
        let result = match self {
            Self::Genetic(c) => c.validate(),
            Self::Tabu(c) => c.validate(),
            Self::Annealing(c) => c.validate(),
        };
        result.map_err(|reason| CvrpError::InvalidConfig {
            engine: self.tag(),
            reason,
        })
    }

    /// Runs the engine once with `seed`, overriding any configured seed.
    pub fn run_once(
        &self,
        evaluator: &Evaluator<'_>,
        seed: u64,
    ) -> Result<EngineOutcome, CvrpError> {
        let outcome = match self {
            Self::Genetic(c) => {
                let r = GaRunner::run(evaluator, &c.clone().with_seed(seed))?;
                EngineOutcome {
                    best: r.best,
                    fitness: r.best_fitness,
                    iterations: r.generations,
                }
            }
            Self::Tabu(c) => {
                let r = TabuRunner::run(evaluator, &c.clone().with_seed(seed))?;
                EngineOutcome {
                    best: r.best,
                    fitness: r.best_fitness,
                    iterations: r.iterations,
                }
            }
            Self::Annealing(c) => {
                let r = SaRunner::run(evaluator, &c.clone().with_seed(seed))?;
                EngineOutcome {
                    best: r.best,
                    fitness: r.best_fitness,
                    iterations: r.iterations,
                }
            }
        };
        Ok(outcome)
    }
}
