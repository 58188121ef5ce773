//! Genetic Algorithm over customer permutations.
//!
//! Each individual is a chromosome (permutation of customer ids) decoded by
//! [`codec::decode`](crate::codec::decode). The loop per generation:
//!
//! 1. Copy the `elitism_count` best individuals unchanged
//! 2. Fill the rest: tournament-select parents, OX-recombine with
//!    `crossover_rate` (else copy parent 1), swap-mutate with
//!    `mutation_rate`, and 2-opt-refine with `local_refine_prob`
//! 3. Replace the population and update the global best (strict `<`)
//!
//! The run always lasts exactly `generations` generations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best chromosome with fitness history
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::Individual;
