//! Simulated Annealing (SA) over customer permutations.
//!
//! A single-solution trajectory that swaps two random positions per
//! iteration and accepts worsening swaps with a probability that decays with
//! temperature, allowing the search to escape local optima. The global best
//! is tracked separately from the current solution.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Osman (1993), "Metastrategy simulated annealing and tabu search algorithms for the vehicle routing problem"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{acceptance_probability, SaResult, SaRunner};
