//! SA execution loop.

use super::config::SaConfig;
use crate::codec::Evaluator;
use crate::error::CvrpError;
use crate::random::{create_rng, distinct_pair, shuffle};
use log::{debug, info};
use rand::Rng;
use std::time::Instant;

/// Iterations between two `cost_history` samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best chromosome found.
    pub best: Vec<usize>,

    /// Fitness of the best chromosome.
    pub best_fitness: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Seed the run's generator was created from.
    pub seed: u64,

    /// Whether the time budget ended the run.
    pub timed_out: bool,

    /// Best fitness sampled at regular intervals.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance probability of a move with fitness change `delta`
/// at `temperature`.
///
/// Improving moves (`delta < 0`) are always accepted.
///
/// ```
/// use u_cvrp::sa::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-3.0, 10.0), 1.0);
/// assert!(acceptance_probability(5.0, 100.0) > acceptance_probability(5.0, 10.0));
/// ```
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature > 0.0 {
        (-delta / temperature).exp()
    } else {
        0.0
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization from a random initial permutation.
    ///
    /// Each iteration swaps two random positions, applies the Metropolis
    /// rule, then cools the temperature geometrically. Returns the best
    /// chromosome seen, not the final current one.
    ///
    /// # Errors
    /// Returns [`CvrpError::InvalidConfig`] if `config` fails validation.
    pub fn run(evaluator: &Evaluator<'_>, config: &SaConfig) -> Result<SaResult, CvrpError> {
        config
            .validate()
            .map_err(|reason| CvrpError::InvalidConfig {
                engine: "SA",
                reason,
            })?;

        let start = Instant::now();
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        // Initialize
        let mut current = evaluator.identity_chromosome();
        shuffle(&mut current, &mut rng);
        let mut current_fitness = evaluator.fitness(&current);
        let mut best = current.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut timed_out = false;

        let mut cost_history = vec![best_fitness];

        // A single customer has no swap neighborhood.
        let searchable = current.len() >= 2;

        while searchable && temperature > config.stop_temperature {
            if let Some(budget) = config.time_budget {
                if start.elapsed() >= budget {
                    timed_out = true;
                    break;
                }
            }

            let Some((i, j)) = distinct_pair(current.len(), &mut rng) else {
                break;
            };
            current.swap(i, j);
            let neighbor_fitness = evaluator.fitness(&current);
            let delta = neighbor_fitness - current_fitness;

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < acceptance_probability(delta, temperature)
            };

            if accept {
                current_fitness = neighbor_fitness;
                accepted_moves += 1;

                if current_fitness < best_fitness {
                    best.copy_from_slice(&current);
                    best_fitness = current_fitness;
                }
            } else {
                current.swap(i, j);
            }

            iterations += 1;
            temperature *= config.cooling_rate;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                cost_history.push(best_fitness);
            }
            if config.log_every > 0 && iterations.is_multiple_of(config.log_every) {
                debug!(
                    "SA iter {iterations}: T = {temperature:.4}, current = {current_fitness:.2}, best = {best_fitness:.2}"
                );
            }
        }

        // Final history entry
        if cost_history
            .last()
            .is_none_or(|&last| (last - best_fitness).abs() > 1e-15)
        {
            cost_history.push(best_fitness);
        }

        info!(
            "SA finished after {iterations} iterations (seed {seed}, T = {temperature:.4}{}), best fitness = {best_fitness:.2}",
            if timed_out { ", time budget hit" } else { "" }
        );

        Ok(SaResult {
            best,
            best_fitness,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            seed,
            timed_out,
            cost_history,
        })
    }
}
