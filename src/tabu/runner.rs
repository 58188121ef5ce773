//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a random permutation with empty memory
//! 2. At each iteration:
//!    a. Evaluate every position swap `(i, j)`, `i < j`
//!    b. Skip swaps whose customer pair is tabu, unless the result beats the
//!       global best (aspiration)
//!    c. Take the lowest-fitness admissible swap; ties go to the first one in
//!       scan order (increasing `i`, then `j`)
//!    d. Record the swapped pair with expiry `iteration + tabu_tenure`, prune
//!       expired entries, update the global best
//! 3. Stop on the iteration cap, after `max_no_improve` iterations without a
//!    new best, or when no swap is admissible
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.

use super::config::TabuConfig;
use super::types::{CustomerPair, TabuMemory, TabuStep, TabuStop};
use crate::codec::Evaluator;
use crate::error::CvrpError;
use crate::random::{create_rng, shuffle};
use log::{debug, info};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best chromosome found.
    pub best: Vec<usize>,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Iterations started, including one that found no admissible move.
    pub iterations: usize,
    /// Iteration at which `best` was found (0 = initial solution).
    pub best_iteration: usize,
    /// Why the run stopped.
    pub stop: TabuStop,
    /// Seed the run's generator was created from.
    pub seed: u64,
    /// Best fitness after each completed iteration.
    pub cost_history: Vec<f64>,
    /// Every accepted move, in order.
    pub steps: Vec<TabuStep>,
}

/// Tabu Search runner.
pub struct TabuRunner;

/// Best admissible swap found during a neighborhood scan.
struct Candidate {
    i: usize,
    j: usize,
    fitness: f64,
    aspirated: bool,
}

impl TabuRunner {
    /// Executes Tabu Search from a random initial permutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::codec::Evaluator;
    /// use u_cvrp::instance::Instance;
    /// use u_cvrp::tabu::{TabuConfig, TabuRunner};
    ///
    /// let inst = Instance::from_rows(
    ///     10.0,
    ///     vec![vec![0.0, 3.0, 4.0], vec![3.0, 0.0, 5.0], vec![4.0, 5.0, 0.0]],
    ///     vec![0.0, 5.0, 5.0],
    /// )
    /// .unwrap();
    /// let result = TabuRunner::run(&Evaluator::new(&inst), &TabuConfig::default().with_seed(1)).unwrap();
    /// assert!((result.best_fitness - 12.0).abs() < 1e-9);
    /// ```
    pub fn run(evaluator: &Evaluator<'_>, config: &TabuConfig) -> Result<TabuResult, CvrpError> {
        config
            .validate()
            .map_err(|reason| CvrpError::InvalidConfig {
                engine: "TABU",
                reason,
            })?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        let mut current = evaluator.identity_chromosome();
        shuffle(&mut current, &mut rng);
        let current_fitness = evaluator.fitness(&current);
        Ok(Self::search(evaluator, config, seed, current, current_fitness))
    }

    fn search(
        evaluator: &Evaluator<'_>,
        config: &TabuConfig,
        seed: u64,
        mut current: Vec<usize>,
        mut current_fitness: f64,
    ) -> TabuResult {
        let m = current.len();
        let mut best = current.clone();
        let mut best_fitness = current_fitness;
        let mut best_iteration = 0;

        let mut memory = TabuMemory::new();
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut steps = Vec::new();

        let mut iteration = 0;
        let mut no_improve = 0;
        let mut stop = TabuStop::MaxIterations;

        while iteration < config.max_iterations {
            if no_improve >= config.max_no_improve {
                stop = TabuStop::NoImprovement;
                break;
            }
            iteration += 1;

            let mut chosen: Option<Candidate> = None;
            for i in 0..m.saturating_sub(1) {
                for j in (i + 1)..m {
                    current.swap(i, j);
                    let f = evaluator.fitness(&current);
                    current.swap(i, j);

                    let pair = CustomerPair::new(current[i], current[j]);
                    let tabu = memory.is_tabu(pair, iteration);
                    let aspirated = tabu && config.aspiration && f < best_fitness;
                    if tabu && !aspirated {
                        continue;
                    }

                    if chosen.as_ref().is_none_or(|c| f < c.fitness) {
                        chosen = Some(Candidate {
                            i,
                            j,
                            fitness: f,
                            aspirated,
                        });
                    }
                }
            }

            let Some(mv) = chosen else {
                info!("TABU iter {iteration}: no admissible move, stopping");
                stop = TabuStop::NoAdmissibleMove;
                break;
            };

            let pair = CustomerPair::new(current[mv.i], current[mv.j]);
            current.swap(mv.i, mv.j);
            current_fitness = mv.fitness;

            memory.record(pair, iteration, config.tabu_tenure);
            memory.prune(iteration);

            steps.push(TabuStep {
                iteration,
                pair,
                fitness: current_fitness,
                best_before: best_fitness,
                aspirated: mv.aspirated,
            });

            if current_fitness < best_fitness {
                best.copy_from_slice(&current);
                best_fitness = current_fitness;
                best_iteration = iteration;
                no_improve = 0;
            } else {
                no_improve += 1;
            }

            cost_history.push(best_fitness);

            if config.log_every > 0 && iteration % config.log_every == 0 {
                debug!(
                    "TABU iter {iteration}: current = {current_fitness:.2}, best = {best_fitness:.2}, no_improve = {no_improve}"
                );
            }
        }

        if stop == TabuStop::MaxIterations && no_improve >= config.max_no_improve {
            stop = TabuStop::NoImprovement;
        }

        info!(
            "TABU finished at iter {iteration} ({stop:?}, seed {seed}), best fitness = {best_fitness:.2}"
        );

        TabuResult {
            best,
            best_fitness,
            iterations: iteration,
            best_iteration,
            stop,
            seed,
            cost_history,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;

    fn triangle() -> Instance {
        Instance::from_rows(
            10.0,
            vec![
                vec![0.0, 3.0, 4.0],
                vec![3.0, 0.0, 5.0],
                vec![4.0, 5.0, 0.0],
            ],
            vec![0.0, 5.0, 5.0],
        )
        .unwrap()
    }

    /// Customers scattered on a 5x5 grid, demand 2..=5, capacity 12.
    fn grid_instance() -> Instance {
        let coords: Vec<(f64, f64)> = std::iter::once((2.0, 2.0))
            .chain((0..10).map(|k| ((k * 3 % 5) as f64, (k * 7 % 5) as f64 + 0.5)))
            .collect();
        let rows = coords
            .iter()
            .map(|&(x1, y1)| {
                coords
                    .iter()
                    .map(|&(x2, y2)| (x1 - x2).abs() + (y1 - y2).abs())
                    .collect()
            })
            .collect();
        let demands = std::iter::once(0.0)
            .chain((0..10).map(|k| (2 + k % 4) as f64))
            .collect();
        Instance::from_rows(12.0, rows, demands).unwrap()
    }

    #[test]
    fn test_tabu_triangle_optimum() {
        let inst = triangle();
        let eval = Evaluator::new(&inst);
        let result = TabuRunner::run(&eval, &TabuConfig::default().with_seed(42)).unwrap();
        assert!((result.best_fitness - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_tabu_same_seed_same_result() {
        let inst = grid_instance();
        let eval = Evaluator::new(&inst);
        let config = TabuConfig::default().with_max_iterations(60).with_seed(9);
        let a = TabuRunner::run(&eval, &config).unwrap();
        let b = TabuRunner::run(&eval, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn test_tabu_pair_not_reused_within_tenure() {
        let inst = grid_instance();
        let eval = Evaluator::new(&inst);
        let tenure = 6;
        let config = TabuConfig::default()
            .with_max_iterations(200)
            .with_max_no_improve(200)
            .with_tabu_tenure(tenure)
            .with_seed(5);
        let result = TabuRunner::run(&eval, &config).unwrap();
        assert!(!result.steps.is_empty());

        for (k, later) in result.steps.iter().enumerate() {
            let earlier = result.steps[..k]
                .iter()
                .rev()
                .find(|s| s.pair == later.pair);
            if let Some(earlier) = earlier {
                if later.iteration < earlier.iteration + tenure {
                    assert!(later.aspirated, "tabu pair reused without aspiration");
                    assert!(later.fitness < later.best_before);
                }
            }
        }
    }

    #[test]
    fn test_tabu_cost_history_non_increasing() {
        let inst = grid_instance();
        let eval = Evaluator::new(&inst);
        let config = TabuConfig::default().with_max_iterations(80).with_seed(3);
        let result = TabuRunner::run(&eval, &config).unwrap();

        assert_eq!(result.cost_history.len(), result.steps.len());
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert_eq!(eval.fitness(&result.best), result.best_fitness);
    }

    #[test]
    fn test_tabu_takes_first_best_in_scan_order() {
        // All customers co-located: every swap yields the same fitness, so
        // the first scanned swap (positions 0 and 1) is taken.
        let rows = vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ];
        let inst = Instance::from_rows(10.0, rows, vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        let eval = Evaluator::new(&inst);
        let start = vec![3, 1, 2];
        let f = eval.fitness(&start);
        let config = TabuConfig::default().with_max_iterations(1).with_seed(0);
        let result = TabuRunner::search(&eval, &config, 0, start, f);
        assert_eq!(result.steps[0].pair, CustomerPair::new(3, 1));
    }

    #[test]
    fn test_tabu_stops_without_admissible_move() {
        // Two customers: a single swap exists and becomes tabu after use.
        let inst = triangle();
        let eval = Evaluator::new(&inst);
        for aspiration in [true, false] {
            let config = TabuConfig::default()
                .with_tabu_tenure(100)
                .with_aspiration(aspiration)
                .with_seed(1);
            let result = TabuRunner::run(&eval, &config).unwrap();
            assert_eq!(result.stop, TabuStop::NoAdmissibleMove);
            assert_eq!(result.iterations, 2);
            assert_eq!(result.steps.len(), 1);
        }
    }

    #[test]
    fn test_tabu_single_customer_stops_immediately() {
        let inst = Instance::from_rows(5.0, vec![vec![0.0, 2.0], vec![2.0, 0.0]], vec![0.0, 1.0])
            .unwrap();
        let eval = Evaluator::new(&inst);
        let result = TabuRunner::run(&eval, &TabuConfig::default().with_seed(1)).unwrap();
        assert_eq!(result.stop, TabuStop::NoAdmissibleMove);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.best, vec![1]);
    }

    #[test]
    fn test_tabu_stagnation_termination() {
        let inst = grid_instance();
        let eval = Evaluator::new(&inst);
        let config = TabuConfig::default()
            .with_max_iterations(10_000)
            .with_max_no_improve(15)
            .with_tabu_tenure(5)
            .with_seed(42);
        let result = TabuRunner::run(&eval, &config).unwrap();

        assert_eq!(result.stop, TabuStop::NoImprovement);
        assert!(result.iterations < 10_000);
        assert_eq!(result.iterations, result.best_iteration + 15);
    }

    #[test]
    fn test_tabu_iteration_cap() {
        let inst = grid_instance();
        let eval = Evaluator::new(&inst);
        let config = TabuConfig::default()
            .with_max_iterations(5)
            .with_max_no_improve(1000)
            .with_seed(42);
        let result = TabuRunner::run(&eval, &config).unwrap();
        assert_eq!(result.stop, TabuStop::MaxIterations);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_tabu_invalid_config() {
        let inst = triangle();
        let eval = Evaluator::new(&inst);
        let err = TabuRunner::run(&eval, &TabuConfig::default().with_max_iterations(0)).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidConfig { engine: "TABU", .. }));
    }
}
