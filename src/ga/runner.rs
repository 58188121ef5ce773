//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → elitism → selection → crossover → mutation →
//! optional 2-opt → replacement → repeat.

use super::config::GaConfig;
use super::operators::{order_crossover, swap_mutation, two_opt};
use super::selection::tournament;
use super::types::Individual;
use crate::codec::Evaluator;
use crate::error::CvrpError;
use crate::random::create_rng;
use log::{debug, info};
use rand::Rng;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best chromosome found during the entire run.
    pub best: Vec<usize>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Seed the run's generator was created from.
    pub seed: u64,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_cvrp::codec::Evaluator;
/// use u_cvrp::ga::{GaConfig, GaRunner};
/// use u_cvrp::instance::Instance;
///
/// let inst = Instance::from_rows(
///     10.0,
///     vec![vec![0.0, 3.0, 4.0], vec![3.0, 0.0, 5.0], vec![4.0, 5.0, 0.0]],
///     vec![0.0, 5.0, 5.0],
/// )
/// .unwrap();
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_seed(42);
/// let result = GaRunner::run(&Evaluator::new(&inst), &config).unwrap();
/// assert!((result.best_fitness - 12.0).abs() < 1e-9);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`CvrpError::InvalidConfig`] if `config` fails validation.
    pub fn run(evaluator: &Evaluator<'_>, config: &GaConfig) -> Result<GaResult, CvrpError> {
        config
            .validate()
            .map_err(|reason| CvrpError::InvalidConfig {
                engine: "GA",
                reason,
            })?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        // 1. Initialize population
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| Individual::random(evaluator, &mut rng))
            .collect();

        // 2. Track best
        let mut best = find_best(&population).clone();
        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        fitness_history.push(best.fitness);

        // 3. Evolutionary loop
        for gen in 0..config.generations {
            // Stable sort: among equal fitness the earlier individual stays ahead.
            let mut ranked: Vec<&Individual> = population.iter().collect();
            ranked.sort_by(|a, b| {
                a.fitness
                    .partial_cmp(&b.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut next_gen: Vec<Individual> = Vec::with_capacity(config.population_size);
            next_gen.extend(ranked[..config.elitism_count].iter().map(|&e| e.clone()));

            while next_gen.len() < config.population_size {
                let p1 = &population[tournament(&population, config.tournament_size, &mut rng)];

                let mut chromosome = if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let p2 =
                        &population[tournament(&population, config.tournament_size, &mut rng)];
                    order_crossover(&p1.chromosome, &p2.chromosome, &mut rng)
                } else {
                    p1.chromosome.clone()
                };

                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    swap_mutation(&mut chromosome, &mut rng);
                }

                let mut child = Individual::evaluated(chromosome, evaluator);

                if config.use_local_refine
                    && rng.random_range(0.0..1.0) < config.local_refine_prob
                {
                    let (chromosome, fitness) = two_opt(
                        evaluator,
                        child.chromosome,
                        child.fitness,
                        config.local_refine_max_passes,
                    );
                    child = Individual {
                        chromosome,
                        fitness,
                    };
                }

                next_gen.push(child);
            }

            population = next_gen;

            // Update best
            let gen_best = find_best(&population);
            if gen_best.fitness < best.fitness {
                best = gen_best.clone();
            }
            fitness_history.push(best.fitness);

            if config.log_every > 0 && (gen + 1) % config.log_every == 0 {
                debug!("GA gen {}: best fitness = {:.2}", gen + 1, best.fitness);
            }
        }

        info!(
            "GA finished after {} generations (seed {}), best fitness = {:.2}",
            config.generations, seed, best.fitness
        );

        Ok(GaResult {
            best: best.chromosome,
            best_fitness: best.fitness,
            generations: config.generations,
            seed,
            fitness_history,
        })
    }
}

/// The first individual with the lowest fitness.
fn find_best(population: &[Individual]) -> &Individual {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.fitness < best.fitness {
            best = ind;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

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

    /// 12 customers on a circle of radius 10, demand 3 each, capacity 10.
    fn ring_instance() -> Instance {
        let n = 13;
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                if i == 0 {
                    (0.0, 0.0)
                } else {
                    let a = 2.0 * std::f64::consts::PI * (i as f64) / 12.0;
                    (10.0 * a.cos(), 10.0 * a.sin())
                }
            })
            .collect();
        let rows = coords
            .iter()
            .map(|&(x1, y1)| {
                coords
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        let mut demands = vec![3.0; n];
        demands[0] = 0.0;
        Instance::from_rows(10.0, rows, demands).unwrap()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_generations(40)
            .with_local_refine_prob(0.2)
            .with_seed(42)
    }

    #[test]
    fn test_triangle_reaches_optimum() {
        let inst = triangle();
        let eval = Evaluator::new(&inst);
        let result = GaRunner::run(&eval, &small_config()).unwrap();
        assert!((result.best_fitness - 12.0).abs() < 1e-9);
        assert!(eval.solution(&result.best).is_feasible());
    }

    #[test]
    fn test_same_seed_same_result() {
        let inst = ring_instance();
        let eval = Evaluator::new(&inst);
        let a = GaRunner::run(&eval, &small_config()).unwrap();
        let b = GaRunner::run(&eval, &small_config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.seed, 42);
    }

    #[test]
    fn test_history_non_increasing() {
        let inst = ring_instance();
        let eval = Evaluator::new(&inst);
        let result = GaRunner::run(&eval, &small_config()).unwrap();

        assert_eq!(result.fitness_history.len(), 41);
        assert_eq!(result.generations, 40);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best fitness should never get worse: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_best_is_valid_and_consistent() {
        let inst = ring_instance();
        let eval = Evaluator::new(&inst);
        let result = GaRunner::run(&eval, &small_config()).unwrap();

        let mut sorted = result.best.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=12).collect::<Vec<_>>());
        assert_eq!(eval.fitness(&result.best), result.best_fitness);
        // 36 units of demand need at least 4 vehicles of capacity 10
        assert!(eval.solution(&result.best).num_routes() >= 4);
    }

    #[test]
    fn test_refined_offspring_beat_random_start() {
        let inst = ring_instance();
        let eval = Evaluator::new(&inst);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(3)
            .with_local_refine_prob(1.0)
            .with_seed(3);
        let result = GaRunner::run(&eval, &config).unwrap();
        // Every child of the first generation is a 2-opt local optimum.
        assert!(result.fitness_history[1] < result.fitness_history[0]);
    }

    #[test]
    fn test_no_variation_operators() {
        // Without crossover and mutation, offspring are copies of existing
        // individuals, so the best can only come from the initial population.
        let inst = ring_instance();
        let eval = Evaluator::new(&inst);
        let config = small_config()
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_local_refine(false);
        let result = GaRunner::run(&eval, &config).unwrap();
        assert!(result
            .fitness_history
            .iter()
            .all(|&f| f == result.fitness_history[0]));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = triangle();
        let eval = Evaluator::new(&inst);
        let config = GaConfig::default().with_population_size(1);
        let err = GaRunner::run(&eval, &config).unwrap_err();
        assert!(matches!(err, CvrpError::InvalidConfig { engine: "GA", .. }));
    }

    #[test]
    fn test_single_customer() {
        let inst = Instance::from_rows(5.0, vec![vec![0.0, 2.0], vec![2.0, 0.0]], vec![0.0, 1.0])
            .unwrap();
        let eval = Evaluator::new(&inst);
        let result = GaRunner::run(&eval, &small_config()).unwrap();
        assert_eq!(result.best, vec![1]);
        assert!((result.best_fitness - 4.0).abs() < 1e-12);
    }
}
