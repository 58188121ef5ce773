//! Parent selection.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament selection: draw `k` individuals uniformly **with
/// replacement** and return the index of the one with the lowest fitness.
///
/// Only a strictly lower fitness replaces the current winner, so among
/// equal contestants the first drawn wins.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Individual], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness < population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Individual {
                chromosome: vec![i + 1],
                fitness: f,
            })
            .collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        // 1 - (3/4)^4 ≈ 0.68 chance of drawing the best at least once
        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 4, &mut rng)] += 1;
        }
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_never_picks_strictly_worse_than_all_draws() {
        // With a single worst individual and huge k, it is essentially never chosen.
        let pop = make_population(&[1.0, 1.0, 1.0, 100.0]);
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            assert_ne!(tournament(&pop, 64, &mut rng), 3);
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[3.0]);
        let mut rng = create_rng(1);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(1);
        tournament(&[], 3, &mut rng);
    }
}
