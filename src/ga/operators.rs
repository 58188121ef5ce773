//! Permutation operators for the GA.
//!
//! # Crossover
//!
//! - [`order_crossover`] (OX): Davis (1985). Keeps a slice of parent 1 in
//!   place and the relative order of parent 2 everywhere else
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//!
//! # Local refinement
//!
//! - [`two_opt`]: segment reversal on the whole chromosome, capped in passes
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"

use crate::codec::Evaluator;
use crate::random::distinct_pair;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX), single child.
///
/// # Algorithm
///
/// 1. Pick two distinct cut points `a < b`
/// 2. Copy `parent1[a..=b]` into the child at the same positions
/// 3. Walk `parent2` from its first gene, skipping genes already placed, and
///    write the rest into the free positions starting at `b + 1` and
///    wrapping around to the front
///
/// Parents of length 1 produce a copy of `parent1`.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    match distinct_pair(n, rng) {
        Some((i, j)) => ox_child(parent1, parent2, i.min(j), i.max(j)),
        None => parent1.to_vec(),
    }
}

/// Builds one OX child from the cut points `[start, end]`.
pub(crate) fn ox_child(parent1: &[usize], parent2: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = parent1.len();
    let max_gene = parent1.iter().copied().max().unwrap_or(0);
    let mut placed = vec![false; max_gene + 1];
    let mut child = vec![0usize; n];

    for i in start..=end {
        child[i] = parent1[i];
        placed[parent1[i]] = true;
    }

    let mut pos = (end + 1) % n;
    for &gene in parent2 {
        if !placed[gene] {
            child[pos] = gene;
            placed[gene] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swaps two distinct random positions. No-op for fewer than two genes.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    if let Some((i, j)) = distinct_pair(perm.len(), rng) {
        perm.swap(i, j);
    }
}

// ============================================================================
// Local refinement
// ============================================================================

/// Segment-reversal local search on the chromosome.
///
/// Each pass tries every segment `[i, j]`, `i < j`, and keeps a reversal as
/// soon as it strictly lowers fitness; later candidates in the same pass are
/// tried against the improved chromosome. Stops after a pass without
/// improvement or after `max_passes` passes.
///
/// Returns the refined chromosome and its fitness.
pub fn two_opt(
    evaluator: &Evaluator<'_>,
    chromosome: Vec<usize>,
    fitness: f64,
    max_passes: usize,
) -> (Vec<usize>, f64) {
    let n = chromosome.len();
    let mut best = chromosome;
    let mut best_fitness = fitness;
    let mut candidate = best.clone();

    for _ in 0..max_passes {
        let mut improved = false;
        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                candidate.copy_from_slice(&best);
                candidate[i..=j].reverse();
                let f = evaluator.fitness(&candidate);
                if f < best_fitness {
                    std::mem::swap(&mut best, &mut candidate);
                    best_fitness = f;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }

    (best, best_fitness)
}

// ============================================================================
// Tests
// ============================================================================
