//! Population member.

use crate::codec::Evaluator;
use crate::random::shuffle;
use rand::Rng;

/// A chromosome paired with its fitness.
///
/// Fitness is computed once, when the individual is created, and travels
/// with it through selection and elitism.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    /// Customer permutation.
    pub chromosome: Vec<usize>,
    /// Penalized cost (lower is better).
    pub fitness: f64,
}

impl Individual {
    /// Evaluates `chromosome` and wraps it.
    pub fn evaluated(chromosome: Vec<usize>, evaluator: &Evaluator<'_>) -> Self {
        let fitness = evaluator.fitness(&chromosome);
        Self {
            chromosome,
            fitness,
        }
    }

    /// A uniformly random permutation of the instance's customers.
    pub fn random<R: Rng>(evaluator: &Evaluator<'_>, rng: &mut R) -> Self {
        let mut chromosome = evaluator.identity_chromosome();
        shuffle(&mut chromosome, rng);
        Self::evaluated(chromosome, evaluator)
    }
}
