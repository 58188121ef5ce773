//! Tabu memory and move records.

use std::collections::HashMap;

/// Unordered pair of customer ids, stored smaller-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerPair(usize, usize);

impl CustomerPair {
    /// Normalizes `(a, b)` so that `(a, b)` and `(b, a)` compare equal.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller id.
    pub fn first(&self) -> usize {
        self.0
    }

    /// The larger id.
    pub fn second(&self) -> usize {
        self.1
    }
}

/// Short-term memory: customer pair → iteration at which it stops being tabu.
///
/// A pair recorded at iteration `t` with tenure `k` is tabu for every
/// iteration `u` with `u < t + k`.
#[derive(Debug, Clone, Default)]
pub struct TabuMemory {
    expiry: HashMap<CustomerPair, usize>,
}

impl TabuMemory {
    /// Empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `pair` is forbidden at `iteration`.
    pub fn is_tabu(&self, pair: CustomerPair, iteration: usize) -> bool {
        self.expiry.get(&pair).is_some_and(|&exp| exp > iteration)
    }

    /// Forbids `pair` until `iteration + tenure`.
    pub fn record(&mut self, pair: CustomerPair, iteration: usize, tenure: usize) {
        self.expiry.insert(pair, iteration + tenure);
    }

    /// Drops entries that are no longer tabu at `iteration`.
    pub fn prune(&mut self, iteration: usize) {
        self.expiry.retain(|_, exp| *exp > iteration);
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    /// Whether the memory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }
}

/// One accepted move of a tabu run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuStep {
    /// 1-based iteration index.
    pub iteration: usize,
    /// Customers exchanged by the move.
    pub pair: CustomerPair,
    /// Fitness after the move.
    pub fitness: f64,
    /// Global best fitness before the move.
    pub best_before: f64,
    /// Whether the move was tabu and admitted by aspiration.
    pub aspirated: bool,
}

/// Why a tabu run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TabuStop {
    /// `max_iterations` reached.
    MaxIterations,
    /// `max_no_improve` consecutive iterations without a new best.
    NoImprovement,
    /// Every neighbor was tabu and none qualified for aspiration.
    NoAdmissibleMove,
}
