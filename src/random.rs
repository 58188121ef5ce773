//! Run-scoped random number generation.
//!
//! Every engine run owns exactly one generator, created here from a `u64`
//! seed. Nothing in the crate touches a thread-local or global RNG, so two
//! runs with the same seed draw the same sequence regardless of what else
//! runs concurrently.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The generator type threaded through all engines.
pub type SearchRng = StdRng;

/// Creates a generator seeded from `seed`.
pub fn create_rng(seed: u64) -> SearchRng {
    StdRng::seed_from_u64(seed)
}

/// Shuffles `slice` in place (Fisher–Yates).
pub fn shuffle<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    slice.shuffle(rng);
}

/// Draws two distinct indices from `0..n`.
///
/// Returns `None` when `n < 2`.
pub fn distinct_pair<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    Some((i, j))
}
