//! Sources of uniform random indices.

use rand::Rng;

/// Picks a uniform index in `[0, bound)`.
///
/// Callers never pass a zero bound.
pub trait RandomSource: Send + Sync {
    fn next_index(&self, bound: usize) -> usize;
}

/// Thread-local RNG backed source.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}
