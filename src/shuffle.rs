//! Top-slice shuffling: the one nondeterministic step of assembly.
//!
//! The permutation source is pluggable so tests can pin the order with
//! [`IdentityShuffler`] or a seeded [`RandomShuffler`].

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Uniform in-place permutation of a slice.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Fisher-Yates over an RNG (`SliceRandom::shuffle`).
#[derive(Debug, Clone)]
pub struct RandomShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomShuffler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomShuffler<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl RandomShuffler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves order untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Permute the first `top` entries; the tail keeps its rank order.
pub fn shuffle_top<T, S: Shuffler>(items: &mut [T], top: usize, shuffler: &mut S) {
    let k = top.min(items.len());
    shuffler.shuffle(&mut items[..k]);
}
