//! Seeded random source shared by every stochastic operator.
//!
//! A run owns exactly one generator, created by [`create_rng`] from the
//! configured seed, and threads it by `&mut` through initialization,
//! selection, crossover and mutation. Draw order is part of the
//! reproducibility contract: the same seed and configuration replay the
//! same run bit for bit.

use crate::error::{GaError, Result};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates the deterministic generator used for one run.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Sampling primitives used by the GA operators.
///
/// Implemented for every [`Rng`], so any seeded generator can be passed
/// where an operator expects a random stream.
pub trait RandomStream {
    /// Uniform real in `[lo, hi)`; returns `lo` when the interval is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform integer in `[lo, hi]` (inclusive on both ends).
    ///
    /// # Panics
    /// Panics if `lo > hi`.
    fn uniform_int(&mut self, lo: usize, hi: usize) -> usize;

    /// `true` with probability `p`, computed as `uniform(0, 1) < p`.
    fn bernoulli_less_than(&mut self, p: f64) -> bool;

    /// `k` independent draws with replacement, each proportional to its weight.
    fn weighted_choice<T: Clone>(
        &mut self,
        items: &[T],
        weights: &[f64],
        k: usize,
    ) -> Result<Vec<T>>;

    /// `k` uniform draws with replacement.
    fn uniform_choice<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T>;
}

impl<R: Rng> RandomStream for R {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u: f64 = self.random();
        lo + (hi - lo) * u
    }

    fn uniform_int(&mut self, lo: usize, hi: usize) -> usize {
        self.random_range(lo..=hi)
    }

    fn bernoulli_less_than(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }

    fn weighted_choice<T: Clone>(
        &mut self,
        items: &[T],
        weights: &[f64],
        k: usize,
    ) -> Result<Vec<T>> {
        if items.len() != weights.len() {
            return Err(GaError::mismatch("weighted choice", items.len(), weights.len()));
        }
        if k == 0 {
            return Ok(Vec::new());
        }
        let dist =
            WeightedIndex::new(weights).map_err(|e| GaError::InvalidWeights(e.to_string()))?;
        Ok((0..k).map(|_| items[dist.sample(self)].clone()).collect())
    }

    fn uniform_choice<T: Clone>(&mut self, items: &[T], k: usize) -> Vec<T> {
        if items.is_empty() {
            return Vec::new();
        }
        let last = items.len() - 1;
        (0..k)
            .map(|_| items[self.uniform_int(0, last)].clone())
            .collect()
    }
}
