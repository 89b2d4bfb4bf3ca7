//! Population dispersion metrics.
//!
//! Used for reporting only: neither measure feeds back into selection or
//! replacement.

use super::types::Individual;

/// Which dispersion measure to record per generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiversityMeasure {
    /// Mean over dimensions of the per-dimension population standard deviation.
    ///
    /// # Complexity
    /// O(N·D)
    #[default]
    StdDev,

    /// Mean Euclidean distance over all unordered pairs of individuals.
    ///
    /// # Complexity
    /// O(N²·D)
    PairwiseDistance,
}

impl DiversityMeasure {
    /// Evaluates the measure on `population`.
    pub fn measure(&self, population: &[Individual]) -> f64 {
        match self {
            DiversityMeasure::StdDev => std_diversity(population),
            DiversityMeasure::PairwiseDistance => pairwise_diversity(population),
        }
    }
}

/// Mean of the per-dimension (population) standard deviations.
///
/// Returns 0 for an empty population and exactly 0 when every individual is
/// identical.
///
/// # Panics
/// Panics if individuals have different lengths.
pub fn std_diversity(population: &[Individual]) -> f64 {
    let Some(first) = population.first() else {
        return 0.0;
    };
    let dims = first.len();
    if dims == 0 {
        return 0.0;
    }
    let n = population.len() as f64;

    let total: f64 = (0..dims)
        .map(|d| {
            // Shift by the first sample so identical columns give exactly zero.
            let shift = first[d];
            let mean = population.iter().map(|ind| ind[d] - shift).sum::<f64>() / n;
            let var = population
                .iter()
                .map(|ind| {
                    let dev = ind[d] - shift - mean;
                    dev * dev
                })
                .sum::<f64>()
                / n;
            var.sqrt()
        })
        .sum();

    total / dims as f64
}

/// Mean Euclidean distance over all pairs `(i, j)` with `i < j`.
///
/// Returns 0 for populations of size 0 or 1.
pub fn pairwise_diversity(population: &[Individual]) -> f64 {
    let n = population.len();
    if n <= 1 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += euclidean(&population[i], &population[j]);
        }
    }
    let pairs = (n * (n - 1) / 2) as f64;
    sum / pairs
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
