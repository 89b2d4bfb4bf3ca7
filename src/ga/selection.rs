//! Fitness transform and roulette-wheel parent selection.
//!
//! Costs are minimized; selection needs positive weights that grow as cost
//! shrinks. [`to_fitness`] performs the inversion and [`roulette`] draws the
//! parent pool proportionally to it.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette-wheel selection)

use super::types::{ensure_same_len, Individual};
use crate::error::{GaError, Result};
use crate::random::RandomStream;
use rand::Rng;

/// Stabilizer added to the cost before inversion.
pub const FITNESS_EPSILON: f64 = 1e-6;

/// Maps minimization costs to strictly positive selection weights.
///
/// `fitness = 1 / (max(0, cost) + FITNESS_EPSILON)`. Negative costs are floored
/// to zero, so the largest possible weight is `1 / FITNESS_EPSILON`. A NaN cost
/// maps to weight 0 and is never drawn unless every weight is 0.
///
/// ```
/// use u_realga::ga::to_fitness;
///
/// let f = to_fitness(&[0.0, 1.0, -3.0]);
/// assert!(f[0] > f[1]);
/// assert_eq!(f[0], f[2]);
/// ```
pub fn to_fitness(costs: &[f64]) -> Vec<f64> {
    costs
        .iter()
        .map(|&c| {
            if c.is_nan() {
                0.0
            } else {
                1.0 / (c.max(0.0) + FITNESS_EPSILON)
            }
        })
        .collect()
}

/// Roulette-wheel selection with replacement.
///
/// Returns `k` copies drawn independently, each with probability proportional
/// to its fitness. When the total fitness is exactly zero the draw falls back
/// to uniform sampling with replacement.
///
/// # Errors
/// - [`GaError::DimensionMismatch`] if `population` and `fitnesses` differ in length
/// - [`GaError::InvalidWeights`] if any fitness is negative or NaN
/// - [`GaError::InvalidParameter`] if `k > 0` but the population is empty
pub fn roulette<R: Rng>(
    population: &[Individual],
    fitnesses: &[f64],
    k: usize,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    ensure_same_len("roulette fitnesses", population, fitnesses)?;
    if let Some(bad) = fitnesses.iter().find(|f| f.is_nan() || **f < 0.0) {
        return Err(GaError::InvalidWeights(format!(
            "roulette requires non-negative fitness, found {bad}"
        )));
    }
    if population.is_empty() {
        if k == 0 {
            return Ok(Vec::new());
        }
        return Err(GaError::invalid(
            "k",
            k as f64,
            "cannot select from an empty population",
        ));
    }

    let total: f64 = fitnesses.iter().sum();
    if total == 0.0 {
        return Ok(rng.uniform_choice(population, k));
    }
    rng.weighted_choice(population, fitnesses, k)
}
