//! Elitist generational replacement.
//!
//! Builds the next population from the current one and a batch of evaluated
//! offspring. Two regimes exist, selected by how many slots the replacement
//! fraction opens up:
//!
//! - **Full** (`k == N`): the `N` best offspring form the new population, and
//!   the single best parent may reclaim the worst slot if it is strictly
//!   better. Only one slot is ever reclaimed, whatever the elitism count.
//! - **Partial** (`0 < k < N`): the `e` best parents are protected; the `k`
//!   worst of the rest are overwritten by the `k` best offspring, worst slot
//!   first. Incoming offspring are not compared against the parents they
//!   displace.
//!
//! Individuals and costs always leave index-aligned.

use super::types::{ensure_same_len, Individual};
use crate::error::Result;
use std::cmp::Ordering;
use tracing::{instrument, trace};

/// Produces the next `(population, costs)` pair.
///
/// `fraction` is clamped to `[0, 1]` and yields `k = floor(N * fraction)`
/// slots, capped at the number of offspring. `k == 0` returns copies of the
/// current generation.
///
/// # Errors
/// [`GaError::DimensionMismatch`](crate::GaError::DimensionMismatch) if either
/// population/cost pair is misaligned.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        n = population.len(),
        offspring = offspring.len(),
        fraction = fraction,
        elitism = elitism
    )
)]
pub fn replace(
    population: &[Individual],
    costs: &[f64],
    offspring: &[Individual],
    offspring_costs: &[f64],
    fraction: f64,
    elitism: usize,
) -> Result<(Vec<Individual>, Vec<f64>)> {
    ensure_same_len("population costs", population, costs)?;
    ensure_same_len("offspring costs", offspring, offspring_costs)?;

    let n = population.len();
    let fraction = fraction.clamp(0.0, 1.0);
    let k = ((n as f64 * fraction).floor() as usize).min(offspring.len());
    let elite = elitism.min(n);

    if k == 0 {
        return Ok((population.to_vec(), costs.to_vec()));
    }
    if k == n {
        return Ok(full_replacement(
            population,
            costs,
            offspring,
            offspring_costs,
            elite,
        ));
    }
    Ok(partial_replacement(
        population,
        costs,
        offspring,
        offspring_costs,
        k,
        elite,
    ))
}

fn full_replacement(
    population: &[Individual],
    costs: &[f64],
    offspring: &[Individual],
    offspring_costs: &[f64],
    elite: usize,
) -> (Vec<Individual>, Vec<f64>) {
    let n = population.len();
    let ranked = rank_ascending(offspring_costs);

    let mut next_pop: Vec<Individual> = ranked[..n].iter().map(|&i| offspring[i].clone()).collect();
    let mut next_costs: Vec<f64> = ranked[..n].iter().map(|&i| offspring_costs[i]).collect();

    if elite >= 1 {
        let worst = first_max(&next_costs);
        let champion = rank_ascending(costs)[0];
        if costs[champion].total_cmp(&next_costs[worst]) == Ordering::Less {
            trace!(
                parent = champion,
                slot = worst,
                cost = costs[champion],
                "elite parent reclaims worst slot"
            );
            next_pop[worst] = population[champion].clone();
            next_costs[worst] = costs[champion];
        }
    }

    (next_pop, next_costs)
}

fn partial_replacement(
    population: &[Individual],
    costs: &[f64],
    offspring: &[Individual],
    offspring_costs: &[f64],
    k: usize,
    elite: usize,
) -> (Vec<Individual>, Vec<f64>) {
    let parent_rank = rank_ascending(costs);
    let child_rank = rank_ascending(offspring_costs);

    let mut next_pop = population.to_vec();
    let mut next_costs = costs.to_vec();

    let replaceable = &parent_rank[elite..];
    let worst_first = replaceable.iter().rev();
    for (&slot, &child) in worst_first.zip(child_rank.iter()).take(k) {
        next_pop[slot] = offspring[child].clone();
        next_costs[slot] = offspring_costs[child];
    }

    (next_pop, next_costs)
}

/// Indices sorted by ascending cost; ties keep their original order.
fn rank_ascending(costs: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..costs.len()).collect();
    idx.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
    idx
}

/// Index of the first occurrence of the largest cost.
fn first_max(costs: &[f64]) -> usize {
    let mut worst = 0;
    for (i, c) in costs.iter().enumerate().skip(1) {
        if c.total_cmp(&costs[worst]) == Ordering::Greater {
            worst = i;
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaError;

    fn tagged(costs: &[f64]) -> Vec<Individual> {
        costs.iter().map(|&c| vec![c]).collect()
    }

    fn assert_aligned(pop: &[Individual], costs: &[f64]) {
        assert_eq!(pop.len(), costs.len());
        for (ind, &c) in pop.iter().zip(costs) {
            assert_eq!(ind[0], c, "individual and cost drifted apart");
        }
    }

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(f64::total_cmp);
        v
    }

    #[test]
    fn test_full_replacement_elite_reclaims_slot() {
        let parent_costs = [5.0, 1.0, 9.0, 3.0];
        let child_costs = [2.0, 2.0, 2.0, 2.0];
        let (pop, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            1,
        )
        .unwrap();
        assert_eq!(sorted(costs.clone()), vec![1.0, 2.0, 2.0, 2.0]);
        assert_eq!(costs[0], 1.0, "first worst slot is reclaimed");
        assert_aligned(&pop, &costs);
    }

    #[test]
    fn test_full_replacement_keeps_better_offspring() {
        let parent_costs = [5.0, 4.0, 9.0];
        let child_costs = [3.0, 1.0, 2.0];
        let (pop, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 2.0, 3.0]);
        assert_aligned(&pop, &costs);
    }

    #[test]
    fn test_full_replacement_reclaims_only_one_slot() {
        let parent_costs = [0.1, 0.2, 0.3, 0.4];
        let child_costs = [7.0, 8.0, 9.0, 6.0];
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            3,
        )
        .unwrap();
        assert_eq!(costs, vec![6.0, 7.0, 8.0, 0.1]);
    }

    #[test]
    fn test_full_replacement_without_elitism() {
        let parent_costs = [0.1, 0.2];
        let child_costs = [7.0, 8.0];
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            0,
        )
        .unwrap();
        assert_eq!(costs, vec![7.0, 8.0]);
    }

    #[test]
    fn test_full_replacement_truncates_extra_offspring() {
        let parent_costs = [5.0, 6.0];
        let child_costs = [4.0, 9.0, 1.0];
        let (pop, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 4.0]);
        assert_aligned(&pop, &costs);
    }

    #[test]
    fn test_zero_fraction_is_noop() {
        let parent_costs = [5.0, 1.0, 9.0];
        let child_costs = [0.0, 0.0, 0.0];
        let parents = tagged(&parent_costs);
        let (pop, costs) =
            replace(&parents, &parent_costs, &tagged(&child_costs), &child_costs, 0.0, 1).unwrap();
        assert_eq!(pop, parents);
        assert_eq!(costs, parent_costs.to_vec());
    }

    #[test]
    fn test_fraction_clamped() {
        let parent_costs = [5.0, 1.0];
        let child_costs = [0.5, 0.7];
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            3.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![0.5, 0.7]);

        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            -1.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, parent_costs.to_vec());
    }

    #[test]
    fn test_partial_replacement_worst_gets_best() {
        // k = floor(6 * 0.5) = 3; elite parent is index 1 (cost 1).
        let parent_costs = [5.0, 1.0, 9.0, 3.0, 7.0, 2.0];
        let child_costs = [4.0, 0.5, 8.0, 0.7, 6.0, 0.6];
        let (pop, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            0.5,
            1,
        )
        .unwrap();
        // Worst three non-elite parents: 9.0 (idx 2), 7.0 (idx 4), 5.0 (idx 0).
        assert_eq!(costs, vec![0.7, 1.0, 0.5, 3.0, 0.6, 2.0]);
        assert_aligned(&pop, &costs);
    }

    #[test]
    fn test_partial_replacement_protects_elites() {
        let parent_costs = [1.0, 2.0, 3.0, 4.0];
        let child_costs = [0.0, 0.0, 0.0];
        // k = 3 but only two non-elite slots exist when elitism = 2.
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            0.75,
            2,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_partial_replacement_accepts_worse_offspring() {
        // Unlike the full regime, displaced parents are not compared to the
        // incoming offspring: worse children still take the open slots.
        let parent_costs = [1.0, 2.0, 3.0, 4.0];
        let child_costs = [40.0, 10.0, 30.0, 20.0];
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            0.5,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 2.0, 20.0, 10.0]);
    }

    #[test]
    fn test_fewer_offspring_than_population() {
        // fraction 1.0 but only two offspring: k is capped to 2 < N.
        let parent_costs = [1.0, 2.0, 3.0, 4.0];
        let child_costs = [0.5, 0.25];
        let (_, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &tagged(&child_costs),
            &child_costs,
            1.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 2.0, 0.5, 0.25]);
    }

    #[test]
    fn test_elite_reclaims_nan_slot() {
        let parent_costs = [0.5, 3.0];
        let child_costs = [1.0, f64::NAN];
        let (pop, costs) = replace(
            &tagged(&parent_costs),
            &parent_costs,
            &[vec![1.0], vec![f64::NAN]],
            &child_costs,
            1.0,
            1,
        )
        .unwrap();
        assert_eq!(costs, vec![1.0, 0.5]);
        assert_eq!(pop[1], vec![0.5]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = replace(&tagged(&[1.0, 2.0]), &[1.0], &[], &[], 1.0, 1).unwrap_err();
        assert!(matches!(err, GaError::DimensionMismatch { .. }));
        let err = replace(&tagged(&[1.0]), &[1.0], &tagged(&[1.0]), &[], 1.0, 1).unwrap_err();
        assert!(matches!(err, GaError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_elitism_never_regresses() {
        let parent_costs = [0.3, 0.9, 0.5];
        for fraction in [0.34, 0.67, 1.0] {
            let child_costs = [1.0, 2.0, 3.0];
            let (_, costs) = replace(
                &tagged(&parent_costs),
                &parent_costs,
                &tagged(&child_costs),
                &child_costs,
                fraction,
                1,
            )
            .unwrap();
            let best = costs.iter().cloned().fold(f64::INFINITY, f64::min);
            assert!(best <= 0.3, "fraction {fraction}: best regressed to {best}");
        }
    }
}
