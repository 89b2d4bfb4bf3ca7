//! Bounded uniform mutation for real vectors.

use super::types::{Bounds, Individual};
use crate::error::{check_probability, GaError, Result};
use crate::random::RandomStream;
use rand::Rng;

/// Default perturbation amplitude, relative to the domain width.
pub const DEFAULT_AMPLITUDE: f64 = 0.1;

/// Returns a mutated copy of `individual`.
///
/// Each gene is selected independently with probability `pm`. A selected gene
/// receives noise drawn uniformly from `[-amplitude*(b-a), amplitude*(b-a)]`
/// and is then clamped into `bounds`. Unselected genes are copied unchanged.
///
/// # Errors
/// [`GaError::InvalidParameter`] if `pm` is outside `[0, 1]` or `amplitude`
/// is negative or not finite.
pub fn mutate<R: Rng>(
    individual: &[f64],
    pm: f64,
    bounds: Bounds,
    amplitude: f64,
    rng: &mut R,
) -> Result<Individual> {
    check_probability("mutation_rate", pm)?;
    check_amplitude(amplitude)?;

    let max_step = amplitude * bounds.width();
    let mutated = individual
        .iter()
        .map(|&gene| {
            if rng.bernoulli_less_than(pm) {
                bounds.clamp(gene + rng.uniform(-max_step, max_step))
            } else {
                gene
            }
        })
        .collect();
    Ok(mutated)
}

pub(crate) fn check_amplitude(amplitude: f64) -> Result<()> {
    if amplitude.is_finite() && amplitude >= 0.0 {
        Ok(())
    } else {
        Err(GaError::invalid(
            "mutation_amplitude",
            amplitude,
            "must be finite and non-negative",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_zero_rate_is_copy() {
        let mut rng = create_rng(42);
        let ind = vec![0.5, -1.0, 2.0];
        let bounds = Bounds::new(-5.0, 5.0).unwrap();
        assert_eq!(mutate(&ind, 0.0, bounds, 0.1, &mut rng).unwrap(), ind);
    }

    #[test]
    fn test_full_rate_changes_every_gene() {
        let mut rng = create_rng(42);
        let ind = vec![0.0; 8];
        let bounds = Bounds::new(-5.0, 5.0).unwrap();
        let out = mutate(&ind, 1.0, bounds, 0.1, &mut rng).unwrap();
        for v in out {
            assert!(v != 0.0 && v.abs() <= 1.0, "step exceeds amplitude: {v}");
        }
    }

    #[test]
    fn test_clamps_at_edges() {
        let mut rng = create_rng(42);
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        let ind = vec![1.0; 50];
        let out = mutate(&ind, 1.0, bounds, 0.5, &mut rng).unwrap();
        assert!(out.iter().all(|&v| bounds.contains(v)));
        assert!(out.iter().any(|&v| v == 1.0), "upward steps must clamp to upper");
    }

    #[test]
    fn test_rejects_bad_rate_and_amplitude() {
        let mut rng = create_rng(42);
        let bounds = Bounds::new(0.0, 1.0).unwrap();
        assert!(matches!(
            mutate(&[0.5], 1.5, bounds, 0.1, &mut rng),
            Err(GaError::InvalidParameter { name: "mutation_rate", .. })
        ));
        assert!(matches!(
            mutate(&[0.5], 0.5, bounds, -1.0, &mut rng),
            Err(GaError::InvalidParameter { name: "mutation_amplitude", .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_output_within_bounds(
            genes in prop::collection::vec(-10.0f64..10.0, 1..20),
            pm in 0.0f64..=1.0,
            amplitude in 0.0f64..2.0,
            seed in any::<u64>(),
        ) {
            let bounds = Bounds::new(-3.0, 3.0).unwrap();
            let genes: Vec<f64> = genes.iter().map(|&g| bounds.clamp(g)).collect();
            let mut rng = create_rng(seed);
            let out = mutate(&genes, pm, bounds, amplitude, &mut rng).unwrap();
            prop_assert_eq!(out.len(), genes.len());
            prop_assert!(out.iter().all(|&v| bounds.contains(v)));
        }
    }
}
