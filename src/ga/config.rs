//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of a single run. It is built before the
//! run, validated once by the runner, and never modified while the run is in
//! progress.

use super::crossover::CrossoverKind;
use super::diversity::DiversityMeasure;
use super::mutation::{check_amplitude, DEFAULT_AMPLITUDE};
use crate::error::{check_probability, GaError, Result};

/// Configuration for one real-coded GA run.
///
/// # Defaults
///
/// ```
/// use u_realga::ga::{CrossoverKind, GaConfig};
///
/// let config = GaConfig::default();
/// assert_eq!(config.dimension, 10);
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.crossover, CrossoverKind::Blx { alpha: 0.5 });
/// assert!((config.effective_mutation_rate() - 0.1).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_realga::ga::{CrossoverKind, GaConfig};
///
/// let config = GaConfig::default()
///     .with_dimension(5)
///     .with_population_size(30)
///     .with_generations(200)
///     .with_crossover(CrossoverKind::Sbx { eta_c: 15.0 })
///     .with_seed(123);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genes per individual (`D`).
    pub dimension: usize,

    /// Number of individuals in the population (`N`).
    pub population_size: usize,

    /// Number of generations to evolve (`G`).
    pub generations: usize,

    /// Crossover operator and its parameters.
    pub crossover: CrossoverKind,

    /// Probability that a parent pair is recombined (`pc`).
    pub crossover_rate: f64,

    /// Per-gene mutation probability (`pm`).
    ///
    /// `None` uses `1 / dimension`.
    pub mutation_rate: Option<f64>,

    /// Mutation step limit as a fraction of the domain width.
    pub mutation_amplitude: f64,

    /// Fraction of the population replaced each generation, in `[0, 1]`.
    ///
    /// `1.0` is full generational replacement.
    pub replacement_fraction: f64,

    /// Number of best parents protected from replacement.
    pub elitism: usize,

    /// Diversity measure recorded per generation; `None` skips it.
    pub diversity: Option<DiversityMeasure>,

    /// Whether BLX-α and SBX clamp their offspring into the run bounds.
    ///
    /// When `false`, crossover output may leave the domain until mutation
    /// clamps the genes it touches.
    pub clip_offspring: bool,

    /// Random seed; the same seed replays the same run.
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            dimension: 10,
            population_size: 50,
            generations: 1000,
            crossover: CrossoverKind::default(),
            crossover_rate: 0.9,
            mutation_rate: None,
            mutation_amplitude: DEFAULT_AMPLITUDE,
            replacement_fraction: 1.0,
            elitism: 1,
            diversity: Some(DiversityMeasure::StdDev),
            clip_offspring: false,
            seed: 42,
        }
    }
}

impl GaConfig {
    /// Sets the problem dimension.
    pub fn with_dimension(mut self, d: usize) -> Self {
        self.dimension = d;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, g: usize) -> Self {
        self.generations = g;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, kind: CrossoverKind) -> Self {
        self.crossover = kind;
        self
    }

    /// Sets the pair-level crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets an explicit per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = Some(rate);
        self
    }

    /// Sets the mutation amplitude.
    pub fn with_mutation_amplitude(mut self, amplitude: f64) -> Self {
        self.mutation_amplitude = amplitude;
        self
    }

    /// Sets the replacement fraction, clamped to `[0, 1]`.
    pub fn with_replacement_fraction(mut self, fraction: f64) -> Self {
        self.replacement_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism count.
    pub fn with_elitism(mut self, e: usize) -> Self {
        self.elitism = e;
        self
    }

    /// Sets the diversity measure (`None` disables recording).
    pub fn with_diversity(mut self, measure: Option<DiversityMeasure>) -> Self {
        self.diversity = measure;
        self
    }

    /// Enables or disables clamping of BLX-α/SBX offspring.
    pub fn with_clip_offspring(mut self, clip: bool) -> Self {
        self.clip_offspring = clip;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The per-gene mutation probability actually used: the explicit rate, or
    /// `1 / dimension` when unset.
    pub fn effective_mutation_rate(&self) -> f64 {
        self.mutation_rate
            .unwrap_or_else(|| 1.0 / self.dimension.max(1) as f64)
    }

    /// Validates the configuration.
    ///
    /// Out-of-range probabilities and sizes are errors. The replacement
    /// fraction is the exception: any non-NaN value is accepted and clamped
    /// to `[0, 1]` when replacement runs.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(GaError::invalid("dimension", 0.0, "must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(GaError::invalid("population_size", 0.0, "must be at least 1"));
        }
        if self.generations == 0 {
            return Err(GaError::invalid("generations", 0.0, "must be at least 1"));
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        if let Some(pm) = self.mutation_rate {
            check_probability("mutation_rate", pm)?;
        }
        check_amplitude(self.mutation_amplitude)?;
        if self.replacement_fraction.is_nan() {
            return Err(GaError::invalid(
                "replacement_fraction",
                self.replacement_fraction,
                "must be a number",
            ));
        }
        self.crossover.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.dimension, 10);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.generations, 1000);
        assert!((config.crossover_rate - 0.9).abs() < 1e-12);
        assert!(config.mutation_rate.is_none());
        assert!((config.mutation_amplitude - 0.1).abs() < 1e-12);
        assert!((config.replacement_fraction - 1.0).abs() < 1e-12);
        assert_eq!(config.elitism, 1);
        assert_eq!(config.diversity, Some(DiversityMeasure::StdDev));
        assert!(!config.clip_offspring);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_dimension(4)
            .with_population_size(12)
            .with_generations(7)
            .with_crossover(CrossoverKind::Uniform)
            .with_crossover_rate(0.6)
            .with_mutation_rate(0.3)
            .with_mutation_amplitude(0.05)
            .with_replacement_fraction(0.5)
            .with_elitism(2)
            .with_diversity(None)
            .with_clip_offspring(true)
            .with_seed(9);

        assert_eq!(config.dimension, 4);
        assert_eq!(config.population_size, 12);
        assert_eq!(config.generations, 7);
        assert_eq!(config.crossover, CrossoverKind::Uniform);
        assert!((config.crossover_rate - 0.6).abs() < 1e-12);
        assert_eq!(config.mutation_rate, Some(0.3));
        assert!((config.effective_mutation_rate() - 0.3).abs() < 1e-12);
        assert!((config.replacement_fraction - 0.5).abs() < 1e-12);
        assert_eq!(config.elitism, 2);
        assert!(config.diversity.is_none());
        assert!(config.clip_offspring);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_default_mutation_rate_follows_dimension() {
        let config = GaConfig::default().with_dimension(4);
        assert!((config.effective_mutation_rate() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_replacement_fraction_clamped() {
        assert_eq!(
            GaConfig::default().with_replacement_fraction(1.7).replacement_fraction,
            1.0
        );
        assert_eq!(
            GaConfig::default().with_replacement_fraction(-0.2).replacement_fraction,
            0.0
        );
    }

    #[test]
    fn test_out_of_range_fraction_accepted() {
        let mut config = GaConfig::default();
        config.replacement_fraction = 1.5;
        assert!(config.validate().is_ok());
        config.replacement_fraction = -3.0;
        assert!(config.validate().is_ok());
        config.replacement_fraction = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(GaError::InvalidParameter { name: "replacement_fraction", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        assert!(GaConfig::default().with_dimension(0).validate().is_err());
        assert!(GaConfig::default().with_population_size(0).validate().is_err());
        assert!(GaConfig::default().with_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_probabilities() {
        let err = GaConfig::default()
            .with_crossover_rate(1.2)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GaError::InvalidParameter { name: "crossover_rate", .. }));

        let err = GaConfig::default()
            .with_mutation_rate(-0.1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, GaError::InvalidParameter { name: "mutation_rate", .. }));
    }

    #[test]
    fn test_validate_rejects_bad_operator_params() {
        let config = GaConfig::default().with_crossover(CrossoverKind::Sbx { eta_c: -1.0 });
        assert!(config.validate().is_err());
        let config = GaConfig::default().with_crossover(CrossoverKind::Blx { alpha: f64::NAN });
        assert!(config.validate().is_err());
        let config = GaConfig::default().with_mutation_amplitude(-0.5);
        assert!(config.validate().is_err());
    }
}
