//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates one complete run:
//! initialization → (fitness → roulette → crossover + mutation → evaluation
//! → replacement → record) × G → final report.
//!
//! The loop is strictly sequential and every random draw comes from the one
//! generator seeded by [`GaConfig::seed`], in this order per generation:
//! roulette draws, then for each parent pair the crossover draws followed by
//! the mutation draws of child 1 and child 2.

use super::config::GaConfig;
use super::crossover::Crossover;
use super::mutation::mutate;
use super::replacement::replace;
use super::selection::{roulette, to_fitness};
use super::types::{Bounds, Individual};
use crate::benchmarks::Benchmark;
use crate::error::{GaError, Result};
use crate::random::{create_rng, RandomStream};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// A black-box objective to minimize.
///
/// Implemented for every `Fn(&[f64]) -> f64`. The objective must be total on
/// the search domain, including its boundary.
pub trait Objective {
    fn evaluate(&self, genes: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, genes: &[f64]) -> f64 {
        self(genes)
    }
}

/// Statistics recorded at the end of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Lowest cost in the population.
    pub best_cost: f64,

    /// Mean cost of the population.
    pub mean_cost: f64,

    /// Population diversity, when a measure is configured.
    pub diversity: Option<f64>,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best individual of the final population.
    pub best: Individual,

    /// Lowest final cost.
    pub best_cost: f64,

    /// Highest final cost.
    pub worst_cost: f64,

    /// Mean final cost.
    pub mean_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// One entry per generation, in order.
    pub history: Vec<GenerationStats>,

    /// Wall-clock time spent in the generational loop.
    pub elapsed: Duration,

    /// Final population.
    pub population: Vec<Individual>,

    /// Final costs, index-aligned with `population`.
    pub costs: Vec<f64>,
}

impl GaResult {
    /// Best cost per generation.
    pub fn best_curve(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.best_cost).collect()
    }

    /// Mean cost per generation.
    pub fn mean_curve(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.mean_cost).collect()
    }

    /// Diversity per generation (empty when diversity was not recorded).
    pub fn diversity_curve(&self) -> Vec<f64> {
        self.history.iter().filter_map(|s| s.diversity).collect()
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_realga::benchmarks::Benchmark;
/// use u_realga::ga::{CrossoverKind, GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_dimension(3)
///     .with_population_size(20)
///     .with_generations(30)
///     .with_crossover(CrossoverKind::Sbx { eta_c: 10.0 });
/// let result = GaRunner::run_benchmark(Benchmark::Sphere, &config).unwrap();
/// assert_eq!(result.history.len(), 30);
/// assert!(result.best_cost <= result.mean_cost);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs a registered benchmark by name.
    ///
    /// # Errors
    /// [`GaError::UnknownBenchmark`] if the name is not registered, plus every
    /// error of [`run_benchmark`](Self::run_benchmark).
    pub fn run_named(name: &str, config: &GaConfig) -> Result<GaResult> {
        let benchmark: Benchmark = name.parse()?;
        Self::run_benchmark(benchmark, config)
    }

    /// Runs a built-in benchmark over its conventional domain.
    pub fn run_benchmark(benchmark: Benchmark, config: &GaConfig) -> Result<GaResult> {
        if config.dimension < benchmark.min_dimension() {
            return Err(GaError::invalid(
                "dimension",
                config.dimension as f64,
                "below the benchmark's minimum dimension",
            ));
        }
        let objective = benchmark.objective();
        Self::run(&objective, benchmark.bounds(), config)
    }

    /// Runs the GA on an arbitrary objective over `bounds`.
    ///
    /// # Errors
    /// Configuration errors from [`GaConfig::validate`] are returned before
    /// any state is created.
    #[instrument(
        level = "debug",
        skip(objective, config),
        fields(
            d = config.dimension,
            n = config.population_size,
            g = config.generations,
            crossover = %config.crossover,
            seed = config.seed
        )
    )]
    pub fn run<O: Objective + ?Sized>(
        objective: &O,
        bounds: Bounds,
        config: &GaConfig,
    ) -> Result<GaResult> {
        config.validate()?;

        let n = config.population_size;
        let pm = config.effective_mutation_rate();
        let crossover = Crossover::new(
            config.crossover,
            config.crossover_rate,
            config.clip_offspring.then_some(bounds),
        )?;
        let mut rng = create_rng(config.seed);

        // 1. Initialize and evaluate
        let mut population: Vec<Individual> = (0..n)
            .map(|_| random_individual(config.dimension, bounds, &mut rng))
            .collect();
        let mut costs = evaluate_population(objective, &population);

        info!(
            d = config.dimension,
            n = n,
            g = config.generations,
            pm = pm,
            best = min_cost(&costs),
            "run started"
        );
        let mut history = Vec::with_capacity(config.generations);
        let started = Instant::now();

        // 2. Evolutionary loop
        for gen in 0..config.generations {
            let fitnesses = to_fitness(&costs);
            let parents = roulette(&population, &fitnesses, n, &mut rng)?;

            let offspring = breed(
                &parents,
                &crossover,
                pm,
                bounds,
                config.mutation_amplitude,
                &mut rng,
            )?;
            let offspring_costs = evaluate_population(objective, &offspring);

            let (next_population, next_costs) = replace(
                &population,
                &costs,
                &offspring,
                &offspring_costs,
                config.replacement_fraction,
                config.elitism,
            )?;
            population = next_population;
            costs = next_costs;

            let stats = GenerationStats {
                generation: gen + 1,
                best_cost: min_cost(&costs),
                mean_cost: mean(&costs),
                diversity: config.diversity.map(|m| m.measure(&population)),
            };
            debug!(
                generation = stats.generation,
                best = stats.best_cost,
                mean = stats.mean_cost,
                diversity = ?stats.diversity,
                "generation complete"
            );
            history.push(stats);
        }

        let elapsed = started.elapsed();

        // 3. Final report
        let best_idx = argmin(&costs);
        let result = GaResult {
            best: population[best_idx].clone(),
            best_cost: costs[best_idx],
            worst_cost: costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_cost: mean(&costs),
            generations: config.generations,
            history,
            elapsed,
            population,
            costs,
        };
        info!(
            best = result.best_cost,
            worst = result.worst_cost,
            mean = result.mean_cost,
            elapsed_ms = result.elapsed.as_secs_f64() * 1e3,
            "run finished"
        );
        Ok(result)
    }
}

/// Pairs parents `(i, (i + 1) mod N)` for even `i`, applies crossover then
/// mutation to both children, and truncates to exactly `N` offspring.
fn breed<R: Rng>(
    parents: &[Individual],
    crossover: &Crossover,
    pm: f64,
    bounds: Bounds,
    amplitude: f64,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    let n = parents.len();
    let mut offspring = Vec::with_capacity(n + 1);

    for i in (0..n).step_by(2) {
        let p1 = &parents[i];
        let p2 = &parents[(i + 1) % n];

        let (c1, c2) = crossover.apply(p1, p2, rng)?;
        offspring.push(mutate(&c1, pm, bounds, amplitude, rng)?);
        offspring.push(mutate(&c2, pm, bounds, amplitude, rng)?);
    }

    offspring.truncate(n);
    Ok(offspring)
}

fn random_individual<R: Rng>(dimension: usize, bounds: Bounds, rng: &mut R) -> Individual {
    (0..dimension)
        .map(|_| rng.uniform(bounds.lower(), bounds.upper()))
        .collect()
}

fn evaluate_population<O: Objective + ?Sized>(
    objective: &O,
    population: &[Individual],
) -> Vec<f64> {
    population.iter().map(|ind| objective.evaluate(ind)).collect()
}

/// Index of the first lowest cost; NaN ranks above every number.
fn argmin(costs: &[f64]) -> usize {
    let mut best = 0;
    for (i, c) in costs.iter().enumerate().skip(1) {
        if c.total_cmp(&costs[best]).is_lt() {
            best = i;
        }
    }
    best
}

fn min_cost(costs: &[f64]) -> f64 {
    costs.iter().copied().fold(f64::INFINITY, f64::min)
}

fn mean(costs: &[f64]) -> f64 {
    if costs.is_empty() {
        return 0.0;
    }
    costs.iter().sum::<f64>() / costs.len() as f64
}

// ============================================================================
// Tests
// ============================================================================
