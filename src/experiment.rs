//! Batch experiments comparing crossover operators.
//!
//! An [`ExperimentPlan`] enumerates runs in benchmark → crossover →
//! repetition order and executes each one with its own seed. Results are
//! pushed into an [`ExperimentLog`] owned by the caller: one [`RunSummary`]
//! per run and, optionally, one [`GenerationTrace`] per generation. Nothing
//! is kept in global state; persisting the rows is left to the caller.
//!
//! With the `parallel` feature, independent runs execute concurrently on the
//! rayon pool. Each run still owns its generator and population, and the log
//! receives rows in the same order as the sequential path.

use crate::benchmarks::Benchmark;
use crate::error::{GaError, Result};
use crate::ga::{CrossoverKind, GaConfig, GaResult, GaRunner};
use std::collections::BTreeMap;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Seed of the `k`-th run of a plan (0-based, counted across the whole plan).
pub fn run_seed(k: usize) -> u64 {
    1000 * k as u64 + 123
}

/// A batch of runs over benchmarks, operators and repetitions.
///
/// ```
/// use u_realga::benchmarks::Benchmark;
/// use u_realga::experiment::{ExperimentLog, ExperimentPlan};
/// use u_realga::ga::{CrossoverKind, GaConfig};
///
/// let plan = ExperimentPlan::default()
///     .with_benchmarks(vec![Benchmark::Sphere])
///     .with_crossovers(vec![CrossoverKind::OnePoint, CrossoverKind::Uniform])
///     .with_repetitions(2)
///     .with_base(
///         GaConfig::default()
///             .with_dimension(3)
///             .with_population_size(10)
///             .with_generations(5),
///     );
///
/// let mut log = ExperimentLog::new();
/// plan.execute(&mut log).unwrap();
/// assert_eq!(log.summaries().len(), 4);
/// assert_eq!(log.traces().len(), 4 * 5);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentPlan {
    /// Benchmarks to sweep, outermost loop.
    pub benchmarks: Vec<Benchmark>,

    /// Crossover operators to compare.
    pub crossovers: Vec<CrossoverKind>,

    /// Independent runs per (benchmark, crossover) cell.
    pub repetitions: usize,

    /// Configuration shared by every run; `crossover` and `seed` are
    /// overridden per run.
    pub base: GaConfig,

    /// Whether per-generation rows are recorded.
    pub record_traces: bool,
}

impl Default for ExperimentPlan {
    fn default() -> Self {
        Self {
            benchmarks: vec![Benchmark::Sphere, Benchmark::Rastrigin, Benchmark::Rosenbrock],
            crossovers: CrossoverKind::ALL.to_vec(),
            repetitions: 20,
            base: GaConfig::default().with_generations(500),
            record_traces: true,
        }
    }
}

/// One scheduled run of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedRun {
    /// Position in the plan, 0-based.
    pub index: usize,
    pub benchmark: Benchmark,
    pub crossover: CrossoverKind,
    /// Repetition within the (benchmark, crossover) cell, 0-based.
    pub repetition: usize,
    pub seed: u64,
}

impl ExperimentPlan {
    pub fn with_benchmarks(mut self, benchmarks: Vec<Benchmark>) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    pub fn with_crossovers(mut self, crossovers: Vec<CrossoverKind>) -> Self {
        self.crossovers = crossovers;
        self
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_base(mut self, base: GaConfig) -> Self {
        self.base = base;
        self
    }

    pub fn with_traces(mut self, record: bool) -> Self {
        self.record_traces = record;
        self
    }

    /// Enumerates every run in execution order.
    pub fn runs(&self) -> Vec<PlannedRun> {
        let mut planned = Vec::with_capacity(
            self.benchmarks.len() * self.crossovers.len() * self.repetitions,
        );
        for &benchmark in &self.benchmarks {
            for &crossover in &self.crossovers {
                for repetition in 0..self.repetitions {
                    let index = planned.len();
                    planned.push(PlannedRun {
                        index,
                        benchmark,
                        crossover,
                        repetition,
                        seed: run_seed(index),
                    });
                }
            }
        }
        planned
    }

    /// The configuration a given run executes with.
    pub fn config_for(&self, run: &PlannedRun) -> GaConfig {
        self.base
            .clone()
            .with_crossover(run.crossover)
            .with_seed(run.seed)
    }

    /// Checks every run's configuration before anything executes.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        for kind in &self.crossovers {
            kind.validate()?;
        }
        for benchmark in &self.benchmarks {
            if self.base.dimension < benchmark.min_dimension() {
                return Err(GaError::invalid(
                    "dimension",
                    self.base.dimension as f64,
                    "below the benchmark's minimum dimension",
                ));
            }
        }
        Ok(())
    }

    /// Executes the plan and appends its rows to `log`.
    #[instrument(
        level = "info",
        skip_all,
        fields(runs = self.benchmarks.len() * self.crossovers.len() * self.repetitions)
    )]
    pub fn execute(&self, log: &mut ExperimentLog) -> Result<()> {
        self.validate()?;
        let planned = self.runs();
        let results = self.run_all(&planned)?;
        for (run, result) in planned.iter().zip(&results) {
            log.record(run, &self.config_for(run), result, self.record_traces);
        }
        Ok(())
    }

    fn run_one(&self, run: &PlannedRun) -> Result<GaResult> {
        info!(
            benchmark = %run.benchmark,
            crossover = %run.crossover,
            repetition = run.repetition + 1,
            of = self.repetitions,
            seed = run.seed,
            "starting run"
        );
        GaRunner::run_benchmark(run.benchmark, &self.config_for(run))
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self, planned: &[PlannedRun]) -> Result<Vec<GaResult>> {
        planned.iter().map(|run| self.run_one(run)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_all(&self, planned: &[PlannedRun]) -> Result<Vec<GaResult>> {
        planned.par_iter().map(|run| self.run_one(run)).collect()
    }
}

/// Summary row for one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub benchmark: Benchmark,
    pub crossover: CrossoverKind,
    pub dimension: usize,
    pub population_size: usize,
    pub generations: usize,
    pub repetition: usize,
    pub seed: u64,
    pub best_cost: f64,
    pub worst_cost: f64,
    pub mean_cost: f64,
    pub elapsed_secs: f64,
}

/// Per-generation row for one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationTrace {
    pub benchmark: Benchmark,
    pub crossover: CrossoverKind,
    pub repetition: usize,
    pub seed: u64,
    pub generation: usize,
    pub best_cost: f64,
    pub mean_cost: f64,
    pub diversity: Option<f64>,
}

/// Aggregate of the runs in one (benchmark, crossover) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStats {
    pub runs: usize,
    pub mean_best: f64,
    pub std_best: f64,
    pub min_best: f64,
    pub mean_elapsed_secs: f64,
}

/// Accumulator for experiment rows.
///
/// Passed by `&mut` into [`ExperimentPlan::execute`] (or fed directly via
/// [`record`](Self::record)) and drained once by the caller.
#[derive(Debug, Clone, Default)]
pub struct ExperimentLog {
    summaries: Vec<RunSummary>,
    traces: Vec<GenerationTrace>,
}

impl ExperimentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the rows for one finished run.
    pub fn record(
        &mut self,
        run: &PlannedRun,
        config: &GaConfig,
        result: &GaResult,
        with_trace: bool,
    ) {
        self.summaries.push(RunSummary {
            benchmark: run.benchmark,
            crossover: run.crossover,
            dimension: config.dimension,
            population_size: config.population_size,
            generations: result.generations,
            repetition: run.repetition,
            seed: run.seed,
            best_cost: result.best_cost,
            worst_cost: result.worst_cost,
            mean_cost: result.mean_cost,
            elapsed_secs: result.elapsed.as_secs_f64(),
        });
        if with_trace {
            self.traces
                .extend(result.history.iter().map(|s| GenerationTrace {
                    benchmark: run.benchmark,
                    crossover: run.crossover,
                    repetition: run.repetition,
                    seed: run.seed,
                    generation: s.generation,
                    best_cost: s.best_cost,
                    mean_cost: s.mean_cost,
                    diversity: s.diversity,
                }));
        }
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    pub fn traces(&self) -> &[GenerationTrace] {
        &self.traces
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Consumes the log, returning `(summaries, traces)`.
    pub fn into_parts(self) -> (Vec<RunSummary>, Vec<GenerationTrace>) {
        (self.summaries, self.traces)
    }

    /// Final best-cost statistics per (benchmark, crossover) cell.
    ///
    /// Crossovers are keyed by their `Display` form, so operator parameters
    /// (`blx(alpha=0.1)` vs `blx(alpha=0.9)`) land in separate cells.
    pub fn cell_stats(&self) -> BTreeMap<(String, String), CellStats> {
        let mut cells: BTreeMap<(String, String), Vec<&RunSummary>> = BTreeMap::new();
        for row in &self.summaries {
            cells
                .entry((row.benchmark.name().to_string(), row.crossover.to_string()))
                .or_default()
                .push(row);
        }
        cells
            .into_iter()
            .map(|(key, rows)| {
                let n = rows.len() as f64;
                let mean_best = rows.iter().map(|r| r.best_cost).sum::<f64>() / n;
                let var = rows
                    .iter()
                    .map(|r| (r.best_cost - mean_best) * (r.best_cost - mean_best))
                    .sum::<f64>()
                    / n;
                let stats = CellStats {
                    runs: rows.len(),
                    mean_best,
                    std_best: var.sqrt(),
                    min_best: rows.iter().map(|r| r.best_cost).fold(f64::INFINITY, f64::min),
                    mean_elapsed_secs: rows.iter().map(|r| r.elapsed_secs).sum::<f64>() / n,
                };
                (key, stats)
            })
            .collect()
    }
}
