//! Real-coded Genetic Algorithm.
//!
//! Individuals are fixed-length `Vec<f64>` vectors inside a single shared
//! interval `[a, b]`. Each generation transforms costs into fitness, draws a
//! parent pool by roulette, recombines consecutive parent pairs with the
//! configured crossover, mutates every child, and merges offspring back with
//! elitist replacement.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (sizes, rates, operator, seed)
//! - [`GaRunner`]: Executes one run against an [`Objective`]
//! - [`GaResult`]: Final costs, per-generation history and timing
//! - [`CrossoverKind`] / [`Crossover`]: Operator choice and its resolved form
//!
//! # Submodules
//!
//! - [`crossover`]: One-point, uniform, BLX-α and SBX recombination
//! - [`mutation`]: Bounded uniform per-gene mutation
//! - [`selection`]: Cost-to-fitness transform and roulette selection
//! - [`replacement`]: Full and partial elitist replacement
//! - [`diversity`]: Standard-deviation and pairwise-distance dispersion
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and Interval-Schemata"
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"

mod config;
pub mod crossover;
pub mod diversity;
pub mod mutation;
pub mod replacement;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use crossover::{Crossover, CrossoverKind};
pub use diversity::DiversityMeasure;
pub use mutation::mutate;
pub use replacement::replace;
pub use runner::{GaResult, GaRunner, GenerationStats, Objective};
pub use selection::{roulette, to_fitness};
pub use types::{Bounds, Individual};
