//! Continuous benchmark functions and their registry.
//!
//! All functions are minimized and have a global minimum of 0: at the origin
//! for Sphere, Ackley, Griewank and Rastrigin, and at `(1, ..., 1)` for
//! Rosenbrock.
//!
//! # References
//!
//! - Jamil & Yang (2013), "A Literature Survey of Benchmark Functions for
//!   Global Optimization Problems"

use crate::error::{GaError, Result};
use crate::ga::Bounds;
use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

/// Signature of a registered objective.
pub type ObjectiveFn = fn(&[f64]) -> f64;

/// The built-in benchmark functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Benchmark {
    Sphere,
    Ackley,
    Griewank,
    Rastrigin,
    Rosenbrock,
}

impl Benchmark {
    pub const ALL: [Benchmark; 5] = [
        Benchmark::Sphere,
        Benchmark::Ackley,
        Benchmark::Griewank,
        Benchmark::Rastrigin,
        Benchmark::Rosenbrock,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Benchmark::Sphere => "sphere",
            Benchmark::Ackley => "ackley",
            Benchmark::Griewank => "griewank",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Rosenbrock => "rosenbrock",
        }
    }

    /// The function pointer for this benchmark.
    pub fn objective(&self) -> ObjectiveFn {
        match self {
            Benchmark::Sphere => sphere,
            Benchmark::Ackley => ackley,
            Benchmark::Griewank => griewank,
            Benchmark::Rastrigin => rastrigin,
            Benchmark::Rosenbrock => rosenbrock,
        }
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        (self.objective())(x)
    }

    /// Conventional search domain.
    pub fn bounds(&self) -> Bounds {
        let half_width = match self {
            Benchmark::Sphere | Benchmark::Rastrigin => 5.12,
            Benchmark::Ackley => 30.0,
            Benchmark::Griewank => 600.0,
            Benchmark::Rosenbrock => 2.048,
        };
        Bounds::from_half_width(half_width)
    }

    /// Smallest dimension for which the function is defined.
    pub fn min_dimension(&self) -> usize {
        match self {
            Benchmark::Rosenbrock => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Benchmark {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Benchmark::ALL
            .into_iter()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| GaError::UnknownBenchmark(s.to_string()))
    }
}

/// Resolves a benchmark name to its objective and domain.
///
/// ```
/// use u_realga::benchmarks::lookup;
///
/// let (f, bounds) = lookup("rastrigin").unwrap();
/// assert_eq!(f(&[0.0, 0.0]), 0.0);
/// assert_eq!(bounds.upper(), 5.12);
/// assert!(lookup("himmelblau").is_err());
/// ```
pub fn lookup(name: &str) -> Result<(ObjectiveFn, Bounds)> {
    let benchmark: Benchmark = name.parse()?;
    Ok((benchmark.objective(), benchmark.bounds()))
}

/// `sum(x_i^2)`
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// `20 + e - 20 exp(-0.2 sqrt(mean(x^2))) - exp(mean(cos(2 pi x)))`
pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let sum_sq: f64 = x.iter().map(|v| v * v).sum();
    let sum_cos: f64 = x.iter().map(|v| (2.0 * PI * v).cos()).sum();
    20.0 + E - 20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp()
}

/// `1 + sum(x_i^2) / 4000 - prod(cos(x_i / sqrt(i)))`, with `i` starting at 1.
pub fn griewank(x: &[f64]) -> f64 {
    let sum: f64 = x.iter().map(|v| v * v / 4000.0).sum();
    let prod: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    1.0 + sum - prod
}

/// `10 n + sum(x_i^2 - 10 cos(2 pi x_i))`
pub fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

/// `sum(100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2)`
///
/// Defined for two or more dimensions; shorter inputs evaluate to 0.
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|w| {
            let a = w[1] - w[0] * w[0];
            let b = 1.0 - w[0];
            100.0 * a * a + b * b
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_minima() {
        let zeros = vec![0.0; 10];
        assert_eq!(sphere(&zeros), 0.0);
        assert!(ackley(&zeros).abs() < 1e-12);
        assert!(griewank(&zeros).abs() < 1e-12);
        assert!(rastrigin(&zeros).abs() < 1e-12);
        assert_eq!(rosenbrock(&[1.0; 10]), 0.0);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(sphere(&[1.0, 2.0, 3.0]), 14.0);
        assert_eq!(rosenbrock(&[0.0, 0.0]), 1.0);
        // 100*(1-0)^2 + 1 + 100*(2-1)^2 + 0
        assert_eq!(rosenbrock(&[0.0, 1.0, 2.0]), 201.0);
        assert!((rastrigin(&[1.0, 2.0, 3.0]) - 14.0).abs() < 1e-9);
        assert!(griewank(&[1.0, 2.0, 3.0]) > 0.0);
        assert!(ackley(&[1.0, 2.0, 3.0]) > 0.0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(Benchmark::Sphere.bounds().upper(), 5.12);
        assert_eq!(Benchmark::Ackley.bounds().lower(), -30.0);
        assert_eq!(Benchmark::Griewank.bounds().upper(), 600.0);
        assert_eq!(Benchmark::Rosenbrock.bounds().lower(), -2.048);
    }

    #[test]
    fn test_registry_lookup() {
        for b in Benchmark::ALL {
            assert_eq!(b.name().parse::<Benchmark>().unwrap(), b);
            let (f, bounds) = lookup(b.name()).unwrap();
            assert_eq!(bounds, b.bounds());
            let x = vec![0.5; 3];
            assert_eq!(f(&x), b.evaluate(&x));
        }
        assert_eq!("  Sphere ".parse::<Benchmark>().unwrap(), Benchmark::Sphere);
        assert!(matches!(
            lookup("schwefel"),
            Err(GaError::UnknownBenchmark(name)) if name == "schwefel"
        ));
    }

    #[test]
    fn test_total_on_domain_edges() {
        for b in Benchmark::ALL {
            let bounds = b.bounds();
            for edge in [bounds.lower(), bounds.upper()] {
                let v = b.evaluate(&[edge; 4]);
                assert!(v.is_finite() && v >= 0.0, "{b} at {edge}: {v}");
            }
        }
    }
}
