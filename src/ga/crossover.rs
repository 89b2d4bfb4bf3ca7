//! Real-coded crossover operators.
//!
//! Every operator takes two equal-length parents and yields two children of
//! the same length. A single Bernoulli draw per pair decides whether
//! recombination happens at all: with probability `1 - pc` the children are
//! fresh copies of the parents.
//!
//! # Operators
//!
//! - [`one_point`]: swap tails after a random cut point
//! - [`uniform`]: per-gene fair coin chooses the donor parent
//! - [`blx_alpha`]: Eshelman & Schaffer (1993) blend crossover
//! - [`sbx`]: Deb & Agrawal (1995) simulated binary crossover
//!
//! [`CrossoverKind`] names an operator and its parameters; [`Crossover`] is
//! the resolved capability the runner calls once per parent pair.

use super::types::{ensure_same_len, Bounds, Individual};
use crate::error::{check_probability, GaError, Result};
use crate::random::RandomStream;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Parents closer than this are treated as identical by SBX.
pub const SBX_IDENTICAL_EPS: f64 = 1e-14;

/// Default BLX-α expansion factor.
pub const DEFAULT_BLX_ALPHA: f64 = 0.5;

/// Default SBX distribution index.
pub const DEFAULT_SBX_ETA: f64 = 10.0;

/// Crossover operator together with its own parameters.
///
/// # Examples
///
/// ```
/// use u_realga::ga::CrossoverKind;
///
/// let kind: CrossoverKind = "sbx".parse().unwrap();
/// assert_eq!(kind, CrossoverKind::Sbx { eta_c: 10.0 });
/// assert!("pmx".parse::<CrossoverKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    /// Single cut point, tails exchanged.
    OnePoint,
    /// Independent fair coin per gene.
    Uniform,
    /// Blend crossover sampling from the parent interval widened by `alpha`.
    Blx { alpha: f64 },
    /// Simulated binary crossover with distribution index `eta_c`.
    Sbx { eta_c: f64 },
}

impl Default for CrossoverKind {
    fn default() -> Self {
        CrossoverKind::Blx {
            alpha: DEFAULT_BLX_ALPHA,
        }
    }
}

impl CrossoverKind {
    /// The four operators with their default parameters, in comparison order.
    pub const ALL: [CrossoverKind; 4] = [
        CrossoverKind::OnePoint,
        CrossoverKind::Uniform,
        CrossoverKind::Blx {
            alpha: DEFAULT_BLX_ALPHA,
        },
        CrossoverKind::Sbx {
            eta_c: DEFAULT_SBX_ETA,
        },
    ];

    /// Short stable name, also accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            CrossoverKind::OnePoint => "one_point",
            CrossoverKind::Uniform => "uniform",
            CrossoverKind::Blx { .. } => "blx",
            CrossoverKind::Sbx { .. } => "sbx",
        }
    }

    /// Checks operator-specific parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            CrossoverKind::OnePoint | CrossoverKind::Uniform => Ok(()),
            CrossoverKind::Blx { alpha } => check_alpha(alpha),
            CrossoverKind::Sbx { eta_c } => check_eta(eta_c),
        }
    }
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverKind::Blx { alpha } => write!(f, "blx(alpha={alpha})"),
            CrossoverKind::Sbx { eta_c } => write!(f, "sbx(eta_c={eta_c})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for CrossoverKind {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one_point" | "onepoint" | "one-point" | "un_punto" => Ok(CrossoverKind::OnePoint),
            "uniform" | "uniforme" => Ok(CrossoverKind::Uniform),
            "blx" | "blx_alpha" | "blx-alpha" => Ok(CrossoverKind::Blx {
                alpha: DEFAULT_BLX_ALPHA,
            }),
            "sbx" => Ok(CrossoverKind::Sbx {
                eta_c: DEFAULT_SBX_ETA,
            }),
            _ => Err(GaError::UnknownCrossover(s.to_string())),
        }
    }
}

/// A crossover operator resolved once at configuration time.
///
/// Holds the operator kind, the pair-level crossover probability and the
/// optional clipping bounds handed to BLX-α and SBX.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossover {
    kind: CrossoverKind,
    rate: f64,
    bounds: Option<Bounds>,
}

impl Crossover {
    /// Validates the parameters and builds the operator.
    pub fn new(kind: CrossoverKind, rate: f64, bounds: Option<Bounds>) -> Result<Self> {
        check_probability("crossover_rate", rate)?;
        kind.validate()?;
        Ok(Self { kind, rate, bounds })
    }

    pub fn kind(&self) -> CrossoverKind {
        self.kind
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Recombines two parents into two children.
    #[instrument(
        level = "trace",
        skip(self, parent1, parent2, rng),
        fields(kind = %self.kind, genes = parent1.len())
    )]
    pub fn apply<R: Rng>(
        &self,
        parent1: &[f64],
        parent2: &[f64],
        rng: &mut R,
    ) -> Result<(Individual, Individual)> {
        match self.kind {
            CrossoverKind::OnePoint => one_point(parent1, parent2, self.rate, rng),
            CrossoverKind::Uniform => uniform(parent1, parent2, self.rate, rng),
            CrossoverKind::Blx { alpha } => {
                blx_alpha(parent1, parent2, self.rate, alpha, self.bounds, rng)
            }
            CrossoverKind::Sbx { eta_c } => {
                sbx(parent1, parent2, self.rate, eta_c, self.bounds, rng)
            }
        }
    }
}

/// One-point crossover.
///
/// Draws a cut `c` uniformly from `1..=D-1` and exchanges the tails. With a
/// single gene there is no admissible cut and the parents are copied.
pub fn one_point<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    pc: f64,
    rng: &mut R,
) -> Result<(Individual, Individual)> {
    if !crossover_fires(parent1, parent2, pc, rng)? {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }
    let n = parent1.len();
    if n < 2 {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }
    let cut = rng.uniform_int(1, n - 1);
    Ok(one_point_at(parent1, parent2, cut))
}

/// Exchanges tails at a fixed cut point.
///
/// `child1 = parent1[..cut] ++ parent2[cut..]`,
/// `child2 = parent2[..cut] ++ parent1[cut..]`.
///
/// # Panics
/// Panics if `cut` exceeds the parent length.
pub fn one_point_at(parent1: &[f64], parent2: &[f64], cut: usize) -> (Individual, Individual) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Uniform crossover with a fair per-gene mask.
///
/// Where the mask bit is set, `child1` inherits from `parent1` and `child2`
/// from `parent2`; elsewhere the donors are swapped.
pub fn uniform<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    pc: f64,
    rng: &mut R,
) -> Result<(Individual, Individual)> {
    if !crossover_fires(parent1, parent2, pc, rng)? {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }
    let mask: Vec<bool> = (0..parent1.len())
        .map(|_| rng.bernoulli_less_than(0.5))
        .collect();

    let child1 = mask
        .iter()
        .zip(parent1.iter().zip(parent2))
        .map(|(&keep, (&x, &y))| if keep { x } else { y })
        .collect();
    let child2 = mask
        .iter()
        .zip(parent1.iter().zip(parent2))
        .map(|(&keep, (&x, &y))| if keep { y } else { x })
        .collect();

    Ok((child1, child2))
}

/// BLX-α crossover.
///
/// For each gene the interval `[lo - alpha*I, hi + alpha*I]` is built from the
/// parent values (`I = hi - lo`) and both children sample it independently.
/// With `bounds` present, samples are clamped into the search interval;
/// without them, children may leave it.
pub fn blx_alpha<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    pc: f64,
    alpha: f64,
    bounds: Option<Bounds>,
    rng: &mut R,
) -> Result<(Individual, Individual)> {
    check_alpha(alpha)?;
    if !crossover_fires(parent1, parent2, pc, rng)? {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }

    let n = parent1.len();
    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);

    for (&x, &y) in parent1.iter().zip(parent2) {
        let lo = x.min(y);
        let hi = x.max(y);
        let spread = alpha * (hi - lo);

        let c1 = rng.uniform(lo - spread, hi + spread);
        let c2 = rng.uniform(lo - spread, hi + spread);
        child1.push(clip(c1, bounds));
        child2.push(clip(c2, bounds));
    }

    Ok((child1, child2))
}

/// Simulated binary crossover.
///
/// Genes whose parent values differ by at most [`SBX_IDENTICAL_EPS`] are copied
/// unchanged and consume no randomness. Otherwise the pair is ordered
/// (`x1 <= x2`), one `u ~ U(0,1)` yields the spread factor `beta_q`, and the
/// children are placed symmetrically around the parents' midpoint.
pub fn sbx<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    pc: f64,
    eta_c: f64,
    bounds: Option<Bounds>,
    rng: &mut R,
) -> Result<(Individual, Individual)> {
    check_eta(eta_c)?;
    if !crossover_fires(parent1, parent2, pc, rng)? {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }

    let n = parent1.len();
    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);

    for (&a, &b) in parent1.iter().zip(parent2) {
        if (a - b).abs() <= SBX_IDENTICAL_EPS {
            child1.push(a);
            child2.push(b);
            continue;
        }
        let (x1, x2) = if a <= b { (a, b) } else { (b, a) };
        let u = rng.uniform(0.0, 1.0);
        let beta_q = spread_factor(u, eta_c);

        let mid = x1 + x2;
        let diff = x2 - x1;
        child1.push(clip(0.5 * (mid - beta_q * diff), bounds));
        child2.push(clip(0.5 * (mid + beta_q * diff), bounds));
    }

    Ok((child1, child2))
}

/// SBX spread factor for a uniform draw `u`.
fn spread_factor(u: f64, eta_c: f64) -> f64 {
    let exponent = 1.0 / (eta_c + 1.0);
    if u <= 0.5 {
        (2.0 * u).powf(exponent)
    } else {
        (1.0 / (2.0 * (1.0 - u))).powf(exponent)
    }
}

/// Shared prologue: length and probability checks, then the pair-level draw.
fn crossover_fires<R: Rng>(parent1: &[f64], parent2: &[f64], pc: f64, rng: &mut R) -> Result<bool> {
    ensure_same_len("crossover parents", parent1, parent2)?;
    check_probability("crossover_rate", pc)?;
    Ok(rng.bernoulli_less_than(pc))
}

fn clip(x: f64, bounds: Option<Bounds>) -> f64 {
    match bounds {
        Some(b) => b.clamp(x),
        None => x,
    }
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(GaError::invalid("alpha", alpha, "must be finite and non-negative"))
    }
}

fn check_eta(eta_c: f64) -> Result<()> {
    if eta_c.is_finite() && eta_c >= 0.0 {
        Ok(())
    } else {
        Err(GaError::invalid("eta_c", eta_c, "must be finite and non-negative"))
    }
}
