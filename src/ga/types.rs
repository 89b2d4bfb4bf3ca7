//! Core value types of the real-coded GA.
//!
//! An [`Individual`] is a plain vector of genes. Populations are kept as two
//! index-aligned vectors (individuals and costs) owned by the runner, so no
//! wrapper struct is needed for them.

use crate::error::{GaError, Result};

/// A candidate solution: a fixed-length vector of real genes.
pub type Individual = Vec<f64>;

/// The search interval `[lower, upper]` shared by every dimension.
///
/// # Examples
///
/// ```
/// use u_realga::ga::Bounds;
///
/// let bounds = Bounds::new(-5.12, 5.12).unwrap();
/// assert_eq!(bounds.clamp(7.0), 5.12);
/// assert!(Bounds::new(1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBounds"))]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

/// Unchecked wire form; deserialization goes through [`Bounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    lower: f64,
    upper: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for Bounds {
    type Error = GaError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.lower, raw.upper)
    }
}

impl Bounds {
    /// Creates a bounds pair, requiring finite values with `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_finite() && upper.is_finite() && lower < upper {
            Ok(Self { lower, upper })
        } else {
            Err(GaError::InvalidBounds { lower, upper })
        }
    }

    /// Creates a symmetric interval `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64) -> Result<Self> {
        Self::new(-half_width, half_width)
    }

    /// Unchecked symmetric interval for positive compile-time constants.
    pub(crate) fn from_half_width(half_width: f64) -> Self {
        Self {
            lower: -half_width,
            upper: half_width,
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.lower..=self.upper).contains(&x)
    }

    /// Hard clamp into the interval.
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.lower {
            self.lower
        } else if x > self.upper {
            self.upper
        } else {
            x
        }
    }
}

/// Fails with [`GaError::DimensionMismatch`] unless `a.len() == b.len()`.
pub(crate) fn ensure_same_len<A, B>(context: &'static str, a: &[A], b: &[B]) -> Result<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(GaError::mismatch(context, a.len(), b.len()))
    }
}
