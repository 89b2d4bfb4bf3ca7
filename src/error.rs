//! Error types shared by every module of the crate.
//!
//! All errors are fatal configuration or caller errors. Nothing in the
//! evolutionary loop performs I/O, so there is no transient error class and
//! nothing is ever retried.

/// Convenience alias used throughout the crate.
pub type Result<T, E = GaError> = std::result::Result<T, E>;

/// Errors raised by the operators and the evolution driver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// A numeric parameter is outside its admissible range.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The search interval is empty, inverted or not finite.
    #[error("invalid bounds [{lower}, {upper}]: lower must be finite and strictly below upper")]
    InvalidBounds { lower: f64, upper: f64 },

    /// A crossover operator name could not be resolved.
    #[error("unknown crossover operator `{0}`")]
    UnknownCrossover(String),

    /// A benchmark name is not present in the registry.
    #[error("unknown benchmark `{0}`")]
    UnknownBenchmark(String),

    /// Two sequences that must be index-aligned have different lengths.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Selection weights are negative or not finite.
    #[error("invalid selection weights: {0}")]
    InvalidWeights(String),
}

impl GaError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        GaError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub(crate) fn mismatch(context: &'static str, expected: usize, actual: usize) -> Self {
        GaError::DimensionMismatch {
            context,
            expected,
            actual,
        }
    }

    /// Whether this error belongs to the configuration class (bad parameter,
    /// bounds or name) rather than a length disagreement.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GaError::DimensionMismatch { .. })
    }
}

/// Checks that `p` is a probability in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GaError::invalid(name, p, "must be within [0, 1]"))
    }
}
