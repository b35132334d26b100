//! Error types for option pricing.

use strike_core::{CoreError, OptionStyle};
use strike_math::MathError;
use thiserror::Error;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur while pricing options or solving for volatility.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Closed-form formulas invoked on an option they cannot value.
    #[error("{operation} does not support {style} exercise")]
    UnsupportedStyle {
        /// The offending exercise style.
        style: OptionStyle,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Inputs that make the pricing formulas undefined (zero volatility, zero time).
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// What made the input degenerate.
        reason: String,
    },

    /// Lattice factors that admit arbitrage or are otherwise unusable.
    #[error("Invalid lattice parameters: {reason}")]
    InvalidLatticeParameters {
        /// Description of the problem.
        reason: String,
    },

    /// Implied volatility iteration failed to find a root.
    #[error("Implied volatility did not converge after {iterations} iterations: {reason}")]
    NoConvergence {
        /// Iterations used before giving up.
        iterations: u32,
        /// Description of the failure.
        reason: String,
    },

    /// An option pricer was handed a linear contract.
    #[error("Instrument is not an option: {kind}")]
    NotAnOption {
        /// The instrument kind that was supplied.
        kind: &'static str,
    },

    /// The non-recombining American tree would exceed the node budget.
    #[error("Non-recombining tree with {steps} steps exceeds the limit of {max_steps} steps")]
    TreeTooLarge {
        /// Requested number of steps.
        steps: usize,
        /// Largest permitted number of steps.
        max_steps: usize,
    },

    /// Invalid instrument or market input.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl PricingError {
    /// Creates a degenerate input error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid lattice parameters error.
    #[must_use]
    pub fn invalid_lattice(reason: impl Into<String>) -> Self {
        Self::InvalidLatticeParameters {
            reason: reason.into(),
        }
    }

    /// Creates a no-convergence error.
    #[must_use]
    pub fn no_convergence(iterations: u32, reason: impl Into<String>) -> Self {
        Self::NoConvergence {
            iterations,
            reason: reason.into(),
        }
    }

    /// Maps a root-finder failure onto [`PricingError::NoConvergence`].
    #[must_use]
    pub fn from_solver(err: &MathError, max_iterations: u32) -> Self {
        match err {
            MathError::ConvergenceFailed { iterations, .. } => {
                Self::no_convergence(*iterations, err.to_string())
            }
            MathError::InvalidBracket { .. }
            | MathError::DivisionByZero { .. }
            | MathError::InsufficientData { .. }
            | MathError::InvalidInput { .. } => Self::no_convergence(max_iterations, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PricingError::UnsupportedStyle {
            style: OptionStyle::American,
            operation: "Black-Scholes pricing",
        };
        assert_eq!(
            err.to_string(),
            "Black-Scholes pricing does not support American exercise"
        );

        let err = PricingError::TreeTooLarge {
            steps: 30,
            max_steps: 20,
        };
        assert!(err.to_string().contains("30 steps"));
    }

    #[test]
    fn test_from_solver() {
        let err = PricingError::from_solver(&MathError::convergence_failed(42, 1e-3), 100);
        assert!(matches!(err, PricingError::NoConvergence { iterations: 42, .. }));
    }
}
