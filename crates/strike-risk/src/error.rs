//! Error types for risk calculations.

use strike_math::MathError;
use thiserror::Error;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// The price or return history is too short for the requested window.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Observations required.
        required: usize,
        /// Observations available.
        actual: usize,
    },

    /// A parameter lies outside its documented range.
    #[error("{field} = {value} is out of range (expected {expected})")]
    InputRange {
        /// Parameter name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Accepted range.
        expected: &'static str,
    },

    /// The price series itself is malformed.
    #[error("Invalid price series: {reason}")]
    InvalidSeries {
        /// Description of the problem.
        reason: String,
    },

    /// Numerical failure in a statistics routine.
    #[error("Calculation failed: {0}")]
    Math(#[from] MathError),
}

impl RiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an input range error.
    #[must_use]
    pub fn input_range(field: &'static str, value: f64, expected: &'static str) -> Self {
        Self::InputRange {
            field,
            value,
            expected,
        }
    }

    /// Creates an invalid series error.
    #[must_use]
    pub fn invalid_series(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }
}
