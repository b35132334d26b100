//! Error types for the Strike core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing instruments, market inputs or form requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// An instrument field is outside its enumerated set or domain.
    #[error("Invalid instrument: {reason}")]
    InvalidInstrument {
        /// Description of the invalid field.
        reason: String,
    },

    /// A raw input field could not be parsed as a finite number.
    #[error("Invalid value for {field}: '{value}' is not a number")]
    NotNumeric {
        /// Name of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A numeric input lies outside its documented domain.
    #[error("Value out of domain for {field}: {value} (expected {constraint})")]
    OutOfDomain {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human readable constraint, e.g. "> 0".
        constraint: &'static str,
    },

    /// A textual choice is not one of the accepted values.
    #[error("Invalid choice for {field}: '{value}' (expected one of: {expected})")]
    InvalidChoice {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected text.
        value: String,
        /// Accepted values.
        expected: &'static str,
    },

    /// A field required by the requested calculation was not supplied.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}

impl CoreError {
    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }

    /// Creates an out-of-domain error.
    #[must_use]
    pub fn out_of_domain(field: &'static str, value: f64, constraint: &'static str) -> Self {
        Self::OutOfDomain {
            field,
            value,
            constraint,
        }
    }

    /// Creates a not-numeric error.
    #[must_use]
    pub fn not_numeric(field: &'static str, value: impl Into<String>) -> Self {
        Self::NotNumeric {
            field,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::not_numeric("strike", "abc");
        assert_eq!(
            err.to_string(),
            "Invalid value for strike: 'abc' is not a number"
        );

        let err = CoreError::out_of_domain("expiry", -1.0, "> 0");
        assert!(err.to_string().contains("expected > 0"));
    }
}
