//! Option type and exercise style enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Right conveyed by an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    #[default]
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Returns the lowercase name used in forms and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Returns true for calls.
    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(CoreError::invalid_instrument(format!(
                "invalid option type '{s}', expected one of: call, put"
            ))),
        }
    }
}

/// Exercise style of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OptionStyle {
    /// Exercisable at expiry only.
    #[default]
    European,
    /// Exercisable at any time up to expiry.
    American,
}

impl OptionStyle {
    /// Returns the capitalised style name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionStyle::European => "European",
            OptionStyle::American => "American",
        }
    }

    /// Returns true for American exercise.
    #[must_use]
    pub fn is_american(&self) -> bool {
        matches!(self, OptionStyle::American)
    }
}

impl fmt::Display for OptionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" => Ok(OptionStyle::European),
            "american" => Ok(OptionStyle::American),
            _ => Err(CoreError::invalid_instrument(format!(
                "invalid option style '{s}', expected one of: European, American"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_type() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" Put ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!(matches!(
            "straddle".parse::<OptionType>(),
            Err(CoreError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_parse_option_style() {
        assert_eq!(
            "European".parse::<OptionStyle>().unwrap(),
            OptionStyle::European
        );
        assert_eq!(
            "american".parse::<OptionStyle>().unwrap(),
            OptionStyle::American
        );
        assert!("Bermudan".parse::<OptionStyle>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for ty in [OptionType::Call, OptionType::Put] {
            assert_eq!(ty.to_string().parse::<OptionType>().unwrap(), ty);
        }
        for style in [OptionStyle::European, OptionStyle::American] {
            assert_eq!(style.to_string().parse::<OptionStyle>().unwrap(), style);
        }
    }
}
