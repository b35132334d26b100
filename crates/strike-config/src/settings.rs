//! Top-level configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::pricing::{LatticeSection, PricingSection};
use crate::risk::{BacktestSection, RiskSection};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "strike.toml";

/// Complete Strike configuration.
///
/// Every section and every field is optional in the file; anything missing
/// takes its default.
///
/// ```toml
/// [pricing]
/// method = "secant"
///
/// [risk]
/// holding_period = 5
/// confidence_level = 0.95
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrikeConfig {
    /// Implied-volatility solver.
    #[serde(default)]
    pub pricing: PricingSection,

    /// Binomial lattice.
    #[serde(default)]
    pub lattice: LatticeSection,

    /// Historical VaR.
    #[serde(default)]
    pub risk: RiskSection,

    /// VaR backtest.
    #[serde(default)]
    pub backtest: BacktestSection,
}

impl StrikeConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        config.validate_or_error()?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the configuration file in the working directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

impl Validate for StrikeConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sections: [(&str, Vec<ValidationError>); 4] = [
            ("pricing", self.pricing.validate()),
            ("lattice", self.lattice.validate()),
            ("risk", self.risk.validate()),
            ("backtest", self.backtest.validate()),
        ];

        sections
            .into_iter()
            .flat_map(|(name, errors)| errors.into_iter().map(move |e| e.in_section(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strike_pricing::{ImpliedVolMethod, TreeLayout};

    #[test]
    fn test_empty_file_is_default() {
        let config = StrikeConfig::from_toml_str("").unwrap();
        assert_eq!(config, StrikeConfig::default());
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_sections() {
        let config = StrikeConfig::from_toml_str(
            r#"
            [pricing]
            method = "secant"

            [lattice]
            layout = "recombining"
            steps = 250

            [risk]
            holding_period = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.method, ImpliedVolMethod::Secant);
        assert_eq!(config.pricing.max_iterations, 100);
        assert_eq!(config.lattice.layout, TreeLayout::Recombining);
        assert_eq!(config.lattice.steps, 250);
        assert_eq!(config.risk.holding_period, 5);
        assert_eq!(config.risk.business_days, 252);
    }

    #[test]
    fn test_round_trip() {
        let mut config = StrikeConfig::default();
        config.risk.confidence_level = 0.95;
        config.backtest.test_confidence = 0.9;

        let text = config.to_toml_string().unwrap();
        assert_eq!(StrikeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_errors_carry_section() {
        let mut config = StrikeConfig::default();
        config.risk.business_days = 365;

        match config.validate_or_error() {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "risk.business_days"),
            other => panic!("expected a validation error, got {other:?}"),
        }

        config.lattice.steps = 0;
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(ref errors)) if errors.len() == 2
        ));
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = StrikeConfig::from_toml_str("[pricing]\nmethod = \"brent\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }
}
