//! Market risk and backtest settings.

use serde::{Deserialize, Serialize};
use strike_risk::backtest::{DEFAULT_TEST_CONFIDENCE, DEFAULT_VAR_LEVEL};
use strike_risk::var::{
    BUSINESS_DAYS_RANGE, DEFAULT_BUSINESS_DAYS, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_HOLDING_PERIOD,
    DEFAULT_LOOKBACK_YEARS, HOLDING_PERIOD_RANGE,
};
use strike_risk::{BacktestConfig, VarConfig};

use crate::error::{Validate, ValidationError};

/// Historical VaR settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskSection {
    /// Length of history used, in years.
    #[serde(default = "default_lookback_years")]
    pub lookback_years: f64,

    /// Holding period in business days.
    #[serde(default = "default_holding_period")]
    pub holding_period: u32,

    /// VaR confidence level.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Business days per year.
    #[serde(default = "default_business_days")]
    pub business_days: u32,
}

fn default_lookback_years() -> f64 {
    DEFAULT_LOOKBACK_YEARS
}

fn default_holding_period() -> u32 {
    DEFAULT_HOLDING_PERIOD
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

fn default_business_days() -> u32 {
    DEFAULT_BUSINESS_DAYS
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            lookback_years: default_lookback_years(),
            holding_period: default_holding_period(),
            confidence_level: default_confidence_level(),
            business_days: default_business_days(),
        }
    }
}

impl RiskSection {
    /// Estimator configuration for these settings.
    #[must_use]
    pub fn var_config(&self) -> VarConfig {
        VarConfig {
            lookback_years: self.lookback_years,
            holding_period: self.holding_period,
            confidence_level: self.confidence_level,
            business_days: self.business_days,
        }
    }
}

impl Validate for RiskSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.lookback_years.is_finite() && self.lookback_years > 0.0) {
            errors.push(ValidationError::new(
                "lookback_years",
                "Lookback must be a positive number of years",
            ));
        }

        if !HOLDING_PERIOD_RANGE.contains(&self.holding_period) {
            errors.push(ValidationError::new(
                "holding_period",
                format!(
                    "Holding period {} must be between 1 and 10 days",
                    self.holding_period
                ),
            ));
        }

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            errors.push(ValidationError::new(
                "confidence_level",
                "Confidence level must lie in (0, 1)",
            ));
        }

        if !BUSINESS_DAYS_RANGE.contains(&self.business_days) {
            errors.push(ValidationError::new(
                "business_days",
                format!(
                    "Business days {} must be between 250 and 253",
                    self.business_days
                ),
            ));
        }

        errors
    }
}

/// VaR backtest settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestSection {
    /// VaR level assumed when testing a bare VaR figure.
    #[serde(default = "default_var_level")]
    pub var_level: f64,

    /// Confidence of the binomial test.
    #[serde(default = "default_test_confidence")]
    pub test_confidence: f64,
}

fn default_var_level() -> f64 {
    DEFAULT_VAR_LEVEL
}

fn default_test_confidence() -> f64 {
    DEFAULT_TEST_CONFIDENCE
}

impl Default for BacktestSection {
    fn default() -> Self {
        Self {
            var_level: default_var_level(),
            test_confidence: default_test_confidence(),
        }
    }
}

impl BacktestSection {
    /// Backtest configuration for these settings.
    #[must_use]
    pub fn backtest_config(&self) -> BacktestConfig {
        BacktestConfig::new(self.var_level, self.test_confidence)
    }
}

impl Validate for BacktestSection {
    fn validate(&self) -> Vec<ValidationError> {
        [
            ("var_level", self.var_level),
            ("test_confidence", self.test_confidence),
        ]
        .into_iter()
        .filter(|(_, value)| !(*value > 0.0 && *value < 1.0))
        .map(|(field, _)| ValidationError::new(field, "Level must lie strictly between 0 and 1"))
        .collect()
    }
}
