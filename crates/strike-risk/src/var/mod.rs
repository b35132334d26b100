//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the loss, in log-return terms, that the most recent price
//! history says should not be exceeded at a given confidence over a holding
//! period. Expected shortfall is the mean loss beyond that threshold.

mod historical;

pub use historical::*;

use serde::{Deserialize, Serialize};
use strike_core::rounding::round_report;

use crate::error::{RiskError, RiskResult};

/// Default lookback window, in years.
pub const DEFAULT_LOOKBACK_YEARS: f64 = 1.0;

/// Default holding period, in business days.
pub const DEFAULT_HOLDING_PERIOD: u32 = 1;

/// Default VaR confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.99;

/// Default number of business days per year.
pub const DEFAULT_BUSINESS_DAYS: u32 = 252;

/// Accepted holding periods, in business days.
pub const HOLDING_PERIOD_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Accepted business-day conventions.
pub const BUSINESS_DAYS_RANGE: std::ops::RangeInclusive<u32> = 250..=253;

/// Parameters of a historical VaR estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarConfig {
    /// Length of history used, in years.
    pub lookback_years: f64,
    /// Holding period in business days, 1 to 10.
    pub holding_period: u32,
    /// Confidence level in (0, 1).
    pub confidence_level: f64,
    /// Business days per year, 250 to 253.
    pub business_days: u32,
}

impl Default for VarConfig {
    fn default() -> Self {
        Self {
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            holding_period: DEFAULT_HOLDING_PERIOD,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            business_days: DEFAULT_BUSINESS_DAYS,
        }
    }
}

impl VarConfig {
    /// Sets the lookback window.
    #[must_use]
    pub fn with_lookback_years(mut self, years: f64) -> Self {
        self.lookback_years = years;
        self
    }

    /// Sets the holding period.
    #[must_use]
    pub fn with_holding_period(mut self, days: u32) -> Self {
        self.holding_period = days;
        self
    }

    /// Sets the confidence level.
    #[must_use]
    pub fn with_confidence_level(mut self, confidence: f64) -> Self {
        self.confidence_level = confidence;
        self
    }

    /// Sets the business-day convention.
    #[must_use]
    pub fn with_business_days(mut self, days: u32) -> Self {
        self.business_days = days;
        self
    }

    /// Checks every parameter against its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InputRange`] naming the first offending field.
    pub fn validate(&self) -> RiskResult<()> {
        if !HOLDING_PERIOD_RANGE.contains(&self.holding_period) {
            return Err(RiskError::input_range(
                "holding_period",
                f64::from(self.holding_period),
                "1..=10",
            ));
        }
        if !BUSINESS_DAYS_RANGE.contains(&self.business_days) {
            return Err(RiskError::input_range(
                "business_days",
                f64::from(self.business_days),
                "250..=253",
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(RiskError::input_range(
                "confidence_level",
                self.confidence_level,
                "(0, 1)",
            ));
        }
        if !(self.lookback_years.is_finite() && self.lookback_years > 0.0) {
            return Err(RiskError::input_range(
                "lookback_years",
                self.lookback_years,
                "> 0",
            ));
        }
        Ok(())
    }

    /// Number of price observations the lookback window covers.
    #[must_use]
    pub fn window(&self) -> usize {
        (self.lookback_years * f64::from(self.business_days)).round() as usize
    }
}

/// Value at Risk result.
///
/// VaR and expected shortfall are positive numbers for losses, expressed as
/// log returns over the holding period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR (loss threshold).
    pub var: f64,
    /// Mean loss beyond the VaR threshold.
    pub expected_shortfall: f64,
    /// Sample std of single-day log returns scaled by √lookback_years.
    pub annualized_volatility: f64,
    /// Confidence level (e.g. 0.99 for 99%).
    pub confidence_level: f64,
    /// Holding period in business days.
    pub holding_period: u32,
    /// Lookback window in years.
    pub lookback_years: f64,
    /// Business days per year.
    pub business_days: u32,
    /// Number of prices in the window.
    pub observations: usize,
}

impl VaRResult {
    /// Copy with VaR, ES and volatility rounded to 4 decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            var: round_report(self.var),
            expected_shortfall: round_report(self.expected_shortfall),
            annualized_volatility: round_report(self.annualized_volatility),
            ..*self
        }
    }
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}d): {:.4}, ES: {:.4}",
            self.confidence_level * 100.0,
            self.holding_period,
            self.var,
            self.expected_shortfall
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window(), 252);
    }

    #[test]
    fn test_config_ranges() {
        let base = VarConfig::default();

        assert!(base.with_holding_period(0).validate().is_err());
        assert!(base.with_holding_period(10).validate().is_ok());
        assert!(base.with_holding_period(11).validate().is_err());

        assert!(base.with_business_days(249).validate().is_err());
        assert!(base.with_business_days(253).validate().is_ok());
        assert!(base.with_business_days(254).validate().is_err());

        assert!(base.with_confidence_level(0.0).validate().is_err());
        assert!(base.with_confidence_level(1.0).validate().is_err());
        assert!(base.with_confidence_level(1.01).validate().is_err());

        assert!(base.with_lookback_years(0.0).validate().is_err());
    }

    #[test]
    fn test_field_named_in_error() {
        let err = VarConfig::default()
            .with_business_days(260)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            RiskError::InputRange {
                field: "business_days",
                ..
            }
        ));
    }

    #[test]
    fn test_window_rounds() {
        let config = VarConfig::default()
            .with_lookback_years(0.5)
            .with_business_days(251);
        assert_eq!(config.window(), 126);
    }

    #[test]
    fn test_display() {
        let result = VaRResult {
            var: 0.031_26,
            expected_shortfall: 0.04,
            annualized_volatility: 0.015,
            confidence_level: 0.99,
            holding_period: 1,
            lookback_years: 1.0,
            business_days: 252,
            observations: 252,
        };
        assert_eq!(result.to_string(), "VaR(99%, 1d): 0.0313, ES: 0.0400");
        assert_eq!(result.rounded().var, 0.0313);
    }
}
