//! Binomial backtest of a VaR estimate.
//!
//! Under a correctly calibrated model the number of overshoots (returns below
//! `-VaR`) in `n` observations is `Binomial(n, 1 - var_level)`. The test uses
//! the normal approximation and a two-sided interval at `test_confidence`.
//! A rejection is reported in the result, never raised.

use serde::{Deserialize, Serialize};
use strike_core::rounding::round_report;
use strike_math::distributions::inverse_norm_cdf;

use crate::error::{RiskError, RiskResult};
use crate::series::{LogReturns, PriceSeries};
use crate::var::VaRResult;

/// Default VaR level assumed by the backtest.
pub const DEFAULT_VAR_LEVEL: f64 = 0.99;

/// Default confidence of the binomial test.
pub const DEFAULT_TEST_CONFIDENCE: f64 = 0.95;

/// Backtest parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Confidence level the VaR was estimated at, in (0, 1).
    pub var_level: f64,
    /// Confidence of the test itself, in (0, 1).
    pub test_confidence: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            var_level: DEFAULT_VAR_LEVEL,
            test_confidence: DEFAULT_TEST_CONFIDENCE,
        }
    }
}

impl BacktestConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(var_level: f64, test_confidence: f64) -> Self {
        Self {
            var_level,
            test_confidence,
        }
    }

    /// Checks both levels lie strictly inside (0, 1).
    pub fn validate(&self) -> RiskResult<()> {
        for (field, value) in [
            ("var_level", self.var_level),
            ("test_confidence", self.test_confidence),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(RiskError::input_range(field, value, "(0, 1)"));
            }
        }
        Ok(())
    }
}

/// Outcome of a VaR backtest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Number of returns tested.
    pub observations: usize,
    /// Returns strictly below `-VaR`.
    pub overshoots: usize,
    /// `n * (1 - var_level)`.
    pub expected_overshoots: f64,
    /// Standardized overshoot count.
    pub z_statistic: f64,
    /// Two-sided critical value `z*`.
    pub critical_value: f64,
    /// Non-rejection interval for the z statistic, `[-z*, z*]`.
    pub z_interval: (f64, f64),
    /// Non-rejection interval expressed as an overshoot count.
    pub count_interval: (f64, f64),
    /// VaR level tested.
    pub var_level: f64,
    /// Test confidence.
    pub test_confidence: f64,
    /// True when the z statistic lies inside the interval.
    pub passed: bool,
}

impl BacktestResult {
    /// Copy with the continuous fields rounded to 4 decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            expected_overshoots: round_report(self.expected_overshoots),
            z_statistic: round_report(self.z_statistic),
            critical_value: round_report(self.critical_value),
            z_interval: (
                round_report(self.z_interval.0),
                round_report(self.z_interval.1),
            ),
            count_interval: (
                round_report(self.count_interval.0),
                round_report(self.count_interval.1),
            ),
            ..*self
        }
    }
}

impl std::fmt::Display for BacktestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} overshoots in {} (expected {:.2}), z = {:.4} vs ±{:.4}: {}",
            self.overshoots,
            self.observations,
            self.expected_overshoots,
            self.z_statistic,
            self.critical_value,
            if self.passed { "pass" } else { "reject" }
        )
    }
}

/// Runs binomial VaR backtests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backtester;

impl Backtester {
    /// Backtests `var` against a sample of log returns.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InsufficientData`] for an empty sample
    /// - [`RiskError::InputRange`] for a negative or non-finite VaR, or levels outside (0, 1)
    pub fn run(
        &self,
        returns: &[f64],
        var: f64,
        config: &BacktestConfig,
    ) -> RiskResult<BacktestResult> {
        config.validate()?;
        if returns.is_empty() {
            return Err(RiskError::insufficient_data(1, 0));
        }
        if !(var.is_finite() && var >= 0.0) {
            return Err(RiskError::input_range("var", var, ">= 0"));
        }

        let n = returns.len() as f64;
        let overshoots = returns.iter().filter(|r| **r < -var).count();

        let p = 1.0 - config.var_level;
        let expected = n * p;
        let sd = (n * p * (1.0 - p)).sqrt();
        let z_statistic = (overshoots as f64 - expected) / sd;

        let significance = 1.0 - config.test_confidence;
        let critical_value = inverse_norm_cdf(1.0 - significance / 2.0)?;
        let passed = z_statistic.abs() <= critical_value;

        if passed {
            log::debug!(
                "VaR backtest passed: {} overshoots in {} (z = {:.4})",
                overshoots,
                returns.len(),
                z_statistic
            );
        } else {
            log::warn!(
                "VaR backtest rejected: {} overshoots in {}, expected {:.2} (z = {:.4}, z* = {:.4})",
                overshoots,
                returns.len(),
                expected,
                z_statistic,
                critical_value
            );
        }

        Ok(BacktestResult {
            observations: returns.len(),
            overshoots,
            expected_overshoots: expected,
            z_statistic,
            critical_value,
            z_interval: (-critical_value, critical_value),
            count_interval: (expected - critical_value * sd, expected + critical_value * sd),
            var_level: config.var_level,
            test_confidence: config.test_confidence,
            passed,
        })
    }

    /// Backtests an estimate against the price history it came from.
    ///
    /// The returns are rebuilt exactly as the estimator built them: the
    /// `var_result.observations` newest prices and the horizon-minimum
    /// construction for `var_result.holding_period`. The VaR level is taken
    /// from `var_result`; only the test confidence comes from `config`.
    pub fn run_on_series(
        &self,
        series: &PriceSeries,
        var_result: &VaRResult,
        config: &BacktestConfig,
    ) -> RiskResult<BacktestResult> {
        let window = series.most_recent(var_result.observations)?;
        let returns = LogReturns::horizon_minimum(&window, var_result.holding_period as usize)?;
        let config = BacktestConfig::new(var_result.confidence_level, config.test_confidence);
        self.run(returns.values(), var_result.var, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_overshoot_in_hundred_at_95() {
        let mut returns = vec![0.001; 100];
        returns[17] = -0.08;

        let result = Backtester
            .run(&returns, 0.05, &BacktestConfig::new(0.95, 0.95))
            .unwrap();

        assert_eq!(result.observations, 100);
        assert_eq!(result.overshoots, 1);
        assert_relative_eq!(result.expected_overshoots, 5.0, epsilon = 1e-9);
        assert_relative_eq!(result.z_statistic, -1.835_326, epsilon = 1e-5);
        assert_relative_eq!(result.critical_value, 1.959_964, epsilon = 1e-5);
        assert!(result.passed);
    }

    #[test]
    fn test_too_many_overshoots_rejects_without_error() {
        let returns: Vec<f64> = (0..100).map(|i| if i < 20 { -0.1 } else { 0.01 }).collect();
        let result = Backtester
            .run(&returns, 0.05, &BacktestConfig::new(0.99, 0.95))
            .unwrap();

        assert_eq!(result.overshoots, 20);
        assert!(!result.passed);
        assert!(result.z_statistic > result.critical_value);
    }

    #[test]
    fn test_overshoot_is_strict() {
        let returns = [-0.05, -0.05, 0.0, 0.01];
        let result = Backtester
            .run(&returns, 0.05, &BacktestConfig::default())
            .unwrap();
        assert_eq!(result.overshoots, 0);
    }

    #[test]
    fn test_count_interval_brackets_expectation() {
        let result = Backtester
            .run(&[0.0; 250], 0.02, &BacktestConfig::default())
            .unwrap();
        let (lo, hi) = result.count_interval;
        assert!(lo < result.expected_overshoots && result.expected_overshoots < hi);
        assert_relative_eq!(result.z_interval.0, -result.z_interval.1);
    }

    #[test]
    fn test_invalid_inputs() {
        let cfg = BacktestConfig::default();
        assert!(matches!(
            Backtester.run(&[], 0.02, &cfg),
            Err(RiskError::InsufficientData { .. })
        ));
        assert!(matches!(
            Backtester.run(&[0.0], -0.02, &cfg),
            Err(RiskError::InputRange { field: "var", .. })
        ));
        assert!(matches!(
            Backtester.run(&[0.0], 0.02, &BacktestConfig::new(1.0, 0.95)),
            Err(RiskError::InputRange {
                field: "var_level",
                ..
            })
        ));
    }

    #[test]
    fn test_display() {
        let mut returns = vec![0.001; 100];
        returns[0] = -0.08;
        let result = Backtester
            .run(&returns, 0.05, &BacktestConfig::new(0.95, 0.95))
            .unwrap();
        let text = result.to_string();
        assert!(text.starts_with("1 overshoots in 100"));
        assert!(text.ends_with("pass"));
    }
}
