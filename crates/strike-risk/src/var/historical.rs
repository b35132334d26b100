//! Historical-simulation VaR.

use serde::{Deserialize, Serialize};
use strike_math::statistics::{mean, quantile, sample_std_dev, QuantileMethod};

use super::{VaRResult, VarConfig};
use crate::error::{RiskError, RiskResult};
use crate::series::{LogReturns, PriceSeries};

/// VaR and expected shortfall read off one return sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailMeasures {
    /// Negated nearest-rank (1 - confidence) quantile.
    pub var: f64,
    /// Negated mean of the returns strictly below the interpolated quantile.
    pub expected_shortfall: f64,
}

/// Computes VaR and expected shortfall from a sample of returns.
///
/// VaR uses the nearest order statistic at `1 - confidence_level`; the
/// expected-shortfall threshold is the linearly interpolated quantile at the
/// same probability. When no return lies strictly below that threshold the
/// shortfall equals the VaR.
///
/// # Errors
///
/// - [`RiskError::InsufficientData`] for an empty sample
/// - [`RiskError::InputRange`] for a confidence level outside (0, 1)
///
/// # Example
///
/// ```rust
/// use strike_risk::var::tail_measures;
///
/// let returns = [-0.05, -0.02, -0.01, 0.0, 0.01, 0.02, 0.03, 0.01, -0.03, 0.04];
/// let tail = tail_measures(&returns, 0.9).unwrap();
/// assert!((tail.var - 0.03).abs() < 1e-12);
/// ```
pub fn tail_measures(returns: &[f64], confidence_level: f64) -> RiskResult<TailMeasures> {
    if returns.is_empty() {
        return Err(RiskError::insufficient_data(1, 0));
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(RiskError::input_range(
            "confidence_level",
            confidence_level,
            "(0, 1)",
        ));
    }

    let q = 1.0 - confidence_level;
    let var = -quantile(returns, q, QuantileMethod::Nearest)?;

    let threshold = quantile(returns, q, QuantileMethod::Linear)?;
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r < threshold).collect();
    let expected_shortfall = if tail.is_empty() {
        var
    } else {
        -mean(&tail)?
    };

    Ok(TailMeasures {
        var,
        expected_shortfall,
    })
}

/// Historical-simulation VaR over the most recent window of a price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalVarEstimator {
    config: VarConfig,
}

impl HistoricalVarEstimator {
    /// Creates an estimator after validating its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InputRange`] for any out-of-range parameter.
    pub fn new(config: VarConfig) -> RiskResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The estimator configuration.
    #[must_use]
    pub fn config(&self) -> &VarConfig {
        &self.config
    }

    /// Estimates VaR, expected shortfall and volatility.
    ///
    /// 1. Keep the `round(lookback_years * business_days)` newest prices.
    /// 2. Build horizon-minimum log returns for the holding period.
    /// 3. Read VaR and ES off that sample with [`tail_measures`].
    /// 4. Volatility is the sample std of single-day log returns in the window
    ///    scaled by `sqrt(lookback_years)`.
    ///
    /// The scaling in step 4 is by the window length in years, not by the
    /// number of business days.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] if the series is shorter than
    /// the window, or the window is too short to produce two returns.
    pub fn estimate(&self, series: &PriceSeries) -> RiskResult<VaRResult> {
        let window_len = self.config.window();
        if series.len() < window_len {
            return Err(RiskError::insufficient_data(window_len, series.len()));
        }

        let window = series.most_recent(window_len)?;
        if series.len() > window_len {
            log::debug!(
                "VaR window keeps {} of {} prices ({} to {})",
                window_len,
                series.len(),
                window.oldest().map(|o| o.date.to_string()).unwrap_or_default(),
                window.newest().map(|o| o.date.to_string()).unwrap_or_default(),
            );
        }

        let holding = self.config.holding_period as usize;
        let returns = LogReturns::horizon_minimum(&window, holding)?;
        let tail = tail_measures(returns.values(), self.config.confidence_level)?;

        let daily = LogReturns::daily(&window)?;
        if daily.len() < 2 {
            return Err(RiskError::insufficient_data(3, window.len()));
        }
        let annualized_volatility =
            sample_std_dev(daily.values())? * self.config.lookback_years.sqrt();

        log::debug!(
            "historical VaR {:.6} ES {:.6} over {} returns (h = {})",
            tail.var,
            tail.expected_shortfall,
            returns.len(),
            holding
        );

        Ok(VaRResult {
            var: tail.var,
            expected_shortfall: tail.expected_shortfall,
            annualized_volatility,
            confidence_level: self.config.confidence_level,
            holding_period: self.config.holding_period,
            lookback_years: self.config.lookback_years,
            business_days: self.config.business_days,
            observations: window.len(),
        })
    }
}

/// Convenience wrapper: validates `config` and estimates over `series`.
pub fn historical_var(series: &PriceSeries, config: &VarConfig) -> RiskResult<VaRResult> {
    HistoricalVarEstimator::new(*config)?.estimate(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn series_from_returns(daily: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let mut price = 100.0;
        let mut pairs = vec![(start, price)];
        for (i, r) in daily.iter().enumerate() {
            price *= r.exp();
            pairs.push((start + Duration::days(i as i64 + 1), price));
        }
        PriceSeries::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_tail_measures_small_sample() {
        let returns = [-0.05, -0.02, -0.01, 0.0, 0.01, 0.02, 0.03, 0.01, -0.03, 0.04];
        let tail = tail_measures(&returns, 0.9).unwrap();

        // Sorted: -0.05 -0.03 -0.02 ..., position 0.9 -> index 1
        assert_relative_eq!(tail.var, 0.03, epsilon = 1e-12);
        // Linear threshold -0.032; only -0.05 lies below
        assert_relative_eq!(tail.expected_shortfall, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_tail_measures_without_tail_falls_back_to_var() {
        let returns = [0.01; 20];
        let tail = tail_measures(&returns, 0.95).unwrap();
        assert_relative_eq!(tail.var, -0.01);
        assert_relative_eq!(tail.expected_shortfall, tail.var);
    }

    #[test]
    fn test_tail_measures_rejects_bad_input() {
        assert!(matches!(
            tail_measures(&[], 0.99),
            Err(RiskError::InsufficientData { .. })
        ));
        assert!(matches!(
            tail_measures(&[0.1], 0.0),
            Err(RiskError::InputRange { .. })
        ));
        assert!(matches!(
            tail_measures(&[-0.05, 0.01, 0.02, -0.01], 1.0),
            Err(RiskError::InputRange {
                field: "confidence_level",
                ..
            })
        ));
    }

    #[test]
    fn test_estimate_uses_most_recent_window() {
        // A crash, 299 calm days, then a 252-price window of ±1% days
        let mut daily = vec![-0.5];
        daily.extend(std::iter::repeat(0.001).take(299));
        daily.extend((0..251).map(|i| if i % 2 == 0 { 0.01 } else { -0.01 }));
        let series = series_from_returns(&daily);

        let result = historical_var(&series, &VarConfig::default()).unwrap();
        assert_eq!(result.observations, 252);
        // The crash is older than the window
        assert!(result.var < 0.02);
        assert_relative_eq!(result.var, 0.01, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_insufficient_data() {
        let series = series_from_returns(&[0.01; 100]);
        let err = historical_var(&series, &VarConfig::default()).unwrap_err();
        assert_eq!(err, RiskError::insufficient_data(252, 101));
    }

    #[test]
    fn test_volatility_scales_with_sqrt_lookback() {
        let daily: Vec<f64> = (0..600)
            .map(|i| if i % 3 == 0 { 0.02 } else { -0.01 })
            .collect();
        let series = series_from_returns(&daily);

        let one = historical_var(&series, &VarConfig::default()).unwrap();
        let two = historical_var(&series, &VarConfig::default().with_lookback_years(2.0)).unwrap();

        // The pattern repeats every 3 days, so the window std barely moves
        let ratio = two.annualized_volatility / one.annualized_volatility;
        assert_relative_eq!(ratio, 2.0_f64.sqrt(), epsilon = 1e-2);
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let config = VarConfig::default().with_holding_period(11);
        assert!(matches!(
            HistoricalVarEstimator::new(config),
            Err(RiskError::InputRange {
                field: "holding_period",
                ..
            })
        ));
    }
}
