//! Market inputs shared by the pricers.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Spot, rates, volatility and dividend yield for one pricing call.
///
/// `dividend_yield` doubles as the foreign risk-free rate for FX underlyings.
/// Volatility is optional because implied-volatility solving starts without one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    underlying_price: f64,
    risk_free_rate: f64,
    volatility: Option<f64>,
    dividend_yield: f64,
}

impl MarketParameters {
    /// Creates market parameters without a volatility.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfDomain`] if the underlying price is not
    /// strictly positive, the rate is not finite, or the dividend yield is
    /// negative.
    pub fn new(underlying_price: f64, risk_free_rate: f64, dividend_yield: f64) -> CoreResult<Self> {
        if !(underlying_price.is_finite() && underlying_price > 0.0) {
            return Err(CoreError::out_of_domain(
                "underlying_price",
                underlying_price,
                "> 0",
            ));
        }
        if !risk_free_rate.is_finite() {
            return Err(CoreError::out_of_domain(
                "risk_free_rate",
                risk_free_rate,
                "a finite rate",
            ));
        }
        if !(dividend_yield.is_finite() && dividend_yield >= 0.0) {
            return Err(CoreError::out_of_domain(
                "dividend_yield",
                dividend_yield,
                ">= 0",
            ));
        }

        Ok(Self {
            underlying_price,
            risk_free_rate,
            volatility: None,
            dividend_yield,
        })
    }

    /// Attaches a volatility.
    ///
    /// Zero is accepted here so that the pricers can report it as a
    /// degenerate input; negative or non-finite values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfDomain`] for a negative or non-finite volatility.
    pub fn with_volatility(mut self, volatility: f64) -> CoreResult<Self> {
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(CoreError::out_of_domain("volatility", volatility, ">= 0"));
        }
        self.volatility = Some(volatility);
        Ok(self)
    }

    /// Returns a copy without volatility.
    #[must_use]
    pub fn without_volatility(mut self) -> Self {
        self.volatility = None;
        self
    }

    /// Returns the spot price of the underlying.
    #[must_use]
    pub fn underlying_price(&self) -> f64 {
        self.underlying_price
    }

    /// Returns the continuously compounded risk-free rate.
    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Returns the volatility, if one was supplied.
    #[must_use]
    pub fn volatility(&self) -> Option<f64> {
        self.volatility
    }

    /// Returns the volatility or a [`CoreError::MissingField`] error.
    pub fn require_volatility(&self) -> CoreResult<f64> {
        self.volatility
            .ok_or(CoreError::MissingField { field: "volatility" })
    }

    /// Returns the continuous dividend yield (or foreign rate).
    #[must_use]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parameters() {
        let market = MarketParameters::new(100.0, 0.05, 0.02).unwrap();
        assert_eq!(market.volatility(), None);
        assert!(matches!(
            market.require_volatility(),
            Err(CoreError::MissingField { field: "volatility" })
        ));

        let market = market.with_volatility(0.25).unwrap();
        assert_eq!(market.require_volatility().unwrap(), 0.25);
        assert_eq!(market.without_volatility().volatility(), None);
    }

    #[test]
    fn test_market_parameters_validation() {
        assert!(MarketParameters::new(0.0, 0.05, 0.0).is_err());
        assert!(MarketParameters::new(100.0, f64::INFINITY, 0.0).is_err());
        assert!(MarketParameters::new(100.0, 0.05, -0.01).is_err());
        // Negative rates are allowed
        assert!(MarketParameters::new(100.0, -0.005, 0.0).is_ok());

        let market = MarketParameters::new(100.0, 0.05, 0.0).unwrap();
        assert!(market.with_volatility(-0.1).is_err());
        assert!(market.with_volatility(0.0).is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let market = MarketParameters::new(100.0, 0.05, 0.0)
            .unwrap()
            .with_volatility(0.2)
            .unwrap();
        let json = serde_json::to_string(&market).unwrap();
        let back: MarketParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(market, back);
    }
}
