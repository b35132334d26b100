//! Forward, future and option contracts.
//!
//! All instruments are immutable once constructed: fields are private and
//! exposed through getters, so values can be shared across threads freely.

use serde::Serialize;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::{OptionStyle, OptionType};

fn ensure_positive(field: &'static str, value: f64) -> CoreResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::invalid_instrument(format!(
            "{field} must be a finite value > 0, got {value}"
        )))
    }
}

/// A forward contract to buy the underlying at `forward_price` at expiry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forward {
    forward_price: f64,
    time_to_expiry: f64,
}

impl Forward {
    /// Creates a forward.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInstrument`] if the forward price is not
    /// finite or the time to expiry is not strictly positive.
    pub fn new(forward_price: f64, time_to_expiry: f64) -> CoreResult<Self> {
        if !forward_price.is_finite() {
            return Err(CoreError::invalid_instrument(format!(
                "forward_price must be finite, got {forward_price}"
            )));
        }
        Ok(Self {
            forward_price,
            time_to_expiry: ensure_positive("time_to_expiry", time_to_expiry)?,
        })
    }

    /// Returns the agreed delivery price.
    #[must_use]
    pub fn forward_price(&self) -> f64 {
        self.forward_price
    }

    /// Returns the time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Payoff at expiry: `(S_T - F) × position_size`.
    #[must_use]
    pub fn payoff(&self, market_price: f64, position_size: f64) -> f64 {
        (market_price - self.forward_price) * position_size
    }

    /// Value today: `(S - F·e^(-rT)) × position_size`.
    #[must_use]
    pub fn value(&self, market_price: f64, discount_rate: f64, position_size: f64) -> f64 {
        let discounted_strike = self.forward_price * (-discount_rate * self.time_to_expiry).exp();
        (market_price - discounted_strike) * position_size
    }

    /// Delta with a continuous dividend yield: `e^(-qT) × position_size`.
    #[must_use]
    pub fn delta(&self, dividend_yield: f64, position_size: f64) -> f64 {
        (-dividend_yield * self.time_to_expiry).exp() * position_size
    }
}

/// An exchange-traded future: forward terms plus a contract multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Future {
    contract: Forward,
    lot_size: f64,
}

impl Future {
    /// Creates a future.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInstrument`] for a non-positive lot size or
    /// any of the [`Forward::new`] failures.
    pub fn new(forward_price: f64, time_to_expiry: f64, lot_size: f64) -> CoreResult<Self> {
        Ok(Self {
            contract: Forward::new(forward_price, time_to_expiry)?,
            lot_size: ensure_positive("lot_size", lot_size)?,
        })
    }

    /// Returns the underlying forward terms.
    #[must_use]
    pub fn contract(&self) -> &Forward {
        &self.contract
    }

    /// Returns the agreed delivery price.
    #[must_use]
    pub fn forward_price(&self) -> f64 {
        self.contract.forward_price
    }

    /// Returns the time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.contract.time_to_expiry
    }

    /// Returns the contract multiplier.
    #[must_use]
    pub fn lot_size(&self) -> f64 {
        self.lot_size
    }

    /// Payoff at expiry scaled by the lot size.
    #[must_use]
    pub fn payoff(&self, market_price: f64, position_size: f64) -> f64 {
        self.contract.payoff(market_price, position_size) * self.lot_size
    }

    /// Value today scaled by the lot size.
    #[must_use]
    pub fn value(&self, market_price: f64, discount_rate: f64, position_size: f64) -> f64 {
        self.contract.value(market_price, discount_rate, position_size) * self.lot_size
    }

    /// Delta using the cost-of-carry factor `e^((r-q)T) × position_size`.
    ///
    /// The lot size is not applied, delta is quoted per unit of underlying.
    #[must_use]
    pub fn delta(&self, discount_rate: f64, dividend_yield: f64, position_size: f64) -> f64 {
        ((discount_rate - dividend_yield) * self.contract.time_to_expiry).exp() * position_size
    }
}

/// A plain call or put with European or American exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VanillaOption {
    option_type: OptionType,
    option_style: OptionStyle,
    strike_price: f64,
    time_to_expiry: f64,
}

impl VanillaOption {
    /// Creates an option.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInstrument`] if the strike or the time to
    /// expiry is not strictly positive.
    pub fn new(
        option_type: OptionType,
        option_style: OptionStyle,
        strike_price: f64,
        time_to_expiry: f64,
    ) -> CoreResult<Self> {
        Ok(Self {
            option_type,
            option_style,
            strike_price: ensure_positive("strike_price", strike_price)?,
            time_to_expiry: ensure_positive("time_to_expiry", time_to_expiry)?,
        })
    }

    /// Creates an option from textual type and style names.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInstrument`] if the type is not `call`/`put`,
    /// the style is not `European`/`American`, or the numeric fields are invalid.
    pub fn from_names(
        option_type: &str,
        option_style: &str,
        strike_price: f64,
        time_to_expiry: f64,
    ) -> CoreResult<Self> {
        Self::new(
            option_type.parse()?,
            option_style.parse()?,
            strike_price,
            time_to_expiry,
        )
    }

    /// Returns call or put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the exercise style.
    #[must_use]
    pub fn option_style(&self) -> OptionStyle {
        self.option_style
    }

    /// Returns the strike price.
    #[must_use]
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Returns the time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Intrinsic value scaled by the position size.
    ///
    /// `max(S - K, 0) × position_size` for a call, `max(K - S, 0) × position_size`
    /// for a put. The floor is applied before scaling, so a short position
    /// produces a non-positive payoff.
    #[must_use]
    pub fn payoff(&self, underlying_price: f64, position_size: f64) -> f64 {
        let intrinsic = match self.option_type {
            OptionType::Call => (underlying_price - self.strike_price).max(0.0),
            OptionType::Put => (self.strike_price - underlying_price).max(0.0),
        };
        intrinsic * position_size
    }

    /// Returns a copy with a different exercise style.
    #[must_use]
    pub fn with_style(&self, option_style: OptionStyle) -> Self {
        Self {
            option_style,
            ..*self
        }
    }

    /// Returns a copy with the opposite right.
    #[must_use]
    pub fn with_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }
}

impl fmt::Display for VanillaOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} K={} T={}",
            self.option_style, self.option_type, self.strike_price, self.time_to_expiry
        )
    }
}

/// Any contract Strike can describe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Instrument {
    /// Forward contract.
    Forward(Forward),
    /// Futures contract.
    Future(Future),
    /// Vanilla option.
    Option(VanillaOption),
}

impl Instrument {
    /// Returns the contract kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Instrument::Forward(_) => "forward",
            Instrument::Future(_) => "future",
            Instrument::Option(_) => "option",
        }
    }

    /// Returns the time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        match self {
            Instrument::Forward(fwd) => fwd.time_to_expiry(),
            Instrument::Future(fut) => fut.time_to_expiry(),
            Instrument::Option(opt) => opt.time_to_expiry(),
        }
    }

    /// Payoff at expiry for the given underlying price.
    #[must_use]
    pub fn payoff(&self, underlying_price: f64, position_size: f64) -> f64 {
        match self {
            Instrument::Forward(fwd) => fwd.payoff(underlying_price, position_size),
            Instrument::Future(fut) => fut.payoff(underlying_price, position_size),
            Instrument::Option(opt) => opt.payoff(underlying_price, position_size),
        }
    }

    /// Returns the option terms, or `None` for linear contracts.
    #[must_use]
    pub fn as_option(&self) -> Option<&VanillaOption> {
        match self {
            Instrument::Option(opt) => Some(opt),
            Instrument::Forward(_) | Instrument::Future(_) => None,
        }
    }
}

impl From<Forward> for Instrument {
    fn from(value: Forward) -> Self {
        Instrument::Forward(value)
    }
}

impl From<Future> for Instrument {
    fn from(value: Future) -> Self {
        Instrument::Future(value)
    }
}

impl From<VanillaOption> for Instrument {
    fn from(value: VanillaOption) -> Self {
        Instrument::Option(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_payoff_and_value() {
        let fwd = Forward::new(100.0, 1.0).unwrap();

        assert_relative_eq!(fwd.payoff(110.0, 1.0), 10.0);
        assert_relative_eq!(fwd.payoff(90.0, 2.0), -20.0);

        // 110 - 100·e^(-0.05) = 14.8771
        assert_relative_eq!(fwd.value(110.0, 0.05, 1.0), 14.877_057_5, epsilon = 1e-6);
        assert_relative_eq!(fwd.delta(0.0, 1.0), 1.0);
        assert_relative_eq!(fwd.delta(0.03, 1.0), (-0.03_f64).exp());
    }

    #[test]
    fn test_future_scales_by_lot_size() {
        let fut = Future::new(100.0, 0.5, 50.0).unwrap();

        assert_relative_eq!(fut.payoff(102.0, 1.0), 100.0);
        assert_relative_eq!(
            fut.value(102.0, 0.04, 2.0),
            fut.contract().value(102.0, 0.04, 2.0) * 50.0
        );
        // Carry factor e^((r-q)T), not multiplied by lot size
        assert_relative_eq!(fut.delta(0.04, 0.01, 1.0), (0.03_f64 * 0.5).exp());
    }

    #[test]
    fn test_future_rejects_bad_lot_size() {
        assert!(Future::new(100.0, 1.0, 0.0).is_err());
        assert!(Future::new(100.0, 1.0, -5.0).is_err());
    }

    #[test]
    fn test_option_payoff() {
        let call = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();
        let put = call.with_type(OptionType::Put);

        assert_relative_eq!(call.payoff(120.0, 1.0), 20.0);
        assert_relative_eq!(call.payoff(80.0, 1.0), 0.0);
        assert_relative_eq!(put.payoff(80.0, 3.0), 60.0);
        assert_relative_eq!(put.payoff(120.0, 3.0), 0.0);
    }

    #[test]
    fn test_option_payoff_short_position() {
        let call = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();

        assert_relative_eq!(call.payoff(120.0, -1.0), -20.0);
        assert_relative_eq!(call.payoff(80.0, -1.0), 0.0);
    }

    #[test]
    fn test_option_validation() {
        assert!(VanillaOption::new(OptionType::Call, OptionStyle::European, 0.0, 1.0).is_err());
        assert!(VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 0.0).is_err());
        assert!(
            VanillaOption::new(OptionType::Put, OptionStyle::American, 100.0, f64::NAN).is_err()
        );
        assert!(matches!(
            VanillaOption::from_names("call", "Asian", 100.0, 1.0),
            Err(CoreError::InvalidInstrument { .. })
        ));
        assert!(VanillaOption::from_names("put", "American", 100.0, 1.0).is_ok());
    }

    #[test]
    fn test_instrument_dispatch() {
        let fwd: Instrument = Forward::new(100.0, 2.0).unwrap().into();
        let opt: Instrument = VanillaOption::new(OptionType::Put, OptionStyle::European, 90.0, 0.5)
            .unwrap()
            .into();

        assert_eq!(fwd.kind(), "forward");
        assert!(fwd.as_option().is_none());
        assert_relative_eq!(fwd.time_to_expiry(), 2.0);

        assert_eq!(opt.kind(), "option");
        assert!(opt.as_option().is_some());
        assert_relative_eq!(opt.payoff(85.0, 1.0), 5.0);
    }
}
