//! Validation of raw form input.
//!
//! A form front end collects an option type, a calculation mode and six text
//! fields. [`OptionInput::parse`] turns those strings into a validated
//! European option plus market parameters, rejecting anything that is not a
//! finite number or falls outside its domain with a typed [`CoreError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::{MarketParameters, OptionStyle, OptionType, VanillaOption};

/// What the form asks the calculator to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Price the option (and its Greeks) from a volatility.
    #[default]
    SolvePrice,
    /// Back out the implied volatility from an observed price.
    SolveVolatility,
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMode::SolvePrice => f.write_str("price"),
            CalculationMode::SolveVolatility => f.write_str("volatility"),
        }
    }
}

impl FromStr for CalculationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" | "solve_price" => Ok(CalculationMode::SolvePrice),
            "volatility" | "vol" | "solve_volatility" => Ok(CalculationMode::SolveVolatility),
            _ => Err(CoreError::InvalidChoice {
                field: "mode",
                value: s.to_string(),
                expected: "price, volatility",
            }),
        }
    }
}

/// Unvalidated form fields, exactly as typed by the user.
///
/// Only one of `volatility` and `price` is read, depending on `mode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawOptionInput<'a> {
    /// `call` or `put`.
    pub option_type: &'a str,
    /// Calculation mode.
    pub mode: CalculationMode,
    /// Strike price.
    pub strike: &'a str,
    /// Spot price of the underlying.
    pub underlying_price: &'a str,
    /// Time to expiry in years.
    pub expiry: &'a str,
    /// Risk-free rate as a decimal.
    pub risk_free_rate: &'a str,
    /// Dividend yield as a decimal.
    pub dividend_yield: &'a str,
    /// Volatility as a decimal, read in [`CalculationMode::SolvePrice`].
    pub volatility: &'a str,
    /// Observed option price, read in [`CalculationMode::SolveVolatility`].
    pub price: &'a str,
}

/// A validated calculator request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionInput {
    /// The European option described by the form.
    pub option: VanillaOption,
    /// Market inputs; carries a volatility in [`CalculationMode::SolvePrice`].
    pub market: MarketParameters,
    /// What to solve for.
    pub mode: CalculationMode,
    /// Observed price, present in [`CalculationMode::SolveVolatility`].
    pub observed_price: Option<f64>,
}

impl OptionInput {
    /// Parses and validates raw form fields.
    ///
    /// # Errors
    ///
    /// - [`CoreError::InvalidInstrument`] for an unknown option type
    /// - [`CoreError::NotNumeric`] for empty, non-numeric or non-finite text
    /// - [`CoreError::OutOfDomain`] for values outside their domain
    pub fn parse(raw: &RawOptionInput<'_>) -> CoreResult<Self> {
        let option_type: OptionType = raw.option_type.parse()?;

        let strike = positive("strike", parse_number("strike", raw.strike)?)?;
        let underlying = positive(
            "underlying_price",
            parse_number("underlying_price", raw.underlying_price)?,
        )?;
        let expiry = positive("expiry", parse_number("expiry", raw.expiry)?)?;
        let rate = parse_number("risk_free_rate", raw.risk_free_rate)?;
        let dividend = parse_number("dividend_yield", raw.dividend_yield)?;

        let option = VanillaOption::new(option_type, OptionStyle::European, strike, expiry)?;
        let market = MarketParameters::new(underlying, rate, dividend)?;

        match raw.mode {
            CalculationMode::SolvePrice => {
                let volatility =
                    positive("volatility", parse_number("volatility", raw.volatility)?)?;
                Ok(Self {
                    option,
                    market: market.with_volatility(volatility)?,
                    mode: raw.mode,
                    observed_price: None,
                })
            }
            CalculationMode::SolveVolatility => {
                let price = positive("price", parse_number("price", raw.price)?)?;
                Ok(Self {
                    option,
                    market,
                    mode: raw.mode,
                    observed_price: Some(price),
                })
            }
        }
    }
}

/// Parses one form field as a finite `f64`.
///
/// # Errors
///
/// Returns [`CoreError::NotNumeric`] for empty, non-numeric, `NaN` or infinite text.
pub fn parse_number(field: &'static str, text: &str) -> CoreResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoreError::not_numeric(field, text)),
    }
}

fn positive(field: &'static str, value: f64) -> CoreResult<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::out_of_domain(field, value, "> 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mode: CalculationMode) -> RawOptionInput<'static> {
        RawOptionInput {
            option_type: "call",
            mode,
            strike: "100",
            underlying_price: "100",
            expiry: "1",
            risk_free_rate: "0.05",
            dividend_yield: "0",
            volatility: "0.2",
            price: "10.45",
        }
    }

    #[test]
    fn test_parse_price_mode() {
        let input = OptionInput::parse(&form(CalculationMode::SolvePrice)).unwrap();

        assert_eq!(input.option.option_type(), OptionType::Call);
        assert_eq!(input.option.option_style(), OptionStyle::European);
        assert_eq!(input.market.volatility(), Some(0.2));
        assert_eq!(input.observed_price, None);
    }

    #[test]
    fn test_parse_volatility_mode_ignores_volatility_field() {
        let mut raw = form(CalculationMode::SolveVolatility);
        raw.volatility = "";

        let input = OptionInput::parse(&raw).unwrap();
        assert_eq!(input.market.volatility(), None);
        assert_eq!(input.observed_price, Some(10.45));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let mut raw = form(CalculationMode::SolvePrice);
        raw.strike = "abc";
        assert_eq!(
            OptionInput::parse(&raw),
            Err(CoreError::not_numeric("strike", "abc"))
        );

        let mut raw = form(CalculationMode::SolvePrice);
        raw.volatility = "NaN";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::NotNumeric { field: "volatility", .. })
        ));

        let mut raw = form(CalculationMode::SolvePrice);
        raw.expiry = "  ";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::NotNumeric { field: "expiry", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_domain() {
        let mut raw = form(CalculationMode::SolvePrice);
        raw.underlying_price = "-5";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::OutOfDomain { field: "underlying_price", .. })
        ));

        let mut raw = form(CalculationMode::SolveVolatility);
        raw.price = "0";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::OutOfDomain { field: "price", .. })
        ));

        let mut raw = form(CalculationMode::SolvePrice);
        raw.dividend_yield = "-0.01";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::OutOfDomain { field: "dividend_yield", .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_option_type() {
        let mut raw = form(CalculationMode::SolvePrice);
        raw.option_type = "digital";
        assert!(matches!(
            OptionInput::parse(&raw),
            Err(CoreError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_calculation_mode_from_str() {
        assert_eq!(
            "price".parse::<CalculationMode>().unwrap(),
            CalculationMode::SolvePrice
        );
        assert_eq!(
            "Volatility".parse::<CalculationMode>().unwrap(),
            CalculationMode::SolveVolatility
        );
        assert!(matches!(
            "greeks".parse::<CalculationMode>(),
            Err(CoreError::InvalidChoice { field: "mode", .. })
        ));
    }
}
