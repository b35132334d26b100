//! Form-driven option calculator.
//!
//! Takes a validated [`OptionInput`] and either prices the option (with
//! Greeks) or backs out the implied volatility, depending on its mode.

use serde::Serialize;

use strike_core::rounding::round_report;
use strike_core::{CalculationMode, CoreError, OptionInput};

use crate::black_scholes::BlackScholes;
use crate::error::PricingResult;
use crate::implied_vol::{ImpliedVolConfig, ImpliedVolSolver};
use crate::result::OptionStats;

/// What the calculator produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationOutcome {
    /// Price and Greeks for the supplied volatility.
    Price(OptionStats),
    /// Implied volatility for the supplied price, rounded to four decimals.
    ImpliedVolatility {
        /// The implied volatility.
        volatility: f64,
    },
}

/// Evaluates calculator requests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionCalculator {
    solver: ImpliedVolSolver,
}

impl OptionCalculator {
    /// Creates a calculator with the given implied volatility settings.
    #[must_use]
    pub fn new(implied_vol: ImpliedVolConfig) -> Self {
        Self {
            solver: ImpliedVolSolver::new(implied_vol),
        }
    }

    /// Runs the calculation selected by `input.mode`.
    ///
    /// # Errors
    ///
    /// Propagates pricing and solver failures; a volatility request without
    /// an observed price is a [`CoreError::MissingField`].
    pub fn evaluate(&self, input: &OptionInput) -> PricingResult<CalculationOutcome> {
        match input.mode {
            CalculationMode::SolvePrice => {
                let stats = BlackScholes.option_stats(&input.option, &input.market)?;
                Ok(CalculationOutcome::Price(stats))
            }
            CalculationMode::SolveVolatility => {
                let price = input
                    .observed_price
                    .ok_or(CoreError::MissingField { field: "price" })?;
                let volatility = self.solver.solve(&input.option, &input.market, price)?;
                Ok(CalculationOutcome::ImpliedVolatility {
                    volatility: round_report(volatility),
                })
            }
        }
    }
}
