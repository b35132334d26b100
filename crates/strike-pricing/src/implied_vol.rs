//! Implied volatility from an observed European option price.
//!
//! The Black-Scholes price is strictly increasing in volatility, so a price
//! strictly inside the no-arbitrage band has exactly one positive implied
//! volatility. Prices on or outside the band are rejected before iterating.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use strike_core::{CoreError, MarketParameters, OptionType, VanillaOption};
use strike_math::solvers::{newton_raphson, safeguarded_newton, secant, SolverConfig};

use crate::black_scholes::BsmTerms;
use crate::error::{PricingError, PricingResult};

/// Lower end of the volatility search bracket.
pub const MIN_VOLATILITY: f64 = 1e-6;

/// Upper end of the volatility search bracket.
pub const MAX_VOLATILITY: f64 = 5.0;

/// Root-finding method used by [`ImpliedVolSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImpliedVolMethod {
    /// Newton steps on vega, kept inside `[MIN_VOLATILITY, MAX_VOLATILITY]`
    /// with bisection fallback.
    #[default]
    SafeguardedNewton,
    /// Unconstrained Newton-Raphson on vega.
    Newton,
    /// Derivative-free secant iteration.
    Secant,
}

impl fmt::Display for ImpliedVolMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImpliedVolMethod::SafeguardedNewton => "safeguarded_newton",
            ImpliedVolMethod::Newton => "newton",
            ImpliedVolMethod::Secant => "secant",
        };
        f.write_str(name)
    }
}

impl FromStr for ImpliedVolMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "safeguarded_newton" | "safeguarded" => Ok(ImpliedVolMethod::SafeguardedNewton),
            "newton" | "newton_raphson" => Ok(ImpliedVolMethod::Newton),
            "secant" => Ok(ImpliedVolMethod::Secant),
            _ => Err(CoreError::InvalidChoice {
                field: "method",
                value: s.to_string(),
                expected: "safeguarded_newton, newton, secant",
            }),
        }
    }
}

/// Settings for the implied volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolConfig {
    /// Starting volatility.
    pub initial_guess: f64,
    /// Absolute tolerance on the price residual.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
    /// Root-finding method.
    pub method: ImpliedVolMethod,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            tolerance: 1e-6,
            max_iterations: 100,
            method: ImpliedVolMethod::SafeguardedNewton,
        }
    }
}

impl ImpliedVolConfig {
    /// Sets the root-finding method.
    #[must_use]
    pub fn with_method(mut self, method: ImpliedVolMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the starting volatility.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Inverts the Black-Scholes price for volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given settings.
    #[must_use]
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self { config }
    }

    /// Returns the solver settings.
    #[must_use]
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Finds σ such that the Black-Scholes price equals `observed_price`.
    ///
    /// Any volatility already present in `market` is ignored. The result is
    /// unrounded and always strictly positive.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnsupportedStyle`] for American options
    /// - [`PricingError::NoConvergence`] if the price lies outside the
    ///   no-arbitrage band, or the iteration fails or ends on a non-positive root
    pub fn solve(
        &self,
        option: &VanillaOption,
        market: &MarketParameters,
        observed_price: f64,
    ) -> PricingResult<f64> {
        let cfg = &self.config;

        // Validates style up front so that American options fail as such.
        BsmTerms::new(option, market, cfg.initial_guess.max(MIN_VOLATILITY))?;
        check_arbitrage_band(option, market, observed_price)?;

        let objective = |sigma: f64| {
            BsmTerms::new(option, market, sigma)
                .map_or(f64::NAN, |terms| terms.price() - observed_price)
        };
        let slope = |sigma: f64| {
            BsmTerms::new(option, market, sigma)
                .map_or(f64::NAN, |terms| terms.price_sensitivity_to_vol())
        };

        let solver_config = SolverConfig::new(cfg.tolerance, cfg.max_iterations);
        let outcome = match cfg.method {
            ImpliedVolMethod::SafeguardedNewton => safeguarded_newton(
                objective,
                slope,
                cfg.initial_guess,
                (MIN_VOLATILITY, MAX_VOLATILITY),
                &solver_config,
            ),
            ImpliedVolMethod::Newton => {
                newton_raphson(objective, slope, cfg.initial_guess, &solver_config)
            }
            ImpliedVolMethod::Secant => secant(
                objective,
                cfg.initial_guess,
                cfg.initial_guess * 1.5,
                &solver_config,
            ),
        };

        let result = outcome.map_err(|e| PricingError::from_solver(&e, cfg.max_iterations))?;

        if !(result.root.is_finite() && result.root > 0.0) || !result.residual.is_finite() {
            return Err(PricingError::no_convergence(
                result.iterations,
                format!("iteration ended on volatility {}", result.root),
            ));
        }

        log::debug!(
            "implied volatility {:.6} found by {} in {} iterations",
            result.root,
            cfg.method,
            result.iterations
        );
        Ok(result.root)
    }
}

/// Implied volatility with the default solver settings.
pub fn implied_volatility(
    option: &VanillaOption,
    market: &MarketParameters,
    observed_price: f64,
) -> PricingResult<f64> {
    ImpliedVolSolver::default().solve(option, market, observed_price)
}

/// Rejects prices that no positive volatility can reproduce.
fn check_arbitrage_band(
    option: &VanillaOption,
    market: &MarketParameters,
    observed_price: f64,
) -> PricingResult<()> {
    let t = option.time_to_expiry();
    let forward_spot = market.underlying_price() * (-market.dividend_yield() * t).exp();
    let pv_strike = option.strike_price() * (-market.risk_free_rate() * t).exp();

    let (lower, upper) = match option.option_type() {
        OptionType::Call => ((forward_spot - pv_strike).max(0.0), forward_spot),
        OptionType::Put => ((pv_strike - forward_spot).max(0.0), pv_strike),
    };

    if observed_price.is_finite() && observed_price > lower && observed_price < upper {
        return Ok(());
    }

    log::warn!("price {observed_price} outside no-arbitrage band ({lower:.6}, {upper:.6})");
    Err(PricingError::no_convergence(
        0,
        format!("price {observed_price} is outside the no-arbitrage band ({lower:.6}, {upper:.6})"),
    ))
}
