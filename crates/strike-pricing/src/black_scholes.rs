//! Black-Scholes-Merton closed-form pricing for European options.
//!
//! With spot `S`, strike `K`, expiry `T`, rate `r`, dividend yield `q` and
//! volatility `σ`:
//!
//! ```text
//! d1   = (ln(S/K) + (r - q + σ²/2)·T) / (σ·√T)
//! d2   = d1 - σ·√T
//! call = S·e^(-qT)·Φ(d1) - K·e^(-rT)·Φ(d2)
//! put  = K·e^(-rT)·Φ(-d2) - S·e^(-qT)·Φ(-d1)
//! ```
//!
//! Gamma and vega are quoted without the `e^(-qT)` factor, and theta is
//! annualized.

use strike_core::rounding::round_report;
use strike_core::{Instrument, MarketParameters, OptionStyle, OptionType, VanillaOption};
use strike_math::distributions::{norm_cdf, norm_pdf};

use crate::error::{PricingError, PricingResult};
use crate::pricer::OptionPricer;
use crate::result::{Greeks, OptionStats, Valuation};

/// Closed-form European option pricer.
///
/// # Example
///
/// ```rust
/// use strike_core::prelude::*;
/// use strike_pricing::BlackScholes;
///
/// let call = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();
/// let market = MarketParameters::new(100.0, 0.05, 0.0)
///     .unwrap()
///     .with_volatility(0.2)
///     .unwrap();
///
/// let price = BlackScholes.price(&call, &market).unwrap();
/// assert!((price - 10.4506).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlackScholes;

/// Intermediate terms shared by the price and every Greek.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BsmTerms {
    pub(crate) option_type: OptionType,
    pub(crate) spot: f64,
    pub(crate) strike: f64,
    pub(crate) expiry: f64,
    pub(crate) rate: f64,
    pub(crate) volatility: f64,
    pub(crate) sqrt_t: f64,
    pub(crate) d1: f64,
    pub(crate) d2: f64,
    /// e^(-rT)
    pub(crate) discount: f64,
    /// e^(-qT)
    pub(crate) dividend_discount: f64,
}

impl BsmTerms {
    pub(crate) fn new(
        option: &VanillaOption,
        market: &MarketParameters,
        volatility: f64,
    ) -> PricingResult<Self> {
        if option.option_style() != OptionStyle::European {
            return Err(PricingError::UnsupportedStyle {
                style: option.option_style(),
                operation: "Black-Scholes pricing",
            });
        }
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::degenerate(format!(
                "volatility must be > 0, got {volatility}"
            )));
        }

        let spot = market.underlying_price();
        let strike = option.strike_price();
        let expiry = option.time_to_expiry();
        let rate = market.risk_free_rate();
        let dividend = market.dividend_yield();

        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;
        if !(vol_sqrt_t.is_finite() && vol_sqrt_t > 0.0) {
            return Err(PricingError::degenerate(format!(
                "σ·√T must be > 0, got {vol_sqrt_t}"
            )));
        }

        let d1 = ((spot / strike).ln() + (rate - dividend + 0.5 * volatility * volatility) * expiry)
            / vol_sqrt_t;
        if !d1.is_finite() {
            return Err(PricingError::degenerate(format!("d1 is not finite ({d1})")));
        }

        Ok(Self {
            option_type: option.option_type(),
            spot,
            strike,
            expiry,
            rate,
            volatility,
            sqrt_t,
            d1,
            d2: d1 - vol_sqrt_t,
            discount: (-rate * expiry).exp(),
            dividend_discount: (-dividend * expiry).exp(),
        })
    }

    pub(crate) fn price(&self) -> f64 {
        let forward_spot = self.spot * self.dividend_discount;
        let pv_strike = self.strike * self.discount;
        match self.option_type {
            OptionType::Call => forward_spot * norm_cdf(self.d1) - pv_strike * norm_cdf(self.d2),
            OptionType::Put => pv_strike * norm_cdf(-self.d2) - forward_spot * norm_cdf(-self.d1),
        }
    }

    fn delta(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.dividend_discount * norm_cdf(self.d1),
            OptionType::Put => self.dividend_discount * (norm_cdf(self.d1) - 1.0),
        }
    }

    fn gamma(&self) -> f64 {
        norm_pdf(self.d1) / (self.spot * self.volatility * self.sqrt_t)
    }

    fn vega(&self) -> f64 {
        self.spot * self.sqrt_t * norm_pdf(self.d1)
    }

    /// ∂price/∂σ including the dividend discount, used by the volatility solver.
    pub(crate) fn price_sensitivity_to_vol(&self) -> f64 {
        self.dividend_discount * self.vega()
    }

    fn theta(&self) -> f64 {
        let decay = -self.spot * norm_pdf(self.d1) * self.volatility / (2.0 * self.sqrt_t);
        let carry = self.rate * self.strike * self.discount;
        match self.option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        }
    }

    fn rho(&self) -> f64 {
        let scale = self.strike * self.expiry * self.discount;
        match self.option_type {
            OptionType::Call => scale * norm_cdf(self.d2),
            OptionType::Put => -scale * norm_cdf(-self.d2),
        }
    }

    fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(),
            rho: self.rho(),
        }
    }
}

impl BlackScholes {
    fn terms(option: &VanillaOption, market: &MarketParameters) -> PricingResult<BsmTerms> {
        BsmTerms::new(option, market, market.require_volatility()?)
    }

    /// Option price.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnsupportedStyle`] for American options
    /// - [`PricingError::DegenerateInput`] for zero volatility
    /// - [`PricingError::Core`] if the market parameters carry no volatility
    pub fn price(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.price())
    }

    /// Delta: `e^(-qT)·Φ(d1)` for calls, `e^(-qT)·(Φ(d1) - 1)` for puts.
    pub fn delta(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.delta())
    }

    /// Gamma: `φ(d1) / (S·σ·√T)`.
    pub fn gamma(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.gamma())
    }

    /// Vega: `S·√T·φ(d1)`.
    pub fn vega(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.vega())
    }

    /// Annualized theta.
    pub fn theta(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.theta())
    }

    /// Rho: `K·T·e^(-rT)·Φ(d2)` for calls, `-K·T·e^(-rT)·Φ(-d2)` for puts.
    pub fn rho(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        Ok(Self::terms(option, market)?.rho())
    }

    /// All five Greeks, unrounded.
    pub fn greeks(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<Greeks> {
        Ok(Self::terms(option, market)?.greeks())
    }

    /// Price and Greeks, unrounded.
    pub fn valuation(
        &self,
        option: &VanillaOption,
        market: &MarketParameters,
    ) -> PricingResult<Valuation> {
        let terms = Self::terms(option, market)?;
        Ok(Valuation::with_greeks(terms.price(), terms.greeks()))
    }

    /// The calculator report: contract terms, price and Greeks, rounded to four decimals.
    pub fn option_stats(
        &self,
        option: &VanillaOption,
        market: &MarketParameters,
    ) -> PricingResult<OptionStats> {
        let terms = Self::terms(option, market)?;
        Ok(OptionStats {
            option_type: option.option_type(),
            option_style: option.option_style(),
            strike_price: option.strike_price(),
            time_to_expiry: option.time_to_expiry(),
            underlying_price: market.underlying_price(),
            volatility: terms.volatility,
            price: round_report(terms.price()),
            greeks: terms.greeks().rounded(),
        })
    }

    /// Warrant price: the option price times the dilution factor `N / (N + M)`.
    ///
    /// `outstanding_shares` is `N`, `number_of_warrants` is `M`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::DegenerateInput`] unless `N > 0` and `M >= 0`,
    /// plus every failure of [`BlackScholes::price`].
    pub fn warrant_price(
        &self,
        option: &VanillaOption,
        market: &MarketParameters,
        outstanding_shares: f64,
        number_of_warrants: f64,
    ) -> PricingResult<f64> {
        if !(outstanding_shares.is_finite() && outstanding_shares > 0.0) {
            return Err(PricingError::degenerate(format!(
                "outstanding shares must be > 0, got {outstanding_shares}"
            )));
        }
        if !(number_of_warrants.is_finite() && number_of_warrants >= 0.0) {
            return Err(PricingError::degenerate(format!(
                "number of warrants must be >= 0, got {number_of_warrants}"
            )));
        }
        let dilution = outstanding_shares / (outstanding_shares + number_of_warrants);
        Ok(self.price(option, market)? * dilution)
    }
}

impl OptionPricer for BlackScholes {
    fn name(&self) -> &'static str {
        "Black-Scholes"
    }

    fn value(&self, instrument: &Instrument, market: &MarketParameters) -> PricingResult<Valuation> {
        let option = instrument.as_option().ok_or(PricingError::NotAnOption {
            kind: instrument.kind(),
        })?;
        self.valuation(option, market)
    }
}
