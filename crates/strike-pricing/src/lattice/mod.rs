//! Binomial lattice option pricing.
//!
//! The lattice steps the underlying up by `u` or down by `d` over `steps`
//! intervals of `Δt = T / steps`. Factors are either given explicitly or
//! derived from volatility with the Cox-Ross-Rubinstein choice
//! `u = e^(σ√Δt)`, `d = 1/u`. The risk-neutral up probability is
//!
//! ```text
//! p = (e^((r - q)Δt) - d) / (u - d)
//! ```
//!
//! and must lie strictly inside `(0, 1)`.
//!
//! European options are valued with the closed binomial sum in O(steps).
//! American options are valued by backward induction on an explicit tree;
//! see [`TreeLayout`] for the two layouts.

mod american;
mod european;

pub use american::{node_count, node_index, LatticeNode, NonRecombiningTree};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use strike_core::{CoreError, Instrument, MarketParameters, OptionStyle, VanillaOption};

use crate::error::{PricingError, PricingResult};
use crate::pricer::OptionPricer;
use crate::result::Valuation;

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 100;

/// Default step limit for the non-recombining tree.
pub const DEFAULT_MAX_TREE_STEPS: usize = 20;

/// Hard ceiling on the non-recombining tree, 2^25 - 1 nodes.
pub const MAX_TREE_STEPS_CEILING: usize = 24;

/// Tree layout used for American exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TreeLayout {
    /// A full binary tree of `2^(steps+1) - 1` nodes stored in one flat
    /// buffer. Nodes are never merged even when their prices coincide, so
    /// time and memory grow as `2^steps`.
    #[default]
    NonRecombining,
    /// `steps + 1` nodes per level, O(steps²) time and O(steps) memory.
    Recombining,
}

impl fmt::Display for TreeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeLayout::NonRecombining => f.write_str("non_recombining"),
            TreeLayout::Recombining => f.write_str("recombining"),
        }
    }
}

impl FromStr for TreeLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "non_recombining" | "full" => Ok(TreeLayout::NonRecombining),
            "recombining" => Ok(TreeLayout::Recombining),
            _ => Err(CoreError::InvalidChoice {
                field: "layout",
                value: s.to_string(),
                expected: "non_recombining, recombining",
            }),
        }
    }
}

/// Where the up and down factors come from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FactorSource {
    /// Cox-Ross-Rubinstein factors from the market volatility.
    #[default]
    Volatility,
    /// Caller-supplied multiplicative factors.
    Explicit {
        /// Up factor `u`.
        up: f64,
        /// Down factor `d`.
        down: f64,
    },
}

/// Per-step lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParameters {
    /// Up factor.
    pub up: f64,
    /// Down factor.
    pub down: f64,
    /// Risk-neutral probability of an up move.
    pub probability: f64,
    /// Step length in years.
    pub dt: f64,
    /// One-step discount factor `e^(-rΔt)`.
    pub step_discount: f64,
}

impl LatticeParameters {
    /// Builds parameters from explicit factors.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidLatticeParameters`] unless
    /// `0 < d < u` and the risk-neutral probability lies in `(0, 1)`.
    pub fn from_factors(
        up: f64,
        down: f64,
        rate: f64,
        dividend_yield: f64,
        dt: f64,
    ) -> PricingResult<Self> {
        if !(up.is_finite() && down.is_finite() && down > 0.0 && up > down) {
            return Err(PricingError::invalid_lattice(format!(
                "factors must satisfy 0 < d < u, got u = {up}, d = {down}"
            )));
        }

        let growth = ((rate - dividend_yield) * dt).exp();
        let probability = (growth - down) / (up - down);
        if !(probability > 0.0 && probability < 1.0) {
            return Err(PricingError::invalid_lattice(format!(
                "risk-neutral probability {probability:.6} is outside (0, 1) for u = {up}, d = {down}"
            )));
        }

        Ok(Self {
            up,
            down,
            probability,
            dt,
            step_discount: (-rate * dt).exp(),
        })
    }

    /// Builds Cox-Ross-Rubinstein parameters from a volatility.
    ///
    /// # Errors
    ///
    /// - [`PricingError::DegenerateInput`] for a non-positive volatility
    /// - [`PricingError::InvalidLatticeParameters`] if the step is too coarse
    ///   for the carry, so that `p` leaves `(0, 1)`
    pub fn from_volatility(
        volatility: f64,
        rate: f64,
        dividend_yield: f64,
        dt: f64,
    ) -> PricingResult<Self> {
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(PricingError::degenerate(format!(
                "volatility must be > 0, got {volatility}"
            )));
        }
        let up = (volatility * dt.sqrt()).exp();
        Self::from_factors(up, 1.0 / up, rate, dividend_yield, dt)
    }
}

/// Binomial lattice pricer for European and American options.
///
/// # Example
///
/// ```rust
/// use strike_core::prelude::*;
/// use strike_pricing::lattice::{BinomialLattice, TreeLayout};
///
/// let put = VanillaOption::new(OptionType::Put, OptionStyle::American, 100.0, 1.0).unwrap();
/// let market = MarketParameters::new(100.0, 0.05, 0.0)
///     .unwrap()
///     .with_volatility(0.2)
///     .unwrap();
///
/// let lattice = BinomialLattice::new(100)
///     .unwrap()
///     .with_layout(TreeLayout::Recombining);
/// let price = lattice.price(&put, &market).unwrap();
/// assert!(price > 5.5735);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialLattice {
    steps: usize,
    factors: FactorSource,
    layout: TreeLayout,
    max_tree_steps: usize,
}

impl BinomialLattice {
    /// Creates a lattice with CRR factors and the default layout.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidLatticeParameters`] for zero steps.
    pub fn new(steps: usize) -> PricingResult<Self> {
        if steps == 0 {
            return Err(PricingError::invalid_lattice("steps must be at least 1"));
        }
        Ok(Self {
            steps,
            factors: FactorSource::Volatility,
            layout: TreeLayout::NonRecombining,
            max_tree_steps: DEFAULT_MAX_TREE_STEPS,
        })
    }

    /// Uses explicit up and down factors instead of volatility.
    #[must_use]
    pub fn with_factors(mut self, up: f64, down: f64) -> Self {
        self.factors = FactorSource::Explicit { up, down };
        self
    }

    /// Selects the tree layout for American exercise.
    #[must_use]
    pub fn with_layout(mut self, layout: TreeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the step limit for the non-recombining tree.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::TreeTooLarge`] above [`MAX_TREE_STEPS_CEILING`].
    pub fn with_max_tree_steps(mut self, max_tree_steps: usize) -> PricingResult<Self> {
        if max_tree_steps > MAX_TREE_STEPS_CEILING {
            return Err(PricingError::TreeTooLarge {
                steps: max_tree_steps,
                max_steps: MAX_TREE_STEPS_CEILING,
            });
        }
        self.max_tree_steps = max_tree_steps;
        Ok(self)
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the factor source.
    #[must_use]
    pub fn factors(&self) -> FactorSource {
        self.factors
    }

    /// Returns the American tree layout.
    #[must_use]
    pub fn layout(&self) -> TreeLayout {
        self.layout
    }

    /// Returns the non-recombining step limit.
    #[must_use]
    pub fn max_tree_steps(&self) -> usize {
        self.max_tree_steps
    }

    /// Per-step parameters for an option under the given market.
    pub fn parameters(
        &self,
        option: &VanillaOption,
        market: &MarketParameters,
    ) -> PricingResult<LatticeParameters> {
        let dt = option.time_to_expiry() / self.steps as f64;
        let rate = market.risk_free_rate();
        let dividend = market.dividend_yield();

        match self.factors {
            FactorSource::Volatility => LatticeParameters::from_volatility(
                market.require_volatility()?,
                rate,
                dividend,
                dt,
            ),
            FactorSource::Explicit { up, down } => {
                LatticeParameters::from_factors(up, down, rate, dividend, dt)
            }
        }
    }

    /// Option price at full precision.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidLatticeParameters`] for arbitrage-admitting factors
    /// - [`PricingError::DegenerateInput`] for zero volatility with CRR factors
    /// - [`PricingError::TreeTooLarge`] for an American option on the
    ///   non-recombining layout with more than `max_tree_steps` steps
    pub fn price(&self, option: &VanillaOption, market: &MarketParameters) -> PricingResult<f64> {
        let params = self.parameters(option, market)?;
        let spot = market.underlying_price();

        match option.option_style() {
            OptionStyle::European => {
                european::price(option, spot, market.risk_free_rate(), self.steps, &params)
            }
            OptionStyle::American => match self.layout {
                TreeLayout::NonRecombining => {
                    if self.steps > self.max_tree_steps {
                        return Err(PricingError::TreeTooLarge {
                            steps: self.steps,
                            max_steps: self.max_tree_steps,
                        });
                    }
                    let mut tree = NonRecombiningTree::build(spot, self.steps, &params);
                    tree.roll_back(option, &params);
                    Ok(tree.root().option_value)
                }
                TreeLayout::Recombining => {
                    Ok(american::price_recombining(option, spot, self.steps, &params))
                }
            },
        }
    }
}

impl OptionPricer for BinomialLattice {
    fn name(&self) -> &'static str {
        "Binomial lattice"
    }

    fn value(&self, instrument: &Instrument, market: &MarketParameters) -> PricingResult<Valuation> {
        let option = instrument.as_option().ok_or(PricingError::NotAnOption {
            kind: instrument.kind(),
        })?;
        Ok(Valuation::price_only(self.price(option, market)?))
    }
}
