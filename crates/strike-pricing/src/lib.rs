//! # Strike Pricing
//!
//! Option pricing models for the Strike derivatives library.
//!
//! This crate provides:
//!
//! - **Black-Scholes-Merton**: Closed-form European prices, the five Greeks
//!   and warrant pricing with dilution
//! - **Implied Volatility**: Bracketed Newton, Newton and secant inversion of
//!   the analytic price
//! - **Binomial Lattice**: European closed-sum and American backward-induction
//!   pricing from explicit factors or CRR volatility factors
//! - **Calculator**: Evaluates validated form input in price or volatility mode
//!
//! ## Example
//!
//! ```rust
//! use strike_core::prelude::*;
//! use strike_pricing::prelude::*;
//!
//! let call = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();
//! let market = MarketParameters::new(100.0, 0.05, 0.0)
//!     .unwrap()
//!     .with_volatility(0.2)
//!     .unwrap();
//!
//! let valuation = BlackScholes.valuation(&call, &market).unwrap().rounded();
//! assert_eq!(valuation.price, 10.4506);
//! assert_eq!(valuation.greeks.unwrap().delta, 0.6368);
//! ```
//!
//! All computations are pure functions of their inputs. Results are kept at
//! full precision until a caller rounds them for display.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::uninlined_format_args)]

pub mod black_scholes;
pub mod calculator;
pub mod error;
pub mod implied_vol;
pub mod lattice;
pub mod pricer;
pub mod result;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::black_scholes::BlackScholes;
    pub use crate::calculator::{CalculationOutcome, OptionCalculator};
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::implied_vol::{
        implied_volatility, ImpliedVolConfig, ImpliedVolMethod, ImpliedVolSolver,
    };
    pub use crate::lattice::{BinomialLattice, LatticeParameters, TreeLayout};
    pub use crate::pricer::OptionPricer;
    pub use crate::result::{Greeks, OptionStats, Valuation};
}

pub use black_scholes::BlackScholes;
pub use calculator::{CalculationOutcome, OptionCalculator};
pub use error::{PricingError, PricingResult};
pub use implied_vol::{implied_volatility, ImpliedVolConfig, ImpliedVolMethod, ImpliedVolSolver};
pub use lattice::{BinomialLattice, TreeLayout};
pub use pricer::OptionPricer;
pub use result::{Greeks, OptionStats, Valuation};
