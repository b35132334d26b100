//! Strike Configuration Layer
//!
//! This crate loads and validates the settings shared by the Strike command
//! line and any embedding application: the implied-volatility solver, the
//! binomial lattice, the historical VaR estimator and the VaR backtest.
//!
//! # Features
//!
//! - **Pricing Configuration**: Solver seed, tolerance, iteration budget and method
//! - **Lattice Configuration**: Step count, tree layout and the non-recombining size guard
//! - **Risk Configuration**: Lookback, holding period, confidence and business days
//! - **Backtest Configuration**: VaR level and test confidence
//! - **TOML files**: Every field optional, defaults filled in
//!
//! # Example
//!
//! ```rust
//! use strike_config::{StrikeConfig, Validate};
//!
//! let config = StrikeConfig::from_toml_str(
//!     r#"
//!     [risk]
//!     holding_period = 10
//!     confidence_level = 0.975
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! let var = config.risk.var_config();
//! assert_eq!(var.holding_period, 10);
//! assert_eq!(var.business_days, 252);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod pricing;
mod risk;
mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pricing::{LatticeSection, PricingSection};
pub use risk::{BacktestSection, RiskSection};
pub use settings::{StrikeConfig, DEFAULT_CONFIG_FILE};
