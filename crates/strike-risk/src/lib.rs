//! # Strike Risk
//!
//! Market risk analytics for the Strike derivatives library.
//!
//! This crate provides:
//!
//! - **Price series**: Dated adjusted closes, normalized newest first
//! - **Returns**: Single-day and horizon-minimum log returns
//! - **VaR**: Historical-simulation VaR, expected shortfall and volatility
//! - **Backtesting**: Binomial overshoot test of a VaR estimate
//!
//! ## Example
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use strike_risk::prelude::*;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series = PriceSeries::from_pairs(
//!     (0..300).map(|i| (start + Duration::days(i), 100.0 + (i % 7) as f64)),
//! )
//! .unwrap();
//!
//! let var = historical_var(&series, &VarConfig::default()).unwrap();
//! let test = Backtester
//!     .run_on_series(&series, &var, &BacktestConfig::default())
//!     .unwrap();
//! assert_eq!(test.observations, 251);
//! ```
//!
//! The return construction for holding periods above one day keeps the most
//! adverse 1..h day return ending on each date. It is deliberately
//! conservative and is not an h-day return distribution.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod backtest;
pub mod error;
pub mod series;
pub mod var;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::backtest::{BacktestConfig, BacktestResult, Backtester};
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::series::{LogReturns, PriceObservation, PriceSeries};
    pub use crate::var::{
        historical_var, tail_measures, HistoricalVarEstimator, TailMeasures, VaRResult, VarConfig,
    };
}

pub use backtest::{BacktestConfig, BacktestResult, Backtester};
pub use error::{RiskError, RiskResult};
pub use series::{LogReturns, PriceObservation, PriceSeries};
pub use var::{historical_var, HistoricalVarEstimator, VaRResult, VarConfig};
