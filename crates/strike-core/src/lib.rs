//! # Strike Core
//!
//! Core types for the Strike derivatives pricing and market risk library.
//!
//! This crate provides the foundational building blocks used throughout Strike:
//!
//! - **Instruments**: Forwards, futures and vanilla options as immutable value types
//! - **Market Parameters**: Spot, rates, volatility and dividend yield inputs
//! - **Input Validation**: Typed parsing of raw form fields into validated requests
//! - **Rounding**: Report-boundary rounding to four decimal places
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Enumerated fields are enums, invalid states fail at construction
//! - **Immutability**: Instruments expose getters only and are freely shareable
//! - **Explicit Over Implicit**: Every failure is a typed [`CoreError`]
//!
//! ## Example
//!
//! ```rust
//! use strike_core::prelude::*;
//!
//! let call = VanillaOption::new(OptionType::Call, OptionStyle::European, 100.0, 1.0).unwrap();
//! assert_eq!(call.payoff(110.0, 1.0), 10.0);
//!
//! let market = MarketParameters::new(100.0, 0.05, 0.0)
//!     .unwrap()
//!     .with_volatility(0.2)
//!     .unwrap();
//! assert_eq!(market.volatility(), Some(0.2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod input;
pub mod rounding;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::input::{CalculationMode, OptionInput, RawOptionInput};
    pub use crate::rounding::{round_report, round_to, REPORT_DECIMALS};
    pub use crate::types::{
        Forward, Future, Instrument, MarketParameters, OptionStyle, OptionType, VanillaOption,
    };
}

pub use error::{CoreError, CoreResult};
pub use input::{CalculationMode, OptionInput, RawOptionInput};
pub use types::{
    Forward, Future, Instrument, MarketParameters, OptionStyle, OptionType, VanillaOption,
};
