//! Domain types for derivatives pricing.
//!
//! This module provides type-safe representations of the contracts and
//! market inputs the pricers consume:
//!
//! - [`OptionType`] / [`OptionStyle`]: Enumerated option fields
//! - [`Forward`] / [`Future`]: Linear delivery contracts
//! - [`VanillaOption`]: Call or put with European or American exercise
//! - [`Instrument`]: Tagged union over the three contract kinds
//! - [`MarketParameters`]: Spot, rate, volatility and dividend yield

mod instrument;
mod market;
mod option_kind;

pub use instrument::{Forward, Future, Instrument, VanillaOption};
pub use market::MarketParameters;
pub use option_kind::{OptionStyle, OptionType};
