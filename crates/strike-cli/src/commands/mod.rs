//! CLI command implementations.

pub mod backtest;
pub mod config;
pub mod forward;
pub mod lattice;
pub mod price;
pub mod var;
pub mod warrant;

// Re-export submodules for convenience
pub use backtest::BacktestArgs;
pub use config::ConfigArgs;
pub use forward::ForwardArgs;
pub use lattice::LatticeArgs;
pub use price::PriceArgs;
pub use var::VarArgs;
pub use warrant::WarrantArgs;

use std::path::PathBuf;

use clap::Args;
use strike_config::StrikeConfig;
use strike_core::{MarketParameters, OptionStyle, OptionType, VanillaOption};

use crate::output::{KeyValue, Printer};

/// Settings shared by every command.
pub struct Context {
    /// Output settings.
    pub printer: Printer,
    /// Effective configuration.
    pub config: StrikeConfig,
    /// File the configuration was (or would be) read from.
    pub config_path: PathBuf,
}

/// Option contract and market inputs given as numbers.
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Option type: call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Spot price of the underlying
    #[arg(short = 's', long)]
    pub spot: f64,

    /// Time to expiry in years
    #[arg(short = 'T', long)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate (decimal)
    #[arg(short = 'r', long, default_value = "0", allow_hyphen_values = true)]
    pub rate: f64,

    /// Continuous dividend yield (decimal)
    #[arg(short = 'd', long, default_value = "0")]
    pub dividend: f64,
}

impl ContractArgs {
    /// Builds the option with the given exercise style.
    pub fn option(&self, style: OptionStyle) -> anyhow::Result<VanillaOption> {
        Ok(VanillaOption::new(
            self.option_type,
            style,
            self.strike,
            self.expiry,
        )?)
    }

    /// Builds market parameters, attaching `volatility` when given.
    pub fn market(&self, volatility: Option<f64>) -> anyhow::Result<MarketParameters> {
        let market = MarketParameters::new(self.spot, self.rate, self.dividend)?;
        Ok(match volatility {
            Some(vol) => market.with_volatility(vol)?,
            None => market,
        })
    }

    /// Table rows describing the contract.
    pub fn rows(&self, style: OptionStyle) -> Vec<KeyValue> {
        vec![
            KeyValue::new("Option", format!("{} {}", style, self.option_type)),
            KeyValue::from_value("Strike", self.strike),
            KeyValue::from_value("Spot", self.spot),
            KeyValue::from_value("Expiry (years)", self.expiry),
            KeyValue::from_percent("Risk-free Rate", self.rate),
            KeyValue::from_percent("Dividend Yield", self.dividend),
        ]
    }
}
