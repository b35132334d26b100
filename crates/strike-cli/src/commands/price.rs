//! Price command implementation.
//!
//! Prices a European option from a volatility, or backs out the implied
//! volatility from a price. Fields are validated exactly like calculator
//! form input, so non-numeric text is reported by field name.

use anyhow::Result;
use clap::Args;

use strike_core::{CalculationMode, OptionInput, RawOptionInput};
use strike_pricing::{CalculationOutcome, OptionCalculator};

use crate::commands::Context;
use crate::error::CliError;
use crate::output::{format_value, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Option type: call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: String,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: String,

    /// Spot price of the underlying
    #[arg(short = 's', long)]
    pub spot: String,

    /// Time to expiry in years
    #[arg(short = 'T', long)]
    pub expiry: String,

    /// Continuously compounded risk-free rate (decimal)
    #[arg(short = 'r', long, default_value = "0", allow_hyphen_values = true)]
    pub rate: String,

    /// Continuous dividend yield (decimal)
    #[arg(short = 'd', long, default_value = "0")]
    pub dividend: String,

    /// Volatility (decimal). Prices the option.
    #[arg(long, group = "calc_mode")]
    pub vol: Option<String>,

    /// Observed option price. Solves for implied volatility.
    #[arg(short = 'p', long, group = "calc_mode")]
    pub price: Option<String>,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let mode = match (&args.vol, &args.price) {
        (_, Some(_)) => CalculationMode::SolveVolatility,
        (Some(_), None) => CalculationMode::SolvePrice,
        (None, None) => {
            return Err(CliError::MissingArgument("--vol or --price".to_string()).into());
        }
    };

    let raw = RawOptionInput {
        option_type: &args.option_type,
        mode,
        strike: &args.strike,
        underlying_price: &args.spot,
        expiry: &args.expiry,
        risk_free_rate: &args.rate,
        dividend_yield: &args.dividend,
        volatility: args.vol.as_deref().unwrap_or_default(),
        price: args.price.as_deref().unwrap_or_default(),
    };
    let input = OptionInput::parse(&raw)?;

    let calculator = OptionCalculator::new(ctx.config.pricing.implied_vol());
    let outcome = calculator.evaluate(&input)?;
    tracing::debug!(?mode, "option calculation finished");

    let mut rows = vec![
        KeyValue::new("Option", format!("European {}", input.option.option_type())),
        KeyValue::from_value("Strike", input.option.strike_price()),
        KeyValue::from_value("Spot", input.market.underlying_price()),
        KeyValue::from_value("Expiry (years)", input.option.time_to_expiry()),
    ];

    let minimal = match &outcome {
        CalculationOutcome::Price(stats) => {
            rows.push(KeyValue::from_value("Volatility", stats.volatility));
            rows.push(KeyValue::from_value("Price", stats.price));
            rows.push(KeyValue::from_value("Delta", stats.greeks.delta));
            rows.push(KeyValue::from_value("Gamma", stats.greeks.gamma));
            rows.push(KeyValue::from_value("Vega", stats.greeks.vega));
            rows.push(KeyValue::from_value("Theta", stats.greeks.theta));
            rows.push(KeyValue::from_value("Rho", stats.greeks.rho));
            format_value(stats.price)
        }
        CalculationOutcome::ImpliedVolatility { volatility } => {
            if let Some(price) = input.observed_price {
                rows.push(KeyValue::from_value("Price (Input)", price));
            }
            rows.push(KeyValue::from_value("Implied Volatility", *volatility));
            format_value(*volatility)
        }
    };

    let title = match mode {
        CalculationMode::SolvePrice => "Black-Scholes Valuation",
        CalculationMode::SolveVolatility => "Implied Volatility",
    };
    ctx.printer.report(title, &rows, &outcome, &minimal)
}
