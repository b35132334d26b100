//! Forward command implementation.
//!
//! Payoff, present value and delta of a forward contract, or of a future
//! when a lot size is given.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use strike_core::rounding::round_report;
use strike_core::{Forward, Future};

use crate::commands::Context;
use crate::output::{format_value, KeyValue};

/// Arguments for the forward command.
#[derive(Args, Debug)]
pub struct ForwardArgs {
    /// Agreed delivery price
    #[arg(long)]
    pub forward_price: f64,

    /// Time to expiry in years
    #[arg(short = 'T', long)]
    pub expiry: f64,

    /// Current market price of the underlying
    #[arg(short = 's', long)]
    pub spot: f64,

    /// Continuously compounded discount rate (decimal)
    #[arg(short = 'r', long, default_value = "0", allow_hyphen_values = true)]
    pub rate: f64,

    /// Continuous dividend yield (decimal)
    #[arg(short = 'd', long, default_value = "0")]
    pub dividend: f64,

    /// Position size, negative for short
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub position: f64,

    /// Contract multiplier; prices a future instead of a forward
    #[arg(long)]
    pub lot_size: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ForwardReport {
    contract: &'static str,
    payoff: f64,
    value: f64,
    delta: f64,
}

/// Execute the forward command.
pub fn execute(args: ForwardArgs, ctx: &Context) -> Result<()> {
    let report = match args.lot_size {
        Some(lot_size) => {
            let future = Future::new(args.forward_price, args.expiry, lot_size)?;
            ForwardReport {
                contract: "future",
                payoff: future.payoff(args.spot, args.position),
                value: future.value(args.spot, args.rate, args.position),
                delta: future.delta(args.rate, args.dividend, args.position),
            }
        }
        None => {
            let forward = Forward::new(args.forward_price, args.expiry)?;
            ForwardReport {
                contract: "forward",
                payoff: forward.payoff(args.spot, args.position),
                value: forward.value(args.spot, args.rate, args.position),
                delta: forward.delta(args.dividend, args.position),
            }
        }
    };
    let report = ForwardReport {
        payoff: round_report(report.payoff),
        value: round_report(report.value),
        delta: round_report(report.delta),
        ..report
    };

    let mut rows = vec![
        KeyValue::new("Contract", report.contract),
        KeyValue::from_value("Forward Price", args.forward_price),
        KeyValue::from_value("Expiry (years)", args.expiry),
        KeyValue::from_value("Market Price", args.spot),
        KeyValue::from_value("Position", args.position),
    ];
    if let Some(lot_size) = args.lot_size {
        rows.push(KeyValue::from_value("Lot Size", lot_size));
    }
    rows.push(KeyValue::from_value("Payoff at Expiry", report.payoff));
    rows.push(KeyValue::from_value("Present Value", report.value));
    rows.push(KeyValue::from_value("Delta", report.delta));

    ctx.printer.report(
        "Forward Valuation",
        &rows,
        &report,
        &format_value(report.value),
    )
}
