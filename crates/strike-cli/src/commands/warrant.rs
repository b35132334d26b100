//! Warrant command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use strike_core::rounding::round_report;
use strike_core::OptionStyle;
use strike_pricing::BlackScholes;

use crate::commands::{ContractArgs, Context};
use crate::output::{format_value, KeyValue};

/// Arguments for the warrant command.
#[derive(Args, Debug)]
pub struct WarrantArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Volatility (decimal)
    #[arg(long)]
    pub vol: f64,

    /// Shares outstanding before exercise
    #[arg(long)]
    pub shares: f64,

    /// Number of warrants issued
    #[arg(long)]
    pub warrants: f64,
}

#[derive(Debug, Serialize)]
struct WarrantReport {
    option_price: f64,
    dilution: f64,
    warrant_price: f64,
}

/// Execute the warrant command.
pub fn execute(args: WarrantArgs, ctx: &Context) -> Result<()> {
    let option = args.contract.option(OptionStyle::European)?;
    let market = args.contract.market(Some(args.vol))?;

    let warrant_price = BlackScholes.warrant_price(&option, &market, args.shares, args.warrants)?;
    let option_price = BlackScholes.price(&option, &market)?;

    let report = WarrantReport {
        option_price: round_report(option_price),
        dilution: round_report(args.shares / (args.shares + args.warrants)),
        warrant_price: round_report(warrant_price),
    };

    let mut rows = args.contract.rows(OptionStyle::European);
    rows.push(KeyValue::from_percent("Volatility", args.vol));
    rows.push(KeyValue::from_value("Option Price", report.option_price));
    rows.push(KeyValue::from_value("Dilution Factor", report.dilution));
    rows.push(KeyValue::from_value("Warrant Price", report.warrant_price));

    ctx.printer.report(
        "Warrant Valuation",
        &rows,
        &report,
        &format_value(report.warrant_price),
    )
}
