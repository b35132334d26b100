//! Lattice command implementation.
//!
//! Prices an option on a binomial tree, with factors either derived from a
//! volatility or given explicitly.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use strike_core::rounding::round_report;
use strike_core::OptionStyle;
use strike_pricing::lattice::TreeLayout;

use crate::commands::{ContractArgs, Context};
use crate::error::CliError;
use crate::output::{format_value, KeyValue};

/// Arguments for the lattice command.
#[derive(Args, Debug)]
pub struct LatticeArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Exercise style: european or american
    #[arg(long, default_value = "american")]
    pub style: OptionStyle,

    /// Volatility (decimal), for Cox-Ross-Rubinstein factors
    #[arg(long, conflicts_with_all = ["up", "down"])]
    pub vol: Option<f64>,

    /// Explicit up factor per step
    #[arg(long, requires = "down")]
    pub up: Option<f64>,

    /// Explicit down factor per step
    #[arg(long, requires = "up")]
    pub down: Option<f64>,

    /// Number of time steps (default from configuration)
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// American tree layout: non_recombining or recombining. Without it the
    /// configured layout is used, or recombining when the steps exceed the
    /// flat tree limit.
    #[arg(long)]
    pub layout: Option<TreeLayout>,
}

/// Lattice pricing result.
#[derive(Debug, Serialize)]
struct LatticeReport {
    option_style: OptionStyle,
    steps: usize,
    layout: TreeLayout,
    up: f64,
    down: f64,
    probability: f64,
    price: f64,
}

/// Execute the lattice command.
pub fn execute(args: LatticeArgs, ctx: &Context) -> Result<()> {
    let mut settings = ctx.config.lattice;
    if let Some(steps) = args.steps {
        settings.steps = steps;
    }
    settings.layout = match args.layout {
        Some(layout) => layout,
        None if args.style.is_american() && settings.steps > settings.max_tree_steps => {
            tracing::debug!(
                steps = settings.steps,
                max_tree_steps = settings.max_tree_steps,
                "step count exceeds the flat tree limit, using the recombining layout"
            );
            TreeLayout::Recombining
        }
        None => settings.layout,
    };
    let mut lattice = settings.lattice()?;

    if let (Some(up), Some(down)) = (args.up, args.down) {
        lattice = lattice.with_factors(up, down);
    } else if args.vol.is_none() {
        return Err(CliError::MissingArgument("--vol, or --up with --down".to_string()).into());
    }

    let option = args.contract.option(args.style)?;
    let market = args.contract.market(args.vol)?;

    let params = lattice.parameters(&option, &market)?;
    let price = round_report(lattice.price(&option, &market)?);
    tracing::debug!(steps = lattice.steps(), %price, "lattice priced");

    let report = LatticeReport {
        option_style: args.style,
        steps: lattice.steps(),
        layout: lattice.layout(),
        up: params.up,
        down: params.down,
        probability: params.probability,
        price,
    };

    let mut rows = args.contract.rows(args.style);
    if let Some(vol) = args.vol {
        rows.push(KeyValue::from_percent("Volatility", vol));
    }
    rows.push(KeyValue::new("Steps", report.steps.to_string()));
    if args.style.is_american() {
        rows.push(KeyValue::new("Layout", report.layout.to_string()));
    }
    rows.push(KeyValue::new("Up / Down", format!("{:.6} / {:.6}", params.up, params.down)));
    rows.push(KeyValue::new("Up Probability", format!("{:.6}", params.probability)));
    rows.push(KeyValue::from_value("Price", price));

    ctx.printer
        .report("Binomial Lattice Valuation", &rows, &report, &format_value(price))
}
