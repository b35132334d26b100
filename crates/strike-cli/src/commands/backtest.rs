//! Backtest command implementation.
//!
//! Estimates VaR from a price file (or takes a given VaR figure) and runs the
//! binomial overshoot test against the same window of returns.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use strike_risk::{BacktestConfig, Backtester, HistoricalVarEstimator, LogReturns};

use crate::commands::var::{load_series, VarOverrides};
use crate::commands::Context;
use crate::output::KeyValue;

/// Arguments for the backtest command.
#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Price history CSV (Date and Adj. close columns)
    pub file: PathBuf,

    #[command(flatten)]
    pub overrides: VarOverrides,

    /// Test this VaR figure instead of estimating one
    #[arg(long)]
    pub var: Option<f64>,

    /// Confidence of the binomial test, e.g. 0.95
    #[arg(long)]
    pub test_confidence: Option<f64>,
}

/// Execute the backtest command.
pub fn execute(args: BacktestArgs, ctx: &Context) -> Result<()> {
    let var_config = args.overrides.apply(ctx.config.risk.var_config());
    let estimator = HistoricalVarEstimator::new(var_config)?;
    let settings = ctx.config.backtest;
    let test_confidence = args.test_confidence.unwrap_or(settings.test_confidence);

    let series = load_series(&args.file)?;

    let result = match args.var {
        Some(var) => {
            let window = series.most_recent(var_config.window())?;
            let returns = LogReturns::horizon_minimum(&window, var_config.holding_period as usize)?;
            let level = args.overrides.confidence.unwrap_or(settings.var_level);
            Backtester.run(
                returns.values(),
                var,
                &BacktestConfig::new(level, test_confidence),
            )?
        }
        None => {
            let estimate = estimator.estimate(&series)?;
            Backtester.run_on_series(
                &series,
                &estimate,
                &BacktestConfig::new(estimate.confidence_level, test_confidence),
            )?
        }
    }
    .rounded();

    let rows = vec![
        KeyValue::new("Observations", result.observations.to_string()),
        KeyValue::from_percent("VaR Level", result.var_level),
        KeyValue::from_percent("Test Confidence", result.test_confidence),
        KeyValue::new("Overshoots", result.overshoots.to_string()),
        KeyValue::from_value("Expected Overshoots", result.expected_overshoots),
        KeyValue::from_value("Z Statistic", result.z_statistic),
        KeyValue::new(
            "Non-rejection Interval",
            format!(
                "[{:.4}, {:.4}]",
                result.z_interval.0, result.z_interval.1
            ),
        ),
        KeyValue::new(
            "Overshoot Range",
            format!(
                "[{:.2}, {:.2}]",
                result.count_interval.0, result.count_interval.1
            ),
        ),
        KeyValue::new("Result", if result.passed { "pass" } else { "reject" }),
    ];

    if !result.passed && ctx.printer.format == crate::cli::OutputFormat::Table {
        ctx.printer
            .warning("overshoot count lies outside the non-rejection interval");
    }

    let minimal = if result.passed { "pass" } else { "reject" };
    ctx.printer.report("VaR Backtest", &rows, &result, minimal)
}
