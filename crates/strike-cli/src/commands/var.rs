//! VaR command implementation.
//!
//! Loads a daily price history and reports historical VaR, expected
//! shortfall and volatility over the most recent lookback window.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;

use strike_ext_file::load_price_history;
use strike_risk::{HistoricalVarEstimator, PriceSeries, VarConfig};

use crate::commands::Context;
use crate::output::{format_value, KeyValue};

/// Estimator settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct VarOverrides {
    /// Lookback window in years
    #[arg(long)]
    pub lookback: Option<f64>,

    /// Holding period in business days (1-10)
    #[arg(long)]
    pub holding: Option<u32>,

    /// VaR confidence level, e.g. 0.99
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Business days per year (250-253)
    #[arg(long)]
    pub business_days: Option<u32>,
}

impl VarOverrides {
    /// Applies the overrides on top of `base`.
    pub fn apply(&self, base: VarConfig) -> VarConfig {
        VarConfig {
            lookback_years: self.lookback.unwrap_or(base.lookback_years),
            holding_period: self.holding.unwrap_or(base.holding_period),
            confidence_level: self.confidence.unwrap_or(base.confidence_level),
            business_days: self.business_days.unwrap_or(base.business_days),
        }
    }
}

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Price history CSV (Date and Adj. close columns)
    pub file: PathBuf,

    #[command(flatten)]
    pub overrides: VarOverrides,
}

/// Loads a price file, naming it in any error.
pub fn load_series(path: &Path) -> Result<PriceSeries> {
    let series = load_price_history(path)
        .with_context(|| format!("failed to load price history from {}", path.display()))?;
    tracing::debug!(rows = series.len(), "price history loaded");
    Ok(series)
}

/// Execute the var command.
pub fn execute(args: VarArgs, ctx: &Context) -> Result<()> {
    let config = args.overrides.apply(ctx.config.risk.var_config());
    let estimator = HistoricalVarEstimator::new(config)?;

    let series = load_series(&args.file)?;
    let result = estimator.estimate(&series)?.rounded();

    let mut rows = vec![KeyValue::new("Observations", result.observations.to_string())];
    if let (Some(oldest), Some(newest)) = (series.oldest(), series.newest()) {
        rows.push(KeyValue::new(
            "History",
            format!("{} to {}", oldest.date, newest.date),
        ));
    }
    rows.extend([
        KeyValue::from_value("Lookback (years)", result.lookback_years),
        KeyValue::new("Holding Period (days)", result.holding_period.to_string()),
        KeyValue::from_percent("Confidence", result.confidence_level),
        KeyValue::from_value("VaR", result.var),
        KeyValue::from_value("Expected Shortfall", result.expected_shortfall),
        KeyValue::from_value("Volatility", result.annualized_volatility),
    ]);

    ctx.printer
        .report("Historical VaR", &rows, &result, &format_value(result.var))
}
