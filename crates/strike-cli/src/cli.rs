//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BacktestArgs, ConfigArgs, ForwardArgs, LatticeArgs, PriceArgs, VarArgs, WarrantArgs,
};

/// Strike - option pricing and market risk from the command line
#[derive(Parser)]
#[command(name = "strike")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./strike.toml when present)
    #[arg(short, long, global = true, env = "STRIKE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a European option with Greeks, or back out its implied volatility
    Price(PriceArgs),

    /// Price an option on a binomial lattice (European or American)
    Lattice(LatticeArgs),

    /// Price a warrant with the dilution haircut
    Warrant(WarrantArgs),

    /// Payoff, value and delta of a forward or future
    Forward(ForwardArgs),

    /// Historical VaR, expected shortfall and volatility from a price file
    Var(VarArgs),

    /// Binomial backtest of a VaR estimate against its price history
    Backtest(BacktestArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
