//! Strike CLI - Command-line interface for option pricing and market risk.
//!
//! # Usage
//!
//! ```bash
//! # Price a European call with Greeks
//! strike price --type call --strike 100 --spot 100 --expiry 1 --rate 0.05 --vol 0.2
//!
//! # Implied volatility from a price
//! strike price --type call --strike 100 --spot 100 --expiry 1 --rate 0.05 --price 10.45
//!
//! # American put on a recombining 100-step tree
//! strike lattice --type put --strike 100 --spot 100 --expiry 1 --rate 0.05 --vol 0.2 --layout recombining
//!
//! # Historical VaR and its backtest
//! strike var prices.csv --holding 5 --confidence 0.99
//! strike backtest prices.csv --test-confidence 0.95
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::ConfigCommand;
use commands::Context;
use output::Printer;
use strike_config::StrikeConfig;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Diagnostics go to stderr so that stdout stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(StrikeConfig::default_path);

    // `config init` must work even when the existing file is invalid
    let config = match &cli.command {
        Commands::Config(args) if matches!(args.command, ConfigCommand::Init(_)) => {
            StrikeConfig::default()
        }
        _ => StrikeConfig::load_or_default(&config_path)?,
    };

    let ctx = Context {
        printer: Printer {
            format: cli.format,
            quiet: cli.quiet,
        },
        config,
        config_path,
    };

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Lattice(args) => commands::lattice::execute(args, &ctx)?,
        Commands::Warrant(args) => commands::warrant::execute(args, &ctx)?,
        Commands::Forward(args) => commands::forward::execute(args, &ctx)?,
        Commands::Var(args) => commands::var::execute(args, &ctx)?,
        Commands::Backtest(args) => commands::backtest::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!("strike v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
