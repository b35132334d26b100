//! Config command implementation.
//!
//! Shows, locates and initializes the TOML configuration file.

use anyhow::Result;
use clap::{Args, Subcommand};

use strike_config::StrikeConfig;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => {
            let exists = ctx.config_path.exists();
            println!("{}", ctx.config_path.display());
            if !exists {
                ctx.printer.info("file not found, defaults in effect");
            }
            Ok(())
        }
        ConfigCommand::Init(init) => {
            if ctx.config_path.exists() && !init.force {
                return Err(CliError::ConfigExists(ctx.config_path.display().to_string()).into());
            }
            StrikeConfig::default().save(&ctx.config_path)?;
            ctx.printer
                .success(&format!("wrote {}", ctx.config_path.display()));
            Ok(())
        }
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    match ctx.printer.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("pricing.initial_guess", config.pricing.initial_guess.to_string()),
                KeyValue::new("pricing.tolerance", config.pricing.tolerance.to_string()),
                KeyValue::new("pricing.max_iterations", config.pricing.max_iterations.to_string()),
                KeyValue::new("pricing.method", config.pricing.method.to_string()),
                KeyValue::new("lattice.steps", config.lattice.steps.to_string()),
                KeyValue::new("lattice.max_tree_steps", config.lattice.max_tree_steps.to_string()),
                KeyValue::new("lattice.layout", config.lattice.layout.to_string()),
                KeyValue::new("risk.lookback_years", config.risk.lookback_years.to_string()),
                KeyValue::new("risk.holding_period", config.risk.holding_period.to_string()),
                KeyValue::new("risk.confidence_level", config.risk.confidence_level.to_string()),
                KeyValue::new("risk.business_days", config.risk.business_days.to_string()),
                KeyValue::new("backtest.var_level", config.backtest.var_level.to_string()),
                KeyValue::new(
                    "backtest.test_confidence",
                    config.backtest.test_confidence.to_string(),
                ),
            ];
            ctx.printer.report("Configuration", &rows, config, "")
        }
        OutputFormat::Json => ctx.printer.report("Configuration", &[], config, ""),
        OutputFormat::Minimal => {
            if !ctx.printer.quiet {
                print_header(&format!("# {}", ctx.config_path.display()));
            }
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
