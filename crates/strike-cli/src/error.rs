//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// A configuration file already exists where one would be written.
    #[error("Configuration file {0} already exists (use --force to overwrite)")]
    ConfigExists(String),
}
