//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Where and how a command's result is printed.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    /// Selected output format.
    pub format: OutputFormat,
    /// Suppress headers and status lines.
    pub quiet: bool,
}

impl Printer {
    /// Prints a report in the selected format.
    ///
    /// `rows` feed the table and CSV renderings, `record` the JSON one and
    /// `minimal` the single-value one.
    pub fn report<T: Serialize>(
        &self,
        title: &str,
        rows: &[KeyValue],
        record: &T,
        minimal: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                if !self.quiet {
                    print_header(title);
                }
                print_table(rows);
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
            OutputFormat::Csv => print_csv(rows)?,
            OutputFormat::Minimal => println!("{minimal}"),
        }
        Ok(())
    }

    /// Prints a success line unless quiet.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Prints an informational line unless quiet.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "ℹ".blue(), message);
        }
    }

    /// Prints a warning to stderr unless quiet.
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", "⚠".yellow(), message);
        }
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Formats a value at report precision.
pub fn format_value(value: f64) -> String {
    format!("{:.4}", value)
}

/// Formats a decimal fraction as a percentage.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair at report precision.
    pub fn from_value(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_value(value))
    }

    /// Creates a key-value pair formatted as a percentage.
    pub fn from_percent(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_percent(value))
    }
}
