//! Loads price histories from disk and feeds them to the risk estimator.

use std::io::Write;

use chrono::{Duration, NaiveDate};
use strike_ext_file::{load_price_history, FileError};
use strike_risk::{historical_var, VarConfig};
use tempfile::NamedTempFile;

fn write_history(days: i64) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj. close,Volume").unwrap();

    let start = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
    // Newest first, as the export is ordered
    for i in (0..days).rev() {
        let close = 1_000.0 + 25.0 * ((i % 9) as f64);
        writeln!(
            file,
            "{},\"{:.2}\",\"{:.2}\",\"{:.2}\",\"{:.2}\",\"{}\",\"1,000,000\"",
            start + Duration::days(i),
            close,
            close,
            close,
            close,
            format_thousands(close)
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn format_thousands(value: f64) -> String {
    let whole = value.trunc() as i64;
    format!("{},{:03}.00", whole / 1000, whole % 1000)
}

#[test]
fn loads_and_estimates() {
    let file = write_history(300);
    let series = load_price_history(file.path()).unwrap();

    assert_eq!(series.len(), 300);
    assert_eq!(
        series.oldest().unwrap().date,
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
    );

    let var = historical_var(&series, &VarConfig::default()).unwrap();
    assert_eq!(var.observations, 252);
    assert!(var.var > 0.0);
}

#[test]
fn short_history_is_reported() {
    let file = write_history(50);
    let series = load_price_history(file.path()).unwrap();
    assert!(historical_var(&series, &VarConfig::default()).is_err());
}

#[test]
fn duplicate_dates_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Adj. close").unwrap();
    writeln!(file, "2024-01-02,10").unwrap();
    writeln!(file, "2024-01-02,11").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        load_price_history(file.path()),
        Err(FileError::Series(_))
    ));
}
