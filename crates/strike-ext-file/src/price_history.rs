//! Daily price history in the layout exported by Yahoo! Finance.
//!
//! ```text
//! Date,Open,High,Low,Close,Adj. close,Volume
//! 2024-01-02,"1,234.50","1,240.00","1,220.10","1,230.00","1,228.75","3,100,200"
//! ```
//!
//! Only the date and adjusted-close columns are read.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use strike_risk::{PriceObservation, PriceSeries};

use crate::error::{FileError, FileResult};

/// Header of the date column.
pub const DATE_COLUMN: &str = "Date";

/// Accepted headers for the adjusted close, compared case-insensitively.
pub const ADJ_CLOSE_COLUMNS: &[&str] = &["Adj. close", "Adj Close", "Adj. close**", "Adj_Close"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%b-%Y", "%b %d, %Y"];

/// Parses a date in any of the supported layouts.
///
/// ISO `2024-01-31`, US `01/31/2024`, `31-Jan-2024` and `Jan 31, 2024`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Parses a number that may carry thousands separators.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        names.iter().any(|name| h.eq_ignore_ascii_case(name))
    })
}

/// Reads a price history from any CSV source.
///
/// Rows whose adjusted close is blank or not a number (dividend and split
/// rows, `null`) are skipped. An unparseable date is an error.
///
/// # Errors
///
/// - [`FileError::MissingColumn`] if the date or adjusted-close header is absent
/// - [`FileError::InvalidDate`] for a date in an unknown format
/// - [`FileError::Series`] for non-positive prices or duplicate dates
pub fn read_price_history<R: Read>(reader: R) -> FileResult<PriceSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_idx =
        find_column(&headers, &[DATE_COLUMN]).ok_or_else(|| FileError::missing_column(DATE_COLUMN))?;
    let close_idx = find_column(&headers, ADJ_CLOSE_COLUMNS)
        .ok_or_else(|| FileError::missing_column(ADJ_CLOSE_COLUMNS[0]))?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);

        let date_text = record.get(date_idx).unwrap_or_default();
        if date_text.is_empty() && record.iter().all(str::is_empty) {
            continue;
        }
        let date = parse_date(date_text).ok_or_else(|| FileError::InvalidDate {
            line,
            value: date_text.to_string(),
        })?;

        match record.get(close_idx).and_then(parse_amount) {
            Some(close) => observations.push(PriceObservation::new(date, close)),
            None => {
                skipped += 1;
                log::warn!(
                    "skipping line {}: adjusted close '{}' is not a number",
                    line,
                    record.get(close_idx).unwrap_or_default()
                );
            }
        }
    }

    log::debug!(
        "read {} price rows ({} skipped)",
        observations.len(),
        skipped
    );

    Ok(PriceSeries::new(observations)?)
}

/// Loads a price history CSV file.
///
/// See [`read_price_history`] for the accepted layout.
pub fn load_price_history(path: impl AsRef<Path>) -> FileResult<PriceSeries> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loading price history from {}", path.display());
    read_price_history(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj. close,Volume
2024-01-03,\"1,250.00\",\"1,260.00\",\"1,240.00\",\"1,255.00\",\"1,254.10\",\"2,000,000\"
2024-01-02,\"1,234.50\",\"1,240.00\",\"1,220.10\",\"1,230.00\",\"1,228.75\",\"3,100,200\"
";

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount("null"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date("2024-01-31"), Some(expected));
        assert_eq!(parse_date("01/31/2024"), Some(expected));
        assert_eq!(parse_date("31-Jan-2024"), Some(expected));
        assert_eq!(parse_date("Jan 31, 2024"), Some(expected));
        assert_eq!(parse_date("31.01.2024"), None);
    }

    #[test]
    fn test_read_thousands_separated() {
        let series = read_price_history(SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);

        let newest = series.newest().unwrap();
        assert_eq!(newest.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_relative_eq!(newest.adjusted_close, 1254.10);
    }

    #[test]
    fn test_alternative_header_and_order() {
        let csv = "Date,Close,Adj Close\n01/02/2024,10,9.5\n01/03/2024,11,10.5\n";
        let series = read_price_history(csv.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.newest().unwrap().adjusted_close, 10.5);
    }

    #[test]
    fn test_skips_non_numeric_close() {
        let csv = "Date,Adj. close\n2024-01-02,10\n2024-01-03,null\n2024-01-04,11\n";
        let series = read_price_history(csv.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Date,Close\n2024-01-02,10\n";
        assert!(matches!(
            read_price_history(csv.as_bytes()),
            Err(FileError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let csv = "Date,Adj. close\n2024-01-02,10\nyesterday,11\n";
        match read_price_history(csv.as_bytes()) {
            Err(FileError::InvalidDate { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_price_history("/definitely/not/here.csv"),
            Err(FileError::Io { .. })
        ));
    }
}
