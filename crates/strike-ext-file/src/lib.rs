//! # Strike Ext File
//!
//! File-based price history for the Strike risk engine.
//!
//! This crate provides:
//! - CSV ingestion of daily price histories (Yahoo!-style exports)
//! - Tolerant number and date parsing for hand-edited files
//!
//! The risk crate itself never touches the filesystem; it receives an
//! in-memory [`PriceSeries`](strike_risk::PriceSeries) built here.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod price_history;

pub use error::{FileError, FileResult};
pub use price_history::*;
