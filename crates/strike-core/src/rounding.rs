//! Report-boundary rounding.
//!
//! Intermediate calculations always run at full `f64` precision; values are
//! rounded only when they are placed in a result record for display.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used in pricing and risk reports.
pub const REPORT_DECIMALS: u32 = 4;

/// Rounds a value to `decimals` places, ties to even.
///
/// The exact binary value is converted to a decimal before rounding, so a
/// value such as `2.675` (stored as `2.67499999...`) rounds down to `2.67`.
/// Non-finite values are returned unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    Decimal::from_f64_retain(value)
        .or_else(|| Decimal::from_f64(value))
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Rounds a value to [`REPORT_DECIMALS`] places.
#[must_use]
pub fn round_report(value: f64) -> f64 {
    round_to(value, REPORT_DECIMALS)
}
