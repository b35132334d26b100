//! Common interface over the analytic and lattice pricers.

use strike_core::{Instrument, MarketParameters};

use crate::error::PricingResult;
use crate::result::Valuation;

/// A model that values option instruments.
///
/// Implementations are stateless between calls, so one pricer can be shared
/// across threads and reused for any number of instruments.
pub trait OptionPricer {
    /// Short model name for logs and reports.
    fn name(&self) -> &'static str;

    /// Values an instrument at full precision.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PricingError::NotAnOption`] for forwards and futures,
    /// and model-specific errors otherwise.
    fn value(&self, instrument: &Instrument, market: &MarketParameters) -> PricingResult<Valuation>;

    /// Values an instrument and rounds the result for reporting.
    fn report(&self, instrument: &Instrument, market: &MarketParameters) -> PricingResult<Valuation> {
        let valuation = self.value(instrument, market)?;
        log::debug!(
            "{} valued {} at {:.6}",
            self.name(),
            instrument.kind(),
            valuation.price
        );
        Ok(valuation.rounded())
    }
}
