//! Price histories and the log-return series derived from them.
//!
//! A [`PriceSeries`] is always held newest first, whatever order the
//! observations were supplied in. Returns are aligned to the date they end on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// One dated adjusted close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Trading date.
    pub date: NaiveDate,
    /// Close adjusted for splits and dividends.
    pub adjusted_close: f64,
}

impl PriceObservation {
    /// Creates an observation.
    #[must_use]
    pub fn new(date: NaiveDate, adjusted_close: f64) -> Self {
        Self {
            date,
            adjusted_close,
        }
    }
}

/// A date-ordered series of adjusted closes, newest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Builds a series from observations in any order.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidSeries`] for a non-positive or non-finite
    /// price, or for two observations on the same date.
    pub fn new(mut observations: Vec<PriceObservation>) -> RiskResult<Self> {
        if let Some(bad) = observations
            .iter()
            .find(|o| !(o.adjusted_close.is_finite() && o.adjusted_close > 0.0))
        {
            return Err(RiskError::invalid_series(format!(
                "adjusted close on {} must be a positive number, got {}",
                bad.date, bad.adjusted_close
            )));
        }

        observations.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(RiskError::invalid_series(format!(
                "duplicate observation for {}",
                pair[0].date
            )));
        }

        Ok(Self { observations })
    }

    /// Builds a series from `(date, adjusted_close)` pairs.
    pub fn from_pairs<I>(pairs: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(date, close)| PriceObservation::new(date, close))
                .collect(),
        )
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations, newest first.
    #[must_use]
    pub fn observations(&self) -> &[PriceObservation] {
        &self.observations
    }

    /// The latest observation.
    #[must_use]
    pub fn newest(&self) -> Option<&PriceObservation> {
        self.observations.first()
    }

    /// The earliest observation.
    #[must_use]
    pub fn oldest(&self) -> Option<&PriceObservation> {
        self.observations.last()
    }

    /// The `count` most recent observations.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] if fewer than `count` exist.
    pub fn most_recent(&self, count: usize) -> RiskResult<PriceSeries> {
        if count > self.observations.len() {
            return Err(RiskError::insufficient_data(count, self.observations.len()));
        }
        Ok(Self {
            observations: self.observations[..count].to_vec(),
        })
    }

    /// Horizon-minimum log returns for a holding period of `holding_period` days.
    ///
    /// See [`LogReturns::horizon_minimum`].
    pub fn log_returns(&self, holding_period: usize) -> RiskResult<LogReturns> {
        LogReturns::horizon_minimum(self, holding_period)
    }
}

/// Log returns aligned to the date each return ends on, newest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogReturns {
    holding_period: usize,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl LogReturns {
    /// Builds the conservative per-date return series.
    ///
    /// For each date `t` with at least `h` older observations the return is
    ///
    /// ```text
    /// r_t = min over k = 1..=h of ln(P_t / P_{t-k days back})
    /// ```
    ///
    /// the most adverse of the 1..h day returns ending at `t`. This is not the
    /// h-day return and is not a square-root-of-time scaling; it keeps the
    /// worst move inside the horizon. Dates without `h` older observations are
    /// dropped, so `N` prices give `N - h` returns.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InputRange`] for a zero holding period
    /// - [`RiskError::InsufficientData`] unless `N > h`
    pub fn horizon_minimum(series: &PriceSeries, holding_period: usize) -> RiskResult<Self> {
        if holding_period == 0 {
            return Err(RiskError::input_range("holding_period", 0.0, ">= 1"));
        }
        let prices = series.observations();
        if prices.len() <= holding_period {
            return Err(RiskError::insufficient_data(holding_period + 1, prices.len()));
        }

        let count = prices.len() - holding_period;
        let mut dates = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);

        for t in 0..count {
            let today = prices[t].adjusted_close;
            let worst = (1..=holding_period)
                .map(|k| (today / prices[t + k].adjusted_close).ln())
                .fold(f64::INFINITY, f64::min);
            dates.push(prices[t].date);
            values.push(worst);
        }

        Ok(Self {
            holding_period,
            dates,
            values,
        })
    }

    /// Single-day log returns, `ln(P_t / P_{t-1})`.
    pub fn daily(series: &PriceSeries) -> RiskResult<Self> {
        Self::horizon_minimum(series, 1)
    }

    /// Holding period the returns were built with.
    #[must_use]
    pub fn holding_period(&self) -> usize {
        self.holding_period
    }

    /// Return values, newest first.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// End dates, aligned with [`LogReturns::values`].
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// `(date, return)` pairs, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of returns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no returns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
