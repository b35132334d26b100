//! Descriptive statistics over samples of `f64`.

use crate::error::{MathError, MathResult};

/// How [`quantile`] resolves a probability that falls between two order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuantileMethod {
    /// Linear interpolation between the two neighbouring order statistics.
    #[default]
    Linear,
    /// The nearest order statistic, ties resolved to the even index.
    Nearest,
}

/// Arithmetic mean.
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] for an empty sample.
pub fn mean(data: &[f64]) -> MathResult<f64> {
    if data.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation with Bessel's correction (n - 1 denominator).
///
/// # Errors
///
/// Returns [`MathError::InsufficientData`] for fewer than two observations.
pub fn sample_std_dev(data: &[f64]) -> MathResult<f64> {
    if data.len() < 2 {
        return Err(MathError::insufficient_data(2, data.len()));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Ok((ss / (data.len() - 1) as f64).sqrt())
}

/// Empirical quantile at probability `q`.
///
/// The sample need not be sorted. Position is `q * (n - 1)` on the sorted
/// sample, resolved according to `method`.
///
/// # Errors
///
/// - [`MathError::InsufficientData`] for an empty sample
/// - [`MathError::InvalidInput`] if `q` is outside `[0, 1]` or the sample holds `NaN`
///
/// # Example
///
/// ```rust
/// use strike_math::statistics::{quantile, QuantileMethod};
///
/// let data = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(quantile(&data, 0.5, QuantileMethod::Linear).unwrap(), 2.5);
/// assert_eq!(quantile(&data, 0.5, QuantileMethod::Nearest).unwrap(), 3.0);
/// ```
pub fn quantile(data: &[f64], q: f64, method: QuantileMethod) -> MathResult<f64> {
    if data.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must lie in [0, 1], got {q}"
        )));
    }
    if data.iter().any(|x| x.is_nan()) {
        return Err(MathError::invalid_input("sample contains NaN"));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q * (sorted.len() - 1) as f64;
    let below = position.floor();
    let lower = below as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = position - below;

    let value = match method {
        QuantileMethod::Linear => sorted[lower] + fraction * (sorted[upper] - sorted[lower]),
        QuantileMethod::Nearest => {
            let index = if fraction > 0.5 || (fraction == 0.5 && lower % 2 == 1) {
                upper
            } else {
                lower
            };
            sorted[index]
        }
    };
    Ok(value)
}
