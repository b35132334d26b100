//! Binomial probability weights.

use statrs::function::factorial::ln_binomial;

use crate::error::{MathError, MathResult};

/// Binomial probabilities `C(n, k) p^k (1 - p)^(n - k)` for `k = 0..=n`.
///
/// Evaluated in log space, so `n` in the thousands neither overflows the
/// coefficient nor underflows the powers before they are combined.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] unless `0 < p < 1`.
///
/// # Example
///
/// ```rust
/// use strike_math::combinatorics::binomial_weights;
///
/// let w = binomial_weights(2, 0.5).unwrap();
/// assert_eq!(w.len(), 3);
/// assert!((w[1] - 0.5).abs() < 1e-12);
/// ```
pub fn binomial_weights(n: u64, p: f64) -> MathResult<Vec<f64>> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_input(format!(
            "binomial probability must lie strictly between 0 and 1, got {p}"
        )));
    }

    let ln_p = p.ln();
    let ln_q = (1.0 - p).ln();

    Ok((0..=n)
        .map(|k| (ln_binomial(n, k) + k as f64 * ln_p + (n - k) as f64 * ln_q).exp())
        .collect())
}
