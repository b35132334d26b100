//! Closed binomial sum for European exercise.

use strike_core::VanillaOption;
use strike_math::combinatorics::binomial_weights;

use super::LatticeParameters;
use crate::error::{PricingError, PricingResult};

/// `e^(-rT) · Σ_k C(n,k) p^k (1-p)^(n-k) · payoff(S·u^k·d^(n-k))`.
///
/// Terminal prices are formed in log space so large step counts with
/// explicit factors cannot overflow before the weight is applied.
pub(super) fn price(
    option: &VanillaOption,
    spot: f64,
    rate: f64,
    steps: usize,
    params: &LatticeParameters,
) -> PricingResult<f64> {
    let weights = binomial_weights(steps as u64, params.probability)
        .map_err(|e| PricingError::invalid_lattice(e.to_string()))?;

    let ln_spot = spot.ln();
    let ln_up = params.up.ln();
    let ln_down = params.down.ln();

    let expectation: f64 = weights
        .iter()
        .enumerate()
        .map(|(ups, weight)| {
            let downs = steps - ups;
            let terminal = (ln_spot + ups as f64 * ln_up + downs as f64 * ln_down).exp();
            weight * option.payoff(terminal, 1.0)
        })
        .sum();

    log::trace!(
        "European lattice: {steps} steps, p = {:.6}, expectation {expectation:.6}",
        params.probability
    );

    Ok((-rate * option.time_to_expiry()).exp() * expectation)
}
