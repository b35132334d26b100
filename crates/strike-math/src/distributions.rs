//! Standard normal distribution functions.
//!
//! Built on the complementary error function from `statrs`, which keeps
//! full relative precision deep in the lower tail where `1 + erf(x)` would
//! cancel.

use statrs::function::erf::{erfc, erfc_inv};

use crate::error::{MathError, MathResult};

const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function Φ(x).
///
/// # Example
///
/// ```rust
/// use strike_math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function φ(x).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Inverse of the standard normal CDF, Φ⁻¹(p).
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] unless `0 < p < 1`.
pub fn inverse_norm_cdf(p: f64) -> MathResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_input(format!(
            "probability must lie strictly between 0 and 1, got {p}"
        )));
    }
    Ok(-std::f64::consts::SQRT_2 * erfc_inv(2.0 * p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(norm_cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-11);
        assert_relative_eq!(norm_cdf(-1.0), 0.158_655_253_931_457, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(0.0), FRAC_1_SQRT_2PI, epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_critical_values() {
        assert_relative_eq!(inverse_norm_cdf(0.975).unwrap(), 1.959_963_984_540_054, epsilon = 1e-9);
        assert_relative_eq!(inverse_norm_cdf(0.5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_rejects_bounds() {
        assert!(inverse_norm_cdf(0.0).is_err());
        assert!(inverse_norm_cdf(1.0).is_err());
        assert!(inverse_norm_cdf(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_cdf_symmetry(x in -8.0f64..8.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-14);
        }

        #[test]
        fn prop_inverse_round_trip(p in 0.001f64..0.999) {
            let x = inverse_norm_cdf(p).unwrap();
            prop_assert!((norm_cdf(x) - p).abs() < 1e-10);
        }
    }
}
