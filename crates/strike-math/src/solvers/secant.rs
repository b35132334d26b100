//! Secant method root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Secant method root-finding algorithm.
///
/// Approximates the derivative by the slope through the last two iterates,
/// so no analytic derivative is needed.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if two iterates share the same function value
/// - [`MathError::ConvergenceFailed`] after `max_iterations`
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut prev = x0;
    let mut curr = x1;
    let mut f_prev = f(prev);
    let mut f_curr = f(curr);

    for iteration in 0..config.max_iterations {
        if f_curr.abs() < config.tolerance {
            return Ok(SolverResult {
                root: curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let slope_denominator = f_curr - f_prev;
        if slope_denominator.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero {
                value: slope_denominator,
            });
        }

        let next = curr - f_curr * (curr - prev) / slope_denominator;
        if !next.is_finite() {
            return Err(MathError::invalid_input(format!(
                "secant iterate diverged at iteration {iteration}"
            )));
        }

        prev = curr;
        f_prev = f_curr;
        curr = next;
        f_curr = f(curr);

        if (curr - prev).abs() < config.tolerance {
            return Ok(SolverResult {
                root: curr,
                iterations: iteration + 1,
                residual: f_curr,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;

        let result = secant(f, 2.0, 4.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_function_errors() {
        let f = |_: f64| 1.0;

        let result = secant(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }
}
