//! Root-finding algorithms.
//!
//! This module provides scalar solvers used to invert pricing functions:
//!
//! - [`newton_raphson`]: Quadratic convergence when the derivative is available
//! - [`secant`]: Derivative-free, two starting points
//! - [`bisection`]: Slow but guaranteed inside a sign-changing bracket
//! - [`safeguarded_newton`]: Newton steps kept inside a bracket, bisecting
//!   whenever a step would leave it
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Safeguarded Newton | Fast | Guaranteed | Derivative + bracket |
//!
//! # Example: Implied volatility style inversion
//!
//! ```rust
//! use strike_math::solvers::{safeguarded_newton, SolverConfig};
//!
//! // Solve x^2 = 2 on [0, 2]
//! let f = |x: f64| x * x - 2.0;
//! let df = |x: f64| 2.0 * x;
//!
//! let result = safeguarded_newton(f, df, 0.1, (0.0, 2.0), &SolverConfig::default()).unwrap();
//! assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod bisection;
mod newton;
mod safeguarded;
mod secant;

pub use bisection::bisection;
pub use newton::newton_raphson;
pub use safeguarded::safeguarded_newton;
pub use secant::secant;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Derivatives below this magnitude are treated as zero.
pub(crate) const MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual and on the step size.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert_relative_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 50);
    }

    /// Discounted payoff of a one-period digital, solved for the rate.
    fn digital_pv(rate: f64) -> f64 {
        100.0 * (-rate * 2.0).exp()
    }

    #[test]
    fn test_all_solvers_agree() {
        let target = 90.0;
        let f = |r: f64| digital_pv(r) - target;
        let df = |r: f64| -200.0 * (-r * 2.0).exp();
        let config = SolverConfig::default();
        let expected = -(0.9_f64).ln() / 2.0;

        let newton = newton_raphson(f, df, 0.01, &config).unwrap();
        let sec = secant(f, 0.01, 0.02, &config).unwrap();
        let bis = bisection(f, 0.0, 0.5, &config).unwrap();
        let safe = safeguarded_newton(f, df, 0.01, (0.0, 0.5), &config).unwrap();

        assert_relative_eq!(newton.root, expected, epsilon = 1e-9);
        assert_relative_eq!(sec.root, expected, epsilon = 1e-9);
        assert_relative_eq!(bis.root, expected, epsilon = 1e-9);
        assert_relative_eq!(safe.root, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_fewer_iterations_than_bisection() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let config = SolverConfig::default();

        let newton = newton_raphson(f, df, 1.5, &config).unwrap();
        let bis = bisection(f, 1.0, 2.0, &config).unwrap();

        assert!(newton.iterations < bis.iterations);
    }
}
