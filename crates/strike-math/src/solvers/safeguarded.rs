//! Newton-Raphson with a bisection safeguard.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult, MIN_DERIVATIVE};

/// Newton-Raphson constrained to a bracket.
///
/// The bracket `(lo, hi)` is tightened around the sign change on every
/// iteration. A Newton step that would land outside it, or a derivative that
/// vanishes, is replaced by a bisection step. The iterate therefore never
/// leaves the bracket, which matters for functions like the Black-Scholes
/// price that are only defined for positive volatility.
///
/// `initial_guess` is clamped into the bracket.
///
/// # Errors
///
/// - [`MathError::InvalidBracket`] if `f(lo)` and `f(hi)` share a sign
/// - [`MathError::ConvergenceFailed`] after `max_iterations`
pub fn safeguarded_newton<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bracket: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if bracket.0 <= bracket.1 {
        bracket
    } else {
        (bracket.1, bracket.0)
    };
    let f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }
    if f_lo * f_hi > 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    // Orientation of the bracket: true when f increases from lo to hi.
    let increasing = f_lo < 0.0;
    let mut x = initial_guess.clamp(lo, hi);

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if (fx < 0.0) == increasing {
            lo = x;
        } else {
            hi = x;
        }

        let dfx = df(x);
        let newton = if dfx.is_finite() && dfx.abs() >= MIN_DERIVATIVE {
            Some(x - fx / dfx)
        } else {
            None
        };

        let next = match newton {
            Some(candidate) if candidate > lo && candidate < hi => candidate,
            _ => 0.5 * (lo + hi),
        };

        if (next - x).abs() < config.tolerance || hi - lo < config.tolerance {
            return Ok(SolverResult {
                root: next,
                iterations: iteration + 1,
                residual: f(next),
            });
        }

        x = next;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}
