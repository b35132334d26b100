//! # Strike Math
//!
//! Numerical utilities for the Strike derivatives pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding algorithms (Newton-Raphson, Secant, Bisection,
//!   bracket-safeguarded Newton)
//! - **Distributions**: Standard normal CDF, density and inverse CDF
//! - **Statistics**: Mean, sample standard deviation and quantiles
//! - **Combinatorics**: Log-space binomial probability weights
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Large factorials and powers are handled in log space
//! - **Explicit Failure**: Non-convergence and bad inputs are typed errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]

pub mod combinatorics;
pub mod distributions;
pub mod error;
pub mod solvers;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::combinatorics::binomial_weights;
    pub use crate::distributions::{inverse_norm_cdf, norm_cdf, norm_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, newton_raphson, safeguarded_newton, secant, SolverConfig, SolverResult,
    };
    pub use crate::statistics::{mean, quantile, sample_std_dev, QuantileMethod};
}

pub use error::{MathError, MathResult};
