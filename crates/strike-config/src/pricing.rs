//! Pricing and lattice settings.

use serde::{Deserialize, Serialize};
use strike_pricing::implied_vol::{MAX_VOLATILITY, MIN_VOLATILITY};
use strike_pricing::lattice::{DEFAULT_MAX_TREE_STEPS, DEFAULT_STEPS, MAX_TREE_STEPS_CEILING};
use strike_pricing::{
    BinomialLattice, ImpliedVolConfig, ImpliedVolMethod, PricingResult, TreeLayout,
};

use crate::error::{Validate, ValidationError};

// =============================================================================
// IMPLIED VOLATILITY
// =============================================================================

/// Implied-volatility solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingSection {
    /// Starting volatility for the search.
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Absolute tolerance on the price residual.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Root-finding method.
    #[serde(default)]
    pub method: ImpliedVolMethod,
}

fn default_initial_guess() -> f64 {
    0.10
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> u32 {
    100
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            initial_guess: default_initial_guess(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            method: ImpliedVolMethod::default(),
        }
    }
}

impl PricingSection {
    /// Solver configuration for these settings.
    #[must_use]
    pub fn implied_vol(&self) -> ImpliedVolConfig {
        ImpliedVolConfig::default()
            .with_initial_guess(self.initial_guess)
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_method(self.method)
    }
}

impl Validate for PricingSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.initial_guess > MIN_VOLATILITY && self.initial_guess < MAX_VOLATILITY) {
            errors.push(ValidationError::new(
                "initial_guess",
                format!(
                    "Initial guess {} must lie between {} and {}",
                    self.initial_guess, MIN_VOLATILITY, MAX_VOLATILITY
                ),
            ));
        }

        if self.tolerance <= 0.0 || self.tolerance > 1e-2 {
            errors.push(ValidationError::new(
                "tolerance",
                "Tolerance must be between 0 and 1e-2",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            errors.push(ValidationError::new(
                "max_iterations",
                "Max iterations must be between 1 and 10000",
            ));
        }

        errors
    }
}

// =============================================================================
// LATTICE
// =============================================================================

/// Binomial lattice settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeSection {
    /// Number of time steps.
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Largest step count allowed for the non-recombining tree.
    #[serde(default = "default_max_tree_steps")]
    pub max_tree_steps: usize,

    /// Tree layout used for American exercise.
    #[serde(default)]
    pub layout: TreeLayout,
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_max_tree_steps() -> usize {
    DEFAULT_MAX_TREE_STEPS
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            max_tree_steps: default_max_tree_steps(),
            layout: TreeLayout::default(),
        }
    }
}

impl LatticeSection {
    /// Lattice pricer for these settings, with volatility-derived factors.
    pub fn lattice(&self) -> PricingResult<BinomialLattice> {
        BinomialLattice::new(self.steps)?
            .with_layout(self.layout)
            .with_max_tree_steps(self.max_tree_steps)
    }
}

impl Validate for LatticeSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.steps == 0 {
            errors.push(ValidationError::new("steps", "Steps must be positive"));
        }

        if self.max_tree_steps == 0 || self.max_tree_steps > MAX_TREE_STEPS_CEILING {
            errors.push(ValidationError::new(
                "max_tree_steps",
                format!(
                    "Max tree steps {} must be between 1 and {}",
                    self.max_tree_steps, MAX_TREE_STEPS_CEILING
                ),
            ));
        }

        errors
    }
}
