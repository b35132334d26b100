//! Backward induction with early exercise.
//!
//! # Non-recombining layout
//!
//! The tree is a complete binary tree stored breadth-first in one buffer.
//! Node `j` of step `i` lives at `2^i - 1 + j`; its up child is
//! `(i + 1, 2j)` and its down child `(i + 1, 2j + 1)`, which are flat
//! offsets `2k + 1` and `2k + 2` of a parent at offset `k`.
//!
//! ```text
//!                 0
//!             /       \
//!           1           2
//!         /   \       /   \
//!        3     4     5     6
//! ```

use strike_core::VanillaOption;

use super::LatticeParameters;

/// One node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatticeNode {
    /// Underlying price reached at this node.
    pub underlying_price: f64,
    /// Option value at this node after backward induction.
    pub option_value: f64,
}

/// Number of nodes in a non-recombining tree: `2^(steps+1) - 1`.
#[must_use]
pub fn node_count(steps: usize) -> usize {
    (1_usize << (steps + 1)) - 1
}

/// Flat offset of branch `branch` at step `step`: `2^step - 1 + branch`.
#[must_use]
pub fn node_index(step: usize, branch: usize) -> usize {
    (1_usize << step) - 1 + branch
}

/// A fully materialised non-recombining binomial tree.
#[derive(Debug, Clone)]
pub struct NonRecombiningTree {
    steps: usize,
    nodes: Vec<LatticeNode>,
}

impl NonRecombiningTree {
    /// Allocates the tree and fills in underlying prices from `spot`.
    ///
    /// Option values are zero until [`NonRecombiningTree::roll_back`] runs.
    /// The caller bounds `steps`; memory is `16 · 2^(steps+1)` bytes.
    #[must_use]
    pub fn build(spot: f64, steps: usize, params: &LatticeParameters) -> Self {
        let total = node_count(steps);
        log::debug!("building non-recombining tree: {steps} steps, {total} nodes");

        let mut nodes = vec![LatticeNode::default(); total];
        nodes[0].underlying_price = spot;

        for k in 0..node_index(steps, 0) {
            let price = nodes[k].underlying_price;
            nodes[2 * k + 1].underlying_price = price * params.up;
            nodes[2 * k + 2].underlying_price = price * params.down;
        }

        Self { steps, nodes }
    }

    /// Sets terminal payoffs and rolls values back to the root.
    ///
    /// Each interior node takes `max(exercise, e^(-rΔt)·(p·up + (1-p)·down))`.
    pub fn roll_back(&mut self, option: &VanillaOption, params: &LatticeParameters) {
        let first_leaf = node_index(self.steps, 0);
        for node in &mut self.nodes[first_leaf..] {
            node.option_value = option.payoff(node.underlying_price, 1.0);
        }

        let p = params.probability;
        for k in (0..first_leaf).rev() {
            let up = self.nodes[2 * k + 1].option_value;
            let down = self.nodes[2 * k + 2].option_value;
            let hold = params.step_discount * (p * up + (1.0 - p) * down);
            let node = &mut self.nodes[k];
            node.option_value = option.payoff(node.underlying_price, 1.0).max(hold);
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> LatticeNode {
        self.nodes[0]
    }

    /// Node `branch` at `step`, if it exists.
    #[must_use]
    pub fn node(&self, step: usize, branch: usize) -> Option<&LatticeNode> {
        if step > self.steps || branch >= (1_usize << step) {
            return None;
        }
        self.nodes.get(node_index(step, branch))
    }

    /// Number of steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// American value on a recombining tree of `steps + 1` terminal nodes.
///
/// Node `j` at step `i` has seen `j` down moves, price `S·u^(i-j)·d^j`.
pub(super) fn price_recombining(
    option: &VanillaOption,
    spot: f64,
    steps: usize,
    params: &LatticeParameters,
) -> f64 {
    let price_at = |step: usize, downs: usize| {
        spot * params.up.powi((step - downs) as i32) * params.down.powi(downs as i32)
    };

    let mut values: Vec<f64> = (0..=steps)
        .map(|downs| option.payoff(price_at(steps, downs), 1.0))
        .collect();

    let p = params.probability;
    for step in (0..steps).rev() {
        for downs in 0..=step {
            let hold = params.step_discount * (p * values[downs] + (1.0 - p) * values[downs + 1]);
            values[downs] = option.payoff(price_at(step, downs), 1.0).max(hold);
        }
    }

    values[0]
}
