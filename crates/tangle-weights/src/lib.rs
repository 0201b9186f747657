//! Weight & Probability Calculation
//!
//! Derived metrics over a tangle, all computed from the approval edges alone:
//!
//! - **Topological order**: every node after everything it approves
//! - **Cumulative weight**: 1 + number of transactions approving a node,
//!   directly or transitively
//! - **Exit probability**: probability a random walk from genesis ends at a
//!   node, under a uniform or cumulative-weight biased walker
//! - **Confidence**: exit probability mass of the tips approving a node
//!
//! # Biased walker
//!
//! A walker at node `x` with approvers `a_1..a_k` of cumulative weights
//! `w_1..w_k` steps to `a_i` with probability
//!
//! ```text
//! exp(alpha * (w_i - max w)) / sum_j exp(alpha * (w_j - max w))
//! ```
//!
//! `alpha = 0` is the unbiased walker. The same formula drives the weighted
//! tip-selection walk and the weighted exit-probability model.
//!
//! # Freshness
//!
//! The `recompute_*` functions store their results on the [`Graph`]. Metrics
//! that depend on other metrics (weighted exit probability on cumulative
//! weight, confidence on exit probability) fail with
//! `Error::PreconditionViolated` when their input is stale.

mod bias;
mod confidence;
mod cumulative;
mod exit;
mod order;

pub use bias::{softmax_shares, transition_probabilities, Bias};
pub use confidence::{confidence, recompute_confidence};
pub use cumulative::{cumulative_weights, recompute_weights};
pub use exit::{
    exit_probabilities, recompute_exit_probabilities, uniform_exit_probabilities, ExitModel,
};
pub use order::topological_order;

use tangle_graph::{Graph, Result};

/// Recompute every metric in dependency order.
pub fn recompute_all(graph: &mut Graph, model: ExitModel) -> Result<()> {
    recompute_weights(graph)?;
    recompute_exit_probabilities(graph, model)?;
    recompute_confidence(graph)
}
