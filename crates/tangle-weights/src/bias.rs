//! Walker transition probabilities.

use tangle_graph::{NodeId, TangleView};

/// How a walker picks the next approver.
#[derive(Debug, Clone, Copy)]
pub enum Bias<'w> {
    /// Every approver equally likely
    Uniform,
    /// Softmax over cumulative weight, scaled by `alpha`
    Weighted {
        /// Cumulative weight per node id of the view
        weights: &'w [u64],
        alpha: f64,
    },
}

/// Shift-normalised softmax: `exp(alpha * (w_i - max w))`, normalised.
///
/// The shift keeps the largest term at `exp(0) = 1`, so the sum never
/// underflows to zero. Equal weights (or `alpha = 0`) give a uniform split.
pub fn softmax_shares(weights: &[u64], alpha: f64) -> Vec<f64> {
    let Some(&max) = weights.iter().max() else {
        return Vec::new();
    };

    let scaled: Vec<f64> = weights
        .iter()
        .map(|&w| (alpha * (w as f64 - max as f64)).exp())
        .collect();
    let sum: f64 = scaled.iter().sum();

    scaled.into_iter().map(|s| s / sum).collect()
}

/// Probability that a walker standing on `node` steps to each of its direct
/// approvers. Empty when `node` is a tip of the view.
pub fn transition_probabilities(
    view: &TangleView<'_>,
    node: NodeId,
    bias: Bias<'_>,
) -> Vec<(NodeId, f64)> {
    let approvers = view.direct_approvers(node);
    if approvers.is_empty() {
        return Vec::new();
    }

    match bias {
        Bias::Uniform => {
            let share = 1.0 / approvers.len() as f64;
            approvers.into_iter().map(|a| (a, share)).collect()
        }
        Bias::Weighted { weights, alpha } => {
            let approver_weights: Vec<u64> =
                approvers.iter().map(|a| weights[a.index()]).collect();
            approvers
                .into_iter()
                .zip(softmax_shares(&approver_weights, alpha))
                .collect()
        }
    }
}
