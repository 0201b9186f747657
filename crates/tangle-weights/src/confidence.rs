//! Confirmation confidence.

use tangle_graph::{Graph, Result, TangleView};
use tracing::debug;

/// Sum of exit probability over the tips approving each node, indexed by id.
///
/// A tip counts towards its own confidence. `exit` must hold one exit
/// probability per node of the view.
pub fn confidence(view: &TangleView<'_>, exit: &[f64]) -> Vec<f64> {
    let is_tip: Vec<bool> = view.nodes().iter().map(|n| view.is_tip(n.id())).collect();

    view.nodes()
        .iter()
        .map(|node| {
            let id = node.id();
            let own = if is_tip[id.index()] { exit[id.index()] } else { 0.0 };
            let approving: f64 = view
                .ancestors(id)
                .nodes
                .iter()
                .filter(|a| is_tip[a.index()])
                .map(|a| exit[a.index()])
                .sum();
            (own + approving).min(1.0)
        })
        .collect()
}

/// Recompute and store confidence for the whole graph.
///
/// Fails with `PreconditionViolated` unless exit probabilities are fresh.
pub fn recompute_confidence(graph: &mut Graph) -> Result<()> {
    let exit = graph.exit_probabilities()?;
    let values = confidence(&graph.view(), &exit);
    debug!(nodes = values.len(), "recomputed confidence");
    graph.store_confidence(&values)
}
