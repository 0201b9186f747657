//! Cumulative weight: how many transactions stand behind a node.

use std::collections::HashSet;

use tangle_graph::{Graph, NodeId, Result, TangleView};
use tracing::debug;

use crate::order::topological_order;

/// Cumulative weight of every node in the view, indexed by id.
///
/// Walks the topological order backwards (approvers before the nodes they
/// approve) and hands each node's approver set down to its children. A node's
/// set is complete by the time it is reached, so it is taken rather than
/// cloned.
pub fn cumulative_weights(view: &TangleView<'_>) -> Vec<u64> {
    let order = topological_order(view);
    let mut approved_by: Vec<HashSet<NodeId>> = vec![HashSet::new(); view.len()];
    let mut weights = vec![1u64; view.len()];

    for &node in order.iter().rev() {
        let inherited = std::mem::take(&mut approved_by[node.index()]);
        for child in view.direct_children(node) {
            let set = &mut approved_by[child.index()];
            set.extend(inherited.iter().copied());
            set.insert(node);
        }
        weights[node.index()] = inherited.len() as u64 + 1;
    }

    weights
}

/// Recompute and store cumulative weights for the whole graph.
pub fn recompute_weights(graph: &mut Graph) -> Result<()> {
    let weights = cumulative_weights(&graph.view());
    debug!(nodes = weights.len(), "recomputed cumulative weights");
    graph.store_cumulative_weights(&weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_counts_shared_approvers_once() {
        // 1 -> 0, 2 -> 0, 3 -> {1, 2}
        let mut graph = Graph::new();
        let a = graph.push_node(1.0, false);
        graph.add_edge(a, NodeId::GENESIS).unwrap();
        let b = graph.push_node(2.0, false);
        graph.add_edge(b, NodeId::GENESIS).unwrap();
        let c = graph.push_node(3.0, false);
        graph.add_edge(c, a).unwrap();
        graph.add_edge(c, b).unwrap();

        assert_eq!(cumulative_weights(&graph.view()), vec![4, 2, 2, 1]);
    }

    #[test]
    fn view_ignores_later_approvers() {
        let mut graph = Graph::new();
        for i in 1..5u64 {
            let id = graph.push_node(i as f64, false);
            graph.add_edge(id, NodeId(i - 1)).unwrap();
        }
        assert_eq!(cumulative_weights(&graph.view()), vec![5, 4, 3, 2, 1]);
        assert_eq!(cumulative_weights(&graph.view_prefix(2)), vec![2, 1]);
    }

    #[test]
    fn isolated_node_weighs_one() {
        let mut graph = Graph::new();
        graph.push_node(1.0, false);
        assert_eq!(cumulative_weights(&graph.view()), vec![1, 1]);
    }

    #[test]
    fn recompute_stores_on_graph() {
        let mut graph = Graph::new();
        let a = graph.push_node(1.0, false);
        graph.add_edge(a, NodeId::GENESIS).unwrap();
        recompute_weights(&mut graph).unwrap();
        assert_eq!(graph.cumulative_weight(NodeId::GENESIS), Ok(2));
        assert_eq!(graph.cumulative_weight(a), Ok(1));
    }
}
