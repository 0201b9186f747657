//! Iterative depth-first topological ordering.

use tangle_graph::{NodeId, TangleView};

/// Post-order DFS over the "approves" direction, starting from each unvisited
/// node in arrival order.
///
/// Every node appears after all nodes it transitively approves, so genesis
/// comes before anything that reaches it. Uses an explicit stack: safe for
/// arbitrarily long approval chains.
pub fn topological_order(view: &TangleView<'_>) -> Vec<NodeId> {
    let mut visited = vec![false; view.len()];
    let mut order = Vec::with_capacity(view.len());

    for root in view.nodes().iter().map(|n| n.id()) {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;

        // (node, children not yet explored)
        let mut stack = vec![(root, view.direct_children(root))];
        while let Some((node, pending)) = stack.last_mut() {
            match pending.pop() {
                Some(child) => {
                    if !visited[child.index()] {
                        visited[child.index()] = true;
                        stack.push((child, view.direct_children(child)));
                    }
                }
                None => {
                    order.push(*node);
                    stack.pop();
                }
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_graph::Graph;

    fn position(order: &[NodeId], id: NodeId) -> usize {
        order.iter().position(|&n| n == id).unwrap()
    }

    #[test]
    fn children_precede_parents() {
        let mut graph = Graph::new();
        let a = graph.push_node(1.0, false);
        graph.add_edge(a, NodeId::GENESIS).unwrap();
        let b = graph.push_node(2.0, false);
        graph.add_edge(b, a).unwrap();
        let c = graph.push_node(3.0, false);
        graph.add_edge(c, b).unwrap();
        graph.add_edge(c, NodeId::GENESIS).unwrap();

        let order = topological_order(&graph.view());
        assert_eq!(order.len(), 4);
        for edge in graph.edges() {
            assert!(position(&order, edge.target) < position(&order, edge.source));
        }
        assert_eq!(order[0], NodeId::GENESIS);
    }

    #[test]
    fn isolated_nodes_are_included() {
        let mut graph = Graph::new();
        graph.push_node(1.0, false);
        let b = graph.push_node(2.0, false);
        graph.add_edge(b, NodeId(1)).unwrap();

        let order = topological_order(&graph.view());
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn respects_view_prefix() {
        let mut graph = Graph::new();
        for i in 1..6u64 {
            let id = graph.push_node(i as f64, false);
            graph.add_edge(id, NodeId(i - 1)).unwrap();
        }
        let order = topological_order(&graph.view_prefix(3));
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn long_chain_is_stack_safe() {
        let mut graph = Graph::new();
        for i in 1..100_000u64 {
            let id = graph.push_node(i as f64, false);
            graph.add_edge(id, NodeId(i - 1)).unwrap();
        }
        let order = topological_order(&graph.view());
        assert_eq!(order.len(), 100_000);
        assert_eq!(order[0], NodeId::GENESIS);
        assert_eq!(order[99_999], NodeId(99_999));
    }
}
