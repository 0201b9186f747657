//! Whole-graph entry points for a presentation layer.

use tangle_graph::{Graph, NodeId, Reach};
use tangle_weights::ExitModel;

use crate::builder::TangleBuilder;
use crate::config::TangleConfig;
use crate::error::Result;

/// Run a complete simulation and return the tangle.
pub fn build(config: TangleConfig) -> Result<Graph> {
    let mut builder = TangleBuilder::new(config)?;
    builder.run_to_completion()?;
    Ok(builder.finish().0)
}

pub fn tips(graph: &Graph) -> Vec<NodeId> {
    graph.view().tips()
}

pub fn milestones(graph: &Graph) -> Vec<NodeId> {
    graph.view().milestones()
}

/// Everything that transitively approves `node`.
pub fn ancestors_of(graph: &Graph, node: NodeId) -> Reach {
    graph.view().ancestors(node)
}

/// Everything `node` transitively approves.
pub fn descendants_of(graph: &Graph, node: NodeId) -> Reach {
    graph.view().descendants(node)
}

pub fn direct_approvers(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    graph.view().direct_approvers(node)
}

pub fn direct_children(graph: &Graph, node: NodeId) -> Vec<NodeId> {
    graph.view().direct_children(node)
}

pub fn recompute_weights(graph: &mut Graph) -> Result<()> {
    Ok(tangle_weights::recompute_weights(graph)?)
}

/// The weighted walker needs fresh cumulative weights.
pub fn recompute_exit_probabilities(graph: &mut Graph, weighted: bool, alpha: f64) -> Result<()> {
    Ok(tangle_weights::recompute_exit_probabilities(
        graph,
        ExitModel::from_flag(weighted, alpha),
    )?)
}

/// Needs fresh exit probabilities.
pub fn recompute_confidence(graph: &mut Graph) -> Result<()> {
    Ok(tangle_weights::recompute_confidence(graph)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tangle_graph::Metric;

    #[test]
    fn build_honours_node_count() {
        let graph = build(TangleConfig::default().with_node_count(33)).unwrap();
        assert_eq!(graph.len(), 33);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let result = build(TangleConfig::default().with_alpha(-1.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn queries_agree_with_edges() {
        let graph = build(TangleConfig::default().with_node_count(40).with_h(0.0)).unwrap();
        for node in graph.nodes() {
            let id = node.id();
            for approver in direct_approvers(&graph, id) {
                assert!(ancestors_of(&graph, id).contains(approver));
                assert!(direct_children(&graph, approver).contains(&id));
            }
            for child in direct_children(&graph, id) {
                assert!(descendants_of(&graph, id).contains(child));
            }
        }
        assert!(tips(&graph).iter().all(|&t| direct_approvers(&graph, t).is_empty()));
        assert_eq!(milestones(&graph)[0], NodeId::GENESIS);
    }

    #[test]
    fn metrics_require_their_inputs() {
        let mut graph = build(TangleConfig::default().with_node_count(20)).unwrap();

        let err = recompute_exit_probabilities(&mut graph, true, 0.5).unwrap_err();
        assert!(matches!(
            err,
            Error::Graph(tangle_graph::Error::PreconditionViolated(Metric::CumulativeWeight))
        ));
        let err = recompute_confidence(&mut graph).unwrap_err();
        assert!(matches!(
            err,
            Error::Graph(tangle_graph::Error::PreconditionViolated(Metric::ExitProbability))
        ));

        recompute_weights(&mut graph).unwrap();
        recompute_exit_probabilities(&mut graph, true, 0.5).unwrap();
        recompute_confidence(&mut graph).unwrap();
        assert!((graph.confidence(NodeId::GENESIS).unwrap() - 1.0).abs() < 1e-9);
    }
}
