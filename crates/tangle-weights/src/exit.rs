//! Exit probability: where a random walk from genesis ends up.

use tangle_graph::{Graph, Result, TangleView};
use tracing::debug;

use crate::bias::{transition_probabilities, Bias};
use crate::order::topological_order;

/// Walker model used to derive exit probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitModel {
    /// Every tip equally likely; no walk involved
    Uniform,
    /// Unbiased walk from genesis
    Unweighted,
    /// Cumulative-weight biased walk from genesis; needs fresh weights
    Weighted { alpha: f64 },
}

impl ExitModel {
    /// Unweighted or weighted walker, picked by a flag.
    pub fn from_flag(weighted: bool, alpha: f64) -> Self {
        if weighted {
            ExitModel::Weighted { alpha }
        } else {
            ExitModel::Unweighted
        }
    }
}

/// Probability that a walk from genesis passes through each node, indexed by id.
///
/// Genesis starts with all the mass. In topological order every other node
/// collects, from each node it approves, the share a walker standing there
/// would hand it. A walk only stops on a tip, so for tips this is the exit
/// probability and the tip values sum to one. Nodes that cannot be reached
/// from genesis get zero.
pub fn exit_probabilities(view: &TangleView<'_>, bias: Bias<'_>) -> Vec<f64> {
    let mut mass = vec![0.0; view.len()];
    let Some(genesis) = view.genesis() else {
        return mass;
    };
    mass[genesis.index()] = 1.0;

    for node in topological_order(view) {
        if node == genesis {
            continue;
        }
        let mut received = 0.0;
        for child in view.direct_children(node) {
            let share = transition_probabilities(view, child, bias)
                .into_iter()
                .find(|&(approver, _)| approver == node)
                .map_or(0.0, |(_, p)| p);
            received += mass[child.index()] * share;
        }
        mass[node.index()] = received;
    }

    mass
}

/// `1 / |tips|` on every tip, zero elsewhere.
pub fn uniform_exit_probabilities(view: &TangleView<'_>) -> Vec<f64> {
    let mut probabilities = vec![0.0; view.len()];
    let tips = view.tips();
    if tips.is_empty() {
        return probabilities;
    }
    let share = 1.0 / tips.len() as f64;
    for tip in tips {
        probabilities[tip.index()] = share;
    }
    probabilities
}

/// Recompute and store exit probabilities for the whole graph.
///
/// The weighted model reads the stored cumulative weights and fails with
/// `PreconditionViolated` when they are stale.
pub fn recompute_exit_probabilities(graph: &mut Graph, model: ExitModel) -> Result<()> {
    let probabilities = {
        let view = graph.view();
        match model {
            ExitModel::Uniform => uniform_exit_probabilities(&view),
            ExitModel::Unweighted => exit_probabilities(&view, Bias::Uniform),
            ExitModel::Weighted { alpha } => {
                let weights = graph.cumulative_weights()?;
                exit_probabilities(
                    &view,
                    Bias::Weighted {
                        weights: &weights,
                        alpha,
                    },
                )
            }
        }
    };
    debug!(?model, nodes = probabilities.len(), "recomputed exit probabilities");
    graph.store_exit_probabilities(&probabilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulative::recompute_weights;
    use tangle_graph::{Error, Metric, NodeId};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    /// 1 -> 0, 2 -> 0, 3 -> 1
    fn fork() -> Graph {
        let mut graph = Graph::new();
        let a = graph.push_node(1.0, false);
        graph.add_edge(a, NodeId::GENESIS).unwrap();
        let b = graph.push_node(2.0, false);
        graph.add_edge(b, NodeId::GENESIS).unwrap();
        let c = graph.push_node(3.0, false);
        graph.add_edge(c, a).unwrap();
        graph
    }

    #[test]
    fn unweighted_splits_evenly() {
        let graph = fork();
        let p = exit_probabilities(&graph.view(), Bias::Uniform);
        assert!(close(p[0], 1.0));
        assert!(close(p[1], 0.5));
        assert!(close(p[2], 0.5));
        assert!(close(p[3], 0.5));
    }

    #[test]
    fn weighted_favours_heavy_branch() {
        let mut graph = fork();
        recompute_weights(&mut graph).unwrap();
        recompute_exit_probabilities(&mut graph, ExitModel::Weighted { alpha: 1.0 }).unwrap();

        let heavy = graph.exit_probability(NodeId(3)).unwrap();
        let light = graph.exit_probability(NodeId(2)).unwrap();
        assert!(heavy > light);
        assert!(close(heavy + light, 1.0));
        // weights 2 vs 1 under alpha = 1
        assert!(close(heavy, 1.0f64.exp() / (1.0f64.exp() + 1.0)));
    }

    #[test]
    fn weighted_requires_fresh_weights() {
        let mut graph = fork();
        assert_eq!(
            recompute_exit_probabilities(&mut graph, ExitModel::Weighted { alpha: 1.0 }),
            Err(Error::PreconditionViolated(Metric::CumulativeWeight))
        );
    }

    #[test]
    fn uniform_model_ignores_structure() {
        let mut graph = fork();
        recompute_exit_probabilities(&mut graph, ExitModel::Uniform).unwrap();
        assert_eq!(graph.exit_probability(NodeId(1)), Ok(0.0));
        assert!(close(graph.exit_probability(NodeId(2)).unwrap(), 0.5));
        assert!(close(graph.exit_probability(NodeId(3)).unwrap(), 0.5));
    }

    #[test]
    fn unreachable_nodes_get_nothing() {
        let mut graph = Graph::new();
        graph.push_node(1.0, false);
        let b = graph.push_node(2.0, false);
        graph.add_edge(b, NodeId::GENESIS).unwrap();

        let p = exit_probabilities(&graph.view(), Bias::Uniform);
        assert_eq!(p, vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn genesis_alone_keeps_all_mass() {
        let graph = Graph::new();
        assert_eq!(exit_probabilities(&graph.view(), Bias::Uniform), vec![1.0]);
    }

    #[test]
    fn flag_maps_to_model() {
        assert_eq!(ExitModel::from_flag(false, 3.0), ExitModel::Unweighted);
        assert_eq!(
            ExitModel::from_flag(true, 3.0),
            ExitModel::Weighted { alpha: 3.0 }
        );
    }
}
