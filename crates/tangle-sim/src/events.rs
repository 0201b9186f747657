//! Construction events and read-only snapshots.

use serde::{Deserialize, Serialize};
use tangle_graph::{ApprovalEdge, Metric, NodeId, TangleView};

/// Events recorded while the tangle grows.
///
/// `step` is the id of the transaction being attached; all events of one step
/// are emitted before the next transaction arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TangleEvent {
    /// A transaction arrived
    NodeArrived {
        node: NodeId,
        arrival_time: f64,
        is_milestone: bool,
        step: u64,
    },

    /// A strategy picked an approval target
    TipSelected {
        node: NodeId,
        tip: NodeId,
        path: Vec<NodeId>,
        step: u64,
    },

    /// An approval edge was added (duplicates are not reported)
    ApprovalAttached {
        source: NodeId,
        target: NodeId,
        step: u64,
    },
}

impl TangleEvent {
    /// Get the step this event belongs to.
    pub fn step(&self) -> u64 {
        match self {
            TangleEvent::NodeArrived { step, .. } => *step,
            TangleEvent::TipSelected { step, .. } => *step,
            TangleEvent::ApprovalAttached { step, .. } => *step,
        }
    }
}

/// State of one transaction in a snapshot.
///
/// Metrics are present only when they are fresh for the snapshotted graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: NodeId,
    pub arrival_time: f64,
    pub is_milestone: bool,
    pub is_tip: bool,
    pub cumulative_weight: Option<u64>,
    pub exit_probability: Option<f64>,
    pub confidence: Option<f64>,
}

/// A read-only copy of a tangle view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TangleSnapshot {
    /// Number of attached transactions
    pub node_count: usize,
    pub nodes: Vec<NodeState>,
    pub edges: Vec<ApprovalEdge>,
    pub tips: Vec<NodeId>,
    pub milestones: Vec<NodeId>,
}

impl TangleSnapshot {
    /// Copy a view. Metrics are included only for a view of the whole graph.
    pub fn of(view: &TangleView<'_>) -> Self {
        let graph = view.graph();
        let whole = view.len() == graph.len();
        let fresh = |metric: Metric| whole && graph.is_fresh(metric);

        let nodes = view
            .nodes()
            .iter()
            .map(|node| {
                let id = node.id();
                NodeState {
                    id,
                    arrival_time: node.arrival_time(),
                    is_milestone: node.is_milestone(),
                    is_tip: view.is_tip(id),
                    cumulative_weight: fresh(Metric::CumulativeWeight)
                        .then(|| graph.cumulative_weight(id).ok())
                        .flatten(),
                    exit_probability: fresh(Metric::ExitProbability)
                        .then(|| graph.exit_probability(id).ok())
                        .flatten(),
                    confidence: fresh(Metric::Confidence)
                        .then(|| graph.confidence(id).ok())
                        .flatten(),
                }
            })
            .collect();

        Self {
            node_count: view.len(),
            nodes,
            edges: view.edges().to_vec(),
            tips: view.tips(),
            milestones: view.milestones(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_graph::Graph;

    #[test]
    fn event_serialization() {
        let event = TangleEvent::TipSelected {
            node: NodeId(4),
            tip: NodeId(2),
            path: vec![NodeId(0), NodeId(2)],
            step: 4,
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("TipSelected"));

        let parsed: TangleEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.step(), 4);
        assert_eq!(parsed, event);
    }

    #[test]
    fn snapshot_default() {
        let snap = TangleSnapshot::default();
        assert_eq!(snap.node_count, 0);
        assert!(snap.tips.is_empty());
    }

    #[test]
    fn prefix_snapshot_has_no_metrics() {
        let mut graph = Graph::new();
        let a = graph.push_node(1.0, false);
        graph.add_edge(a, NodeId::GENESIS).unwrap();
        tangle_weights::recompute_weights(&mut graph).unwrap();

        let full = TangleSnapshot::of(&graph.view());
        assert_eq!(full.nodes[0].cumulative_weight, Some(2));
        assert_eq!(full.tips, vec![a]);

        let partial = TangleSnapshot::of(&graph.view_prefix(1));
        assert_eq!(partial.nodes[0].cumulative_weight, None);
        assert_eq!(partial.tips, vec![NodeId::GENESIS]);
        assert!(partial.edges.is_empty());
    }
}
