//! The owned node and edge arenas.

use std::fmt;

use crate::error::{Error, Result};
use crate::node::{ApprovalEdge, EdgeId, Node, NodeId};
use crate::view::TangleView;
use crate::MAX_APPROVALS;

/// A derived per-node metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Metric {
    /// 1 + number of transactions that transitively approve the node
    CumulativeWeight,
    /// Probability a walk from genesis ends at the node
    ExitProbability,
    /// Exit probability mass of the tips that approve the node
    Confidence,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::CumulativeWeight => "cumulative weight",
            Metric::ExitProbability => "exit probability",
            Metric::Confidence => "confidence",
        };
        f.write_str(name)
    }
}

/// Revision each metric was last computed at.
#[derive(Debug, Clone, Default)]
struct Freshness {
    cumulative_weight: Option<u64>,
    exit_probability: Option<u64>,
    confidence: Option<u64>,
}

impl Freshness {
    fn slot(&mut self, metric: Metric) -> &mut Option<u64> {
        match metric {
            Metric::CumulativeWeight => &mut self.cumulative_weight,
            Metric::ExitProbability => &mut self.exit_probability,
            Metric::Confidence => &mut self.confidence,
        }
    }

    fn get(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::CumulativeWeight => self.cumulative_weight,
            Metric::ExitProbability => self.exit_probability,
            Metric::Confidence => self.confidence,
        }
    }
}

/// The tangle: nodes in arrival order plus the approval edges between them.
///
/// Exactly one genesis node (`id == 0`, `arrival_time == 0`, milestone) exists
/// from construction. Nodes and edges are only ever appended.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<ApprovalEdge>,
    /// Incoming edges per node (who approves it)
    approvers: Vec<Vec<EdgeId>>,
    /// Outgoing edges per node (what it approves)
    children: Vec<Vec<EdgeId>>,
    /// Number of edges that existed when each node was created
    edge_offsets: Vec<usize>,
    revision: u64,
    fresh: Freshness,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a graph holding only the genesis transaction.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeId::GENESIS, 0.0, true)],
            edges: Vec::new(),
            approvers: vec![Vec::new()],
            children: vec![Vec::new()],
            edge_offsets: vec![0],
            revision: 0,
            fresh: Freshness::default(),
        }
    }

    /// Number of nodes, genesis included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the genesis node exists from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ApprovalEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&ApprovalEdge> {
        self.edges.get(id.index())
    }

    pub fn genesis(&self) -> &Node {
        &self.nodes[0]
    }

    /// The most recently created node.
    pub fn newest(&self) -> &Node {
        &self.nodes[self.nodes.len() - 1]
    }

    /// Mutation counter; bumped by every node or edge added.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a transaction.
    ///
    /// Arrival times must be strictly increasing. The arrival process
    /// guarantees this; it is only checked in debug builds.
    pub fn push_node(&mut self, arrival_time: f64, is_milestone: bool) -> NodeId {
        debug_assert!(
            arrival_time > self.newest().arrival_time(),
            "arrival time {} does not follow {}",
            arrival_time,
            self.newest().arrival_time()
        );

        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(Node::new(id, arrival_time, is_milestone));
        self.approvers.push(Vec::new());
        self.children.push(Vec::new());
        self.edge_offsets.push(self.edges.len());
        self.revision += 1;
        id
    }

    /// Record that `source` approves `target`.
    ///
    /// Returns `false` when the approval already exists.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<bool> {
        if self.node(source).is_none() {
            return Err(Error::UnknownNode(source));
        }
        if self.node(target).is_none() {
            return Err(Error::UnknownNode(target));
        }
        let newest = self.newest().id();
        if source != newest {
            return Err(Error::NotNewest { node: source, newest });
        }
        if target >= source
            || self.nodes[target.index()].arrival_time() >= self.nodes[source.index()].arrival_time()
        {
            return Err(Error::NotOlder {
                approver: source,
                approved: target,
            });
        }

        let outgoing = &self.children[source.index()];
        if outgoing.iter().any(|e| self.edges[e.index()].target == target) {
            return Ok(false);
        }
        if outgoing.len() >= MAX_APPROVALS {
            return Err(Error::TooManyApprovals {
                node: source,
                max: MAX_APPROVALS,
            });
        }

        let edge_id = EdgeId(self.edges.len());
        self.edges.push(ApprovalEdge { source, target });
        self.children[source.index()].push(edge_id);
        self.approvers[target.index()].push(edge_id);
        self.revision += 1;
        Ok(true)
    }

    /// View over the whole graph.
    pub fn view(&self) -> TangleView<'_> {
        self.view_prefix(self.nodes.len())
    }

    /// View over the first `len` nodes and the edges among them.
    pub fn view_prefix(&self, len: usize) -> TangleView<'_> {
        let len = len.min(self.nodes.len());
        let edge_len = if len == self.nodes.len() {
            self.edges.len()
        } else {
            self.edge_offsets[len]
        };
        TangleView::new(self, len, edge_len)
    }

    /// View over every node that arrived strictly before `cutoff`.
    pub fn view_before(&self, cutoff: f64) -> TangleView<'_> {
        let len = self.nodes.partition_point(|n| n.arrival_time() < cutoff);
        self.view_prefix(len)
    }

    pub(crate) fn approver_edges(&self, id: NodeId) -> &[EdgeId] {
        self.approvers.get(id.index()).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn child_edges(&self, id: NodeId) -> &[EdgeId] {
        self.children.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Whether `metric` was computed against the current edge set.
    pub fn is_fresh(&self, metric: Metric) -> bool {
        self.fresh.get(metric) == Some(self.revision)
    }

    fn ensure_fresh(&self, metric: Metric) -> Result<()> {
        if self.is_fresh(metric) {
            Ok(())
        } else {
            Err(Error::PreconditionViolated(metric))
        }
    }

    fn ensure_covers(&self, metric: Metric, actual: usize) -> Result<()> {
        if actual == self.nodes.len() {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                metric,
                expected: self.nodes.len(),
                actual,
            })
        }
    }

    fn node_or_err(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(Error::UnknownNode(id))
    }

    pub fn cumulative_weight(&self, id: NodeId) -> Result<u64> {
        self.ensure_fresh(Metric::CumulativeWeight)?;
        Ok(self.node_or_err(id)?.cumulative_weight)
    }

    pub fn exit_probability(&self, id: NodeId) -> Result<f64> {
        self.ensure_fresh(Metric::ExitProbability)?;
        Ok(self.node_or_err(id)?.exit_probability)
    }

    pub fn confidence(&self, id: NodeId) -> Result<f64> {
        self.ensure_fresh(Metric::Confidence)?;
        Ok(self.node_or_err(id)?.confidence)
    }

    /// Every node's cumulative weight, indexed by id.
    pub fn cumulative_weights(&self) -> Result<Vec<u64>> {
        self.ensure_fresh(Metric::CumulativeWeight)?;
        Ok(self.nodes.iter().map(|n| n.cumulative_weight).collect())
    }

    /// Every node's exit probability, indexed by id.
    pub fn exit_probabilities(&self) -> Result<Vec<f64>> {
        self.ensure_fresh(Metric::ExitProbability)?;
        Ok(self.nodes.iter().map(|n| n.exit_probability).collect())
    }

    /// Store one cumulative weight per node, indexed by id.
    pub fn store_cumulative_weights(&mut self, weights: &[u64]) -> Result<()> {
        self.ensure_covers(Metric::CumulativeWeight, weights.len())?;
        for (node, &weight) in self.nodes.iter_mut().zip(weights) {
            node.cumulative_weight = weight;
        }
        *self.fresh.slot(Metric::CumulativeWeight) = Some(self.revision);
        Ok(())
    }

    /// Store one exit probability per node, indexed by id.
    pub fn store_exit_probabilities(&mut self, probabilities: &[f64]) -> Result<()> {
        self.ensure_covers(Metric::ExitProbability, probabilities.len())?;
        for (node, &p) in self.nodes.iter_mut().zip(probabilities) {
            node.exit_probability = p;
        }
        *self.fresh.slot(Metric::ExitProbability) = Some(self.revision);
        Ok(())
    }

    /// Store one confidence value per node, indexed by id.
    ///
    /// Confidence is built from exit probabilities, so those must be fresh.
    pub fn store_confidence(&mut self, confidence: &[f64]) -> Result<()> {
        self.ensure_fresh(Metric::ExitProbability)?;
        self.ensure_covers(Metric::Confidence, confidence.len())?;
        for (node, &c) in self.nodes.iter_mut().zip(confidence) {
            node.confidence = c;
        }
        *self.fresh.slot(Metric::Confidence) = Some(self.revision);
        Ok(())
    }
}
