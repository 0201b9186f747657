//! Read-only restricted views of the tangle.

use crate::graph::Graph;
use crate::node::{ApprovalEdge, EdgeId, Node, NodeId};

/// The first `len` nodes of a graph and every edge whose source is among them.
///
/// Because approvals always point to older nodes, the edges of a prefix only
/// ever touch nodes of that prefix. Tip selection runs on the view of
/// everything older than `t - h`; presentation code reads the full view.
#[derive(Debug, Clone, Copy)]
pub struct TangleView<'a> {
    graph: &'a Graph,
    len: usize,
    edge_len: usize,
}

impl<'a> TangleView<'a> {
    pub(crate) fn new(graph: &'a Graph, len: usize, edge_len: usize) -> Self {
        Self {
            graph,
            len,
            edge_len,
        }
    }

    /// The graph this view restricts.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// Number of nodes in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.len
    }

    pub fn nodes(&self) -> &'a [Node] {
        &self.graph.nodes()[..self.len]
    }

    pub fn edges(&self) -> &'a [ApprovalEdge] {
        &self.graph.edges()[..self.edge_len]
    }

    pub fn node(&self, id: NodeId) -> Option<&'a Node> {
        self.nodes().get(id.index())
    }

    fn edge(&self, id: EdgeId) -> &'a ApprovalEdge {
        &self.graph.edges()[id.index()]
    }

    /// Genesis, when the view is not empty.
    pub fn genesis(&self) -> Option<NodeId> {
        (self.len > 0).then_some(NodeId::GENESIS)
    }

    /// Edges pointing at `id` from inside the view.
    pub fn approver_edges(&self, id: NodeId) -> impl Iterator<Item = EdgeId> + 'a {
        let edge_len = if self.contains(id) { self.edge_len } else { 0 };
        self.graph
            .approver_edges(id)
            .iter()
            .copied()
            .take_while(move |e| e.index() < edge_len)
    }

    /// Edges leaving `id`.
    pub fn child_edges(&self, id: NodeId) -> impl Iterator<Item = EdgeId> + 'a {
        let edges = if self.contains(id) {
            self.graph.child_edges(id)
        } else {
            &[]
        };
        edges.iter().copied()
    }

    /// Nodes with an edge pointing at `id`.
    pub fn direct_approvers(&self, id: NodeId) -> Vec<NodeId> {
        self.approver_edges(id)
            .map(|e| self.edge(e).source)
            .collect()
    }

    /// Nodes `id` points at.
    pub fn direct_children(&self, id: NodeId) -> Vec<NodeId> {
        self.child_edges(id).map(|e| self.edge(e).target).collect()
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.approver_edges(id).count()
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.child_edges(id).count()
    }

    /// Whether `id` is in the view and nothing in the view approves it.
    pub fn is_tip(&self, id: NodeId) -> bool {
        self.contains(id) && self.approver_edges(id).next().is_none()
    }

    /// Nodes with no incoming edge, in arrival order.
    pub fn tips(&self) -> Vec<NodeId> {
        self.nodes()
            .iter()
            .map(Node::id)
            .filter(|&id| self.is_tip(id))
            .collect()
    }

    /// Milestone nodes, in arrival order.
    pub fn milestones(&self) -> Vec<NodeId> {
        self.nodes()
            .iter()
            .filter(|n| n.is_milestone())
            .map(Node::id)
            .collect()
    }

    /// The most recent milestone in the view.
    pub fn latest_milestone(&self) -> Option<NodeId> {
        self.nodes()
            .iter()
            .rev()
            .find(|n| n.is_milestone())
            .map(Node::id)
    }
}
