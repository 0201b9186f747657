//! Error types for tangle-graph.

use thiserror::Error;

use crate::{Metric, NodeId};

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graph mutation and metric access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The node does not exist in this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Only the most recently created node may add approvals.
    #[error("node {node} cannot add approvals: newest node is {newest}")]
    NotNewest { node: NodeId, newest: NodeId },

    /// Approvals must point to strictly older transactions.
    #[error("node {approver} cannot approve {approved}: target is not older")]
    NotOlder { approver: NodeId, approved: NodeId },

    /// The node already issued the maximum number of approvals.
    #[error("node {node} already approves {max} transactions")]
    TooManyApprovals { node: NodeId, max: usize },

    /// A derived metric was read (or relied on) before it was computed for
    /// the current edge set.
    #[error("{0} has not been computed for the current graph")]
    PreconditionViolated(Metric),

    /// A metric vector did not cover every node.
    #[error("{metric} vector has {actual} entries, graph has {expected} nodes")]
    LengthMismatch {
        metric: Metric,
        expected: usize,
        actual: usize,
    },
}
