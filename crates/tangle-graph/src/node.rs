//! Transactions and the approval edges between them.

use std::fmt;

/// A transaction identifier.
///
/// Assigned sequentially at creation, so the id order is the arrival order
/// and the id doubles as the node's index in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    /// The genesis transaction.
    pub const GENESIS: Self = Self(0);

    /// Create from a raw id.
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Position of this node in the node arena.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Whether this is the genesis transaction.
    #[inline]
    pub const fn is_genesis(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of an approval edge in the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub usize);

impl EdgeId {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// `source` approves `target`.
///
/// The source always arrived strictly later than the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApprovalEdge {
    pub source: NodeId,
    pub target: NodeId,
}

/// A transaction in the tangle.
///
/// Identity, arrival time and the milestone flag are fixed at creation. The
/// derived metrics are owned by the [`Graph`](crate::Graph), which only hands
/// them out while they match the current edge set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    arrival_time: f64,
    is_milestone: bool,
    pub(crate) cumulative_weight: u64,
    pub(crate) exit_probability: f64,
    pub(crate) confidence: f64,
}

impl Node {
    pub(crate) fn new(id: NodeId, arrival_time: f64, is_milestone: bool) -> Self {
        Self {
            id,
            arrival_time,
            is_milestone,
            cumulative_weight: 1,
            exit_probability: 0.0,
            confidence: 0.0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn is_milestone(&self) -> bool {
        self.is_milestone
    }
}
