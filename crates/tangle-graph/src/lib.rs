//! Tangle Approval Graph
//!
//! The append-only directed acyclic graph grown by a stream of arriving
//! transactions. Every transaction approves (references) up to two older
//! transactions.
//!
//! # Storage
//!
//! Nodes and edges live in two arenas indexed by [`NodeId`] and [`EdgeId`].
//! The node arena is in arrival order and only the newest node may add
//! approvals, so the edge arena is sorted by source. Any prefix of the node
//! arena together with the matching prefix of the edge arena is therefore a
//! well-formed sub-tangle: that is what a [`TangleView`] is.
//!
//! # Direction
//!
//! - **descendants** of a node: everything it transitively approves (its past)
//! - **ancestors** of a node: everything that transitively approves it (its future)
//! - **tip**: a node nothing has approved yet
//!
//! # Derived metrics
//!
//! Cumulative weight, exit probability and confidence are stored on the graph
//! but stamped with the revision they were computed at. Reading them after a
//! mutation fails with [`Error::PreconditionViolated`].

mod error;
mod graph;
mod node;
mod traversal;
mod view;

pub use error::{Error, Result};
pub use graph::{Graph, Metric};
pub use node::{ApprovalEdge, EdgeId, Node, NodeId};
pub use traversal::Reach;
pub use view::TangleView;

/// Maximum number of approvals a single transaction may issue.
pub const MAX_APPROVALS: usize = 2;
