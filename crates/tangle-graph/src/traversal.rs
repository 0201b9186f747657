//! Iterative reachability over approval edges.

use std::collections::BTreeSet;

use crate::node::{EdgeId, NodeId};
use crate::view::TangleView;

/// Nodes and edges visited by a traversal. The root itself is not included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reach {
    pub nodes: BTreeSet<NodeId>,
    pub edges: BTreeSet<EdgeId>,
}

impl Reach {
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    /// Follow `source == current`
    Approves,
    /// Follow `target == current`
    ApprovedBy,
}

impl<'a> TangleView<'a> {
    /// Everything `root` transitively approves.
    pub fn descendants(&self, root: NodeId) -> Reach {
        self.reach(root, Direction::Approves)
    }

    /// Everything that transitively approves `root`.
    pub fn ancestors(&self, root: NodeId) -> Reach {
        self.reach(root, Direction::ApprovedBy)
    }

    fn reach(&self, root: NodeId, direction: Direction) -> Reach {
        let mut reach = Reach::default();
        if !self.contains(root) {
            return reach;
        }

        let edges = self.graph().edges();
        let mut pending = vec![root];

        while let Some(current) = pending.pop() {
            let step: Vec<(EdgeId, NodeId)> = match direction {
                Direction::Approves => self
                    .child_edges(current)
                    .map(|e| (e, edges[e.index()].target))
                    .collect(),
                Direction::ApprovedBy => self
                    .approver_edges(current)
                    .map(|e| (e, edges[e.index()].source))
                    .collect(),
            };

            for (edge, next) in step {
                reach.edges.insert(edge);
                if reach.nodes.insert(next) {
                    pending.push(next);
                }
            }
        }

        reach
    }
}
