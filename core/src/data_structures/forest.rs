//! Forest snapshots for heap visualization
//!
//! The four heap cores (binomial, Fibonacci, leftist, skew) each keep their
//! own owned node representation; what they share is the snapshot shape
//! recorded into steps. Node ids are assigned once at insertion time and
//! stay stable for the life of the node, so highlights correlate across
//! steps while the structure is relinked.

use serde::{Deserialize, Serialize};

use crate::step::ElementId;

/// One node of a snapshotted heap forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestNodeState {
    /// Stable node identifier.
    pub id: usize,
    /// Heap key.
    pub key: i64,
    /// Parent node id, `None` for roots.
    pub parent: Option<usize>,
    /// Child node ids in left-to-right order.
    pub children: Vec<usize>,
    /// Null path length, tracked only by the leftist heap.
    pub npl: Option<usize>,
    /// Fibonacci-heap mark flag.
    pub marked: bool,
}

/// Snapshot of an entire heap forest at one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestState {
    /// All live nodes, sorted by id for deterministic serialization.
    pub nodes: Vec<ForestNodeState>,
    /// Root node ids in forest order.
    pub roots: Vec<usize>,
}

impl ForestState {
    /// Empty forest.
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Build a snapshot from an unsorted node list and root ids.
    pub fn from_parts(mut nodes: Vec<ForestNodeState>, roots: Vec<usize>) -> Self {
        nodes.sort_by_key(|node| node.id);
        Self { nodes, roots }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node with the given id, if live.
    pub fn node(&self, id: usize) -> Option<&ForestNodeState> {
        self.nodes
            .binary_search_by_key(&id, |node| node.id)
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    /// Element id addressing the node with heap-node id `id`.
    pub fn element(id: usize) -> ElementId {
        ElementId::Node(id)
    }
}

impl Default for ForestState {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_sorts_by_id() {
        let nodes = vec![
            ForestNodeState {
                id: 2,
                key: 30,
                parent: Some(0),
                children: vec![],
                npl: None,
                marked: false,
            },
            ForestNodeState {
                id: 0,
                key: 10,
                parent: None,
                children: vec![2],
                npl: None,
                marked: false,
            },
        ];
        let forest = ForestState::from_parts(nodes, vec![0]);
        assert_eq!(forest.nodes[0].id, 0);
        assert_eq!(forest.node(2).unwrap().key, 30);
        assert!(forest.node(5).is_none());
    }
}
