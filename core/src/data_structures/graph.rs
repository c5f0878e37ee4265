//! Adjacency-list graph for traversal visualization
//!
//! A small, validated graph sized for teaching animations. Neighbor lists
//! are kept sorted ascending: traversal order is a documented policy of the
//! engine (see [`NEIGHBOR_ORDER`]), not an accident of insertion order, so
//! every traversal core produces a reproducible step trace.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::AlgorithmError;

/// Maximum node count for an animatable graph.
pub const MAX_GRAPH_NODES: usize = 32;

/// Documented traversal policy: neighbors are always visited in ascending
/// node-id order.
pub const NEIGHBOR_ORDER: &str = "ascending node id";

/// Weighted edge record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
}

/// Directed or undirected adjacency-list graph over nodes `0..node_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    directed: bool,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create a graph with `node_count` isolated nodes.
    pub fn new(node_count: usize, directed: bool) -> Result<Self, AlgorithmError> {
        if node_count == 0 {
            return Err(AlgorithmError::invalid_input("graph must have at least one node"));
        }
        if node_count > MAX_GRAPH_NODES {
            return Err(AlgorithmError::invalid_input(format!(
                "graph size {node_count} exceeds maximum {MAX_GRAPH_NODES}"
            )));
        }
        Ok(Self {
            directed,
            adjacency: vec![Vec::new(); node_count],
            edges: Vec::new(),
        })
    }

    /// Add an edge with weight 1.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), AlgorithmError> {
        self.add_weighted_edge(from, to, 1)
    }

    /// Add a weighted edge. For undirected graphs the reverse adjacency is
    /// maintained automatically.
    pub fn add_weighted_edge(
        &mut self,
        from: usize,
        to: usize,
        weight: i64,
    ) -> Result<(), AlgorithmError> {
        let n = self.node_count();
        if from >= n || to >= n {
            return Err(AlgorithmError::invalid_input(format!(
                "edge ({from}, {to}) references a node outside 0..{n}"
            )));
        }
        self.edges.push(Edge { from, to, weight });
        Self::insert_sorted(&mut self.adjacency[from], to);
        if !self.directed && from != to {
            Self::insert_sorted(&mut self.adjacency[to], from);
        }
        Ok(())
    }

    fn insert_sorted(list: &mut Vec<usize>, node: usize) {
        if let Err(pos) = list.binary_search(&node) {
            list.insert(pos, node);
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Neighbors of `node` in ascending id order.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// In-degree of `node` (directed graphs).
    pub fn in_degree(&self, node: usize) -> usize {
        self.edges.iter().filter(|edge| edge.to == node).count()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adjacency lists, for snapshotting.
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }
}

/// Per-node traversal phase, recorded per node rather than globally.
///
/// Backtracking cores cycle a node through `Visiting -> Backtracking` before
/// it settles in `Done`; plain traversals skip `Backtracking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodePhase {
    Unvisited,
    Visiting,
    Backtracking,
    Done,
}

/// Graph snapshot recorded into traversal steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Whether edges are directed.
    pub directed: bool,
    /// Neighbor lists (ascending order) of the underlying graph.
    pub adjacency: Vec<Vec<usize>>,
    /// Current phase of every node.
    pub phases: Vec<NodePhase>,
    /// Optional per-node annotation (component id, topological position).
    pub labels: Vec<Option<String>>,
}

impl GraphSnapshot {
    /// Snapshot of `graph` with all nodes unvisited and unlabeled.
    pub fn of(graph: &Graph) -> Self {
        Self {
            directed: graph.is_directed(),
            adjacency: graph.adjacency().to_vec(),
            phases: vec![NodePhase::Unvisited; graph.node_count()],
            labels: vec![None; graph.node_count()],
        }
    }

    pub fn node_count(&self) -> usize {
        self.phases.len()
    }
}
