//! Data structures manipulated by the algorithm cores.

pub mod forest;
pub mod graph;

pub use self::forest::{ForestNodeState, ForestState};
pub use self::graph::{Edge, Graph, GraphSnapshot, NodePhase};
