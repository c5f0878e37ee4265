//! Algorithm cores
//!
//! Pure, synchronous step-trace generators grouped by visualization family.
//! Each core implements [`Algorithm`]; none of them touches a timer, a
//! channel, or anything else owned by the playback layer.

pub mod backtracking;
pub mod dp;
pub mod geometry;
pub mod graph_traversal;
pub mod heaps;
pub mod recursion;
pub mod searching;
pub mod sorting;
pub mod state;
pub mod traits;

pub use state::{
    ArrayState, BoardState, CallFrame, CallStackState, Dimension, MatrixState, PointSetState,
};
pub use traits::{
    Algorithm, AlgorithmError, AlgorithmId, Category, MAX_ARRAY_LEN, MAX_BAR_VALUE,
    MAX_FACTORIAL, QUEENS_MAX_N, QUEENS_MIN_N,
};
