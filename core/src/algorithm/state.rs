//! Shared algorithm state snapshots
//!
//! One concrete, serializable state type per visualization family. Cores own
//! their working state exclusively while generating steps; once a snapshot
//! is handed to a [`Step`](crate::step::Step) it is immutable. Every type
//! here derives `Serialize` so traces can be compared byte-for-byte in
//! golden tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::step::ElementId;

/// Linear array snapshot (sorting, searching, shuffle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayState {
    /// Current element values in array order.
    pub values: Vec<i64>,
}

impl ArrayState {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element id addressing slot `index`.
    pub fn slot(index: usize) -> ElementId {
        ElementId::Index(index)
    }
}

/// Rectangular table snapshot (DP tables, distance matrices).
///
/// Cells hold `None` before they are filled, which lets projectors render
/// the fill order of a dynamic-programming table faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixState {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major cell contents.
    pub cells: Vec<Option<i64>>,
    /// Optional per-row header labels.
    pub row_labels: Vec<String>,
    /// Optional per-column header labels.
    pub col_labels: Vec<String>,
}

impl MatrixState {
    /// Create an all-empty table.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            row_labels: Vec::new(),
            col_labels: Vec::new(),
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.cells.get(row * self.cols + col).copied().flatten()
    }

    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        let cols = self.cols;
        if let Some(cell) = self.cells.get_mut(row * cols + col) {
            *cell = Some(value);
        }
    }

    /// Element id addressing the cell at (`row`, `col`).
    pub fn cell(row: usize, col: usize) -> ElementId {
        ElementId::Cell { row, col }
    }
}

/// N-Queens board snapshot. `queens[row]` is the column of the queen placed
/// on that row, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Board side length.
    pub n: usize,
    /// Placed queen column per row.
    pub queens: Vec<Option<usize>>,
}

impl BoardState {
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            queens: vec![None; n],
        }
    }

    /// Element id addressing the board square at (`row`, `col`).
    pub fn square(&self, row: usize, col: usize) -> ElementId {
        ElementId::Cell { row, col }
    }
}

/// One frame of a visualized call stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrame {
    /// Displayed call expression, e.g. `factorial(4)`.
    pub label: String,
    /// Return value once the call has completed.
    pub result: Option<String>,
}

/// Call-stack snapshot (recursive procedures, memoized Fibonacci).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStackState {
    /// Frames from outermost (index 0) to innermost.
    pub frames: Vec<CallFrame>,
    /// Memo table contents, for cores that maintain one.
    pub memo: BTreeMap<u64, u64>,
}

impl CallStackState {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            memo: BTreeMap::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Element id addressing the frame at `depth`.
    pub fn frame(depth: usize) -> ElementId {
        ElementId::Frame(depth)
    }
}

impl Default for CallStackState {
    fn default() -> Self {
        Self::new()
    }
}

/// Dimensionality of a geometric transform demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    Three,
}

/// Point-set snapshot for coordinate-frame transform demos.
///
/// Points are stored homogeneously as `[x, y, z]`; 2D demos keep `z = 0`.
/// The accumulated transform matrix is kept alongside the already-applied
/// point positions so projectors can display both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSetState {
    /// 2D or 3D interpretation of the points.
    pub dim: Dimension,
    /// Current point positions.
    pub points: Vec<[f64; 3]>,
    /// Accumulated 4x4 transform (row-major) applied so far.
    pub transform: [[f64; 4]; 4],
}

impl PointSetState {
    /// Identity 4x4 matrix.
    pub fn identity() -> [[f64; 4]; 4] {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        m
    }

    pub fn new(dim: Dimension, points: Vec<[f64; 3]>) -> Self {
        Self {
            dim,
            points,
            transform: Self::identity(),
        }
    }

    /// Element id addressing the point at `index`.
    pub fn point(index: usize) -> ElementId {
        ElementId::Node(index)
    }
}
