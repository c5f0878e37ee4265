//! Core algorithm trait definitions
//!
//! Establishes the shared interface for algorithm cores: a core is a pure,
//! synchronous function from a validated input to a deterministic, ordered
//! step trace. No timers and no rendering concerns live here; where a source
//! algorithm has free choices (pivot selection, neighbor order, tie-breaks)
//! the core fixes a documented policy so that identical inputs always yield
//! identical traces.

use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

use crate::step::StepTrace;

/// Maximum supported array length for array-shaped inputs.
///
/// Bounded so bar charts stay animatable; longer inputs are rejected as
/// invalid rather than animated off-screen.
pub const MAX_ARRAY_LEN: usize = 64;

/// Maximum supported array element value (bar heights stay on-screen).
pub const MAX_BAR_VALUE: i64 = 999;

/// Inclusive lower N-Queens board size bound that keeps the search animatable.
pub const QUEENS_MIN_N: usize = 4;
/// Inclusive upper N-Queens board size bound.
pub const QUEENS_MAX_N: usize = 8;

/// Largest factorial argument whose result fits the visualized integer type.
pub const MAX_FACTORIAL: u64 = 20;

/// Universal algorithm identifier for registry and logging purposes.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Algorithm family, matching the visualization families of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sorting,
    Searching,
    Graph,
    Heap,
    DynamicProgramming,
    Backtracking,
    Recursion,
    Geometry,
}

/// Errors reportable by algorithm cores.
///
/// Only malformed input is an error. Unreachable outcomes (absent search
/// target, unmakeable coin amount, cyclic graph handed to a topological
/// sort) are part of normal execution and surface as a terminal annotated
/// step in the trace instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AlgorithmError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl AlgorithmError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// A textbook algorithm expressed as a pure step-trace generator.
///
/// # Contract
/// - `run` executes fully synchronously to completion; playback pacing is
///   the sequencer's concern, never the core's.
/// - For a given input the produced trace is deterministic and reproducible.
/// - The final step's state equals the independently correct result of the
///   algorithm on that input.
/// - Invalid input is rejected before any step is produced.
pub trait Algorithm {
    /// Validated input consumed by one run.
    type Input;

    /// Snapshot type recorded in each step.
    type State: Clone + Debug + Serialize;

    /// Unique identifier of this core.
    fn id(&self) -> AlgorithmId;

    /// Descriptive name.
    fn name(&self) -> &'static str;

    /// Visualization family.
    fn category(&self) -> Category;

    /// Check input against the core's documented bounds.
    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError>;

    /// Produce the complete ordered step trace for `input`.
    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError>;
}

/// Shared validation for array-shaped inputs (sorting, searching, shuffle).
pub(crate) fn validate_array(values: &[i64]) -> Result<(), AlgorithmError> {
    if values.is_empty() {
        return Err(AlgorithmError::invalid_input("array must not be empty"));
    }
    if values.len() > MAX_ARRAY_LEN {
        return Err(AlgorithmError::invalid_input(format!(
            "array length {} exceeds maximum {}",
            values.len(),
            MAX_ARRAY_LEN
        )));
    }
    if let Some(value) = values
        .iter()
        .find(|value| **value < 1 || **value > MAX_BAR_VALUE)
    {
        return Err(AlgorithmError::invalid_input(format!(
            "value {value} outside supported range 1..={MAX_BAR_VALUE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_id_equality() {
        assert_eq!(AlgorithmId::new("quick-sort"), AlgorithmId::new("quick-sort"));
        assert_ne!(AlgorithmId::new("quick-sort"), AlgorithmId::new("merge-sort"));
        assert_eq!(AlgorithmId::new("bfs").to_string(), "bfs");
    }

    #[test]
    fn array_validation_bounds() {
        assert!(validate_array(&[1, 2, 3]).is_ok());
        assert!(validate_array(&[]).is_err());
        assert!(validate_array(&[0]).is_err());
        assert!(validate_array(&[MAX_BAR_VALUE + 1]).is_err());
        let too_long = vec![1; MAX_ARRAY_LEN + 1];
        assert!(validate_array(&too_long).is_err());
    }
}
