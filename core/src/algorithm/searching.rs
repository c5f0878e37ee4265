//! Searching algorithm cores
//!
//! Linear scan, binary search, and jump (clustered block) search over a
//! bounded array. Binary and jump search require the input to be sorted and
//! reject unsorted arrays at the input boundary. An absent target is not an
//! error: the trace ends with a terminal "not found" step.

use serde::{Deserialize, Serialize};

use crate::algorithm::state::ArrayState;
use crate::algorithm::traits::{
    validate_array, Algorithm, AlgorithmError, AlgorithmId, Category,
};
use crate::step::{ElementId, HighlightRole, StepRecorder, StepTrace};

/// Input for all search cores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    /// Haystack values.
    pub values: Vec<i64>,
    /// Needle.
    pub target: i64,
}

fn require_sorted(values: &[i64]) -> Result<(), AlgorithmError> {
    if values.windows(2).any(|w| w[0] > w[1]) {
        return Err(AlgorithmError::invalid_input(
            "search input must be sorted in non-decreasing order",
        ));
    }
    Ok(())
}

fn eliminated(range: impl Iterator<Item = usize>) -> Vec<(ElementId, HighlightRole)> {
    range
        .map(|i| (ElementId::Index(i), HighlightRole::Eliminated))
        .collect()
}

/// Left-to-right linear search.
#[derive(Debug, Default)]
pub struct LinearSearch;

impl Algorithm for LinearSearch {
    type Input = SearchInput;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("linear-search")
    }

    fn name(&self) -> &'static str {
        "Linear Search"
    }

    fn category(&self) -> Category {
        Category::Searching
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.values)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let state = ArrayState::new(input.values.clone());
        let target = input.target;
        let mut recorder = StepRecorder::new();
        recorder.record(&state, format!("Searching for {target}"));

        for (i, value) in state.values.iter().enumerate() {
            let mut highlights = eliminated(0..i);
            highlights.push((ElementId::Index(i), HighlightRole::Primary));
            recorder.record_with(&state, format!("Inspecting index {i}"), highlights);
            if *value == target {
                recorder.record_with(
                    &state,
                    format!("Found {target} at index {i}"),
                    [(ElementId::Index(i), HighlightRole::Result)],
                );
                return Ok(recorder.finish());
            }
        }

        recorder.record_with(
            &state,
            format!("Target {target} not found"),
            eliminated(0..state.len()),
        );
        Ok(recorder.finish())
    }
}

/// Binary search over a sorted array, halving the live window each step.
#[derive(Debug, Default)]
pub struct BinarySearch;

impl Algorithm for BinarySearch {
    type Input = SearchInput;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("binary-search")
    }

    fn name(&self) -> &'static str {
        "Binary Search"
    }

    fn category(&self) -> Category {
        Category::Searching
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.values)?;
        require_sorted(&input.values)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let state = ArrayState::new(input.values.clone());
        let target = input.target;
        let mut recorder = StepRecorder::new();

        let mut lo = 0usize;
        let mut hi = state.len() - 1;
        recorder.record(&state, format!("Searching for {target} in window [{lo}, {hi}]"));

        loop {
            let mid = lo + (hi - lo) / 2;
            let mut highlights = eliminated((0..lo).chain(hi + 1..state.len()));
            highlights.push((ElementId::Index(mid), HighlightRole::Primary));
            recorder.record_with(
                &state,
                format!("Probing midpoint {mid} of window [{lo}, {hi}]"),
                highlights,
            );

            let probe = state.values[mid];
            if probe == target {
                recorder.record_with(
                    &state,
                    format!("Found {target} at index {mid}"),
                    [(ElementId::Index(mid), HighlightRole::Result)],
                );
                return Ok(recorder.finish());
            }
            if probe < target {
                if mid == state.len() - 1 {
                    break;
                }
                lo = mid + 1;
            } else {
                if mid == 0 {
                    break;
                }
                hi = mid - 1;
            }
            if lo > hi {
                break;
            }
            recorder.record_with(
                &state,
                format!("Narrowed window to [{lo}, {hi}]"),
                eliminated((0..lo).chain(hi + 1..state.len())),
            );
        }

        recorder.record_with(
            &state,
            format!("Target {target} not found"),
            eliminated(0..state.len()),
        );
        Ok(recorder.finish())
    }
}

/// Jump search: probe block heads `sqrt(n)` apart, then scan the block.
#[derive(Debug, Default)]
pub struct JumpSearch;

impl Algorithm for JumpSearch {
    type Input = SearchInput;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("jump-search")
    }

    fn name(&self) -> &'static str {
        "Jump Search"
    }

    fn category(&self) -> Category {
        Category::Searching
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.values)?;
        require_sorted(&input.values)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let state = ArrayState::new(input.values.clone());
        let target = input.target;
        let len = state.len();
        let block = (len as f64).sqrt().ceil() as usize;
        let mut recorder = StepRecorder::new();
        recorder.record(
            &state,
            format!("Searching for {target} with block size {block}"),
        );

        // Jump phase: find the block whose head exceeds the target.
        let mut prev = 0usize;
        let mut probe = 0usize;
        while probe < len && state.values[probe.min(len - 1)] < target {
            recorder.record_with(
                &state,
                format!("Block head {probe} below target, jumping"),
                [(ElementId::Index(probe), HighlightRole::Primary)],
            );
            prev = probe;
            probe += block;
        }
        let end = probe.min(len - 1);

        // Scan phase inside [prev, end].
        for i in prev..=end {
            let mut highlights = eliminated(0..prev);
            highlights.push((ElementId::Index(i), HighlightRole::Primary));
            recorder.record_with(&state, format!("Scanning index {i} within block"), highlights);
            if state.values[i] == target {
                recorder.record_with(
                    &state,
                    format!("Found {target} at index {i}"),
                    [(ElementId::Index(i), HighlightRole::Result)],
                );
                return Ok(recorder.finish());
            }
            if state.values[i] > target {
                break;
            }
        }

        recorder.record_with(
            &state,
            format!("Target {target} not found"),
            eliminated(0..len),
        );
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<i64> {
        (1..=16).map(|i| i * 5).collect()
    }

    #[test]
    fn binary_search_scenario_finds_45_at_index_8() {
        let input = SearchInput {
            values: ladder(),
            target: 45,
        };
        let trace = BinarySearch.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.annotation, "Found 45 at index 8");
        assert_eq!(
            last.role_of(&ElementId::Index(8)),
            Some(HighlightRole::Result)
        );

        // The first probe covers the full window [0, 15].
        assert!(trace
            .first()
            .unwrap()
            .annotation
            .contains("window [0, 15]"));
    }

    #[test]
    fn binary_search_absent_target_is_terminal_step() {
        let input = SearchInput {
            values: ladder(),
            target: 42,
        };
        let trace = BinarySearch.run(&input).unwrap();
        assert_eq!(trace.last().unwrap().annotation, "Target 42 not found");
    }

    #[test]
    fn binary_search_rejects_unsorted() {
        let input = SearchInput {
            values: vec![3, 1, 2],
            target: 2,
        };
        assert!(BinarySearch.run(&input).is_err());
    }

    #[test]
    fn linear_search_finds_first_occurrence() {
        let input = SearchInput {
            values: vec![7, 3, 9, 3],
            target: 3,
        };
        let trace = LinearSearch.run(&input).unwrap();
        assert_eq!(trace.last().unwrap().annotation, "Found 3 at index 1");
    }

    #[test]
    fn jump_search_agrees_with_binary() {
        let values = ladder();
        for target in [5, 40, 45, 80, 12] {
            let input = SearchInput {
                values: values.clone(),
                target,
            };
            let jump = JumpSearch.run(&input).unwrap();
            let binary = BinarySearch.run(&input).unwrap();
            let jump_found = jump.last().unwrap().annotation.starts_with("Found");
            let binary_found = binary.last().unwrap().annotation.starts_with("Found");
            assert_eq!(jump_found, binary_found, "target {target}");
        }
    }

    #[test]
    fn first_element_target() {
        let input = SearchInput {
            values: ladder(),
            target: 5,
        };
        let trace = BinarySearch.run(&input).unwrap();
        assert_eq!(trace.last().unwrap().annotation, "Found 5 at index 0");
    }
}
