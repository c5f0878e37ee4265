//! Sorting algorithm cores
//!
//! Comparison sorts (bubble, insertion, selection, quick, merge), the
//! distribution sorts (counting, bucket), and the Fisher-Yates shuffle. Each
//! core records a step per observable mutation or comparison of interest and
//! finishes with a step highlighting the whole array as the result.
//!
//! Free choices are fixed policy: quicksort pivots on the last element of
//! the active partition ([`PIVOT_POLICY`]) using Lomuto partitioning, and
//! the shuffle derives all randomness from a caller-supplied seed so traces
//! reproduce exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algorithm::state::ArrayState;
use crate::algorithm::traits::{
    validate_array, Algorithm, AlgorithmError, AlgorithmId, Category,
};
use crate::step::{ElementId, HighlightRole, StepRecorder, StepTrace};

/// Documented quicksort pivot policy.
pub const PIVOT_POLICY: &str = "last element of the active partition";

fn result_highlights(len: usize) -> impl Iterator<Item = (ElementId, HighlightRole)> {
    (0..len).map(|i| (ElementId::Index(i), HighlightRole::Result))
}

fn record_initial(recorder: &mut StepRecorder<ArrayState>, state: &ArrayState) {
    recorder.record(state, format!("Initial array of {} elements", state.len()));
}

fn record_sorted(recorder: &mut StepRecorder<ArrayState>, state: &ArrayState) {
    recorder.record_with(state, "Array sorted", result_highlights(state.len()));
}

/// Bubble sort with early exit on a pass without swaps.
#[derive(Debug, Default)]
pub struct BubbleSort;

impl Algorithm for BubbleSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("bubble-sort")
    }

    fn name(&self) -> &'static str {
        "Bubble Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let len = state.len();
        for pass in 0..len {
            let mut swapped = false;
            for j in 0..len - pass - 1 {
                recorder.record_with(
                    &state,
                    format!("Comparing indices {j} and {}", j + 1),
                    [
                        (ElementId::Index(j), HighlightRole::Primary),
                        (ElementId::Index(j + 1), HighlightRole::Primary),
                    ],
                );
                if state.values[j] > state.values[j + 1] {
                    state.values.swap(j, j + 1);
                    swapped = true;
                    recorder.record_with(
                        &state,
                        format!("Swapped indices {j} and {}", j + 1),
                        [
                            (ElementId::Index(j), HighlightRole::Secondary),
                            (ElementId::Index(j + 1), HighlightRole::Secondary),
                        ],
                    );
                }
            }
            if !swapped {
                break;
            }
        }

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Insertion sort, shifting elements right to open the insertion slot.
#[derive(Debug, Default)]
pub struct InsertionSort;

impl Algorithm for InsertionSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("insertion-sort")
    }

    fn name(&self) -> &'static str {
        "Insertion Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        for i in 1..state.len() {
            let key = state.values[i];
            recorder.record_with(
                &state,
                format!("Inserting value {key} from index {i}"),
                [(ElementId::Index(i), HighlightRole::Primary)],
            );
            let mut j = i;
            while j > 0 && state.values[j - 1] > key {
                state.values[j] = state.values[j - 1];
                j -= 1;
            }
            state.values[j] = key;
            if j != i {
                recorder.record_with(
                    &state,
                    format!("Placed {key} at index {j}"),
                    [(ElementId::Index(j), HighlightRole::Secondary)],
                );
            }
        }

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Selection sort, scanning for the minimum of the unsorted suffix.
#[derive(Debug, Default)]
pub struct SelectionSort;

impl Algorithm for SelectionSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("selection-sort")
    }

    fn name(&self) -> &'static str {
        "Selection Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let len = state.len();
        for i in 0..len {
            let mut min_idx = i;
            for j in i + 1..len {
                recorder.record_with(
                    &state,
                    format!("Comparing index {j} against current minimum at {min_idx}"),
                    [
                        (ElementId::Index(j), HighlightRole::Primary),
                        (ElementId::Index(min_idx), HighlightRole::Secondary),
                    ],
                );
                if state.values[j] < state.values[min_idx] {
                    min_idx = j;
                }
            }
            if min_idx != i {
                state.values.swap(i, min_idx);
                recorder.record_with(
                    &state,
                    format!("Moved minimum into index {i}"),
                    [
                        (ElementId::Index(i), HighlightRole::Secondary),
                        (ElementId::Index(min_idx), HighlightRole::Secondary),
                    ],
                );
            }
        }

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Quicksort with Lomuto partitioning and the last element as pivot.
#[derive(Debug, Default)]
pub struct QuickSort;

impl QuickSort {
    fn sort_range(
        recorder: &mut StepRecorder<ArrayState>,
        state: &mut ArrayState,
        lo: usize,
        hi: usize,
    ) {
        if lo >= hi {
            return;
        }
        let pivot = state.values[hi];
        recorder.record_with(
            state,
            format!("Partitioning [{lo}..{hi}] around pivot {pivot}"),
            [(ElementId::Index(hi), HighlightRole::Secondary)],
        );

        let mut i = lo;
        for j in lo..hi {
            recorder.record_with(
                state,
                format!("Comparing index {j} with pivot {pivot}"),
                [
                    (ElementId::Index(j), HighlightRole::Primary),
                    (ElementId::Index(hi), HighlightRole::Secondary),
                ],
            );
            if state.values[j] <= pivot {
                if i != j {
                    state.values.swap(i, j);
                    recorder.record_with(
                        state,
                        format!("Swapped indices {i} and {j}"),
                        [
                            (ElementId::Index(i), HighlightRole::Secondary),
                            (ElementId::Index(j), HighlightRole::Secondary),
                        ],
                    );
                }
                i += 1;
            }
        }
        state.values.swap(i, hi);
        recorder.record_with(
            state,
            format!("Pivot {pivot} placed at index {i}"),
            [(ElementId::Index(i), HighlightRole::Result)],
        );

        if i > lo {
            Self::sort_range(recorder, state, lo, i - 1);
        }
        if i + 1 <= hi {
            Self::sort_range(recorder, state, i + 1, hi);
        }
    }
}

impl Algorithm for QuickSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("quick-sort")
    }

    fn name(&self) -> &'static str {
        "Quick Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let hi = state.len() - 1;
        Self::sort_range(&mut recorder, &mut state, 0, hi);

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Top-down merge sort, recording each merged write-back.
#[derive(Debug, Default)]
pub struct MergeSort;

impl MergeSort {
    fn sort_range(
        recorder: &mut StepRecorder<ArrayState>,
        state: &mut ArrayState,
        lo: usize,
        hi: usize,
    ) {
        if hi - lo < 2 {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        Self::sort_range(recorder, state, lo, mid);
        Self::sort_range(recorder, state, mid, hi);

        let left = state.values[lo..mid].to_vec();
        let right = state.values[mid..hi].to_vec();
        recorder.record_with(
            state,
            format!("Merging [{lo}..{mid}) and [{mid}..{hi})"),
            (lo..hi).map(|i| (ElementId::Index(i), HighlightRole::Primary)),
        );

        let (mut i, mut j) = (0, 0);
        for k in lo..hi {
            let take_left = j >= right.len() || (i < left.len() && left[i] <= right[j]);
            if take_left {
                state.values[k] = left[i];
                i += 1;
            } else {
                state.values[k] = right[j];
                j += 1;
            }
            recorder.record_with(
                state,
                format!("Wrote {} into index {k}", state.values[k]),
                [(ElementId::Index(k), HighlightRole::Secondary)],
            );
        }
    }
}

impl Algorithm for MergeSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("merge-sort")
    }

    fn name(&self) -> &'static str {
        "Merge Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let len = state.len();
        Self::sort_range(&mut recorder, &mut state, 0, len);

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Counting sort over the bounded value domain.
#[derive(Debug, Default)]
pub struct CountingSort;

impl Algorithm for CountingSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("counting-sort")
    }

    fn name(&self) -> &'static str {
        "Counting Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let max = *state.values.iter().max().unwrap_or(&0) as usize;
        let mut counts = vec![0usize; max + 1];
        for (i, value) in state.values.iter().enumerate() {
            counts[*value as usize] += 1;
            recorder.record_with(
                &state,
                format!("Counted value {value}"),
                [(ElementId::Index(i), HighlightRole::Primary)],
            );
        }

        let mut write = 0;
        for (value, count) in counts.iter().enumerate() {
            for _ in 0..*count {
                state.values[write] = value as i64;
                recorder.record_with(
                    &state,
                    format!("Wrote {value} into index {write}"),
                    [(ElementId::Index(write), HighlightRole::Secondary)],
                );
                write += 1;
            }
        }

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Bucket sort: uniform value buckets, insertion sort within a bucket.
#[derive(Debug, Default)]
pub struct BucketSort;

/// Fixed bucket count for the distribution pass.
pub const BUCKET_COUNT: usize = 8;

impl Algorithm for BucketSort {
    type Input = Vec<i64>;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("bucket-sort")
    }

    fn name(&self) -> &'static str {
        "Bucket Sort"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.clone());
        let mut recorder = StepRecorder::new();
        record_initial(&mut recorder, &state);

        let min = *state.values.iter().min().unwrap_or(&0);
        let max = *state.values.iter().max().unwrap_or(&0);
        let span = (max - min + 1) as usize;
        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); BUCKET_COUNT];

        for (i, value) in state.values.iter().enumerate() {
            let bucket = ((*value - min) as usize * BUCKET_COUNT / span).min(BUCKET_COUNT - 1);
            buckets[bucket].push(*value);
            recorder.record_with(
                &state,
                format!("Placed {value} into bucket {bucket}"),
                [(ElementId::Index(i), HighlightRole::Primary)],
            );
        }

        let mut write = 0;
        for (b, bucket) in buckets.iter_mut().enumerate() {
            bucket.sort_unstable();
            if bucket.is_empty() {
                continue;
            }
            for value in bucket.iter() {
                state.values[write] = *value;
                recorder.record_with(
                    &state,
                    format!("Emptied bucket {b}: wrote {value} into index {write}"),
                    [(ElementId::Index(write), HighlightRole::Secondary)],
                );
                write += 1;
            }
        }

        record_sorted(&mut recorder, &state);
        Ok(recorder.finish())
    }
}

/// Input for the deterministic Fisher-Yates shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleInput {
    /// Values to shuffle.
    pub values: Vec<i64>,
    /// RNG seed; part of the input so identical inputs reproduce the trace.
    pub seed: u64,
}

/// Fisher-Yates shuffle driven by a seeded RNG.
#[derive(Debug, Default)]
pub struct Shuffle;

impl Algorithm for Shuffle {
    type Input = ShuffleInput;
    type State = ArrayState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("fisher-yates-shuffle")
    }

    fn name(&self) -> &'static str {
        "Fisher-Yates Shuffle"
    }

    fn category(&self) -> Category {
        Category::Sorting
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.values)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut state = ArrayState::new(input.values.clone());
        let mut recorder = StepRecorder::new();
        recorder.record(&state, format!("Shuffling with seed {}", input.seed));

        let mut rng = StdRng::seed_from_u64(input.seed);
        for i in (1..state.len()).rev() {
            let j = rng.gen_range(0..=i);
            state.values.swap(i, j);
            recorder.record_with(
                &state,
                format!("Swapped indices {i} and {j}"),
                [
                    (ElementId::Index(i), HighlightRole::Primary),
                    (ElementId::Index(j), HighlightRole::Primary),
                ],
            );
        }

        recorder.record_with(&state, "Shuffle complete", result_highlights(state.len()));
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiset(values: &[i64]) -> Vec<i64> {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted
    }

    fn assert_sorts(
        algorithm: &impl Algorithm<Input = Vec<i64>, State = ArrayState>,
    ) -> StepTrace<ArrayState> {
        let input = vec![9, 4, 7, 1, 4, 12, 3];
        let trace = algorithm.run(&input).unwrap();
        assert_eq!(trace.final_state().unwrap().values, multiset(&input));
        trace
    }

    fn assert_conserves_every_step(trace: &StepTrace<ArrayState>) {
        let expected = multiset(&trace.first().unwrap().state.values);
        for step in trace {
            assert_eq!(multiset(&step.state.values), expected);
        }
    }

    #[test]
    fn all_sorts_produce_sorted_output() {
        assert_sorts(&BubbleSort);
        assert_sorts(&InsertionSort);
        assert_sorts(&SelectionSort);
        assert_sorts(&QuickSort);
        assert_sorts(&MergeSort);
        assert_sorts(&CountingSort);
        assert_sorts(&BucketSort);
    }

    #[test]
    fn in_place_sorts_conserve_values_at_every_step() {
        // Merge, counting, and bucket sorts stage values in scratch
        // buffers while writing back, so mid-write snapshots may repeat a
        // value; only the in-place sorts hold the multiset at every step.
        for trace in [
            assert_sorts(&BubbleSort),
            assert_sorts(&InsertionSort),
            assert_sorts(&SelectionSort),
            assert_sorts(&QuickSort),
        ] {
            assert_conserves_every_step(&trace);
        }
    }

    #[test]
    fn quick_sort_scenario() {
        let trace = QuickSort.run(&vec![5, 3, 8, 1]).unwrap();
        assert_eq!(trace.final_state().unwrap().values, vec![1, 3, 5, 8]);
        let expected = vec![1, 3, 5, 8];
        for step in &trace {
            assert_eq!(multiset(&step.state.values), expected);
        }
    }

    #[test]
    fn empty_input_rejected() {
        assert!(QuickSort.run(&vec![]).is_err());
        assert!(BubbleSort.validate(&vec![]).is_err());
    }

    #[test]
    fn shuffle_is_seed_deterministic() {
        let input = ShuffleInput {
            values: vec![1, 2, 3, 4, 5, 6],
            seed: 7,
        };
        let first = Shuffle.run(&input).unwrap();
        let second = Shuffle.run(&input).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(
            multiset(&first.final_state().unwrap().values),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn traces_are_deterministic() {
        let input = vec![5, 2, 9, 2, 8];
        for algorithm in [&QuickSort as &dyn Algorithm<Input = Vec<i64>, State = ArrayState>] {
            let first = algorithm.run(&input).unwrap();
            let second = algorithm.run(&input).unwrap();
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn quick_sort_output_is_sorted_permutation(
                input in proptest::collection::vec(1i64..=999, 1..32)
            ) {
                let trace = QuickSort.run(&input).unwrap();
                let result = &trace.final_state().unwrap().values;
                prop_assert!(result.windows(2).all(|w| w[0] <= w[1]));
                prop_assert_eq!(multiset(result), multiset(&input));
            }

            #[test]
            fn merge_sort_matches_std_sort(
                input in proptest::collection::vec(1i64..=999, 1..32)
            ) {
                let trace = MergeSort.run(&input).unwrap();
                prop_assert_eq!(&trace.final_state().unwrap().values, &multiset(&input));
            }
        }
    }
}
