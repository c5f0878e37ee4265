//! Step model
//!
//! A step is one indivisible unit of algorithm progress: a full snapshot of
//! the algorithm's visualizable state, a human-readable annotation, and the
//! elements to emphasize while the step is displayed. Steps are immutable
//! once recorded; playback and rendering never mutate them.
//!
//! Highlights live in a `BTreeMap` keyed by [`ElementId`] so that serialized
//! traces are byte-deterministic, which the golden-trace tests rely on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stable identity of one visual element across the steps of a trace.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ElementId {
    /// Array slot (bar charts).
    Index(usize),
    /// Graph or heap node.
    Node(usize),
    /// Matrix or board cell.
    Cell { row: usize, col: usize },
    /// Call-stack frame, outermost at depth 0.
    Frame(usize),
}

/// Semantic emphasis class attached to an element for one step.
///
/// Closed set; themes map each role to a color, so cores never name colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightRole {
    /// Element the algorithm is acting on right now.
    Primary,
    /// Supporting element (comparison partner, frontier member).
    Secondary,
    /// Element ruled out of the remaining search space.
    Eliminated,
    /// Element that is part of the final answer.
    Result,
}

/// One recorded unit of algorithm progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    /// Complete state snapshot at this point of the run.
    pub state: S,
    /// Human-readable description of what just happened.
    pub annotation: String,
    /// Elements emphasized while this step is displayed.
    ///
    /// Serialized as an ordered sequence of pairs; JSON cannot key a map by
    /// a structured id.
    #[serde(
        serialize_with = "serialize_highlights",
        deserialize_with = "deserialize_highlights"
    )]
    pub highlights: BTreeMap<ElementId, HighlightRole>,
}

fn serialize_highlights<S>(
    highlights: &BTreeMap<ElementId, HighlightRole>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(highlights.iter())
}

fn deserialize_highlights<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<ElementId, HighlightRole>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let pairs = Vec::<(ElementId, HighlightRole)>::deserialize(deserializer)?;
    Ok(pairs.into_iter().collect())
}

impl<S> Step<S> {
    /// Emphasis role of `id` in this step, if any.
    pub fn role_of(&self, id: &ElementId) -> Option<HighlightRole> {
        self.highlights.get(id).copied()
    }
}

/// Immutable ordered sequence of steps produced by one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace<S> {
    steps: Vec<Step<S>>,
}

impl<S> StepTrace<S> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&Step<S>> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    /// State of the last step, which equals the algorithm's final result.
    pub fn final_state(&self) -> Option<&S> {
        self.steps.last().map(|step| &step.state)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }
}

impl<S> IntoIterator for StepTrace<S> {
    type Item = Step<S>;
    type IntoIter = std::vec::IntoIter<Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a StepTrace<S> {
    type Item = &'a Step<S>;
    type IntoIter = std::slice::Iter<'a, Step<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while an algorithm core runs.
///
/// The recorder clones the working state on every record call, so the core
/// keeps exclusive ownership of its mutable state and earlier snapshots
/// cannot be disturbed by later mutation.
#[derive(Debug)]
pub struct StepRecorder<S> {
    steps: Vec<Step<S>>,
}

impl<S: Clone> StepRecorder<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a snapshot with no highlighted elements.
    pub fn record(&mut self, state: &S, annotation: impl Into<String>) {
        self.record_with(state, annotation, std::iter::empty());
    }

    /// Record a snapshot with highlighted elements.
    pub fn record_with(
        &mut self,
        state: &S,
        annotation: impl Into<String>,
        highlights: impl IntoIterator<Item = (ElementId, HighlightRole)>,
    ) {
        self.steps.push(Step {
            state: state.clone(),
            annotation: annotation.into(),
            highlights: highlights.into_iter().collect(),
        });
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the recording into an immutable trace.
    pub fn finish(self) -> StepTrace<S> {
        log::debug!("sealed step trace with {} steps", self.steps.len());
        StepTrace { steps: self.steps }
    }
}

impl<S: Clone> Default for StepRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_are_independent_of_later_mutation() {
        let mut working = vec![3, 1, 2];
        let mut recorder = StepRecorder::new();
        recorder.record(&working, "initial");
        working.swap(0, 1);
        recorder.record_with(
            &working,
            "swapped first pair",
            [(ElementId::Index(0), HighlightRole::Primary)],
        );
        working.sort_unstable();

        let trace = recorder.finish();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.first().unwrap().state, vec![3, 1, 2]);
        assert_eq!(trace.get(1).unwrap().state, vec![1, 3, 2]);
        assert_eq!(
            trace.get(1).unwrap().role_of(&ElementId::Index(0)),
            Some(HighlightRole::Primary)
        );
        assert_eq!(trace.get(1).unwrap().role_of(&ElementId::Index(1)), None);
    }

    #[test]
    fn highlight_serialization_is_ordered() {
        let mut recorder = StepRecorder::new();
        // Insertion order deliberately scrambled; BTreeMap must normalize it.
        recorder.record_with(
            &0u8,
            "scrambled",
            [
                (ElementId::Node(9), HighlightRole::Result),
                (ElementId::Index(2), HighlightRole::Primary),
                (ElementId::Index(0), HighlightRole::Secondary),
            ],
        );
        let a = serde_json::to_string(&recorder.finish()).unwrap();

        let mut recorder = StepRecorder::new();
        recorder.record_with(
            &0u8,
            "scrambled",
            [
                (ElementId::Index(0), HighlightRole::Secondary),
                (ElementId::Index(2), HighlightRole::Primary),
                (ElementId::Node(9), HighlightRole::Result),
            ],
        );
        let b = serde_json::to_string(&recorder.finish()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn trace_iteration_orders_match() {
        let mut recorder = StepRecorder::new();
        for i in 0..4u8 {
            recorder.record(&i, format!("step {i}"));
        }
        let trace = recorder.finish();
        let by_ref: Vec<u8> = trace.iter().map(|s| s.state).collect();
        assert_eq!(by_ref, vec![0, 1, 2, 3]);
        assert_eq!(trace.final_state(), Some(&3));
        let by_val: Vec<u8> = trace.into_iter().map(|s| s.state).collect();
        assert_eq!(by_val, vec![0, 1, 2, 3]);
    }
}
