//! Heap variant algorithm cores
//!
//! Binomial and Fibonacci heaps animate an insert/extract-min program;
//! leftist and skew heaps animate a merge of two heaps. Every heap node is
//! assigned a stable id at insertion time so highlights follow nodes across
//! relinking, and each core snapshots the full forest into
//! [`ForestState`] steps.
//!
//! Tie-break policy: on equal keys the left (first) argument of a link or
//! merge keeps the root ([`MERGE_TIE_BREAK`]). The leftist heap maintains
//! null path lengths with `npl(missing) = 0`, so a leaf has `npl = 1`.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    validate_array, Algorithm, AlgorithmError, AlgorithmId, Category,
};
use crate::data_structures::forest::{ForestNodeState, ForestState};
use crate::step::{ElementId, HighlightRole, StepRecorder, StepTrace};

/// Documented merge/link tie-break policy.
pub const MERGE_TIE_BREAK: &str = "left argument keeps the root on equal keys";

fn node(id: usize) -> ElementId {
    ElementId::Node(id)
}

/// Insert/extract-min program for the multi-tree heaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapProgram {
    /// Keys inserted in order.
    pub inserts: Vec<i64>,
    /// Number of extract-min operations performed afterwards.
    pub extract_mins: usize,
}

fn validate_program(program: &HeapProgram) -> Result<(), AlgorithmError> {
    validate_array(&program.inserts)?;
    if program.extract_mins > program.inserts.len() {
        return Err(AlgorithmError::invalid_input(format!(
            "{} extract-min operations exceed {} inserted keys",
            program.extract_mins,
            program.inserts.len()
        )));
    }
    Ok(())
}

/// Two key lists for the merge-centric heaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeInput {
    pub left: Vec<i64>,
    pub right: Vec<i64>,
}

// ---------------------------------------------------------------------------
// Multi-tree node shape shared by the binomial and Fibonacci cores.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TreeNode {
    id: usize,
    key: i64,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn singleton(id: usize, key: i64) -> Self {
        Self {
            id,
            key,
            children: Vec::new(),
        }
    }

    fn degree(&self) -> usize {
        self.children.len()
    }
}

fn collect_tree(tree: &TreeNode, parent: Option<usize>, out: &mut Vec<ForestNodeState>) {
    out.push(ForestNodeState {
        id: tree.id,
        key: tree.key,
        parent,
        children: tree.children.iter().map(|c| c.id).collect(),
        npl: None,
        marked: false,
    });
    for child in &tree.children {
        collect_tree(child, Some(tree.id), out);
    }
}

fn snapshot_trees(roots: &[TreeNode]) -> ForestState {
    let mut nodes = Vec::new();
    for root in roots {
        collect_tree(root, None, &mut nodes);
    }
    let root_ids = roots.iter().map(|r| r.id).collect();
    ForestState::from_parts(nodes, root_ids)
}

/// Link two equal-degree trees; the smaller key (left on ties) becomes root.
fn link(a: TreeNode, b: TreeNode) -> TreeNode {
    let (mut winner, loser) = if b.key < a.key { (b, a) } else { (a, b) };
    winner.children.push(loser);
    winner
}

// ---------------------------------------------------------------------------
// Binomial heap
// ---------------------------------------------------------------------------

/// Binomial heap: ordered tree list, equal-order trees linked eagerly.
#[derive(Debug, Default)]
pub struct BinomialHeap;

impl BinomialHeap {
    /// Insert `tree` into the order-sorted root list and resolve carries by
    /// linking the first equal-order pair until orders are distinct.
    fn meld(
        recorder: &mut StepRecorder<ForestState>,
        roots: &mut Vec<TreeNode>,
        tree: TreeNode,
    ) {
        let pos = roots
            .iter()
            .position(|r| r.degree() >= tree.degree())
            .unwrap_or(roots.len());
        roots.insert(pos, tree);

        loop {
            let Some(i) = (0..roots.len().saturating_sub(1))
                .find(|&i| roots[i].degree() == roots[i + 1].degree())
            else {
                break;
            };
            let right = roots.remove(i + 1);
            let left = roots.remove(i);
            let order = left.degree();
            let merged = link(left, right);
            let merged_id = merged.id;
            roots.insert(i, merged);
            recorder.record_with(
                &snapshot_trees(roots),
                format!("Linked two order-{order} trees under key {}", roots[i].key),
                [(node(merged_id), HighlightRole::Secondary)],
            );
        }
    }
}

impl Algorithm for BinomialHeap {
    type Input = HeapProgram;
    type State = ForestState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("binomial-heap")
    }

    fn name(&self) -> &'static str {
        "Binomial Heap"
    }

    fn category(&self) -> Category {
        Category::Heap
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_program(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut roots: Vec<TreeNode> = Vec::new();
        let mut next_id = 0usize;

        recorder.record(&ForestState::empty(), "Empty binomial heap");

        for &key in &input.inserts {
            let id = next_id;
            next_id += 1;
            let tree = TreeNode::singleton(id, key);
            let mut preview = roots.clone();
            preview.insert(0, tree.clone());
            recorder.record_with(
                &snapshot_trees(&preview),
                format!("Inserted key {key}"),
                [(node(id), HighlightRole::Primary)],
            );
            Self::meld(&mut recorder, &mut roots, tree);
        }

        for _ in 0..input.extract_mins {
            let Some(min_idx) = roots
                .iter()
                .enumerate()
                .min_by_key(|(_, r)| r.key)
                .map(|(i, _)| i)
            else {
                break;
            };
            recorder.record_with(
                &snapshot_trees(&roots),
                format!("Extracting minimum key {}", roots[min_idx].key),
                [(node(roots[min_idx].id), HighlightRole::Primary)],
            );
            let min = roots.remove(min_idx);

            // Children of a binomial tree have ascending order; meld each back.
            recorder.record(
                &snapshot_trees(&roots),
                format!("Removed root {}; promoting {} children", min.key, min.children.len()),
            );
            for child in min.children {
                Self::meld(&mut recorder, &mut roots, child);
            }
            recorder.record(
                &snapshot_trees(&roots),
                format!("Heap restored after extracting {}", min.key),
            );
        }

        let final_state = snapshot_trees(&roots);
        let min_root = roots.iter().min_by_key(|r| r.key).map(|r| r.id);
        recorder.record_with(
            &final_state,
            "Binomial heap operations complete",
            min_root.map(|id| (node(id), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

// ---------------------------------------------------------------------------
// Fibonacci heap
// ---------------------------------------------------------------------------

/// Fibonacci heap: lazy root-list inserts, consolidation on extract-min.
#[derive(Debug, Default)]
pub struct FibonacciHeap;

impl FibonacciHeap {
    /// Pairwise-link equal-degree roots until all degrees are distinct.
    fn consolidate(recorder: &mut StepRecorder<ForestState>, roots: &mut Vec<TreeNode>) {
        let mut by_degree: Vec<Option<TreeNode>> = Vec::new();
        for tree in roots.drain(..) {
            let mut current = tree;
            loop {
                let degree = current.degree();
                if by_degree.len() <= degree {
                    by_degree.resize_with(degree + 1, || None);
                }
                match by_degree[degree].take() {
                    Some(existing) => {
                        current = link(existing, current);
                    }
                    None => {
                        by_degree[degree] = Some(current);
                        break;
                    }
                }
            }
        }
        *roots = by_degree.into_iter().flatten().collect();
        recorder.record(
            &snapshot_trees(roots),
            format!("Consolidated root list into {} trees of distinct degree", roots.len()),
        );
    }
}

impl Algorithm for FibonacciHeap {
    type Input = HeapProgram;
    type State = ForestState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("fibonacci-heap")
    }

    fn name(&self) -> &'static str {
        "Fibonacci Heap"
    }

    fn category(&self) -> Category {
        Category::Heap
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_program(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut roots: Vec<TreeNode> = Vec::new();
        let mut next_id = 0usize;

        recorder.record(&ForestState::empty(), "Empty Fibonacci heap");

        for &key in &input.inserts {
            let id = next_id;
            next_id += 1;
            roots.push(TreeNode::singleton(id, key));
            recorder.record_with(
                &snapshot_trees(&roots),
                format!("Lazily inserted key {key} into the root list"),
                [(node(id), HighlightRole::Primary)],
            );
        }

        for _ in 0..input.extract_mins {
            let Some(min_idx) = roots
                .iter()
                .enumerate()
                .min_by_key(|(_, r)| r.key)
                .map(|(i, _)| i)
            else {
                break;
            };
            recorder.record_with(
                &snapshot_trees(&roots),
                format!("Extracting minimum key {}", roots[min_idx].key),
                [(node(roots[min_idx].id), HighlightRole::Primary)],
            );
            let min = roots.remove(min_idx);

            let promoted = min.children.len();
            roots.extend(min.children);
            recorder.record(
                &snapshot_trees(&roots),
                format!("Promoted {promoted} children of {} to the root list", min.key),
            );
            Self::consolidate(&mut recorder, &mut roots);
        }

        let final_state = snapshot_trees(&roots);
        let min_root = roots.iter().min_by_key(|r| r.key).map(|r| r.id);
        recorder.record_with(
            &final_state,
            "Fibonacci heap operations complete",
            min_root.map(|id| (node(id), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

// ---------------------------------------------------------------------------
// Leftist and skew heaps (binary, merge-centric)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct BinaryNode {
    id: usize,
    key: i64,
    left: Option<Box<BinaryNode>>,
    right: Option<Box<BinaryNode>>,
    npl: usize,
}

impl BinaryNode {
    fn leaf(id: usize, key: i64) -> Self {
        Self {
            id,
            key,
            left: None,
            right: None,
            npl: 1,
        }
    }
}

fn npl_of(node: &Option<Box<BinaryNode>>) -> usize {
    node.as_ref().map_or(0, |n| n.npl)
}

fn collect_binary(
    tree: &BinaryNode,
    parent: Option<usize>,
    track_npl: bool,
    out: &mut Vec<ForestNodeState>,
) {
    let mut children = Vec::new();
    if let Some(left) = &tree.left {
        children.push(left.id);
    }
    if let Some(right) = &tree.right {
        children.push(right.id);
    }
    out.push(ForestNodeState {
        id: tree.id,
        key: tree.key,
        parent,
        children,
        npl: track_npl.then_some(tree.npl),
        marked: false,
    });
    if let Some(left) = &tree.left {
        collect_binary(left, Some(tree.id), track_npl, out);
    }
    if let Some(right) = &tree.right {
        collect_binary(right, Some(tree.id), track_npl, out);
    }
}

fn snapshot_binary(roots: &[&Option<Box<BinaryNode>>], track_npl: bool) -> ForestState {
    let mut nodes = Vec::new();
    let mut root_ids = Vec::new();
    for root in roots {
        if let Some(tree) = root {
            collect_binary(tree, None, track_npl, &mut nodes);
            root_ids.push(tree.id);
        }
    }
    ForestState::from_parts(nodes, root_ids)
}

/// Events accumulated during a recursive merge, replayed as steps afterwards.
#[derive(Debug)]
enum MergeEvent {
    Compare {
        winner_id: usize,
        winner_key: i64,
        loser_id: usize,
        loser_key: i64,
    },
    SwapChildren {
        id: usize,
        key: i64,
        reason: String,
    },
}

fn merge_binary(
    a: Option<Box<BinaryNode>>,
    b: Option<Box<BinaryNode>>,
    leftist: bool,
    events: &mut Vec<MergeEvent>,
) -> Option<Box<BinaryNode>> {
    match (a, b) {
        (None, other) | (other, None) => other,
        (Some(mut x), Some(mut y)) => {
            // Left argument keeps the root on ties.
            if y.key < x.key {
                std::mem::swap(&mut x, &mut y);
            }
            events.push(MergeEvent::Compare {
                winner_id: x.id,
                winner_key: x.key,
                loser_id: y.id,
                loser_key: y.key,
            });
            x.right = merge_binary(x.right.take(), Some(y), leftist, events);

            if leftist {
                if npl_of(&x.left) < npl_of(&x.right) {
                    std::mem::swap(&mut x.left, &mut x.right);
                    events.push(MergeEvent::SwapChildren {
                        id: x.id,
                        key: x.key,
                        reason: "left NPL was smaller".to_string(),
                    });
                }
                x.npl = npl_of(&x.right) + 1;
            } else {
                // Skew heap: unconditional swap after every merge level.
                std::mem::swap(&mut x.left, &mut x.right);
                events.push(MergeEvent::SwapChildren {
                    id: x.id,
                    key: x.key,
                    reason: "skew heap swaps unconditionally".to_string(),
                });
            }
            Some(x)
        }
    }
}

/// Build one side of the merge by folding singleton merges, recording each
/// insert against the full two-heap forest.
fn build_side(
    keys: &[i64],
    side: &str,
    other: &Option<Box<BinaryNode>>,
    leftist: bool,
    recorder: &mut StepRecorder<ForestState>,
    next_id: &mut usize,
) -> Option<Box<BinaryNode>> {
    let mut heap: Option<Box<BinaryNode>> = None;
    for &key in keys {
        let id = *next_id;
        *next_id += 1;
        let mut events = Vec::new();
        heap = merge_binary(
            heap,
            Some(Box::new(BinaryNode::leaf(id, key))),
            leftist,
            &mut events,
        );
        recorder.record_with(
            &snapshot_binary(&[&heap, other], leftist),
            format!("Inserted key {key} into the {side} heap"),
            [(node(id), HighlightRole::Primary)],
        );
    }
    heap
}

fn run_merge_heap(
    input: &MergeInput,
    leftist: bool,
) -> Result<StepTrace<ForestState>, AlgorithmError> {
    let mut recorder = StepRecorder::new();
    let mut next_id = 0usize;

    let none: Option<Box<BinaryNode>> = None;
    let left = build_side(&input.left, "left", &none, leftist, &mut recorder, &mut next_id);
    let right = build_side(&input.right, "right", &left, leftist, &mut recorder, &mut next_id);

    let mut highlights = Vec::new();
    if let Some(root) = &left {
        highlights.push((node(root.id), HighlightRole::Primary));
    }
    if let Some(root) = &right {
        highlights.push((node(root.id), HighlightRole::Primary));
    }
    recorder.record_with(
        &snapshot_binary(&[&left, &right], leftist),
        "Merging the two heaps",
        highlights,
    );

    let mut events = Vec::new();
    let merged = merge_binary(left, right, leftist, &mut events);
    let merged_snapshot = snapshot_binary(&[&merged], leftist);

    // Replay the recursive merge decisions against the final structure.
    for event in events {
        match event {
            MergeEvent::Compare {
                winner_id,
                winner_key,
                loser_id,
                loser_key,
            } => recorder.record_with(
                &merged_snapshot,
                format!("Key {winner_key} wins over {loser_key}; merging into its right spine"),
                [
                    (node(winner_id), HighlightRole::Primary),
                    (node(loser_id), HighlightRole::Secondary),
                ],
            ),
            MergeEvent::SwapChildren { id, key, reason } => recorder.record_with(
                &merged_snapshot,
                format!("Swapped children of key {key}: {reason}"),
                [(node(id), HighlightRole::Secondary)],
            ),
        }
    }

    let root_highlight = merged.as_ref().map(|r| (node(r.id), HighlightRole::Result));
    recorder.record_with(&merged_snapshot, "Merge complete", root_highlight);
    Ok(recorder.finish())
}

/// Leftist heap merge, maintaining the null-path-length invariant.
#[derive(Debug, Default)]
pub struct LeftistHeap;

impl Algorithm for LeftistHeap {
    type Input = MergeInput;
    type State = ForestState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("leftist-heap")
    }

    fn name(&self) -> &'static str {
        "Leftist Heap"
    }

    fn category(&self) -> Category {
        Category::Heap
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.left)?;
        validate_array(&input.right)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        run_merge_heap(input, true)
    }
}

/// Skew heap merge with unconditional child swaps.
#[derive(Debug, Default)]
pub struct SkewHeap;

impl Algorithm for SkewHeap {
    type Input = MergeInput;
    type State = ForestState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("skew-heap")
    }

    fn name(&self) -> &'static str {
        "Skew Heap"
    }

    fn category(&self) -> Category {
        Category::Heap
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.left)?;
        validate_array(&input.right)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        run_merge_heap(input, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_key_multiset(state: &ForestState) -> Vec<i64> {
        let mut keys: Vec<i64> = state.nodes.iter().map(|n| n.key).collect();
        keys.sort_unstable();
        keys
    }

    fn min_root_key(state: &ForestState) -> i64 {
        state
            .roots
            .iter()
            .filter_map(|id| state.node(*id))
            .map(|n| n.key)
            .min()
            .expect("non-empty forest")
    }

    fn assert_heap_order(state: &ForestState) {
        for parent in &state.nodes {
            for child_id in &parent.children {
                let child = state.node(*child_id).expect("live child");
                assert!(
                    parent.key <= child.key,
                    "heap order violated: {} above {}",
                    parent.key,
                    child.key
                );
            }
        }
    }

    #[test]
    fn binomial_heap_extracts_minimum() {
        let program = HeapProgram {
            inserts: vec![9, 4, 7, 1, 12, 3],
            extract_mins: 2,
        };
        let trace = BinomialHeap.run(&program).unwrap();
        let last = trace.final_state().unwrap();
        assert_heap_order(last);
        // 1 and 3 extracted; 4 is now the minimum.
        assert_eq!(heap_key_multiset(last), vec![4, 7, 9, 12]);
        assert_eq!(min_root_key(last), 4);
        // Binomial shape: root orders are distinct.
        let mut orders: Vec<usize> = last
            .roots
            .iter()
            .map(|id| last.node(*id).unwrap().children.len())
            .collect();
        let unique = orders.len();
        orders.dedup();
        assert_eq!(orders.len(), unique);
    }

    #[test]
    fn fibonacci_heap_consolidates_on_extract() {
        let program = HeapProgram {
            inserts: vec![5, 2, 8, 1, 9, 3, 7],
            extract_mins: 1,
        };
        let trace = FibonacciHeap.run(&program).unwrap();
        let last = trace.final_state().unwrap();
        assert_heap_order(last);
        assert_eq!(heap_key_multiset(last), vec![2, 3, 5, 7, 8, 9]);
        // After consolidation all root degrees are distinct.
        let mut degrees: Vec<usize> = last
            .roots
            .iter()
            .map(|id| last.node(*id).unwrap().children.len())
            .collect();
        let unique = degrees.len();
        degrees.sort_unstable();
        degrees.dedup();
        assert_eq!(degrees.len(), unique);
        assert!(trace
            .iter()
            .any(|s| s.annotation.contains("Consolidated root list")));
    }

    #[test]
    fn fibonacci_insert_is_lazy() {
        let program = HeapProgram {
            inserts: vec![5, 2, 8],
            extract_mins: 0,
        };
        let trace = FibonacciHeap.run(&program).unwrap();
        // Without extraction every key stays a root.
        assert_eq!(trace.final_state().unwrap().roots.len(), 3);
    }

    #[test]
    fn leftist_merge_preserves_keys_and_npl() {
        let input = MergeInput {
            left: vec![3, 10, 8],
            right: vec![6, 1, 14],
        };
        let trace = LeftistHeap.run(&input).unwrap();
        let last = trace.final_state().unwrap();
        assert_heap_order(last);
        assert_eq!(heap_key_multiset(last), vec![1, 3, 6, 8, 10, 14]);
        assert_eq!(last.roots.len(), 1);
        assert_eq!(min_root_key(last), 1);
        // Leftist invariant: npl(left) >= npl(right) for every node.
        for n in &last.nodes {
            let child_npl = |idx: usize| {
                n.children
                    .get(idx)
                    .and_then(|id| last.node(*id))
                    .and_then(|c| c.npl)
                    .unwrap_or(0)
            };
            if n.children.len() == 2 {
                assert!(child_npl(0) >= child_npl(1));
            }
            assert!(n.npl.is_some());
        }
    }

    #[test]
    fn skew_merge_preserves_keys() {
        let input = MergeInput {
            left: vec![7, 2],
            right: vec![5, 11, 4],
        };
        let trace = SkewHeap.run(&input).unwrap();
        let last = trace.final_state().unwrap();
        assert_heap_order(last);
        assert_eq!(heap_key_multiset(last), vec![2, 4, 5, 7, 11]);
        assert_eq!(last.roots.len(), 1);
        assert_eq!(min_root_key(last), 2);
    }

    #[test]
    fn extract_bound_validated() {
        let program = HeapProgram {
            inserts: vec![1, 2],
            extract_mins: 3,
        };
        assert!(BinomialHeap.run(&program).is_err());
        assert!(FibonacciHeap.validate(&program).is_err());
    }
}
