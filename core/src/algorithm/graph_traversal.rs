//! Graph traversal algorithm cores
//!
//! Depth-first and breadth-first traversal, connected components, both
//! topological sort flavors (Kahn's indegree queue and DFS finish order),
//! and Floyd-Warshall all-pairs shortest paths. Traversals record the
//! per-node phase lifecycle (`Unvisited -> Visiting -> Backtracking -> Done`
//! for depth-first variants) rather than a single global flag.
//!
//! Neighbor visitation order is the documented ascending-id policy enforced
//! by [`Graph`]; a cyclic graph handed to a topological sort produces a
//! terminal "impossible" step, not an error.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::algorithm::state::MatrixState;
use crate::algorithm::traits::{Algorithm, AlgorithmError, AlgorithmId, Category};
use crate::data_structures::graph::{Graph, GraphSnapshot, NodePhase};
use crate::step::{ElementId, HighlightRole, StepRecorder, StepTrace};

/// Input for traversals that start from a designated node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalInput {
    pub graph: Graph,
    pub start: usize,
}

fn validate_start(input: &TraversalInput) -> Result<(), AlgorithmError> {
    if input.start >= input.graph.node_count() {
        return Err(AlgorithmError::invalid_input(format!(
            "start node {} outside 0..{}",
            input.start,
            input.graph.node_count()
        )));
    }
    Ok(())
}

fn node(id: usize) -> ElementId {
    ElementId::Node(id)
}

/// Depth-first search from a start node.
#[derive(Debug, Default)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    fn visit(recorder: &mut StepRecorder<GraphSnapshot>, snapshot: &mut GraphSnapshot, at: usize) {
        snapshot.phases[at] = NodePhase::Visiting;
        recorder.record_with(
            snapshot,
            format!("Visiting node {at}"),
            [(node(at), HighlightRole::Primary)],
        );

        let neighbors: Vec<usize> = snapshot.adjacency[at].clone();
        for next in neighbors {
            if snapshot.phases[next] == NodePhase::Unvisited {
                Self::visit(recorder, snapshot, next);
            }
        }

        snapshot.phases[at] = NodePhase::Backtracking;
        recorder.record_with(
            snapshot,
            format!("Backtracking from node {at}"),
            [(node(at), HighlightRole::Secondary)],
        );
        snapshot.phases[at] = NodePhase::Done;
    }
}

impl Algorithm for DepthFirstSearch {
    type Input = TraversalInput;
    type State = GraphSnapshot;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("depth-first-search")
    }

    fn name(&self) -> &'static str {
        "Depth-First Search"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_start(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut snapshot = GraphSnapshot::of(&input.graph);
        let mut recorder = StepRecorder::new();
        recorder.record(&snapshot, format!("Depth-first search from node {}", input.start));

        Self::visit(&mut recorder, &mut snapshot, input.start);

        let reached: Vec<_> = (0..snapshot.node_count())
            .filter(|&n| snapshot.phases[n] == NodePhase::Done)
            .collect();
        recorder.record_with(
            &snapshot,
            format!("Traversal complete, {} nodes reached", reached.len()),
            reached.into_iter().map(|n| (node(n), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

/// Breadth-first search from a start node.
#[derive(Debug, Default)]
pub struct BreadthFirstSearch;

impl Algorithm for BreadthFirstSearch {
    type Input = TraversalInput;
    type State = GraphSnapshot;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("breadth-first-search")
    }

    fn name(&self) -> &'static str {
        "Breadth-First Search"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_start(input)
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut snapshot = GraphSnapshot::of(&input.graph);
        let mut recorder = StepRecorder::new();
        recorder.record(&snapshot, format!("Breadth-first search from node {}", input.start));

        let mut queue = VecDeque::new();
        queue.push_back(input.start);
        snapshot.phases[input.start] = NodePhase::Visiting;

        while let Some(at) = queue.pop_front() {
            let mut highlights = vec![(node(at), HighlightRole::Primary)];
            for &frontier in &queue {
                highlights.push((node(frontier), HighlightRole::Secondary));
            }
            recorder.record_with(&snapshot, format!("Dequeued node {at}"), highlights);

            let neighbors: Vec<usize> = snapshot.adjacency[at].clone();
            for next in neighbors {
                if snapshot.phases[next] == NodePhase::Unvisited {
                    snapshot.phases[next] = NodePhase::Visiting;
                    queue.push_back(next);
                    recorder.record_with(
                        &snapshot,
                        format!("Discovered node {next} from {at}"),
                        [
                            (node(at), HighlightRole::Primary),
                            (node(next), HighlightRole::Secondary),
                        ],
                    );
                }
            }
            snapshot.phases[at] = NodePhase::Done;
        }

        let reached: Vec<_> = (0..snapshot.node_count())
            .filter(|&n| snapshot.phases[n] == NodePhase::Done)
            .collect();
        recorder.record_with(
            &snapshot,
            format!("Traversal complete, {} nodes reached", reached.len()),
            reached.into_iter().map(|n| (node(n), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

/// Connected components of an undirected graph via repeated BFS.
#[derive(Debug, Default)]
pub struct ConnectedComponents;

impl Algorithm for ConnectedComponents {
    type Input = Graph;
    type State = GraphSnapshot;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("connected-components")
    }

    fn name(&self) -> &'static str {
        "Connected Components"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if input.is_directed() {
            return Err(AlgorithmError::invalid_input(
                "connected components requires an undirected graph",
            ));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut snapshot = GraphSnapshot::of(input);
        let mut recorder = StepRecorder::new();
        recorder.record(&snapshot, "Finding connected components");

        let mut component = 0usize;
        for seed in 0..snapshot.node_count() {
            if snapshot.phases[seed] != NodePhase::Unvisited {
                continue;
            }
            recorder.record_with(
                &snapshot,
                format!("Starting component {component} at node {seed}"),
                [(node(seed), HighlightRole::Primary)],
            );
            let mut queue = VecDeque::new();
            queue.push_back(seed);
            snapshot.phases[seed] = NodePhase::Visiting;
            while let Some(at) = queue.pop_front() {
                snapshot.phases[at] = NodePhase::Done;
                snapshot.labels[at] = Some(format!("C{component}"));
                recorder.record_with(
                    &snapshot,
                    format!("Node {at} joins component {component}"),
                    [(node(at), HighlightRole::Secondary)],
                );
                let neighbors: Vec<usize> = snapshot.adjacency[at].clone();
                for next in neighbors {
                    if snapshot.phases[next] == NodePhase::Unvisited {
                        snapshot.phases[next] = NodePhase::Visiting;
                        queue.push_back(next);
                    }
                }
            }
            component += 1;
        }

        recorder.record_with(
            &snapshot,
            format!("Found {component} components"),
            (0..snapshot.node_count()).map(|n| (node(n), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

/// Kahn's topological sort: repeatedly remove the smallest zero-indegree node.
#[derive(Debug, Default)]
pub struct TopologicalKahn;

impl Algorithm for TopologicalKahn {
    type Input = Graph;
    type State = GraphSnapshot;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("topological-sort-kahn")
    }

    fn name(&self) -> &'static str {
        "Topological Sort (Kahn)"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if !input.is_directed() {
            return Err(AlgorithmError::invalid_input(
                "topological sort requires a directed graph",
            ));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let n = input.node_count();
        let mut snapshot = GraphSnapshot::of(input);
        let mut recorder = StepRecorder::new();
        recorder.record(&snapshot, "Topological sort by indegree (Kahn)");

        let mut indegree: Vec<usize> = (0..n).map(|v| input.in_degree(v)).collect();
        // BTreeSet gives the deterministic smallest-id-first removal order.
        let mut ready: BTreeSet<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
        let mut position = 0usize;

        while let Some(&next) = ready.iter().next() {
            ready.remove(&next);
            snapshot.phases[next] = NodePhase::Done;
            snapshot.labels[next] = Some(format!("#{position}"));
            recorder.record_with(
                &snapshot,
                format!("Removed node {next} at position {position}"),
                [(node(next), HighlightRole::Primary)],
            );
            position += 1;
            for &succ in input.neighbors(next) {
                indegree[succ] -= 1;
                if indegree[succ] == 0 {
                    ready.insert(succ);
                    snapshot.phases[succ] = NodePhase::Visiting;
                    recorder.record_with(
                        &snapshot,
                        format!("Node {succ} has no remaining predecessors"),
                        [(node(succ), HighlightRole::Secondary)],
                    );
                }
            }
        }

        if position < n {
            recorder.record_with(
                &snapshot,
                "Graph contains a cycle: topological order impossible",
                (0..n)
                    .filter(|&v| snapshot.phases[v] != NodePhase::Done)
                    .map(|v| (node(v), HighlightRole::Eliminated)),
            );
        } else {
            recorder.record_with(
                &snapshot,
                "Topological order complete",
                (0..n).map(|v| (node(v), HighlightRole::Result)),
            );
        }
        Ok(recorder.finish())
    }
}

/// DFS-based topological sort: reverse finish order, with cycle detection.
#[derive(Debug, Default)]
pub struct TopologicalDfs;

impl TopologicalDfs {
    /// Returns false if a back edge (cycle) is found.
    fn visit(
        recorder: &mut StepRecorder<GraphSnapshot>,
        snapshot: &mut GraphSnapshot,
        order: &mut Vec<usize>,
        at: usize,
    ) -> bool {
        snapshot.phases[at] = NodePhase::Visiting;
        recorder.record_with(
            snapshot,
            format!("Visiting node {at}"),
            [(node(at), HighlightRole::Primary)],
        );

        let neighbors: Vec<usize> = snapshot.adjacency[at].clone();
        for next in neighbors {
            match snapshot.phases[next] {
                NodePhase::Unvisited => {
                    if !Self::visit(recorder, snapshot, order, next) {
                        return false;
                    }
                }
                NodePhase::Visiting => {
                    recorder.record_with(
                        snapshot,
                        format!("Back edge {at} -> {next} closes a cycle"),
                        [
                            (node(at), HighlightRole::Eliminated),
                            (node(next), HighlightRole::Eliminated),
                        ],
                    );
                    return false;
                }
                _ => {}
            }
        }

        snapshot.phases[at] = NodePhase::Backtracking;
        recorder.record_with(
            snapshot,
            format!("Finished node {at}"),
            [(node(at), HighlightRole::Secondary)],
        );
        snapshot.phases[at] = NodePhase::Done;
        order.push(at);
        true
    }
}

impl Algorithm for TopologicalDfs {
    type Input = Graph;
    type State = GraphSnapshot;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("topological-sort-dfs")
    }

    fn name(&self) -> &'static str {
        "Topological Sort (DFS)"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if !input.is_directed() {
            return Err(AlgorithmError::invalid_input(
                "topological sort requires a directed graph",
            ));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let n = input.node_count();
        let mut snapshot = GraphSnapshot::of(input);
        let mut recorder = StepRecorder::new();
        recorder.record(&snapshot, "Topological sort by finish order (DFS)");

        let mut order = Vec::new();
        for seed in 0..n {
            if snapshot.phases[seed] == NodePhase::Unvisited
                && !Self::visit(&mut recorder, &mut snapshot, &mut order, seed)
            {
                recorder.record(&snapshot, "Graph contains a cycle: topological order impossible");
                return Ok(recorder.finish());
            }
        }

        // Reverse finish order is the topological order.
        order.reverse();
        for (position, &v) in order.iter().enumerate() {
            snapshot.labels[v] = Some(format!("#{position}"));
        }
        recorder.record_with(
            &snapshot,
            "Topological order complete",
            (0..n).map(|v| (node(v), HighlightRole::Result)),
        );
        Ok(recorder.finish())
    }
}

/// Floyd-Warshall all-pairs shortest paths over the distance matrix.
///
/// Step granularity: one boundary step per intermediate node `k`, plus one
/// step per successful relaxation, so every table change stays visible
/// without recording the full `n^3` probe grid.
#[derive(Debug, Default)]
pub struct FloydWarshall;

impl Algorithm for FloydWarshall {
    type Input = Graph;
    type State = MatrixState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("floyd-warshall")
    }

    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn category(&self) -> Category {
        Category::Graph
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if let Some(edge) = input.edges().iter().find(|edge| edge.weight < 0) {
            return Err(AlgorithmError::invalid_input(format!(
                "negative edge weight {} on ({}, {})",
                edge.weight, edge.from, edge.to
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let n = input.node_count();
        let mut table = MatrixState::empty(n, n);
        table.row_labels = (0..n).map(|v| v.to_string()).collect();
        table.col_labels = (0..n).map(|v| v.to_string()).collect();

        // Unfilled cells represent infinite distance.
        for v in 0..n {
            table.set(v, v, 0);
        }
        for edge in input.edges() {
            let better = table
                .get(edge.from, edge.to)
                .map_or(true, |known| edge.weight < known);
            if better {
                table.set(edge.from, edge.to, edge.weight);
            }
            if !input.is_directed() {
                let better = table
                    .get(edge.to, edge.from)
                    .map_or(true, |known| edge.weight < known);
                if better {
                    table.set(edge.to, edge.from, edge.weight);
                }
            }
        }

        let mut recorder = StepRecorder::new();
        recorder.record(&table, "Initial distance matrix from edge weights");

        for k in 0..n {
            recorder.record_with(
                &table,
                format!("Considering paths through intermediate node {k}"),
                [(MatrixState::cell(k, k), HighlightRole::Secondary)],
            );
            for i in 0..n {
                for j in 0..n {
                    let (Some(ik), Some(kj)) = (table.get(i, k), table.get(k, j)) else {
                        continue;
                    };
                    let candidate = ik + kj;
                    if table.get(i, j).map_or(true, |direct| candidate < direct) {
                        table.set(i, j, candidate);
                        recorder.record_with(
                            &table,
                            format!("Improved distance [{i}][{j}] to {candidate} via {k}"),
                            [
                                (MatrixState::cell(i, j), HighlightRole::Primary),
                                (MatrixState::cell(i, k), HighlightRole::Secondary),
                                (MatrixState::cell(k, j), HighlightRole::Secondary),
                            ],
                        );
                    }
                }
            }
        }

        recorder.record(&table, "All-pairs shortest paths computed");
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        // 0 -> {1, 2} -> 3
        let mut graph = Graph::new(4, true).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(0, 2).unwrap();
        graph.add_edge(1, 3).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph
    }

    #[test]
    fn dfs_reaches_all_and_finishes_nodes() {
        let input = TraversalInput {
            graph: diamond(),
            start: 0,
        };
        let trace = DepthFirstSearch.run(&input).unwrap();
        let last = trace.final_state().unwrap();
        assert!(last.phases.iter().all(|p| *p == NodePhase::Done));
        assert!(trace
            .last()
            .unwrap()
            .annotation
            .contains("4 nodes reached"));
    }

    #[test]
    fn dfs_visits_neighbors_ascending() {
        let input = TraversalInput {
            graph: diamond(),
            start: 0,
        };
        let trace = DepthFirstSearch.run(&input).unwrap();
        let visits: Vec<String> = trace
            .iter()
            .filter(|s| s.annotation.starts_with("Visiting"))
            .map(|s| s.annotation.clone())
            .collect();
        assert_eq!(
            visits,
            vec![
                "Visiting node 0",
                "Visiting node 1",
                "Visiting node 3",
                "Visiting node 2"
            ]
        );
    }

    #[test]
    fn bfs_discovers_in_level_order() {
        let input = TraversalInput {
            graph: diamond(),
            start: 0,
        };
        let trace = BreadthFirstSearch.run(&input).unwrap();
        let dequeues: Vec<String> = trace
            .iter()
            .filter(|s| s.annotation.starts_with("Dequeued"))
            .map(|s| s.annotation.clone())
            .collect();
        assert_eq!(
            dequeues,
            vec![
                "Dequeued node 0",
                "Dequeued node 1",
                "Dequeued node 2",
                "Dequeued node 3"
            ]
        );
    }

    #[test]
    fn components_labeled() {
        let mut graph = Graph::new(5, false).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(3, 4).unwrap();
        let trace = ConnectedComponents.run(&graph).unwrap();
        let last = trace.final_state().unwrap();
        assert_eq!(last.labels[0], Some("C0".to_string()));
        assert_eq!(last.labels[1], Some("C0".to_string()));
        assert_eq!(last.labels[2], Some("C1".to_string()));
        assert_eq!(last.labels[3], Some("C2".to_string()));
        assert!(trace.last().unwrap().annotation.contains("3 components"));
    }

    #[test]
    fn kahn_orders_diamond() {
        let trace = TopologicalKahn.run(&diamond()).unwrap();
        let last = trace.final_state().unwrap();
        assert_eq!(last.labels[0], Some("#0".to_string()));
        assert_eq!(last.labels[1], Some("#1".to_string()));
        assert_eq!(last.labels[2], Some("#2".to_string()));
        assert_eq!(last.labels[3], Some("#3".to_string()));
    }

    #[test]
    fn both_topological_variants_agree_on_validity() {
        let mut cyclic = Graph::new(3, true).unwrap();
        cyclic.add_edge(0, 1).unwrap();
        cyclic.add_edge(1, 2).unwrap();
        cyclic.add_edge(2, 0).unwrap();

        let kahn = TopologicalKahn.run(&cyclic).unwrap();
        let dfs = TopologicalDfs.run(&cyclic).unwrap();
        assert!(kahn.last().unwrap().annotation.contains("impossible"));
        assert!(dfs.last().unwrap().annotation.contains("impossible"));
    }

    #[test]
    fn topological_requires_directed() {
        let undirected = Graph::new(2, false).unwrap();
        assert!(TopologicalKahn.run(&undirected).is_err());
        assert!(TopologicalDfs.run(&undirected).is_err());
    }

    #[test]
    fn floyd_warshall_shortest_paths() {
        let mut graph = Graph::new(4, true).unwrap();
        graph.add_weighted_edge(0, 1, 5).unwrap();
        graph.add_weighted_edge(1, 2, 3).unwrap();
        graph.add_weighted_edge(0, 2, 10).unwrap();
        graph.add_weighted_edge(2, 3, 1).unwrap();

        let trace = FloydWarshall.run(&graph).unwrap();
        let table = trace.final_state().unwrap();
        assert_eq!(table.get(0, 2), Some(8)); // 0->1->2 beats the direct 10
        assert_eq!(table.get(0, 3), Some(9));
        assert_eq!(table.get(3, 0), None); // unreachable stays infinite
        assert_eq!(table.get(0, 0), Some(0));
    }

    #[test]
    fn floyd_warshall_rejects_negative_weights() {
        let mut graph = Graph::new(2, true).unwrap();
        graph.add_weighted_edge(0, 1, -4).unwrap();
        assert!(FloydWarshall.run(&graph).is_err());
    }
}
