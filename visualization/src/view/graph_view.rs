//! Circular-layout projection for graph snapshots

use stepscope_core::data_structures::{GraphSnapshot, NodePhase};
use stepscope_core::{ElementId, HighlightRole, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders a [`GraphSnapshot`] with nodes evenly spaced on a circle and one
/// edge line per adjacency entry. The layout depends only on the node count,
/// so node positions are stable across every step of a trace.
///
/// Phases color nodes that carry no explicit highlight: unvisited nodes use
/// the base color, visiting/backtracking/done map onto the primary,
/// secondary and result colors.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphProjector {
    pub radius: f64,
    pub node_radius: f64,
}

impl Default for GraphProjector {
    fn default() -> Self {
        Self {
            radius: 140.0,
            node_radius: 14.0,
        }
    }
}

impl GraphProjector {
    fn position(&self, node: usize, count: usize) -> (f64, f64) {
        let angle = std::f64::consts::TAU * node as f64 / count.max(1) as f64;
        let center = self.radius + self.node_radius * 2.0;
        (
            center + self.radius * angle.cos(),
            center + self.radius * angle.sin(),
        )
    }

    fn phase_role(phase: NodePhase) -> Option<HighlightRole> {
        match phase {
            NodePhase::Unvisited => None,
            NodePhase::Visiting => Some(HighlightRole::Primary),
            NodePhase::Backtracking => Some(HighlightRole::Secondary),
            NodePhase::Done => Some(HighlightRole::Result),
        }
    }
}

impl Projector for GraphProjector {
    type State = GraphSnapshot;

    fn project(&self, step: &Step<GraphSnapshot>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());
        let count = step.state.node_count();

        // Edges first so nodes draw over them. An undirected edge appears
        // in both adjacency lists; draw it once, from the smaller endpoint.
        for (from, neighbors) in step.state.adjacency.iter().enumerate() {
            for &to in neighbors {
                if !step.state.directed && to < from {
                    continue;
                }
                let (x1, y1) = self.position(from, count);
                let (x2, y2) = self.position(to, count);
                scene.push_shape(Shape::Edge {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: theme.base,
                });
            }
        }

        for node in 0..count {
            let (x, y) = self.position(node, count);
            let role = step
                .role_of(&ElementId::Node(node))
                .or_else(|| Self::phase_role(step.state.phases[node]));
            scene.push_shape(Shape::NodeDot {
                x,
                y,
                radius: self.node_radius,
                color: theme.color_for(role),
            });
            let text = match &step.state.labels[node] {
                Some(label) => format!("{node}:{label}"),
                None => node.to_string(),
            };
            scene.push_label(x, y - self.node_radius - 6.0, text, theme.text);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::graph_traversal::{BreadthFirstSearch, TraversalInput};
    use stepscope_core::data_structures::Graph;
    use stepscope_core::Algorithm;

    fn path_graph() -> Graph {
        let mut graph = Graph::new(3, false).unwrap();
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph
    }

    #[test]
    fn undirected_edges_drawn_once() {
        let input = TraversalInput {
            graph: path_graph(),
            start: 0,
        };
        let trace = BreadthFirstSearch.run(&input).unwrap();
        let scene = GraphProjector::default().project(trace.first().unwrap(), &Theme::dark());
        let edges = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Edge { .. }))
            .count();
        let nodes = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::NodeDot { .. }))
            .count();
        assert_eq!(edges, 2);
        assert_eq!(nodes, 3);
    }

    #[test]
    fn node_positions_stable_across_steps() {
        let input = TraversalInput {
            graph: path_graph(),
            start: 0,
        };
        let trace = BreadthFirstSearch.run(&input).unwrap();
        let projector = GraphProjector::default();
        let theme = Theme::dark();
        let first = projector.project(trace.first().unwrap(), &theme);
        let last = projector.project(trace.last().unwrap(), &theme);

        let dots = |scene: &Scene| -> Vec<(f64, f64)> {
            scene
                .shapes
                .iter()
                .filter_map(|s| match s {
                    Shape::NodeDot { x, y, .. } => Some((*x, *y)),
                    _ => None,
                })
                .collect()
        };
        assert_eq!(dots(&first), dots(&last));
    }

    #[test]
    fn finished_traversal_colors_nodes_done() {
        let input = TraversalInput {
            graph: path_graph(),
            start: 0,
        };
        let trace = BreadthFirstSearch.run(&input).unwrap();
        let theme = Theme::dark();
        let scene = GraphProjector::default().project(trace.last().unwrap(), &theme);
        for shape in &scene.shapes {
            if let Shape::NodeDot { color, .. } = shape {
                assert_eq!(*color, theme.result);
            }
        }
    }
}
