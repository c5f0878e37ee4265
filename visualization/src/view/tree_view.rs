//! Tiered tree projection for heap forests

use std::collections::BTreeMap;

use stepscope_core::data_structures::{ForestNodeState, ForestState};
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders a [`ForestState`] as tiered trees: every node sits one level
/// below its parent, parents are centered over their children, and the
/// trees of the forest are laid out left to right in root order.
///
/// Positions are derived from the snapshot structure alone, so two steps
/// with the same structure project to the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeProjector {
    pub h_spacing: f64,
    pub v_spacing: f64,
    pub node_radius: f64,
}

impl Default for TreeProjector {
    fn default() -> Self {
        Self {
            h_spacing: 44.0,
            v_spacing: 56.0,
            node_radius: 14.0,
        }
    }
}

impl TreeProjector {
    /// Assign an (x, y) slot to every node of the subtree. Leaves consume
    /// one horizontal slot each; a parent is centered over its children.
    fn layout(
        state: &ForestState,
        node: &ForestNodeState,
        depth: usize,
        next_slot: &mut f64,
        positions: &mut BTreeMap<usize, (f64, f64)>,
    ) {
        if node.children.is_empty() {
            positions.insert(node.id, (*next_slot, depth as f64));
            *next_slot += 1.0;
            return;
        }
        for child_id in &node.children {
            if let Some(child) = state.node(*child_id) {
                Self::layout(state, child, depth + 1, next_slot, positions);
            }
        }
        let xs: Vec<f64> = node
            .children
            .iter()
            .filter_map(|id| positions.get(id).map(|(x, _)| *x))
            .collect();
        let x = if xs.is_empty() {
            let slot = *next_slot;
            *next_slot += 1.0;
            slot
        } else {
            (xs[0] + xs[xs.len() - 1]) / 2.0
        };
        positions.insert(node.id, (x, depth as f64));
    }
}

impl Projector for TreeProjector {
    type State = ForestState;

    fn project(&self, step: &Step<ForestState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());
        let mut positions = BTreeMap::new();
        let mut next_slot = 0.0;
        for root_id in &step.state.roots {
            if let Some(root) = step.state.node(*root_id) {
                Self::layout(&step.state, root, 0, &mut next_slot, &mut positions);
                // One empty slot between adjacent trees.
                next_slot += 1.0;
            }
        }

        let at = |slot: (f64, f64)| -> (f64, f64) {
            (
                self.node_radius + slot.0 * self.h_spacing,
                self.node_radius + slot.1 * self.v_spacing,
            )
        };

        for node in &step.state.nodes {
            if let Some(parent_id) = node.parent {
                if let (Some(&p), Some(&c)) = (positions.get(&parent_id), positions.get(&node.id))
                {
                    let (x1, y1) = at(p);
                    let (x2, y2) = at(c);
                    scene.push_shape(Shape::Edge {
                        x1,
                        y1,
                        x2,
                        y2,
                        color: theme.base,
                    });
                }
            }
        }

        for node in &step.state.nodes {
            let Some(&slot) = positions.get(&node.id) else {
                continue;
            };
            let (x, y) = at(slot);
            let role = step.role_of(&ElementId::Node(node.id));
            scene.push_shape(Shape::NodeDot {
                x,
                y,
                radius: self.node_radius,
                color: theme.color_for(role),
            });
            let text = match node.npl {
                Some(npl) => format!("{} (npl {npl})", node.key),
                None => node.key.to_string(),
            };
            scene.push_label(x, y - self.node_radius - 6.0, text, theme.text);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::heaps::{LeftistHeap, MergeInput};
    use stepscope_core::Algorithm;

    #[test]
    fn every_node_drawn_with_an_edge_to_its_parent() {
        let input = MergeInput {
            left: vec![3, 9],
            right: vec![5, 1],
        };
        let trace = LeftistHeap.run(&input).unwrap();
        let scene = TreeProjector::default().project(trace.last().unwrap(), &Theme::dark());
        let dots = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::NodeDot { .. }))
            .count();
        let edges = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Edge { .. }))
            .count();
        assert_eq!(dots, 4);
        // One merged tree: every non-root node has exactly one parent edge.
        assert_eq!(edges, 3);
    }

    #[test]
    fn children_sit_below_their_parent() {
        let input = MergeInput {
            left: vec![2, 7],
            right: vec![4],
        };
        let trace = LeftistHeap.run(&input).unwrap();
        let scene = TreeProjector::default().project(trace.last().unwrap(), &Theme::dark());
        for shape in &scene.shapes {
            if let Shape::Edge { y1, y2, .. } = shape {
                assert!(y2 > y1);
            }
        }
    }

    #[test]
    fn leftist_labels_include_npl() {
        let input = MergeInput {
            left: vec![2],
            right: vec![4],
        };
        let trace = LeftistHeap.run(&input).unwrap();
        let scene = TreeProjector::default().project(trace.last().unwrap(), &Theme::dark());
        assert!(scene.labels.iter().any(|l| l.text.contains("npl")));
    }
}
