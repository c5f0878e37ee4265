//! Point-set projection for coordinate transform demos

use stepscope_core::algorithm::{Dimension, PointSetState};
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders a [`PointSetState`] as marks in a centered viewport. 3D points
/// keep their `z` on the mark for depth-aware backends; the 2D screen
/// position uses a plain orthographic drop of `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSetProjector {
    pub viewport: f64,
    /// World units per half-viewport.
    pub world_extent: f64,
}

impl Default for PointSetProjector {
    fn default() -> Self {
        Self {
            viewport: 320.0,
            world_extent: 10.0,
        }
    }
}

impl PointSetProjector {
    fn to_screen(&self, coord: f64) -> f64 {
        let half = self.viewport / 2.0;
        half + coord / self.world_extent * half
    }
}

impl Projector for PointSetProjector {
    type State = PointSetState;

    fn project(&self, step: &Step<PointSetState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());

        for (i, point) in step.state.points.iter().enumerate() {
            let role = step.role_of(&ElementId::Node(i));
            scene.push_shape(Shape::PointMark {
                x: self.to_screen(point[0]),
                // Screen y grows downward; world y grows upward.
                y: self.viewport - self.to_screen(point[1]),
                z: point[2],
                color: theme.color_for(role),
            });
        }
        if step.state.dim == Dimension::Three {
            scene.push_label(8.0, 16.0, "3D", theme.text);
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::geometry::{
        Axis, CoordinateTransform, TransformInput, TransformOp,
    };
    use stepscope_core::Algorithm;

    #[test]
    fn origin_projects_to_viewport_center() {
        let input = TransformInput {
            dim: Dimension::Two,
            points: vec![[0.0, 0.0, 0.0]],
            ops: vec![],
        };
        let trace = CoordinateTransform.run(&input).unwrap();
        let projector = PointSetProjector::default();
        let scene = projector.project(trace.first().unwrap(), &Theme::dark());
        match scene.shapes[0] {
            Shape::PointMark { x, y, .. } => {
                assert_eq!(x, projector.viewport / 2.0);
                assert_eq!(y, projector.viewport / 2.0);
            }
            _ => panic!("expected a point mark"),
        }
    }

    #[test]
    fn rotation_moves_the_mark() {
        let input = TransformInput {
            dim: Dimension::Two,
            points: vec![[5.0, 0.0, 0.0]],
            ops: vec![TransformOp::Rotate {
                axis: Axis::Z,
                degrees: 180.0,
            }],
        };
        let trace = CoordinateTransform.run(&input).unwrap();
        let projector = PointSetProjector::default();
        let theme = Theme::dark();
        let before = projector.project(trace.first().unwrap(), &theme);
        let after = projector.project(trace.get(1).unwrap(), &theme);
        assert_ne!(before.shapes, after.shapes);
    }
}
