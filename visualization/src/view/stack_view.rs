//! Call-stack projection

use stepscope_core::algorithm::CallStackState;
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders a [`CallStackState`] as a pile of frame boxes growing upward
/// from the bottom of the viewport, the memo table (when present) listed
/// alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStackProjector {
    pub viewport_height: f64,
    pub frame_width: f64,
    pub frame_height: f64,
}

impl Default for CallStackProjector {
    fn default() -> Self {
        Self {
            viewport_height: 320.0,
            frame_width: 180.0,
            frame_height: 26.0,
        }
    }
}

impl Projector for CallStackProjector {
    type State = CallStackState;

    fn project(&self, step: &Step<CallStackState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());

        for (depth, frame) in step.state.frames.iter().enumerate() {
            let y = self.viewport_height - (depth as f64 + 1.0) * self.frame_height;
            let role = step.role_of(&ElementId::Frame(depth));
            scene.push_shape(Shape::FrameBox {
                x: 0.0,
                y,
                width: self.frame_width,
                height: self.frame_height,
                color: theme.color_for(role),
            });
            let text = match &frame.result {
                Some(result) => format!("{} = {result}", frame.label),
                None => frame.label.clone(),
            };
            scene.push_label(8.0, y + self.frame_height / 2.0, text, theme.text);
        }

        let memo_x = self.frame_width + 24.0;
        for (i, (arg, value)) in step.state.memo.iter().enumerate() {
            scene.push_label(
                memo_x,
                16.0 + i as f64 * 18.0,
                format!("memo[{arg}] = {value}"),
                theme.text,
            );
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::recursion::Factorial;
    use stepscope_core::Algorithm;

    #[test]
    fn deepest_step_stacks_all_frames() {
        let trace = Factorial.run(&4).unwrap();
        let deepest = trace
            .iter()
            .max_by_key(|s| s.state.depth())
            .unwrap();
        let scene = CallStackProjector::default().project(deepest, &Theme::dark());
        let frames: Vec<f64> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::FrameBox { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(frames.len(), 4);
        // Inner calls stack upward (smaller y).
        for pair in frames.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn returned_frames_show_their_value() {
        let trace = Factorial.run(&3).unwrap();
        let returning = trace
            .iter()
            .find(|s| s.annotation == "factorial(1) returns 1")
            .unwrap();
        let scene = CallStackProjector::default().project(returning, &Theme::dark());
        assert!(scene
            .labels
            .iter()
            .any(|l| l.text == "factorial(1) = 1"));
    }
}
