//! Bar-chart projection for array states

use stepscope_core::algorithm::ArrayState;
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders an [`ArrayState`] as a row of bars scaled to the viewport
/// height, one bar per slot, with the value printed under each bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayProjector {
    pub viewport_height: f64,
    pub bar_width: f64,
    pub bar_gap: f64,
}

impl Default for ArrayProjector {
    fn default() -> Self {
        Self {
            viewport_height: 240.0,
            bar_width: 18.0,
            bar_gap: 4.0,
        }
    }
}

impl Projector for ArrayProjector {
    type State = ArrayState;

    fn project(&self, step: &Step<ArrayState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());
        let max = step.state.values.iter().copied().max().unwrap_or(1).max(1) as f64;

        for (i, &value) in step.state.values.iter().enumerate() {
            let height = (value as f64 / max) * self.viewport_height;
            let x = i as f64 * (self.bar_width + self.bar_gap);
            let color = theme.color_for(step.role_of(&ElementId::Index(i)));
            scene.push_shape(Shape::Bar {
                x,
                y: self.viewport_height,
                width: self.bar_width,
                height,
                color,
            });
            scene.push_label(
                x,
                self.viewport_height + 14.0,
                value.to_string(),
                theme.text,
            );
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::sorting::BubbleSort;
    use stepscope_core::Algorithm;

    #[test]
    fn one_bar_per_value_scaled_to_viewport() {
        let trace = BubbleSort.run(&vec![3, 1, 2]).unwrap();
        let projector = ArrayProjector::default();
        let scene = projector.project(trace.first().unwrap(), &Theme::dark());

        let bars: Vec<_> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Bar { height, .. } => Some(*height),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 3);
        // The maximum value fills the viewport exactly.
        assert_eq!(bars[0], projector.viewport_height);
        assert!(bars[1] < bars[0] && bars[2] < bars[0]);
        assert_eq!(scene.labels.len(), 3);
    }

    #[test]
    fn projection_is_pure() {
        let trace = BubbleSort.run(&vec![4, 2, 5, 1]).unwrap();
        let projector = ArrayProjector::default();
        let theme = Theme::dark();
        let step = trace.get(2).unwrap();
        assert_eq!(projector.project(step, &theme), projector.project(step, &theme));
    }

    #[test]
    fn highlighted_bars_use_role_colors() {
        let trace = BubbleSort.run(&vec![2, 1]).unwrap();
        let theme = Theme::dark();
        let last = trace.last().unwrap();
        let scene = ArrayProjector::default().project(last, &theme);
        // The final step marks every slot as part of the result.
        for shape in &scene.shapes {
            if let Shape::Bar { color, .. } = shape {
                assert_eq!(*color, theme.result);
            }
        }
    }
}
