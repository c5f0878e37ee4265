//! Table projection for matrix states

use stepscope_core::algorithm::MatrixState;
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Scene, Shape};
use crate::theme::Theme;

/// Renders a [`MatrixState`] as a grid of cells with the cell value printed
/// inside each filled cell and header labels along both edges.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixProjector {
    pub cell_size: f64,
    /// Space reserved for the header labels.
    pub margin: f64,
}

impl Default for MatrixProjector {
    fn default() -> Self {
        Self {
            cell_size: 28.0,
            margin: 32.0,
        }
    }
}

impl Projector for MatrixProjector {
    type State = MatrixState;

    fn project(&self, step: &Step<MatrixState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());
        let size = self.cell_size;

        for (col, text) in step.state.col_labels.iter().enumerate() {
            if !text.is_empty() {
                scene.push_label(
                    self.margin + col as f64 * size + size / 2.0,
                    self.margin - 6.0,
                    text.clone(),
                    theme.text,
                );
            }
        }
        for (row, text) in step.state.row_labels.iter().enumerate() {
            if !text.is_empty() {
                scene.push_label(
                    self.margin - 6.0,
                    self.margin + row as f64 * size + size / 2.0,
                    text.clone(),
                    theme.text,
                );
            }
        }

        for row in 0..step.state.rows {
            for col in 0..step.state.cols {
                let x = self.margin + col as f64 * size;
                let y = self.margin + row as f64 * size;
                let role = step.role_of(&ElementId::Cell { row, col });
                scene.push_shape(Shape::Cell {
                    x,
                    y,
                    size,
                    color: theme.color_for(role),
                });
                if let Some(value) = step.state.get(row, col) {
                    scene.push_label(
                        x + size / 2.0,
                        y + size / 2.0,
                        value.to_string(),
                        theme.text,
                    );
                }
            }
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepscope_core::algorithm::dp::{CoinChange, CoinChangeInput};
    use stepscope_core::Algorithm;

    #[test]
    fn grid_has_one_cell_per_table_slot() {
        let input = CoinChangeInput {
            coins: vec![1, 5],
            amount: 6,
        };
        let trace = CoinChange.run(&input).unwrap();
        let scene = MatrixProjector::default().project(trace.last().unwrap(), &Theme::dark());
        let cells = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Cell { .. }))
            .count();
        assert_eq!(cells, 7);
    }

    #[test]
    fn unfilled_cells_carry_no_value_label() {
        let input = CoinChangeInput {
            coins: vec![5],
            amount: 3,
        };
        let trace = CoinChange.run(&input).unwrap();
        let scene = MatrixProjector::default().project(trace.last().unwrap(), &Theme::dark());
        // Column headers 0..=3 plus the single filled cell ("0" at amount 0).
        let value_labels = scene
            .labels
            .iter()
            .filter(|l| l.y > MatrixProjector::default().margin)
            .count();
        assert_eq!(value_labels, 1);
    }
}
