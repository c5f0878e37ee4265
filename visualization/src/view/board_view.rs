//! Chessboard projection for N-Queens states

use stepscope_core::algorithm::BoardState;
use stepscope_core::{ElementId, Step};

use crate::projector::Projector;
use crate::scene::{Color, Scene, Shape};
use crate::theme::Theme;

/// Renders a [`BoardState`] as an n x n checkered board with a queen glyph
/// on every occupied square. Highlighted squares take their role color in
/// place of the checker color.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardProjector {
    pub square_size: f64,
}

impl Default for BoardProjector {
    fn default() -> Self {
        Self { square_size: 40.0 }
    }
}

impl BoardProjector {
    fn checker(&self, theme: &Theme, row: usize, col: usize) -> Color {
        if (row + col) % 2 == 0 {
            theme.base
        } else {
            theme.background
        }
    }
}

impl Projector for BoardProjector {
    type State = BoardState;

    fn project(&self, step: &Step<BoardState>, theme: &Theme) -> Scene {
        let mut scene = Scene::new(step.annotation.clone());
        let size = self.square_size;

        for row in 0..step.state.n {
            for col in 0..step.state.n {
                let role = step.role_of(&ElementId::Cell { row, col });
                let color = match role {
                    Some(role) => theme.color_for(Some(role)),
                    None => self.checker(theme, row, col),
                };
                scene.push_shape(Shape::Cell {
                    x: col as f64 * size,
                    y: row as f64 * size,
                    size,
                    color,
                });
            }
        }

        for (row, queen) in step.state.queens.iter().enumerate() {
            if let Some(col) = queen {
                scene.push_shape(Shape::QueenGlyph {
                    x: *col as f64 * size + size / 2.0,
                    y: row as f64 * size + size / 2.0,
                    size: size * 0.6,
                    color: theme.text,
                });
            }
        }
        scene
    }
}
