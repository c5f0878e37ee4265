//! Declarative scene model
//!
//! A scene is the complete description of one rendered frame: shapes, text
//! labels, and the step annotation. It contains no behavior and no
//! references into the step that produced it, so scenes can be serialized
//! for golden comparisons or handed to any drawing backend.

use serde::{Deserialize, Serialize};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// One drawable primitive, in scene coordinates (y grows downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Vertical bar anchored at its bottom-left corner.
    Bar {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Square cell of a table or board.
    Cell {
        x: f64,
        y: f64,
        size: f64,
        color: Color,
    },
    /// Filled circle for a graph or tree node.
    NodeDot {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    /// Straight line between two nodes.
    Edge {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
    /// Queen marker centered on a board square.
    QueenGlyph {
        x: f64,
        y: f64,
        size: f64,
        color: Color,
    },
    /// Call-stack frame rectangle.
    FrameBox {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    /// Point of a transformed point set; `z` is carried for 3D backends.
    PointMark {
        x: f64,
        y: f64,
        z: f64,
        color: Color,
    },
}

/// Positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: Color,
}

/// One complete rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub shapes: Vec<Shape>,
    pub labels: Vec<Label>,
    /// The step annotation, displayed as the frame caption.
    pub annotation: String,
}

impl Scene {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            shapes: Vec::new(),
            labels: Vec::new(),
            annotation: annotation.into(),
        }
    }

    pub fn push_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn push_label(&mut self, x: f64, y: f64, text: impl Into<String>, color: Color) {
        self.labels.push(Label {
            x,
            y,
            text: text.into(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_serializes_round_trip() {
        let mut scene = Scene::new("caption");
        scene.push_shape(Shape::Bar {
            x: 0.0,
            y: 100.0,
            width: 10.0,
            height: 40.0,
            color: Color::rgb(200, 200, 200),
        });
        scene.push_label(0.0, 110.0, "7", Color::rgb(255, 255, 255));
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(scene, back);
    }
}
