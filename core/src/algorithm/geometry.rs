//! Coordinate transform cores
//!
//! Applies a program of rotate, scale, and translate operations to a 2D or
//! 3D point set. Each operation composes into an accumulated 4x4 matrix and
//! records one step with the transformed point positions, so the projector
//! can animate the points moving frame by frame.

use serde::{Deserialize, Serialize};

use crate::algorithm::state::{Dimension, PointSetState};
use crate::algorithm::traits::{Algorithm, AlgorithmError, AlgorithmId, Category};
use crate::step::{HighlightRole, StepRecorder, StepTrace};

/// Most points accepted by the transform core.
pub const MAX_POINTS: usize = 64;
/// Longest transform program.
pub const MAX_TRANSFORM_OPS: usize = 32;

/// Rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One operation of a transform program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    Rotate { axis: Axis, degrees: f64 },
    Scale { x: f64, y: f64, z: f64 },
    Translate { x: f64, y: f64, z: f64 },
}

impl TransformOp {
    /// Row-major 4x4 matrix for this operation.
    fn matrix(&self) -> [[f64; 4]; 4] {
        let mut m = PointSetState::identity();
        match *self {
            TransformOp::Rotate { axis, degrees } => {
                let theta = degrees.to_radians();
                let (sin, cos) = theta.sin_cos();
                let (a, b) = match axis {
                    Axis::X => (1, 2),
                    Axis::Y => (2, 0),
                    Axis::Z => (0, 1),
                };
                m[a][a] = cos;
                m[a][b] = -sin;
                m[b][a] = sin;
                m[b][b] = cos;
            }
            TransformOp::Scale { x, y, z } => {
                m[0][0] = x;
                m[1][1] = y;
                m[2][2] = z;
            }
            TransformOp::Translate { x, y, z } => {
                m[0][3] = x;
                m[1][3] = y;
                m[2][3] = z;
            }
        }
        m
    }

    fn describe(&self) -> String {
        match *self {
            TransformOp::Rotate { axis, degrees } => {
                format!("Rotated {degrees} degrees about the {axis:?} axis")
            }
            TransformOp::Scale { x, y, z } => format!("Scaled by ({x}, {y}, {z})"),
            TransformOp::Translate { x, y, z } => format!("Translated by ({x}, {y}, {z})"),
        }
    }
}

fn mat_mul(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn apply(m: &[[f64; 4]; 4], p: [f64; 3]) -> [f64; 3] {
    let h = [p[0], p[1], p[2], 1.0];
    let mut out = [0.0; 3];
    for (i, coord) in out.iter_mut().enumerate() {
        *coord = (0..4).map(|k| m[i][k] * h[k]).sum();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformInput {
    pub dim: Dimension,
    pub points: Vec<[f64; 3]>,
    pub ops: Vec<TransformOp>,
}

/// Transform program applied to a point set.
#[derive(Debug, Default)]
pub struct CoordinateTransform;

impl Algorithm for CoordinateTransform {
    type Input = TransformInput;
    type State = PointSetState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("coordinate-transform")
    }

    fn name(&self) -> &'static str {
        "Coordinate Transform"
    }

    fn category(&self) -> Category {
        Category::Geometry
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if input.points.is_empty() {
            return Err(AlgorithmError::invalid_input("point set must not be empty"));
        }
        if input.points.len() > MAX_POINTS {
            return Err(AlgorithmError::invalid_input(format!(
                "{} points exceed maximum {MAX_POINTS}",
                input.points.len()
            )));
        }
        if input.ops.len() > MAX_TRANSFORM_OPS {
            return Err(AlgorithmError::invalid_input(format!(
                "{} operations exceed maximum {MAX_TRANSFORM_OPS}",
                input.ops.len()
            )));
        }
        for op in &input.ops {
            if let TransformOp::Scale { x, y, z } = op {
                if *x == 0.0 || *y == 0.0 || *z == 0.0 {
                    return Err(AlgorithmError::invalid_input(
                        "scale factors must be non-zero",
                    ));
                }
            }
        }
        if input.dim == Dimension::Two {
            if input.points.iter().any(|p| p[2] != 0.0) {
                return Err(AlgorithmError::invalid_input(
                    "2D points must have z = 0",
                ));
            }
            for op in &input.ops {
                let planar = match *op {
                    TransformOp::Rotate { axis, .. } => axis == Axis::Z,
                    TransformOp::Translate { z, .. } => z == 0.0,
                    TransformOp::Scale { z, .. } => z == 1.0,
                };
                if !planar {
                    return Err(AlgorithmError::invalid_input(format!(
                        "operation leaves the 2D plane: {op:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut state = PointSetState::new(input.dim, input.points.clone());
        recorder.record(
            &state,
            format!("{} points in the initial frame", state.points.len()),
        );

        for op in &input.ops {
            let m = op.matrix();
            state.transform = mat_mul(&m, &state.transform);
            for point in &mut state.points {
                *point = apply(&m, *point);
            }
            recorder.record(&state, op.describe());
        }

        let highlights: Vec<_> = (0..state.points.len())
            .map(|i| (PointSetState::point(i), HighlightRole::Result))
            .collect();
        recorder.record_with(
            &state,
            format!("Applied {} transforms", input.ops.len()),
            highlights,
        );
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rotation_about_z_moves_unit_x_to_unit_y() {
        let input = TransformInput {
            dim: Dimension::Two,
            points: vec![[1.0, 0.0, 0.0]],
            ops: vec![TransformOp::Rotate {
                axis: Axis::Z,
                degrees: 90.0,
            }],
        };
        let trace = CoordinateTransform.run(&input).unwrap();
        let p = trace.final_state().unwrap().points[0];
        assert!(close(p[0], 0.0) && close(p[1], 1.0) && close(p[2], 0.0));
    }

    #[test]
    fn scale_then_translate_composes() {
        let input = TransformInput {
            dim: Dimension::Two,
            points: vec![[2.0, 3.0, 0.0]],
            ops: vec![
                TransformOp::Scale {
                    x: 2.0,
                    y: 2.0,
                    z: 1.0,
                },
                TransformOp::Translate {
                    x: 1.0,
                    y: -1.0,
                    z: 0.0,
                },
            ],
        };
        let trace = CoordinateTransform.run(&input).unwrap();
        let last = trace.final_state().unwrap();
        assert!(close(last.points[0][0], 5.0) && close(last.points[0][1], 5.0));
        // The accumulated matrix reproduces the final position from the input.
        let replayed = apply(&last.transform, [2.0, 3.0, 0.0]);
        assert!(close(replayed[0], 5.0) && close(replayed[1], 5.0));
    }

    #[test]
    fn three_d_rotation_about_x() {
        let input = TransformInput {
            dim: Dimension::Three,
            points: vec![[0.0, 1.0, 0.0]],
            ops: vec![TransformOp::Rotate {
                axis: Axis::X,
                degrees: 90.0,
            }],
        };
        let trace = CoordinateTransform.run(&input).unwrap();
        let p = trace.final_state().unwrap().points[0];
        assert!(close(p[0], 0.0) && close(p[1], 0.0) && close(p[2], 1.0));
    }

    #[test]
    fn planar_violations_rejected() {
        let off_plane = TransformInput {
            dim: Dimension::Two,
            points: vec![[0.0, 0.0, 1.0]],
            ops: vec![],
        };
        assert!(CoordinateTransform.validate(&off_plane).is_err());

        let bad_axis = TransformInput {
            dim: Dimension::Two,
            points: vec![[1.0, 0.0, 0.0]],
            ops: vec![TransformOp::Rotate {
                axis: Axis::X,
                degrees: 45.0,
            }],
        };
        assert!(CoordinateTransform.validate(&bad_axis).is_err());

        let zero_scale = TransformInput {
            dim: Dimension::Three,
            points: vec![[1.0, 0.0, 0.0]],
            ops: vec![TransformOp::Scale {
                x: 0.0,
                y: 1.0,
                z: 1.0,
            }],
        };
        assert!(CoordinateTransform.validate(&zero_scale).is_err());
    }
}
