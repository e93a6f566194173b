//! Per-draw placement of a unit primitive.
//!
//! A [`TransformParams`] lives for exactly one draw call. It is turned into a
//! model matrix and pushed to the shader, never retained.

use cgmath::{Deg, Matrix, Matrix4, SquareMatrix, Vector3};

/// Scale, per-axis rotation in degrees, and translation of one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: Vector3<f32>,
    /// Rotation around X, Y and Z in degrees.
    pub rotation_degrees: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl TransformParams {
    /// Identity placement (unit scale, no rotation, at the origin).
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_degrees: Vector3::new(0.0, 0.0, 0.0),
            translation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        self.rotation_degrees = Vector3::new(x_deg, y_deg, z_deg);
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }

    /// Model matrix `T * Rx * Ry * Rz * S`.
    ///
    /// The rotation order is fixed: Z is applied to the scaled primitive first,
    /// then Y, then X. Swapping any two factors changes the result.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_x(Deg(self.rotation_degrees.x))
            * Matrix4::from_angle_y(Deg(self.rotation_degrees.y))
            * Matrix4::from_angle_z(Deg(self.rotation_degrees.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for TransformParams {
    fn from(translation: Vector3<f32>) -> Self {
        TransformParams {
            translation,
            ..Default::default()
        }
    }
}

/// Inverse-transpose of the model matrix, used to carry normals through
/// non-uniform scale. Falls back to the model matrix when it is singular
/// (e.g. a zero scale component).
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
    match model.invert() {
        Some(inv) => inv.transpose(),
        None => *model,
    }
}
