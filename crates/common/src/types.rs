use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Per-axis rotation angles in degrees, applied X, then Y, then Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerDegrees(pub Vec3);

impl EulerDegrees {
    pub const ZERO: Self = Self(Vec3::ZERO);

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(wrap_degrees(x), wrap_degrees(y), wrap_degrees(z)))
    }

    /// Advance every axis by `speed` degrees and wrap the result.
    pub fn advance(&mut self, speed: Vec3) {
        self.0 = Vec3::new(
            wrap_degrees(self.0.x + speed.x),
            wrap_degrees(self.0.y + speed.y),
            wrap_degrees(self.0.z + speed.z),
        );
    }

    /// `Rx * Ry * Rz`, matching three successive right-multiplied rotations.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.0.x.to_radians())
            * Mat4::from_rotation_y(self.0.y.to_radians())
            * Mat4::from_rotation_z(self.0.z.to_radians())
    }
}

/// Per-object transform: translation, scale, rotation.
///
/// Rebuilt every frame from scene state; only the accumulators that feed it
/// persist between frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: EulerDegrees,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: EulerDegrees::ZERO,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    pub fn with_rotation(mut self, rotation: EulerDegrees) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix: `T * S * Rx * Ry * Rz`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_scale(self.scale)
            * self.rotation.rotation_matrix()
    }
}

/// Inverse-transpose of a model matrix, used to carry normals into world space.
///
/// Singular matrices fall back to identity.
pub fn normal_matrix(model: &Mat4) -> Mat4 {
    if model.determinant().abs() <= f32::EPSILON {
        return Mat4::IDENTITY;
    }
    model.inverse().transpose()
}
