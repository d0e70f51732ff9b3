//! Math utilities and types
//!
//! World space follows the tracking convention: right-handed, Y-up, meters,
//! with cameras looking down their local -Z axis.

use serde::{Deserialize, Serialize};

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Position relative to the parent frame
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder: replace the rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        Point3::from(self.position + self.rotation * self.scale.component_mul(&point.coords))
    }

    /// Apply this transform to a direction (ignores translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(&vector)
    }

    /// Create a transform from a transformation matrix
    ///
    /// Assumes the matrix holds no shear; scale is taken from the basis lengths.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = translation_of(matrix);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        let rotation_matrix = Mat3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Combine this (parent) transform with a child transform
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.position + self.rotation * (self.scale.component_mul(&other.position)),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Get the inverse transform
    ///
    /// Exact for uniform scale, which is all the scene graph produces.
    pub fn inverse(&self) -> Self {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation * (-self.position.component_mul(&inv_scale));

        Self {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Local up axis (+Y) expressed in the parent frame
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::y()
    }
}

/// Translation column of a homogeneous transform
pub fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Rotation of `angle` radians about the X axis
    pub fn rotation_x(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::x_axis(), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_round_trip_keeps_position_and_rotation() {
        let original = Transform::from_position_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            utils::rotation_x(-constants::HALF_PI),
        );
        let rebuilt = Transform::from_matrix(&original.to_matrix());

        assert_relative_eq!(rebuilt.position, original.position, epsilon = 1e-5);
        assert_relative_eq!(rebuilt.scale, original.scale, epsilon = 1e-5);
        assert!(rebuilt.rotation.angle_to(&original.rotation) < 1e-4);
    }

    #[test]
    fn test_combine_then_inverse_is_identity() {
        let transform = Transform::from_position_rotation(
            Vec3::new(0.5, -1.0, 4.0),
            Quat::from_euler_angles(0.3, 1.1, -0.2),
        );
        let should_be_identity = transform.combine(&transform.inverse());

        assert_relative_eq!(should_be_identity.position, Vec3::zeros(), epsilon = 1e-5);
        assert!(should_be_identity.rotation.angle() < 1e-4);
    }

    #[test]
    fn test_quarter_turn_about_x_lays_xy_plane_flat() {
        // A plane authored facing +Z must face +Y once rotated -90 degrees about X
        let rotation = utils::rotation_x(-constants::HALF_PI);
        let normal = rotation * Vec3::z();
        assert_relative_eq!(normal, Vec3::y(), epsilon = 1e-6);

        // Its height axis (+Y) ends up along -Z
        let height_axis = rotation * Vec3::y();
        assert_relative_eq!(height_axis, -Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_translation_of_reads_last_column() {
        let matrix = Mat4::new_translation(&Vec3::new(0.2, 0.0, 0.3));
        assert_relative_eq!(translation_of(&matrix), Vec3::new(0.2, 0.0, 0.3));
    }
}
