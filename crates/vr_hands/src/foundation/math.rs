//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the local-transform type used by scene nodes.

pub use nalgebra::{Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Local transform of a scene node: position, rotation and scale relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,

    /// Rotation relative to the parent
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

    /// Create a transform rotated about the X axis
    pub fn from_rotation_x(angle: f32) -> Self {
        Self {
            rotation: Quat::from_axis_angle(&Vec3::x_axis(), angle),
            ..Default::default()
        }
    }

    /// Combine this (parent) transform with a child transform
    pub fn combine(&self, other: &Transform) -> Transform {
        Transform {
            position: self.position + self.rotation * self.scale.component_mul(&other.position),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> Transform {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_scale.component_mul(&(inv_rotation * -self.position));

        Transform {
            position: inv_position,
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// Local transform that places `self` (a world transform) under `parent`
    ///
    /// `parent.combine(&self.relative_to(parent))` reproduces `self` exactly
    /// for position and rotation; scale is exact unless `parent` mixes
    /// non-uniform scale with rotation.
    pub fn relative_to(&self, parent: &Transform) -> Transform {
        let inv_scale = Vec3::new(1.0 / parent.scale.x, 1.0 / parent.scale.y, 1.0 / parent.scale.z);
        let inv_rotation = parent.rotation.inverse();

        Transform {
            position: inv_scale.component_mul(&(inv_rotation * (self.position - parent.position))),
            rotation: inv_rotation * self.rotation,
            scale: self.scale.component_mul(&inv_scale),
        }
    }
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
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_combine_with_inverse_is_identity() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let round = t.combine(&t.inverse());
        assert_relative_eq!(round.position, Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(round.rotation, Quat::identity(), epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_with_non_uniform_scale() {
        let t = Transform {
            position: Vec3::new(1.0, -2.0, 0.5),
            rotation: Quat::from_axis_angle(&Vec3::z_axis(), 0.9),
            scale: Vec3::new(2.0, 0.5, 3.0),
        };
        let round = t.combine(&t.inverse());
        assert_relative_eq!(round.position, Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(round.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_relative_to_restores_world_position() {
        let parent = Transform {
            position: Vec3::new(0.3, 1.2, -0.4),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 1.1),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };
        let world = Transform {
            position: Vec3::new(-1.0, 0.5, 2.0),
            rotation: Quat::from_axis_angle(&Vec3::x_axis(), 0.4),
            scale: Vec3::new(1.0, 1.0, 1.0),
        };
        let back = parent.combine(&world.relative_to(&parent));
        assert_relative_eq!(back.position, world.position, epsilon = 1e-5);
        assert_relative_eq!(back.rotation, world.rotation, epsilon = 1e-5);
    }

    #[test]
    fn test_child_position_follows_parent_rotation() {
        let parent = Transform::from_rotation_x(constants::HALF_PI);
        let child = Transform::from_position(Vec3::new(0.0, 1.0, 0.0));
        let world = parent.combine(&child);
        assert_relative_eq!(world.position, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
    }
}
