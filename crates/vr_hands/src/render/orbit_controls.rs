//! Orbit controls
//!
//! Keeps the camera on a sphere around a target point. Rotation and dolly
//! requests accumulate and are applied, together with the distance and polar
//! angle constraints, on the next [`OrbitControls::update`].

use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants, Vec3};

use super::camera::PerspectiveCamera;

const POLAR_EPSILON: f32 = 1e-6;

/// Orbit constraint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitControlsConfig {
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Farthest allowed distance to the target
    pub max_distance: f32,
    /// Smallest polar angle (0 = looking straight down)
    pub min_polar_angle: f32,
    /// Largest polar angle (π = looking straight up)
    pub max_polar_angle: f32,
}

impl Default for OrbitControlsConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: 100.0,
            min_polar_angle: 0.0,
            max_polar_angle: constants::PI,
        }
    }
}

/// Camera orbit around a target
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits
    pub target: Vec3,
    config: OrbitControlsConfig,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitControls {
    /// Create controls orbiting `target`
    pub fn new(target: Vec3, config: OrbitControlsConfig) -> Self {
        Self {
            target,
            config,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    /// Request an azimuthal (`theta`) and polar (`phi`) rotation in radians
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        self.pending_theta += delta_theta;
        self.pending_phi += delta_phi;
    }

    /// Request a distance change; `factor` < 1 moves closer
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 {
            self.pending_scale *= factor;
        }
    }

    /// Apply pending input and constraints to `camera`
    ///
    /// Returns whether the camera position changed.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let radius = offset.norm();

        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, constants::HALF_PI)
        };

        theta += self.pending_theta;
        phi += self.pending_phi;
        phi = phi
            .clamp(self.config.min_polar_angle, self.config.max_polar_angle)
            .clamp(POLAR_EPSILON, constants::PI - POLAR_EPSILON);

        let radius = (radius * self.pending_scale).clamp(self.config.min_distance, self.config.max_distance);

        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );

        let new_position = self.target + new_offset;
        let moved = (new_position - camera.position).norm_squared() > 1e-10;
        camera.set_position(new_position);
        camera.look_at(self.target);
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::new(0.0, 1.65, 6.0), 75.0, 1.0, 0.01, 1000.0)
    }

    #[test]
    fn test_update_without_input_keeps_position_and_aims() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.65, 0.0), OrbitControlsConfig::default());
        assert!(!controls.update(&mut cam));
        assert_relative_eq!(cam.position, Vec3::new(0.0, 1.65, 6.0), epsilon = 1e-4);
        assert_relative_eq!(cam.target, Vec3::new(0.0, 1.65, 0.0));
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut cam = camera();
        let config = OrbitControlsConfig { max_distance: 3.0, ..Default::default() };
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.65, 0.0), config);
        assert!(controls.update(&mut cam));
        assert_relative_eq!((cam.position - controls.target).norm(), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotate_keeps_radius() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.65, 0.0), OrbitControlsConfig::default());
        controls.rotate(constants::HALF_PI, 0.0);
        controls.update(&mut cam);
        assert_relative_eq!(cam.position, Vec3::new(6.0, 1.65, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_polar_angle_limit() {
        let mut cam = camera();
        let config = OrbitControlsConfig { max_polar_angle: constants::HALF_PI, ..Default::default() };
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.65, 0.0), config);
        controls.rotate(0.0, 1.0);
        controls.update(&mut cam);
        assert!(cam.position.y >= 1.65 - 1e-4);
    }

    #[test]
    fn test_dolly_scales_distance() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::new(0.0, 1.65, 0.0), OrbitControlsConfig::default());
        controls.dolly(0.5);
        controls.update(&mut cam);
        assert_relative_eq!((cam.position - controls.target).norm(), 3.0, epsilon = 1e-4);
    }
}
