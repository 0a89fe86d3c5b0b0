//! # Perspective camera
//!
//! Right-handed, Y-up camera with OpenGL-style clip space, matching what the
//! WebXR renderer expects. The projection matrix is cached and must be
//! refreshed with [`PerspectiveCamera::update_projection_matrix`] after any
//! projection parameter changes, the same contract the browser renderer uses.

use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// 3D camera for perspective projection
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    projection: Mat4,
}

impl PerspectiveCamera {
    /// Create a new perspective camera looking down -Z
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn new(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            target: position - Vec3::z(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            projection: Mat4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to reduce noise during window
    /// resize events. Call [`Self::update_projection_matrix`] afterwards.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Recompute the cached projection matrix from fov, aspect, near and far
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::new_perspective(self.aspect, self.fov, self.near, self.far);
    }

    /// Cached projection matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }
}
