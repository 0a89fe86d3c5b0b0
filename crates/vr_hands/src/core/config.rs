//! # Application configuration
//!
//! Everything the demo reads at startup lives in one [`AppConfig`] tree so a
//! single `.toml` or `.ron` file can describe a run. Every section has a
//! `Default` reproducing the stock demo, so partial files are fine.
//!
//! ## Sections
//!
//! - **engine**: application name and log level
//! - **camera** / **controls**: viewpoint and orbit constraints
//! - **renderer**: backend settings
//! - **scenery**: background, platform and lights
//! - **hands**: hand models, glove colors and gesture bindings
//! - **props**: gesture-driven objects

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;
use crate::gesture::{default_bindings, GestureBinding};
use crate::hands::HandModelProfile;
use crate::props::{PropGeometry, ReleasePolicy};
use crate::render::{Color, OrbitControlsConfig, RendererSettings};
use crate::scene::Background;
use crate::xr::HandJoint;

/// Core application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Name used in logs and window titles
    pub app_name: String,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            app_name: "VR Hands".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Viewpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Eye height of a standing user in meters
    pub user_height: f32,
    /// Distance from the orbit target along +Z
    pub distance: f32,
}

impl CameraConfig {
    /// Starting camera position
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, self.user_height, self.distance)
    }

    /// Orbit target at eye height above the origin
    pub fn target(&self) -> Vec3 {
        Vec3::new(0.0, self.user_height, 0.0)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.01,
            far: 1000.0,
            user_height: 1.65,
            distance: 6.0,
        }
    }
}

/// Skybox faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Directory holding the face images
    pub path: String,
    /// Face image names in +X, -X, +Y, -Y, +Z, -Z order
    pub faces: [String; 6],
}

impl BackgroundConfig {
    /// Scene background described by this config
    pub fn to_background(&self) -> Background {
        Background::CubeMap {
            path: self.path.clone(),
            faces: self.faces.clone(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let face = |suffix: &str| format!("dark-s_{suffix}.jpg");
        Self {
            path: "media/milkyway/".to_string(),
            faces: [face("px"), face("nx"), face("py"), face("ny"), face("pz"), face("nz")],
        }
    }
}

/// Ground platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Disc radius
    pub radius: f32,
    /// Disc segments
    pub segments: u32,
    /// Surface color
    pub color: Color,
    /// Surface roughness
    pub roughness: f32,
    /// Surface metalness
    pub metalness: f32,
    /// Environment map contribution
    pub env_map_intensity: f32,
    /// Surface opacity
    pub opacity: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            radius: 4.0,
            segments: 12,
            color: Color::from_hex(0xFFEECC),
            roughness: 0.2,
            metalness: 1.0,
            env_map_intensity: 1.0,
            opacity: 1.0,
        }
    }
}

/// Shadow-casting directional light
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Light color
    pub color: Color,
    /// Light position
    pub position: [f32; 3],
    /// Half-extent of the shadow camera
    pub shadow_extent: f32,
    /// Square shadow map resolution
    pub shadow_map_size: u32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            position: [-2.0, 4.0, 0.0],
            shadow_extent: 4.0,
            shadow_map_size: 2048,
        }
    }
}

/// Static environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Skybox
    pub background: BackgroundConfig,
    /// Ground platform
    pub platform: PlatformConfig,
    /// Directional light
    pub sun: SunConfig,
    /// Ambient light color
    pub ambient_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: BackgroundConfig::default(),
            platform: PlatformConfig::default(),
            sun: SunConfig::default(),
            ambient_color: Color::from_hex(0x888888),
        }
    }
}

/// Hand visuals and gesture bindings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsConfig {
    /// Directory the hand model loader reads from
    pub model_path: String,
    /// Visual models in cycling order
    pub models: Vec<HandModelProfile>,
    /// Glove color when not toggled
    pub default_color: Color,
    /// Left glove color
    pub left_color: Color,
    /// Right glove color
    pub right_color: Color,
    /// Length of the controller pointing ray
    pub ray_length: f32,
    /// Show the floating shape readout above each hand
    pub display_frame: bool,
    /// Gesture bindings in priority order
    pub bindings: Vec<GestureBinding>,
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            model_path: "./hands/".to_string(),
            models: HandModelProfile::ALL.to_vec(),
            default_color: Color::WHITE,
            left_color: Color::from_hex(0x00FF00),
            right_color: Color::from_hex(0xFF0000),
            ray_length: 5.0,
            display_frame: true,
            bindings: default_bindings(),
        }
    }
}

/// One gesture-driven prop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropConfig {
    /// Unique prop name, also used by show/hide bindings
    pub name: String,
    /// Shape the classifier must report
    pub shape: String,
    /// Classifier threshold, passed through as-is
    pub threshold: f32,
    /// Joint the prop attaches to while active
    pub joint: HandJoint,
    /// What happens when the shape ends
    #[serde(default)]
    pub release: ReleasePolicy,
    /// Joint must be this close to the prop to pick it up
    #[serde(default)]
    pub grab_radius: Option<f32>,
    /// World position while idle
    pub rest_position: [f32; 3],
    /// Visual
    pub geometry: PropGeometry,
    /// Visual color
    pub color: Color,
    /// Visible before the first activation
    #[serde(default)]
    pub visible_at_rest: bool,
}

impl PropConfig {
    /// Laser beam fired from the index finger tip after holding "fire point"
    pub fn laser() -> Self {
        Self {
            name: "laser".to_string(),
            shape: "fire point".to_string(),
            threshold: 3000.0,
            joint: HandJoint::IndexFingerTip,
            release: ReleasePolicy::Hide,
            grab_radius: None,
            rest_position: [0.0, 0.0, 0.0],
            geometry: PropGeometry::Cylinder { radius: 0.005, length: 2.0 },
            color: Color::from_hex(0xFF2200),
            visible_at_rest: false,
        }
    }

    /// Ball resting in front of the user that can be picked up with a pinch
    pub fn grabbable() -> Self {
        Self {
            name: "grabbable".to_string(),
            shape: "pinch".to_string(),
            threshold: 0.0,
            joint: HandJoint::ThumbTip,
            release: ReleasePolicy::Sticky,
            grab_radius: Some(0.15),
            rest_position: [0.0, 1.2, -0.5],
            geometry: PropGeometry::Sphere { radius: 0.05 },
            color: Color::from_hex(0x3388FF),
            visible_at_rest: true,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Core settings
    pub engine: EngineSettings,
    /// Viewpoint
    pub camera: CameraConfig,
    /// Orbit constraints
    pub controls: OrbitControlsConfig,
    /// Backend settings
    pub renderer: RendererSettings,
    /// Static environment
    pub scenery: SceneConfig,
    /// Hand visuals
    pub hands: HandsConfig,
    /// Gesture-driven props
    pub props: Vec<PropConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            camera: CameraConfig::default(),
            controls: OrbitControlsConfig::default(),
            renderer: RendererSettings::default(),
            scenery: SceneConfig::default(),
            hands: HandsConfig::default(),
            props: vec![PropConfig::laser(), PropConfig::grabbable()],
        }
    }
}

impl Config for AppConfig {}

impl AppConfig {
    /// Replace the prop list
    pub fn with_props(mut self, props: Vec<PropConfig>) -> Self {
        self.props = props;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.engine.log_level = level.into();
        self
    }

    /// Check values that parse fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.camera.fov_degrees <= 0.0 || self.camera.fov_degrees >= 180.0 {
            return invalid(format!("camera fov must be in (0, 180), got {}", self.camera.fov_degrees));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return invalid(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            ));
        }
        let controls = &self.controls;
        let bounds = [
            controls.min_distance,
            controls.max_distance,
            controls.min_polar_angle,
            controls.max_polar_angle,
        ];
        if bounds.iter().any(|b| !b.is_finite()) {
            return invalid("orbit distance and polar angle bounds must be finite".to_string());
        }
        if controls.min_distance > controls.max_distance {
            return invalid("orbit min_distance exceeds max_distance".to_string());
        }
        if controls.min_polar_angle > controls.max_polar_angle {
            return invalid(format!(
                "orbit min_polar_angle {} exceeds max_polar_angle {}",
                controls.min_polar_angle, controls.max_polar_angle
            ));
        }
        if self.hands.models.is_empty() {
            return invalid("at least one hand model is required".to_string());
        }

        let mut names = std::collections::HashSet::new();
        for prop in &self.props {
            if !names.insert(prop.name.as_str()) {
                return invalid(format!("duplicate prop name '{}'", prop.name));
            }
            if prop.shape.is_empty() {
                return invalid(format!("prop '{}' has no shape", prop.name));
            }
            if matches!(prop.grab_radius, Some(r) if r <= 0.0) {
                return invalid(format!("prop '{}' grab radius must be positive", prop.name));
            }
        }

        Ok(())
    }
}
