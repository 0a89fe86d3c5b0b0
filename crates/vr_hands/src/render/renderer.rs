//! Rendering backend abstraction
//!
//! The application never rasterizes anything itself. It configures a
//! [`RenderBackend`], keeps its size in sync with the viewport and hands it
//! the scene and camera once per frame. [`HeadlessRenderer`] implements the
//! trait without a GPU and records what it was asked to draw.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{NodeKind, SceneGraph, ShadowFlags};

use super::camera::PerspectiveCamera;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Renderer initialization failed during setup
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame was submitted before [`RenderBackend::configure`]
    #[error("Renderer used before it was configured")]
    NotConfigured,

    /// Viewport with a zero dimension
    #[error("Invalid viewport size {width}x{height}")]
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),
}

/// Shadow map filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMapType {
    /// Unfiltered
    Basic,
    /// Percentage-closer filtering
    Pcf,
    /// Percentage-closer filtering with soft edges
    PcfSoft,
}

/// Tone mapping operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// No tone mapping
    None,
    /// Linear exposure scaling
    Linear,
    /// ACES filmic curve
    AcesFilmic,
}

/// Output color encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorEncoding {
    /// Linear output
    Linear,
    /// sRGB output
    Srgb,
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Multisample antialiasing
    pub antialias: bool,
    /// Shadow maps enabled
    pub shadows_enabled: bool,
    /// Shadow map filtering
    pub shadow_map_type: ShadowMapType,
    /// Physically based light falloff
    pub physically_correct_lights: bool,
    /// Tone mapping operator
    pub tone_mapping: ToneMapping,
    /// Output encoding
    pub output_encoding: ColorEncoding,
    /// Render into an XR session when one is active
    pub xr_enabled: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            shadows_enabled: true,
            shadow_map_type: ShadowMapType::PcfSoft,
            physically_correct_lights: true,
            tone_mapping: ToneMapping::AcesFilmic,
            output_encoding: ColorEncoding::Srgb,
            xr_enabled: true,
        }
    }
}

/// Rendering backend trait
///
/// Implemented by whatever actually draws the scene. All calls happen on
/// the frame thread.
pub trait RenderBackend {
    /// Apply renderer settings; must be called before the first frame
    fn configure(&mut self, settings: &RendererSettings) -> BackendResult<()>;

    /// Set the device pixel ratio
    fn set_pixel_ratio(&mut self, ratio: f32);

    /// Resize the drawing surface
    fn set_size(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Current drawing surface size (width, height)
    fn size(&self) -> (u32, u32);

    /// Draw one frame of `scene` as seen from `camera`
    fn render(&mut self, scene: &SceneGraph, camera: &PerspectiveCamera) -> BackendResult<()>;
}

/// What a single frame contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Visible meshes and lines
    pub drawn_nodes: usize,
    /// Lights in the scene
    pub lights: usize,
    /// Visible shadow casters
    pub shadow_casters: usize,
}

/// Backend that renders nothing and counts instead
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    settings: Option<RendererSettings>,
    size: (u32, u32),
    pixel_ratio: f32,
    frames_rendered: u64,
    last_frame: FrameStats,
}

impl HeadlessRenderer {
    /// Create an unconfigured renderer
    pub fn new() -> Self {
        Self {
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }

    /// Settings applied by the last `configure`
    pub fn settings(&self) -> Option<&RendererSettings> {
        self.settings.as_ref()
    }

    /// Device pixel ratio
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of frames rendered so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Contents of the last rendered frame
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }
}

impl RenderBackend for HeadlessRenderer {
    fn configure(&mut self, settings: &RendererSettings) -> BackendResult<()> {
        log::info!(
            "Configuring headless renderer: shadows={} ({:?}), tone mapping {:?}, output {:?}, xr={}",
            settings.shadows_enabled,
            settings.shadow_map_type,
            settings.tone_mapping,
            settings.output_encoding,
            settings.xr_enabled
        );
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn set_size(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }
        log::debug!("Renderer resized to {}x{}", width, height);
        self.size = (width, height);
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &SceneGraph, _camera: &PerspectiveCamera) -> BackendResult<()> {
        let settings = self.settings.as_ref().ok_or(RenderError::NotConfigured)?;
        let shadows_enabled = settings.shadows_enabled;

        let mut stats = FrameStats::default();
        for id in scene
            .descendants(scene.root())
            .map_err(|e| RenderError::RenderingFailed(e.to_string()))?
        {
            let Ok(node) = scene.get(id) else { continue };
            match &node.kind {
                NodeKind::Light(_) => stats.lights += 1,
                NodeKind::Mesh { .. } | NodeKind::Line { .. } if scene.is_effectively_visible(id) => {
                    stats.drawn_nodes += 1;
                    if shadows_enabled && node.shadows.contains(ShadowFlags::CAST) {
                        stats.shadow_casters += 1;
                    }
                }
                _ => {}
            }
        }

        self.frames_rendered += 1;
        self.last_frame = stats;
        log::trace!("Frame {}: {:?}", self.frames_rendered, stats);
        Ok(())
    }
}
