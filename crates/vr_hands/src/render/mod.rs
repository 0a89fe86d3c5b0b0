//! Rendering surface
//!
//! Descriptions of what to draw (colors, materials, lights), the camera and
//! its orbit controls, and the [`RenderBackend`] boundary to whatever does
//! the drawing.

pub mod camera;
pub mod color;
pub mod lighting;
pub mod material;
pub mod orbit_controls;
pub mod renderer;

pub use camera::PerspectiveCamera;
pub use color::Color;
pub use lighting::{Light, LightKind, ShadowCamera, ShadowSettings};
pub use material::{Material, MaterialKind};
pub use orbit_controls::{OrbitControls, OrbitControlsConfig};
pub use renderer::{
    BackendResult, ColorEncoding, FrameStats, HeadlessRenderer, RenderBackend, RenderError,
    RendererSettings, ShadowMapType, ToneMapping,
};
