//! Material descriptions handed to the rendering backend

use super::color::Color;

/// Shading model of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Unlit, flat color
    Basic,
    /// Physically based (metalness / roughness)
    Standard,
    /// Line primitives
    Line,
}

/// Material properties for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Shading model
    pub kind: MaterialKind,

    /// Base color
    pub color: Color,

    /// Metalness factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,

    /// Environment map contribution
    pub env_map_intensity: f32,

    /// Whether alpha blending is enabled
    pub transparent: bool,

    /// Opacity (0.0 = transparent, 1.0 = opaque)
    pub opacity: f32,
}

impl Material {
    /// Create a new material with default properties
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            env_map_intensity: 1.0,
            transparent: false,
            opacity: 1.0,
        }
    }

    /// Unlit material
    pub fn basic(color: Color) -> Self {
        Self::new(MaterialKind::Basic).with_color(color)
    }

    /// Physically based material
    pub fn standard(color: Color) -> Self {
        Self::new(MaterialKind::Standard).with_color(color)
    }

    /// Line material
    pub fn line(color: Color) -> Self {
        Self::new(MaterialKind::Line).with_color(color)
    }

    /// Set the base color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the metalness factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the environment map intensity
    pub fn with_env_map_intensity(mut self, intensity: f32) -> Self {
        self.env_map_intensity = intensity.max(0.0);
        self
    }

    /// Enable blending with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}
