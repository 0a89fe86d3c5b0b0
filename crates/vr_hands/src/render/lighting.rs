//! Lighting primitives

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Orthographic bounds of a directional light's shadow camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowCamera {
    /// Top bound
    pub top: f32,
    /// Bottom bound
    pub bottom: f32,
    /// Left bound
    pub left: f32,
    /// Right bound
    pub right: f32,
}

impl ShadowCamera {
    /// Symmetric bounds `[-extent, extent]` on both axes
    pub fn symmetric(extent: f32) -> Self {
        Self {
            top: extent,
            bottom: -extent,
            left: -extent,
            right: extent,
        }
    }
}

/// Shadow settings of a shadow-casting light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Shadow camera frustum
    pub camera: ShadowCamera,
    /// Shadow map resolution (width, height)
    pub map_size: (u32, u32),
}

/// Light types
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Directional light (parallel rays, positioned by its node transform)
    Directional {
        /// Shadow configuration when the light casts shadows
        shadow: Option<ShadowSettings>,
    },
    /// Uniform ambient light
    Ambient,
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub kind: LightKind,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
}

impl Light {
    /// Create a directional light without shadows
    pub fn directional(color: Color) -> Self {
        Self {
            kind: LightKind::Directional { shadow: None },
            color,
            intensity: 1.0,
        }
    }

    /// Create an ambient light
    pub fn ambient(color: Color) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity: 1.0,
        }
    }

    /// Enable shadow casting (directional lights only)
    pub fn with_shadow(mut self, settings: ShadowSettings) -> Self {
        if let LightKind::Directional { shadow } = &mut self.kind {
            *shadow = Some(settings);
        } else {
            log::warn!("Ignoring shadow settings on a non-directional light");
        }
        self
    }

    /// Whether this light casts shadows
    pub fn casts_shadow(&self) -> bool {
        matches!(self.kind, LightKind::Directional { shadow: Some(_) })
    }
}
