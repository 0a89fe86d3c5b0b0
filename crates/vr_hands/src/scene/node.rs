//! Scene node payloads

use bitflags::bitflags;

use crate::foundation::math::{Transform, Vec3};
use crate::render::lighting::Light;
use crate::render::material::Material;

use super::NodeId;

bitflags! {
    /// Shadow participation of a node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShadowFlags: u8 {
        /// Node occludes light
        const CAST = 0b01;
        /// Node shows shadows cast onto it
        const RECEIVE = 0b10;
    }
}

/// Geometry primitives understood by the rendering backend
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Flat disc in the XY plane
    Circle {
        /// Disc radius
        radius: f32,
        /// Number of outer segments
        segments: u32,
    },
    /// Axis-aligned box
    Box {
        /// Size along X, Y and Z
        size: Vec3,
    },
    /// UV sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Cylinder along the local -Z axis
    Cylinder {
        /// Cylinder radius
        radius: f32,
        /// Cylinder length
        length: f32,
    },
    /// Skinned hand mesh supplied by the hand model loader
    HandMesh {
        /// Use the low polygon variant
        lowpoly: bool,
    },
    /// Controller mesh supplied by the controller model loader
    ControllerMesh,
}

/// What a node represents
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node
    Group,
    /// Renderable geometry
    Mesh {
        /// Geometry to draw
        geometry: Geometry,
        /// Material to draw it with
        material: Material,
    },
    /// Polyline
    Line {
        /// Line vertices in local space
        points: Vec<Vec3>,
        /// Line material
        material: Material,
    },
    /// Light source
    Light(Light),
    /// Floating text panel
    Label {
        /// Displayed text
        text: String,
    },
}

impl NodeKind {
    /// Material of shaded nodes, `None` for groups, lights and labels
    pub fn material(&self) -> Option<&Material> {
        match self {
            Self::Mesh { material, .. } | Self::Line { material, .. } => Some(material),
            _ => None,
        }
    }

    /// Mutable material of shaded nodes
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match self {
            Self::Mesh { material, .. } | Self::Line { material, .. } => Some(material),
            _ => None,
        }
    }
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name
    pub name: String,
    /// Payload
    pub kind: NodeKind,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Visibility flag (hidden nodes hide their subtree)
    pub visible: bool,
    /// Shadow participation
    pub shadows: ShadowFlags,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// Create a visible, untransformed node
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::identity(),
            visible: true,
            shadows: ShadowFlags::empty(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create an empty group
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Create a mesh node
    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh { geometry, material })
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set shadow participation
    pub fn with_shadows(mut self, shadows: ShadowFlags) -> Self {
        self.shadows = shadows;
        self
    }

    /// Start hidden
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Parent node, `None` only for the scene root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
