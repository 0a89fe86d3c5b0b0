//! Visual hand models
//!
//! Each profile builds a subtree under a given parent. The primitive profiles
//! (boxes, spheres) carry one mesh per joint which the rig moves every frame;
//! the mesh profiles are a single skinned mesh the loader animates.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Transform, Vec3};
use crate::render::{Color, Material};
use crate::scene::{Geometry, Node, NodeId, SceneError, SceneGraph};
use crate::xr::HandJoint;

const BOX_SIZE: f32 = 0.01;
const SPHERE_RADIUS: f32 = 0.008;
const TIP_SPHERE_RADIUS: f32 = 0.01;

/// Hand visual styles, in the default cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandModelProfile {
    /// A cube per joint
    Boxes,
    /// A sphere per joint
    Spheres,
    /// Low polygon hand mesh
    OculusLowpoly,
    /// Full hand mesh
    Oculus,
}

impl HandModelProfile {
    /// All profiles in cycling order
    pub const ALL: [HandModelProfile; 4] = [Self::Boxes, Self::Spheres, Self::OculusLowpoly, Self::Oculus];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boxes => "boxes",
            Self::Spheres => "spheres",
            Self::OculusLowpoly => "oculus (lowpoly)",
            Self::Oculus => "oculus",
        }
    }

    fn joint_geometry(&self, joint: HandJoint) -> Option<Geometry> {
        match self {
            Self::Boxes => Some(Geometry::Box {
                size: Vec3::repeat(BOX_SIZE),
            }),
            Self::Spheres => {
                let radius = if HandJoint::tips().contains(&joint) {
                    TIP_SPHERE_RADIUS
                } else {
                    SPHERE_RADIUS
                };
                Some(Geometry::Sphere { radius })
            }
            Self::OculusLowpoly | Self::Oculus => None,
        }
    }
}

/// A built hand model
#[derive(Debug, Clone)]
pub struct HandModel {
    /// Which style
    pub profile: HandModelProfile,
    /// Root of the model subtree
    pub root: NodeId,
    joint_meshes: Vec<(HandJoint, NodeId)>,
}

impl HandModel {
    /// Build `profile` under `parent`, colored `color`
    pub fn build(
        scene: &mut SceneGraph,
        parent: NodeId,
        profile: HandModelProfile,
        slot: usize,
        color: Color,
    ) -> Result<Self, SceneError> {
        let root = scene.add(parent, Node::group(format!("hand {slot} model {}", profile.name())))?;

        let mut joint_meshes = Vec::new();
        match profile {
            HandModelProfile::Boxes | HandModelProfile::Spheres => {
                for joint in HandJoint::ALL {
                    if let Some(geometry) = profile.joint_geometry(joint) {
                        let mesh = scene.add(
                            root,
                            Node::mesh(format!("hand {slot} {}", joint.as_str()), geometry, Material::standard(color)),
                        )?;
                        joint_meshes.push((joint, mesh));
                    }
                }
            }
            HandModelProfile::OculusLowpoly | HandModelProfile::Oculus => {
                let lowpoly = profile == HandModelProfile::OculusLowpoly;
                scene.add(
                    root,
                    Node::mesh(
                        format!("hand {slot} mesh"),
                        Geometry::HandMesh { lowpoly },
                        Material::standard(color),
                    ),
                )?;
            }
        }

        log::debug!("Built '{}' model for hand slot {}", profile.name(), slot);
        Ok(Self {
            profile,
            root,
            joint_meshes,
        })
    }

    /// Move per-joint meshes to `position(joint)` where known
    pub fn pose(
        &self,
        scene: &mut SceneGraph,
        position: impl Fn(HandJoint) -> Option<Vec3>,
    ) -> Result<(), SceneError> {
        for &(joint, mesh) in &self.joint_meshes {
            if let Some(p) = position(joint) {
                scene.get_mut(mesh)?.transform = Transform::from_position(p);
            }
        }
        Ok(())
    }
}
