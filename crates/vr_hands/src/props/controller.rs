//! Gesture-driven props
//!
//! A prop is `Idle` under the scene root until a tracked hand holds its shape,
//! then `Active` as a child of that hand's joint anchor with an identity local
//! transform, so it follows the joint exactly. When the holding hand stops
//! reporting the shape the prop goes back under the root according to its
//! [`ReleasePolicy`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PropConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::hands::HandRig;
use crate::render::Material;
use crate::scene::{Geometry, Node, NodeId, SceneError, SceneGraph};
use crate::xr::HandState;

/// What happens to a prop when its shape ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Return to the rest transform and hide
    #[default]
    Hide,
    /// Stay visible where it was let go
    Sticky,
}

/// Prop visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropGeometry {
    /// Beam along local -Z
    Cylinder {
        /// Beam radius
        radius: f32,
        /// Beam length
        length: f32,
    },
    /// Ball
    Sphere {
        /// Ball radius
        radius: f32,
    },
    /// Box
    Box {
        /// Size along X, Y and Z
        size: [f32; 3],
    },
}

impl PropGeometry {
    fn to_geometry(self) -> Geometry {
        match self {
            Self::Cylinder { radius, length } => Geometry::Cylinder { radius, length },
            Self::Sphere { radius } => Geometry::Sphere { radius },
            Self::Box { size } => Geometry::Box { size: Vec3::from(size) },
        }
    }
}

/// Prop state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropState {
    /// Under the scene root
    Idle,
    /// Held by the hand in `slot`
    Active {
        /// Holding hand slot
        slot: usize,
    },
}

/// Prop errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropError {
    /// No prop with that name
    #[error("Unknown prop '{0}'")]
    UnknownProp(String),

    /// Scene graph rejected an operation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

#[derive(Debug)]
struct Prop {
    config: PropConfig,
    node: NodeId,
    rest: Transform,
    state: PropState,
    // Hidden by request while held; cleared on release
    dismissed: bool,
}

/// Owns the props and runs their state machines once per frame
#[derive(Debug, Default)]
pub struct PropController {
    props: Vec<Prop>,
}

impl PropController {
    /// Add a node for every configured prop under the scene root
    pub fn setup(scene: &mut SceneGraph, configs: &[PropConfig]) -> Self {
        let props = configs
            .iter()
            .map(|config| {
                let rest = Transform::from_position(Vec3::from(config.rest_position));
                let mut node = Node::mesh(
                    config.name.clone(),
                    config.geometry.to_geometry(),
                    Material::standard(config.color),
                )
                .with_transform(rest);
                if !config.visible_at_rest {
                    node = node.hidden();
                }
                log::debug!("Prop '{}' bound to shape '{}'", config.name, config.shape);

                Prop {
                    config: config.clone(),
                    node: scene.add_to_root(node),
                    rest,
                    state: PropState::Idle,
                    dismissed: false,
                }
            })
            .collect();

        Self { props }
    }

    fn find(&self, name: &str) -> Result<&Prop, PropError> {
        self.props
            .iter()
            .find(|p| p.config.name == name)
            .ok_or_else(|| PropError::UnknownProp(name.to_string()))
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Prop, PropError> {
        self.props
            .iter_mut()
            .find(|p| p.config.name == name)
            .ok_or_else(|| PropError::UnknownProp(name.to_string()))
    }

    /// Scene node of the prop called `name`
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.find(name).ok().map(|p| p.node)
    }

    /// Current state of the prop called `name`
    pub fn state(&self, name: &str) -> Option<PropState> {
        self.find(name).ok().map(|p| p.state)
    }

    /// Prop names in configuration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|p| p.config.name.as_str())
    }

    /// Make a prop visible
    pub fn show(&mut self, scene: &mut SceneGraph, name: &str) -> Result<(), PropError> {
        let prop = self.find_mut(name)?;
        prop.dismissed = false;
        scene.set_visible(prop.node, true)?;
        Ok(())
    }

    /// Hide a prop
    ///
    /// A held prop stays hidden until its hand lets go of the shape.
    pub fn hide(&mut self, scene: &mut SceneGraph, name: &str) -> Result<(), PropError> {
        let prop = self.find_mut(name)?;
        prop.dismissed = matches!(prop.state, PropState::Active { .. });
        scene.set_visible(prop.node, false)?;
        Ok(())
    }

    /// Advance every prop for this frame
    ///
    /// Does nothing when no hand is tracked.
    pub fn update(&mut self, scene: &mut SceneGraph, rig: &HandRig, hands: &[&dyn HandState]) -> Result<(), PropError> {
        if hands.is_empty() {
            return Ok(());
        }

        for prop in &mut self.props {
            match prop.state {
                PropState::Active { slot } => {
                    let still_held = hands
                        .iter()
                        .find(|h| h.slot() == slot)
                        .is_some_and(|h| h.is_shape(&prop.config.shape, prop.config.threshold));
                    if still_held {
                        let node = scene.get_mut(prop.node)?;
                        node.transform = Transform::identity();
                        node.visible = !prop.dismissed;
                    } else {
                        Self::release(scene, prop)?;
                    }
                }
                PropState::Idle => {
                    for hand in hands {
                        if !hand.is_shape(&prop.config.shape, prop.config.threshold) {
                            continue;
                        }
                        if !Self::within_reach(scene, prop, *hand)? {
                            continue;
                        }
                        let Some(anchor) = rig.joint_anchor(hand.slot(), prop.config.joint) else {
                            log::warn!("No joint anchor for hand slot {}", hand.slot());
                            continue;
                        };
                        Self::activate(scene, prop, hand.slot(), anchor)?;
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn within_reach(scene: &SceneGraph, prop: &Prop, hand: &dyn HandState) -> Result<bool, PropError> {
        let Some(radius) = prop.config.grab_radius else {
            return Ok(true);
        };
        let Some(joint) = hand.joint_position(prop.config.joint) else {
            return Ok(false);
        };
        let distance = (scene.world_position(prop.node)? - joint).norm();
        Ok(distance <= radius)
    }

    fn activate(scene: &mut SceneGraph, prop: &mut Prop, slot: usize, anchor: NodeId) -> Result<(), PropError> {
        scene.attach(prop.node, anchor)?;
        let node = scene.get_mut(prop.node)?;
        node.transform = Transform::identity();
        node.visible = true;
        prop.state = PropState::Active { slot };
        log::info!(
            "Prop '{}' attached to {} of hand slot {}",
            prop.config.name,
            prop.config.joint.as_str(),
            slot
        );
        Ok(())
    }

    fn release(scene: &mut SceneGraph, prop: &mut Prop) -> Result<(), PropError> {
        let root = scene.root();
        match prop.config.release {
            ReleasePolicy::Hide => {
                scene.attach(prop.node, root)?;
                let node = scene.get_mut(prop.node)?;
                node.transform = prop.rest;
                node.visible = false;
            }
            ReleasePolicy::Sticky => {
                scene.attach_keep_world(prop.node, root)?;
                scene.set_visible(prop.node, !prop.dismissed)?;
            }
        }
        prop.state = PropState::Idle;
        prop.dismissed = false;
        log::info!("Prop '{}' released ({:?})", prop.config.name, prop.config.release);
        Ok(())
    }
}
