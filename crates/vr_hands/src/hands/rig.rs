//! Per-slot hand rig
//!
//! For each of the two hand input slots the rig owns:
//!
//! - a controller group with a pointing ray
//! - a controller grip with a controller model
//! - a hand group holding one anchor per joint and the visual models
//! - a display frame showing the last shape change
//!
//! Gesture actions only ever touch the subtree of the slot they target.

use thiserror::Error;

use crate::core::HandsConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::render::{Color, Material};
use crate::scene::{Geometry, Node, NodeId, NodeKind, SceneError, SceneGraph};
use crate::xr::{HandJoint, HandState, Handedness, HAND_SLOTS, JOINT_COUNT};

use super::models::HandModel;

const DISPLAY_FRAME_OFFSET: [f32; 3] = [0.0, 0.12, 0.0];

/// Hand rig errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandRigError {
    /// A color toggle was requested before the device reported handedness
    #[error("Hand slot {slot} has no known handedness")]
    UnresolvedHandedness {
        /// Hand input slot
        slot: usize,
    },

    /// Slot index out of range
    #[error("Unknown hand slot {0}")]
    UnknownSlot(usize),

    /// Scene graph rejected an operation
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Glove colors
#[derive(Debug, Clone, Copy, PartialEq)]
struct GloveColors {
    default: Color,
    left: Color,
    right: Color,
}

impl GloveColors {
    fn for_hand(&self, handedness: Handedness) -> Color {
        match handedness {
            Handedness::Left => self.left,
            Handedness::Right => self.right,
        }
    }
}

#[derive(Debug)]
struct HandSlot {
    controller: NodeId,
    grip: NodeId,
    hand: NodeId,
    joints: [NodeId; JOINT_COUNT],
    models: Vec<HandModel>,
    model_index: usize,
    is_default_color: bool,
    handedness: Option<Handedness>,
    models_attached: bool,
    display_frame: Option<NodeId>,
    status: String,
}

/// Controllers, hands and hand models for both input slots
#[derive(Debug)]
pub struct HandRig {
    slots: Vec<HandSlot>,
    staging: NodeId,
    colors: GloveColors,
}

impl HandRig {
    /// Build controllers, hand groups, joint anchors and preload the hand models
    pub fn setup(scene: &mut SceneGraph, config: &HandsConfig) -> Result<Self, HandRigError> {
        log::info!("Setting up hands with models from {}", config.model_path);

        // Models wait here, hidden, until their hand connects
        let staging = scene.add_to_root(Node::group("hand model staging").hidden());

        let mut slots = Vec::with_capacity(HAND_SLOTS);
        for slot in 0..HAND_SLOTS {
            let controller = scene.add_to_root(Node::group(format!("controller {slot}")));
            scene.add(
                controller,
                Node::new(
                    format!("controller {slot} ray"),
                    NodeKind::Line {
                        points: vec![Vec3::zeros(), Vec3::new(0.0, 0.0, -config.ray_length)],
                        material: Material::line(Color::WHITE),
                    },
                ),
            )?;

            let grip = scene.add_to_root(Node::group(format!("controller grip {slot}")));
            scene.add(
                grip,
                Node::mesh(
                    format!("controller {slot} model"),
                    Geometry::ControllerMesh,
                    Material::standard(Color::WHITE),
                ),
            )?;

            let hand = scene.add_to_root(Node::group(format!("hand {slot}")));
            let mut joints = [hand; JOINT_COUNT];
            for joint in HandJoint::ALL {
                joints[joint.index()] = scene.add(hand, Node::group(format!("hand {slot} {} anchor", joint.as_str())))?;
            }

            let models = config
                .models
                .iter()
                .map(|&profile| HandModel::build(scene, staging, profile, slot, config.default_color))
                .collect::<Result<Vec<_>, _>>()?;

            let display_frame = if config.display_frame {
                let wrist = joints[HandJoint::Wrist.index()];
                Some(scene.add(
                    wrist,
                    Node::new(format!("hand {slot} display frame"), NodeKind::Label { text: String::new() })
                        .with_transform(Transform::from_position(Vec3::from(DISPLAY_FRAME_OFFSET))),
                )?)
            } else {
                None
            };

            slots.push(HandSlot {
                controller,
                grip,
                hand,
                joints,
                models,
                model_index: 0,
                is_default_color: true,
                handedness: None,
                models_attached: false,
                display_frame,
                status: String::new(),
            });
        }

        Ok(Self {
            slots,
            staging,
            colors: GloveColors {
                default: config.default_color,
                left: config.left_color,
                right: config.right_color,
            },
        })
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut HandSlot, HandRigError> {
        self.slots.get_mut(slot).ok_or(HandRigError::UnknownSlot(slot))
    }

    /// Number of hand slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Hand group of `slot`
    pub fn hand_group(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).map(|s| s.hand)
    }

    /// Controller group of `slot`
    pub fn controller(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).map(|s| s.controller)
    }

    /// Controller grip group of `slot`
    pub fn grip(&self, slot: usize) -> Option<NodeId> {
        self.slots.get(slot).map(|s| s.grip)
    }

    /// Anchor node that follows `joint` of the hand in `slot`
    pub fn joint_anchor(&self, slot: usize, joint: HandJoint) -> Option<NodeId> {
        self.slots.get(slot).map(|s| s.joints[joint.index()])
    }

    /// Root nodes of the visual models of `slot`, in cycling order
    pub fn models(&self, slot: usize) -> Vec<NodeId> {
        self.slots
            .get(slot)
            .map(|s| s.models.iter().map(|m| m.root).collect())
            .unwrap_or_default()
    }

    /// Index of the active model of `slot`
    pub fn model_index(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).map(|s| s.model_index)
    }

    /// Whether `slot` currently wears the default glove color
    pub fn is_default_color(&self, slot: usize) -> Option<bool> {
        self.slots.get(slot).map(|s| s.is_default_color)
    }

    /// Handedness recorded for `slot`
    pub fn handedness(&self, slot: usize) -> Option<Handedness> {
        self.slots.get(slot).and_then(|s| s.handedness)
    }

    /// Text of the display frame of `slot`
    pub fn status(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(|s| s.status.as_str())
    }

    /// Apply this frame's tracking data
    ///
    /// Handles first connection, records handedness, moves joint anchors and
    /// per-joint meshes, and shows only the hand groups that are tracked.
    pub fn sync(&mut self, scene: &mut SceneGraph, hands: &[&dyn HandState]) -> Result<(), HandRigError> {
        for (index, rig) in self.slots.iter().enumerate() {
            let tracked = hands.iter().any(|h| h.slot() == index);
            scene.set_visible(rig.hand, tracked)?;
        }

        for hand in hands {
            let Some(rig) = self.slots.get_mut(hand.slot()) else {
                log::warn!("Ignoring tracking data for unknown hand slot {}", hand.slot());
                continue;
            };

            if hand.handedness().is_some() {
                rig.handedness = hand.handedness();
            }

            if hand.connected() || !rig.models_attached {
                Self::attach_models(scene, rig, hand.slot())?;
            }

            for joint in HandJoint::ALL {
                if let Some(position) = hand.joint_position(joint) {
                    scene.get_mut(rig.joints[joint.index()])?.transform.position = position;
                }
            }
            for model in &rig.models {
                model.pose(scene, |joint| hand.joint_position(joint))?;
            }
        }
        Ok(())
    }

    fn attach_models(scene: &mut SceneGraph, rig: &mut HandSlot, slot: usize) -> Result<(), HandRigError> {
        log::info!(
            "Hand tracking began for slot {} ({})",
            slot,
            rig.handedness.map_or("unknown", |h| h.as_str())
        );
        for (index, model) in rig.models.iter().enumerate() {
            scene.attach(model.root, rig.hand)?;
            scene.set_visible(model.root, index == rig.model_index)?;
        }
        rig.models_attached = true;
        Ok(())
    }

    /// Switch `slot` to its next visual model; returns the new model index
    pub fn cycle_model(&mut self, scene: &mut SceneGraph, slot: usize) -> Result<usize, HandRigError> {
        let rig = self.slot_mut(slot)?;
        if rig.models.is_empty() {
            return Ok(0);
        }

        log::info!(
            "Cycling the hand model for the {} hand",
            rig.handedness.map_or("UNKNOWN".to_string(), |h| h.as_str().to_uppercase())
        );

        for model in &rig.models {
            scene.set_visible(model.root, false)?;
        }
        rig.model_index = (rig.model_index + 1) % rig.models.len();
        scene.set_visible(rig.models[rig.model_index].root, true)?;
        Ok(rig.model_index)
    }

    /// Flip `slot` between its handed glove color and the default color
    ///
    /// Falls back to the handedness reported by `current` when none has been
    /// recorded. Returns the color applied.
    pub fn toggle_color(
        &mut self,
        scene: &mut SceneGraph,
        slot: usize,
        current: Option<&dyn HandState>,
    ) -> Result<Color, HandRigError> {
        let colors = self.colors;
        let rig = self.slot_mut(slot)?;

        if rig.handedness.is_none() {
            rig.handedness = current.and_then(|h| h.handedness());
        }
        let handedness = rig.handedness.ok_or(HandRigError::UnresolvedHandedness { slot })?;

        let color = if rig.is_default_color {
            colors.for_hand(handedness)
        } else {
            colors.default
        };

        // Models only: joint anchors may be carrying props
        for model in &rig.models {
            scene.traverse_mut(model.root, |node| {
                if let Some(material) = node.kind.material_mut() {
                    material.color = color;
                }
            })?;
        }
        rig.is_default_color = !rig.is_default_color;

        log::debug!("Hand slot {} glove color set to {:06X}", slot, color.to_hex());
        Ok(color)
    }

    /// Show `text` on the display frame of `slot`
    pub fn set_status(&mut self, scene: &mut SceneGraph, slot: usize, text: &str) -> Result<(), HandRigError> {
        let rig = self.slot_mut(slot)?;
        rig.status = text.to_string();
        if let Some(frame) = rig.display_frame {
            if let NodeKind::Label { text: label } = &mut scene.get_mut(frame)?.kind {
                *label = rig.status.clone();
            }
        }
        Ok(())
    }

    /// Group holding models that have not been attached to a hand yet
    pub fn staging(&self) -> NodeId {
        self.staging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xr::HandSample;

    fn rig() -> (SceneGraph, HandRig) {
        let mut scene = SceneGraph::new();
        let rig = HandRig::setup(&mut scene, &HandsConfig::default()).unwrap();
        (scene, rig)
    }

    fn connect(scene: &mut SceneGraph, rig: &mut HandRig, sample: HandSample) {
        let sample = sample.newly_connected();
        rig.sync(scene, &[&sample]).unwrap();
    }

    fn visible_models(scene: &SceneGraph, rig: &HandRig, slot: usize) -> Vec<usize> {
        rig.models(slot)
            .iter()
            .enumerate()
            .filter_map(|(i, id)| scene.get(*id).unwrap().visible.then_some(i))
            .collect()
    }

    fn hand_colors(scene: &SceneGraph, rig: &HandRig, slot: usize) -> Vec<u32> {
        let mut colors = Vec::new();
        scene
            .traverse(rig.hand_group(slot).unwrap(), |_, node| {
                if let Some(material) = node.kind.material() {
                    colors.push(material.color.to_hex());
                }
            })
            .unwrap();
        colors
    }

    #[test]
    fn test_setup_builds_both_slots() {
        let (scene, rig) = rig();
        assert_eq!(rig.slot_count(), 2);
        for slot in 0..2 {
            assert_eq!(rig.models(slot).len(), 4);
            assert_eq!(rig.model_index(slot), Some(0));
            assert_eq!(rig.is_default_color(slot), Some(true));

            let controller = scene.get(rig.controller(slot).unwrap()).unwrap();
            let ray = scene.get(controller.children()[0]).unwrap();
            let NodeKind::Line { points, .. } = &ray.kind else {
                panic!("controller ray is not a line");
            };
            assert_eq!(points[1], Vec3::new(0.0, 0.0, -5.0));
            assert_eq!(scene.get(rig.grip(slot).unwrap()).unwrap().children().len(), 1);

            let anchor = rig.joint_anchor(slot, HandJoint::IndexFingerTip).unwrap();
            assert_eq!(scene.parent(anchor).unwrap(), rig.hand_group(slot));
        }
    }

    #[test]
    fn test_connection_attaches_models_and_shows_active_only() {
        let (mut scene, mut rig) = rig();
        for model in rig.models(0) {
            assert_eq!(scene.parent(model).unwrap(), Some(rig.staging()));
        }

        connect(&mut scene, &mut rig, HandSample::new(0, Some(Handedness::Left)));

        assert_eq!(rig.handedness(0), Some(Handedness::Left));
        for model in rig.models(0) {
            assert_eq!(scene.parent(model).unwrap(), rig.hand_group(0));
        }
        assert_eq!(visible_models(&scene, &rig, 0), vec![0]);
        assert!(scene.is_effectively_visible(rig.models(0)[0]));
        // Slot 1 untouched
        for model in rig.models(1) {
            assert_eq!(scene.parent(model).unwrap(), Some(rig.staging()));
        }
    }

    #[test]
    fn test_full_cycle_returns_to_start_with_one_visible_model() {
        let (mut scene, mut rig) = rig();
        connect(&mut scene, &mut rig, HandSample::new(0, Some(Handedness::Right)));

        let n = rig.models(0).len();
        for step in 1..=n {
            let index = rig.cycle_model(&mut scene, 0).unwrap();
            assert_eq!(index, step % n);
            assert_eq!(visible_models(&scene, &rig, 0), vec![index]);
        }
        assert_eq!(rig.model_index(0), Some(0));
        assert_eq!(rig.model_index(1), Some(0));
    }

    #[test]
    fn test_toggle_color_is_two_state() {
        let (mut scene, mut rig) = rig();
        connect(&mut scene, &mut rig, HandSample::new(0, Some(Handedness::Right)));
        connect(&mut scene, &mut rig, HandSample::new(1, Some(Handedness::Left)));

        assert!(hand_colors(&scene, &rig, 0).iter().all(|&c| c == 0xFFFFFF));

        assert_eq!(rig.toggle_color(&mut scene, 0, None).unwrap().to_hex(), 0xFF0000);
        assert!(hand_colors(&scene, &rig, 0).iter().all(|&c| c == 0xFF0000));
        assert_eq!(rig.is_default_color(0), Some(false));
        // Other hand keeps its color
        assert!(hand_colors(&scene, &rig, 1).iter().all(|&c| c == 0xFFFFFF));

        rig.toggle_color(&mut scene, 0, None).unwrap();
        assert!(hand_colors(&scene, &rig, 0).iter().all(|&c| c == 0xFFFFFF));
        assert_eq!(rig.is_default_color(0), Some(true));

        assert_eq!(rig.toggle_color(&mut scene, 1, None).unwrap().to_hex(), 0x00FF00);
    }

    #[test]
    fn test_toggle_color_needs_handedness() {
        let (mut scene, mut rig) = rig();
        connect(&mut scene, &mut rig, HandSample::new(0, None));
        assert_eq!(
            rig.toggle_color(&mut scene, 0, None),
            Err(HandRigError::UnresolvedHandedness { slot: 0 })
        );
        assert_eq!(rig.is_default_color(0), Some(true));

        let current = HandSample::new(0, Some(Handedness::Left));
        assert_eq!(rig.toggle_color(&mut scene, 0, Some(&current as &dyn HandState)).unwrap().to_hex(), 0x00FF00);
    }

    #[test]
    fn test_sync_moves_anchors_and_hides_untracked_hands() {
        let (mut scene, mut rig) = rig();
        let sample = HandSample::new(1, Some(Handedness::Right))
            .with_joint(HandJoint::IndexFingerTip, Vec3::new(0.1, 1.4, -0.3))
            .newly_connected();
        rig.sync(&mut scene, &[&sample]).unwrap();

        let anchor = rig.joint_anchor(1, HandJoint::IndexFingerTip).unwrap();
        assert_eq!(scene.world_position(anchor).unwrap(), Vec3::new(0.1, 1.4, -0.3));
        assert!(!scene.get(rig.hand_group(0).unwrap()).unwrap().visible);
        assert!(scene.get(rig.hand_group(1).unwrap()).unwrap().visible);

        rig.sync(&mut scene, &[]).unwrap();
        assert!(!scene.get(rig.hand_group(1).unwrap()).unwrap().visible);
    }

    #[test]
    fn test_toggle_color_leaves_held_objects_alone() {
        let (mut scene, mut rig) = rig();
        connect(&mut scene, &mut rig, HandSample::new(0, Some(Handedness::Right)));
        let tip = rig.joint_anchor(0, HandJoint::IndexFingerTip).unwrap();
        let held = scene
            .add(tip, Node::mesh("held", Geometry::Sphere { radius: 0.05 }, Material::standard(Color::from_hex(0xFF2200))))
            .unwrap();

        rig.toggle_color(&mut scene, 0, None).unwrap();

        let color = scene.get(held).unwrap().kind.material().unwrap().color;
        assert_eq!(color.to_hex(), 0xFF2200);
        let model = rig.models(0)[0];
        let mut model_colors = Vec::new();
        scene
            .traverse(model, |_, node| {
                if let Some(material) = node.kind.material() {
                    model_colors.push(material.color.to_hex());
                }
            })
            .unwrap();
        assert!(!model_colors.is_empty());
        assert!(model_colors.iter().all(|&c| c == 0xFF0000));
    }

    #[test]
    fn test_status_updates_display_frame() {
        let (mut scene, mut rig) = rig();
        rig.set_status(&mut scene, 0, "shape was [] is [fist]").unwrap();
        assert_eq!(rig.status(0), Some("shape was [] is [fist]"));
        let frame = scene.find_by_name("hand 0 display frame").unwrap();
        assert_eq!(
            scene.get(frame).unwrap().kind,
            NodeKind::Label { text: "shape was [] is [fist]".to_string() }
        );
        assert!(matches!(rig.set_status(&mut scene, 5, "x"), Err(HandRigError::UnknownSlot(5))));
    }
}
