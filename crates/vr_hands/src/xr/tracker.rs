//! Hand-tracking boundary
//!
//! Concrete hand-tracking libraries adapt to these traits. The application
//! only ever sees what a hand exposes per frame: its slot, handedness, the
//! names of the shape the classifier currently recognizes, joint positions,
//! and the classifier's verdict for a named shape at a given threshold.

use crate::foundation::math::Vec3;

use super::joints::{HandJoint, Handedness, JOINT_COUNT};
use super::session::XrFrame;

/// Capability set of one tracked hand for the current frame
pub trait HandState {
    /// Input slot (0 or 1) the hand was acquired from
    fn slot(&self) -> usize;

    /// Handedness, `None` until the device reports it
    fn handedness(&self) -> Option<Handedness>;

    /// Whether tracking data for this slot arrived for the first time this frame
    fn connected(&self) -> bool;

    /// Names of the currently recognized shape (empty when nothing matches)
    fn shape_names(&self) -> &[String];

    /// World-space joint position, `None` when the joint is not tracked
    fn joint_position(&self, joint: HandJoint) -> Option<Vec3>;

    /// Classifier verdict for `name`; `threshold` is passed through untouched
    fn is_shape(&self, name: &str, threshold: f32) -> bool;
}

/// Source of per-frame hand state
pub trait HandTracker {
    /// Advance the tracker to the given frame
    fn update(&mut self, timestamp_ms: f64, frame: Option<&XrFrame>);

    /// Hands currently in tracking range, in slot order
    fn hands(&self) -> Vec<&dyn HandState>;
}

/// Plain-data hand sample
///
/// The classifier verdict is modelled as "the shape has been recognized
/// continuously for at least `threshold` milliseconds".
#[derive(Debug, Clone, PartialEq)]
pub struct HandSample {
    /// Input slot
    pub slot: usize,
    /// Reported handedness
    pub handedness: Option<Handedness>,
    /// First frame after connection
    pub connected: bool,
    /// Recognized shape names
    pub shape_names: Vec<String>,
    /// How long the current shape names have been recognized
    pub shape_held_ms: f64,
    /// Joint positions indexed by [`HandJoint::index`]
    pub joints: [Option<Vec3>; JOINT_COUNT],
}

impl HandSample {
    /// Sample with no shape and no tracked joints
    pub fn new(slot: usize, handedness: Option<Handedness>) -> Self {
        Self {
            slot,
            handedness,
            connected: false,
            shape_names: Vec::new(),
            shape_held_ms: 0.0,
            joints: [None; JOINT_COUNT],
        }
    }

    /// Set the recognized shape names
    pub fn with_shape<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.shape_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set how long the shape has been held
    pub fn held_for(mut self, ms: f64) -> Self {
        self.shape_held_ms = ms;
        self
    }

    /// Set a joint position
    pub fn with_joint(mut self, joint: HandJoint, position: Vec3) -> Self {
        self.joints[joint.index()] = Some(position);
        self
    }

    /// Mark as the first frame after connection
    pub fn newly_connected(mut self) -> Self {
        self.connected = true;
        self
    }
}

impl HandState for HandSample {
    fn slot(&self) -> usize {
        self.slot
    }

    fn handedness(&self) -> Option<Handedness> {
        self.handedness
    }

    fn connected(&self) -> bool {
        self.connected
    }

    fn shape_names(&self) -> &[String] {
        &self.shape_names
    }

    fn joint_position(&self, joint: HandJoint) -> Option<Vec3> {
        self.joints[joint.index()]
    }

    fn is_shape(&self, name: &str, threshold: f32) -> bool {
        self.shape_names.iter().any(|n| n == name) && self.shape_held_ms >= f64::from(threshold)
    }
}
