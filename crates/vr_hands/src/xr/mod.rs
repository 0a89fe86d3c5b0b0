//! XR device and hand-tracking surface
//!
//! Everything the application needs from the XR runtime and the hand-shape
//! classifier, expressed as traits and plain data so that any concrete
//! library can be adapted at this boundary.

pub mod joints;
pub mod scripted;
pub mod session;
pub mod tracker;

pub use joints::{HandJoint, Handedness, JOINT_COUNT};
pub use scripted::{HandScript, ScriptStep, ScriptedHandTracker, HAND_SLOTS};
pub use session::{VrButton, VrButtonState, XrFrame};
pub use tracker::{HandSample, HandState, HandTracker};
