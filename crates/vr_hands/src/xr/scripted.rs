//! Scripted hand tracker
//!
//! Replays a timeline of hand keyframes. Used by the headless demos and by
//! tests in place of a device-backed tracker. Scripts are plain `serde` data
//! and load from RON or TOML through [`Config`].

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::foundation::math::Vec3;

use super::joints::{HandJoint, Handedness, JOINT_COUNT};
use super::session::XrFrame;
use super::tracker::{HandSample, HandState, HandTracker};

/// Number of hand input slots
pub const HAND_SLOTS: usize = 2;

/// One keyframe: from `at_ms` on, the hand in `slot` looks like this
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Time the step takes effect
    pub at_ms: f64,
    /// Input slot
    pub slot: usize,
    /// Whether the hand is in tracking range
    #[serde(default = "default_tracked")]
    pub tracked: bool,
    /// Reported handedness
    #[serde(default)]
    pub handedness: Option<Handedness>,
    /// Recognized shape names
    #[serde(default)]
    pub shape: Vec<String>,
    /// Wrist position; the rest of the skeleton is laid out around it
    #[serde(default)]
    pub wrist: [f32; 3],
}

fn default_tracked() -> bool {
    true
}

/// Ordered list of keyframes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandScript {
    /// Keyframes, any order
    pub steps: Vec<ScriptStep>,
}

impl Config for HandScript {}

impl HandScript {
    /// Append a keyframe (builder style)
    pub fn step(mut self, step: ScriptStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Timestamp of the last keyframe
    pub fn duration_ms(&self) -> f64 {
        self.steps.iter().map(|s| s.at_ms).fold(0.0, f64::max)
    }
}

impl ScriptStep {
    /// A tracked hand holding `shape` from `at_ms`
    pub fn hand<S: Into<String>>(
        at_ms: f64,
        slot: usize,
        handedness: Handedness,
        shape: impl IntoIterator<Item = S>,
        wrist: [f32; 3],
    ) -> Self {
        Self {
            at_ms,
            slot,
            tracked: true,
            handedness: Some(handedness),
            shape: shape.into_iter().map(Into::into).collect(),
            wrist,
        }
    }

    /// The hand in `slot` leaves tracking range at `at_ms`
    pub fn lost(at_ms: f64, slot: usize) -> Self {
        Self {
            at_ms,
            slot,
            tracked: false,
            handedness: None,
            shape: Vec::new(),
            wrist: [0.0; 3],
        }
    }
}

/// Offset of a joint from the wrist in an open, palm-down hand
///
/// Fingers fan out along X (mirrored for the left hand) and extend along -Z.
pub fn rest_pose_offset(joint: HandJoint, handedness: Option<Handedness>) -> Vec3 {
    let index = joint.index();
    if index == 0 {
        return Vec3::zeros();
    }

    // Thumb owns indices 1..=4, every other digit owns five
    let (digit, segment) = if index <= 4 {
        (0, index - 1)
    } else {
        (1 + (index - 5) / 5, (index - 5) % 5)
    };

    let side = match handedness {
        Some(Handedness::Left) => -1.0,
        _ => 1.0,
    };
    let x = side * (digit as f32 - 2.0) * 0.02;
    let z = -0.025 * (segment as f32 + 1.0);
    Vec3::new(x, 0.0, z)
}

#[derive(Debug, Default)]
struct SlotState {
    tracked: bool,
    shape: Vec<String>,
    shape_since_ms: f64,
}

/// [`HandTracker`] that replays a [`HandScript`]
#[derive(Debug)]
pub struct ScriptedHandTracker {
    steps: Vec<ScriptStep>,
    slots: [SlotState; HAND_SLOTS],
    samples: Vec<HandSample>,
}

impl ScriptedHandTracker {
    /// Create a tracker for `script`
    pub fn new(mut script: HandScript) -> Self {
        script.steps.retain(|step| {
            let valid = step.slot < HAND_SLOTS;
            if !valid {
                log::warn!("Ignoring script step for unknown hand slot {}", step.slot);
            }
            valid
        });
        script.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        Self {
            steps: script.steps,
            slots: Default::default(),
            samples: Vec::new(),
        }
    }

    /// Tracker that never reports a hand
    pub fn empty() -> Self {
        Self::new(HandScript::default())
    }

    fn active_step(&self, slot: usize, timestamp_ms: f64) -> Option<&ScriptStep> {
        self.steps
            .iter()
            .filter(|step| step.slot == slot && step.at_ms <= timestamp_ms)
            .last()
    }

    fn sample_for(step: &ScriptStep, held_ms: f64, connected: bool) -> HandSample {
        let wrist = Vec3::from(step.wrist);
        let mut joints = [None; JOINT_COUNT];
        for joint in HandJoint::ALL {
            joints[joint.index()] = Some(wrist + rest_pose_offset(joint, step.handedness));
        }

        HandSample {
            slot: step.slot,
            handedness: step.handedness,
            connected,
            shape_names: step.shape.clone(),
            shape_held_ms: held_ms,
            joints,
        }
    }
}

impl HandTracker for ScriptedHandTracker {
    fn update(&mut self, timestamp_ms: f64, _frame: Option<&XrFrame>) {
        let mut samples = Vec::with_capacity(HAND_SLOTS);

        for slot in 0..HAND_SLOTS {
            let step = self.active_step(slot, timestamp_ms).filter(|s| s.tracked).cloned();
            let state = &mut self.slots[slot];

            match step {
                Some(step) => {
                    let connected = !state.tracked;
                    if connected {
                        log::debug!("Hand slot {} connected", slot);
                    }
                    if connected || state.shape != step.shape {
                        state.shape = step.shape.clone();
                        state.shape_since_ms = timestamp_ms;
                    }
                    state.tracked = true;
                    let held = timestamp_ms - state.shape_since_ms;
                    samples.push(Self::sample_for(&step, held, connected));
                }
                None => {
                    if state.tracked {
                        log::debug!("Hand slot {} lost tracking", slot);
                    }
                    *state = SlotState::default();
                }
            }
        }

        self.samples = samples;
    }

    fn hands(&self) -> Vec<&dyn HandState> {
        self.samples.iter().map(|s| s as &dyn HandState).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn script() -> HandScript {
        HandScript::default()
            .step(ScriptStep::hand(100.0, 0, Handedness::Right, ["point"], [0.0, 1.0, -0.5]))
            .step(ScriptStep::hand(400.0, 0, Handedness::Right, ["fist"], [0.0, 1.0, -0.5]))
            .step(ScriptStep::lost(600.0, 0))
    }

    #[test]
    fn test_no_hands_before_first_step() {
        let mut tracker = ScriptedHandTracker::new(script());
        tracker.update(50.0, None);
        assert!(tracker.hands().is_empty());
    }

    #[test]
    fn test_connection_and_hold_duration() {
        let mut tracker = ScriptedHandTracker::new(script());

        tracker.update(100.0, None);
        assert!(tracker.hands()[0].connected());

        tracker.update(350.0, None);
        let hands = tracker.hands();
        assert!(!hands[0].connected());
        assert!(hands[0].is_shape("point", 250.0));
        assert!(!hands[0].is_shape("point", 251.0));

        tracker.update(450.0, None);
        assert_eq!(tracker.hands()[0].shape_names(), ["fist".to_string()]);
        assert!(!tracker.hands()[0].is_shape("fist", 100.0));

        tracker.update(700.0, None);
        assert!(tracker.hands().is_empty());
    }

    #[test]
    fn test_skeleton_is_laid_out_around_wrist() {
        let mut tracker = ScriptedHandTracker::new(script());
        tracker.update(100.0, None);
        let hand = tracker.hands()[0];
        assert_relative_eq!(
            hand.joint_position(HandJoint::Wrist).unwrap(),
            Vec3::new(0.0, 1.0, -0.5)
        );
        let tip = hand.joint_position(HandJoint::IndexFingerTip).unwrap();
        assert!(tip.z < -0.5);
    }

    #[test]
    fn test_left_hand_is_mirrored() {
        let right = rest_pose_offset(HandJoint::ThumbTip, Some(Handedness::Right));
        let left = rest_pose_offset(HandJoint::ThumbTip, Some(Handedness::Left));
        assert_relative_eq!(right.x, -left.x);
    }

    #[test]
    fn test_script_parses_from_ron() {
        let text = r#"(steps: [(at_ms: 0.0, slot: 1, handedness: Some(left), shape: ["peace"], wrist: (0.1, 1.2, -0.4))])"#;
        let script: HandScript = ron::from_str(text).unwrap();
        assert_eq!(script.steps[0].handedness, Some(Handedness::Left));
        assert!(script.steps[0].tracked);
    }

    #[test]
    fn test_shipped_scripts_parse() {
        for text in [
            include_str!("../../../../demos/hands.ron"),
            include_str!("../../../../demos/laser.ron"),
        ] {
            let script: HandScript = ron::from_str(text).unwrap();
            assert!(script.duration_ms() > 0.0);
            assert!(script.steps.iter().all(|s| s.slot < HAND_SLOTS));
        }
    }
}
