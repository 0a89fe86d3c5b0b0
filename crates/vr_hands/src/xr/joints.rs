//! Hand skeleton vocabulary
//!
//! Joint names follow the WebXR Hand Input module (25 joints per hand).

use serde::{Deserialize, Serialize};

/// Which hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Left hand
    Left,
    /// Right hand
    Right,
}

impl Handedness {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 25 hand joints defined by WebXR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum HandJoint {
    Wrist,
    ThumbMetacarpal,
    ThumbPhalanxProximal,
    ThumbPhalanxDistal,
    ThumbTip,
    IndexFingerMetacarpal,
    IndexFingerPhalanxProximal,
    IndexFingerPhalanxIntermediate,
    IndexFingerPhalanxDistal,
    IndexFingerTip,
    MiddleFingerMetacarpal,
    MiddleFingerPhalanxProximal,
    MiddleFingerPhalanxIntermediate,
    MiddleFingerPhalanxDistal,
    MiddleFingerTip,
    RingFingerMetacarpal,
    RingFingerPhalanxProximal,
    RingFingerPhalanxIntermediate,
    RingFingerPhalanxDistal,
    RingFingerTip,
    PinkyFingerMetacarpal,
    PinkyFingerPhalanxProximal,
    PinkyFingerPhalanxIntermediate,
    PinkyFingerPhalanxDistal,
    PinkyFingerTip,
}

/// Total number of joints per hand
pub const JOINT_COUNT: usize = 25;

impl HandJoint {
    /// All joints in WebXR order
    pub const ALL: [HandJoint; JOINT_COUNT] = [
        Self::Wrist,
        Self::ThumbMetacarpal,
        Self::ThumbPhalanxProximal,
        Self::ThumbPhalanxDistal,
        Self::ThumbTip,
        Self::IndexFingerMetacarpal,
        Self::IndexFingerPhalanxProximal,
        Self::IndexFingerPhalanxIntermediate,
        Self::IndexFingerPhalanxDistal,
        Self::IndexFingerTip,
        Self::MiddleFingerMetacarpal,
        Self::MiddleFingerPhalanxProximal,
        Self::MiddleFingerPhalanxIntermediate,
        Self::MiddleFingerPhalanxDistal,
        Self::MiddleFingerTip,
        Self::RingFingerMetacarpal,
        Self::RingFingerPhalanxProximal,
        Self::RingFingerPhalanxIntermediate,
        Self::RingFingerPhalanxDistal,
        Self::RingFingerTip,
        Self::PinkyFingerMetacarpal,
        Self::PinkyFingerPhalanxProximal,
        Self::PinkyFingerPhalanxIntermediate,
        Self::PinkyFingerPhalanxDistal,
        Self::PinkyFingerTip,
    ];

    /// Index into per-hand joint arrays (0-24)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// WebXR joint name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbMetacarpal => "thumb-metacarpal",
            Self::ThumbPhalanxProximal => "thumb-phalanx-proximal",
            Self::ThumbPhalanxDistal => "thumb-phalanx-distal",
            Self::ThumbTip => "thumb-tip",
            Self::IndexFingerMetacarpal => "index-finger-metacarpal",
            Self::IndexFingerPhalanxProximal => "index-finger-phalanx-proximal",
            Self::IndexFingerPhalanxIntermediate => "index-finger-phalanx-intermediate",
            Self::IndexFingerPhalanxDistal => "index-finger-phalanx-distal",
            Self::IndexFingerTip => "index-finger-tip",
            Self::MiddleFingerMetacarpal => "middle-finger-metacarpal",
            Self::MiddleFingerPhalanxProximal => "middle-finger-phalanx-proximal",
            Self::MiddleFingerPhalanxIntermediate => "middle-finger-phalanx-intermediate",
            Self::MiddleFingerPhalanxDistal => "middle-finger-phalanx-distal",
            Self::MiddleFingerTip => "middle-finger-tip",
            Self::RingFingerMetacarpal => "ring-finger-metacarpal",
            Self::RingFingerPhalanxProximal => "ring-finger-phalanx-proximal",
            Self::RingFingerPhalanxIntermediate => "ring-finger-phalanx-intermediate",
            Self::RingFingerPhalanxDistal => "ring-finger-phalanx-distal",
            Self::RingFingerTip => "ring-finger-tip",
            Self::PinkyFingerMetacarpal => "pinky-finger-metacarpal",
            Self::PinkyFingerPhalanxProximal => "pinky-finger-phalanx-proximal",
            Self::PinkyFingerPhalanxIntermediate => "pinky-finger-phalanx-intermediate",
            Self::PinkyFingerPhalanxDistal => "pinky-finger-phalanx-distal",
            Self::PinkyFingerTip => "pinky-finger-tip",
        }
    }

    /// Fingertip joints, thumb first
    pub fn tips() -> [HandJoint; 5] {
        [
            Self::ThumbTip,
            Self::IndexFingerTip,
            Self::MiddleFingerTip,
            Self::RingFingerTip,
            Self::PinkyFingerTip,
        ]
    }
}
