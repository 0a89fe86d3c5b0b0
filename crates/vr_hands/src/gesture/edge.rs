//! Shape edge detection
//!
//! The classifier is polled once per frame for each hand's current shape
//! names. [`ShapeEdgeDetector`] compares them against what it saw on the
//! previous frame and reports a [`ShapeTransition`] only when they differ, so
//! holding a shape never produces repeated transitions.

use std::collections::HashMap;

use crate::xr::{HandState, Handedness};

/// A change in one hand's recognized shape between two frames
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTransition {
    /// Hand input slot
    pub slot: usize,
    /// Handedness reported with the new shape
    pub handedness: Option<Handedness>,
    /// Shape names on the previous frame
    pub was: Vec<String>,
    /// Shape names on this frame (empty when the hand left tracking)
    pub is: Vec<String>,
}

impl ShapeTransition {
    /// `name` is recognized now and was not on the previous frame
    pub fn began(&self, name: &str) -> bool {
        contains(&self.is, name) && !contains(&self.was, name)
    }

    /// `name` was recognized on the previous frame and is not now
    pub fn ended(&self, name: &str) -> bool {
        contains(&self.was, name) && !contains(&self.is, name)
    }

    /// The hand went from no recognized shape to some shape
    pub fn is_first_shape(&self) -> bool {
        self.was.is_empty() && !self.is.is_empty()
    }

    /// The hand stopped being tracked
    pub fn is_lost(&self) -> bool {
        self.is.is_empty()
    }

    /// Human-readable summary for the hand's display frame and logs
    pub fn message(&self) -> String {
        format!("shape was [{}] is [{}]", self.was.join(", "), self.is.join(", "))
    }
}

fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}

/// Turns per-frame shape polls into edge-triggered transitions
#[derive(Debug, Default)]
pub struct ShapeEdgeDetector {
    previous: HashMap<usize, Vec<String>>,
}

impl ShapeEdgeDetector {
    /// Create a detector that has seen no hands
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's hands; returns one transition per hand whose shape changed
    ///
    /// Slots seen before but missing from `hands` produce a transition to the
    /// empty shape and are forgotten, so a reconnecting hand starts fresh.
    pub fn observe(&mut self, hands: &[&dyn HandState]) -> Vec<ShapeTransition> {
        let mut transitions = Vec::new();

        for hand in hands {
            let slot = hand.slot();
            let is = hand.shape_names();
            let was = self.previous.get(&slot).map(Vec::as_slice).unwrap_or_default();
            if was != is {
                transitions.push(ShapeTransition {
                    slot,
                    handedness: hand.handedness(),
                    was: was.to_vec(),
                    is: is.to_vec(),
                });
                self.previous.insert(slot, is.to_vec());
            }
        }

        let mut lost: Vec<usize> = self
            .previous
            .keys()
            .copied()
            .filter(|slot| !hands.iter().any(|h| h.slot() == *slot))
            .collect();
        lost.sort_unstable();

        for slot in lost {
            if let Some(was) = self.previous.remove(&slot) {
                if !was.is_empty() {
                    transitions.push(ShapeTransition {
                        slot,
                        handedness: None,
                        was,
                        is: Vec::new(),
                    });
                }
            }
        }

        transitions
    }

    /// Shape names recorded for `slot` on the last observed frame
    pub fn last_shape(&self, slot: usize) -> Option<&[String]> {
        self.previous.get(&slot).map(Vec::as_slice)
    }
}
