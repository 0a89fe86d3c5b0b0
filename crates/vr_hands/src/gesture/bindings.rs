//! Gesture-to-action bindings
//!
//! A binding fires when its shape *begins* on a matching hand. For any single
//! transition at most one binding fires: the first one in table order.

use serde::{Deserialize, Serialize};

use crate::xr::Handedness;

use super::edge::ShapeTransition;

/// Which hands a binding applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSelector {
    /// Either hand, including one whose handedness is not known yet
    #[default]
    Any,
    /// Left hand only
    Left,
    /// Right hand only
    Right,
}

impl HandSelector {
    /// Whether a hand with `handedness` is selected
    pub fn matches(&self, handedness: Option<Handedness>) -> bool {
        match self {
            Self::Any => true,
            Self::Left => handedness == Some(Handedness::Left),
            Self::Right => handedness == Some(Handedness::Right),
        }
    }
}

/// What a binding does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureAction {
    /// Switch the hand to its next visual model
    CycleModel,
    /// Flip the hand between its own glove color and the default color
    ToggleColor,
    /// Make the named prop visible
    ShowProp(String),
    /// Hide the named prop
    HideProp(String),
}

/// One binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureBinding {
    /// Hands the binding applies to
    #[serde(default)]
    pub hand: HandSelector,
    /// Shape name that must begin
    pub shape: String,
    /// Action to perform
    pub action: GestureAction,
}

impl GestureBinding {
    /// Create a binding
    pub fn new(hand: HandSelector, shape: impl Into<String>, action: GestureAction) -> Self {
        Self {
            hand,
            shape: shape.into(),
            action,
        }
    }

    /// Whether this binding fires for `transition`
    pub fn fires_on(&self, transition: &ShapeTransition) -> bool {
        self.hand.matches(transition.handedness) && transition.began(&self.shape)
    }
}

/// Default bindings: a fist cycles the hand model, a peace sign toggles glove color
pub fn default_bindings() -> Vec<GestureBinding> {
    vec![
        GestureBinding::new(HandSelector::Any, "fist", GestureAction::CycleModel),
        GestureBinding::new(HandSelector::Any, "peace", GestureAction::ToggleColor),
    ]
}

/// Ordered binding table
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    bindings: Vec<GestureBinding>,
}

impl BindingTable {
    /// Create a table from bindings in priority order
    pub fn new(bindings: Vec<GestureBinding>) -> Self {
        Self { bindings }
    }

    /// Add a binding, replacing any existing one for the same hand and shape
    pub fn add(&mut self, binding: GestureBinding) {
        self.bindings
            .retain(|b| !(b.hand == binding.hand && b.shape == binding.shape));
        self.bindings.push(binding);
    }

    /// Remove the binding for `hand` and `shape`; returns whether one was removed
    pub fn remove(&mut self, hand: HandSelector, shape: &str) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| !(b.hand == hand && b.shape == shape));
        self.bindings.len() < before
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The action of the first binding that fires on `transition`
    pub fn resolve(&self, transition: &ShapeTransition) -> Option<&GestureAction> {
        self.bindings
            .iter()
            .find(|b| b.fires_on(transition))
            .map(|b| &b.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(handedness: Option<Handedness>, was: &[&str], is: &[&str]) -> ShapeTransition {
        ShapeTransition {
            slot: 0,
            handedness,
            was: was.iter().map(|s| s.to_string()).collect(),
            is: is.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_table_resolves_fist_and_peace() {
        let table = BindingTable::new(default_bindings());
        let right = Some(Handedness::Right);
        assert_eq!(
            table.resolve(&transition(right, &[], &["fist"])),
            Some(&GestureAction::CycleModel)
        );
        assert_eq!(
            table.resolve(&transition(right, &["point"], &["peace"])),
            Some(&GestureAction::ToggleColor)
        );
        assert_eq!(table.resolve(&transition(right, &["peace"], &["peace", "v"])), None);
        assert_eq!(table.resolve(&transition(right, &["fist"], &[])), None);
    }

    #[test]
    fn test_at_most_one_binding_fires() {
        let table = BindingTable::new(vec![
            GestureBinding::new(HandSelector::Any, "fist", GestureAction::CycleModel),
            GestureBinding::new(HandSelector::Any, "fist", GestureAction::ShowProp("laser".into())),
        ]);
        assert_eq!(
            table.resolve(&transition(None, &[], &["fist"])),
            Some(&GestureAction::CycleModel)
        );
    }

    #[test]
    fn test_hand_selector() {
        let table = BindingTable::new(vec![GestureBinding::new(
            HandSelector::Left,
            "point",
            GestureAction::HideProp("laser".into()),
        )]);
        assert!(table.resolve(&transition(Some(Handedness::Right), &[], &["point"])).is_none());
        assert!(table.resolve(&transition(None, &[], &["point"])).is_none());
        assert!(table.resolve(&transition(Some(Handedness::Left), &[], &["point"])).is_some());
    }

    #[test]
    fn test_add_replaces_and_remove() {
        let mut table = BindingTable::new(default_bindings());
        table.add(GestureBinding::new(HandSelector::Any, "fist", GestureAction::ToggleColor));
        assert_eq!(table.len(), 2);
        assert!(table.remove(HandSelector::Any, "fist"));
        assert!(!table.remove(HandSelector::Any, "fist"));
        assert_eq!(table.len(), 1);
    }
}
