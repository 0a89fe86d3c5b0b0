//! Gesture dispatch: polled shapes in, edge-triggered actions out

pub mod bindings;
pub mod edge;

pub use bindings::{default_bindings, BindingTable, GestureAction, GestureBinding, HandSelector};
pub use edge::{ShapeEdgeDetector, ShapeTransition};
