//! Hand visuals: controllers, joint anchors, swappable models and glove colors

mod models;
mod rig;

pub use models::{HandModel, HandModelProfile};
pub use rig::{HandRig, HandRigError};
