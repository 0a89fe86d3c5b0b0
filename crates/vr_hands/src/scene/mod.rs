//! Scene management
//!
//! The scene graph owns node parenting and visibility; the scene builder
//! populates the static environment (background, platform, lights).

mod node;
mod scene_builder;
mod scene_graph;

slotmap::new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

pub use node::{Geometry, Node, NodeKind, ShadowFlags};
pub use scene_builder::{SceneBuilder, SceneryNodes};
pub use scene_graph::{Background, SceneError, SceneGraph};
