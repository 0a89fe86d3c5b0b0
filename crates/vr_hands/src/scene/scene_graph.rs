//! Arena scene graph
//!
//! Nodes live in a `SlotMap` and reference each other by [`NodeId`]. The graph
//! owns the parent/child bookkeeping so that every node except the root has
//! exactly one parent and reparenting can never form a cycle or orphan a node.

use slotmap::SlotMap;
use thiserror::Error;

use crate::foundation::math::{Transform, Vec3};
use crate::render::color::Color;

use super::node::Node;
use super::NodeId;

/// Scene background
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Solid clear color
    Color(Color),
    /// Cube map made of six face images
    CubeMap {
        /// Directory containing the faces
        path: String,
        /// Face file names in +X, -X, +Y, -Y, +Z, -Z order
        faces: [String; 6],
    },
}

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Node id is stale or from another graph
    #[error("Unknown scene node: {0:?}")]
    UnknownNode(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("Attaching {node:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Node being moved
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },

    /// The root has no parent and cannot be moved
    #[error("The scene root cannot be reparented")]
    RootCannotMove,
}

/// Scene graph with a single root
#[derive(Debug)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    background: Option<Background>,
}

impl SceneGraph {
    /// Create a graph containing only the root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::group("scene"));
        Self {
            nodes,
            root,
            background: None,
        }
    }

    /// The scene root
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current background
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Replace the background
    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph contains only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Look up a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))
    }

    /// Add `node` as the last child of `parent`
    pub fn add(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }

        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Add `node` directly under the root
    pub fn add_to_root(&mut self, mut node: Node) -> NodeId {
        node.parent = Some(self.root);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[self.root].children.push(id);
        id
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, SceneError> {
        Ok(self.get(id)?.parent)
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Move `node` under `new_parent`, keeping its local transform
    pub fn attach(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if node == self.root {
            return Err(SceneError::RootCannotMove);
        }
        let old_parent = self.parent(node)?;
        if !self.nodes.contains_key(new_parent) {
            return Err(SceneError::UnknownNode(new_parent));
        }
        if self.is_ancestor(node, new_parent) {
            return Err(SceneError::WouldCreateCycle { node, parent: new_parent });
        }
        if old_parent == Some(new_parent) {
            return Ok(());
        }

        if let Some(old) = old_parent {
            self.nodes[old].children.retain(|&child| child != node);
        }
        self.nodes[new_parent].children.push(node);
        self.nodes[node].parent = Some(new_parent);

        log::trace!(
            "Reparented '{}' under '{}'",
            self.nodes[node].name,
            self.nodes[new_parent].name
        );
        Ok(())
    }

    /// Move `node` under `new_parent`, adjusting its local transform so that
    /// its world transform is unchanged
    pub fn attach_keep_world(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        let world = self.world_transform(node)?;
        let parent_world = self.world_transform(new_parent)?;
        self.attach(node, new_parent)?;
        self.nodes[node].transform = world.relative_to(&parent_world);
        Ok(())
    }

    /// Set the visibility flag of a single node
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.get_mut(id)?.visible = visible;
        Ok(())
    }

    /// Whether the node and all of its ancestors are visible
    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.nodes.get(node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Transform of `id` relative to the scene root
    pub fn world_transform(&self, id: NodeId) -> Result<Transform, SceneError> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            chain.push(node.transform);
            current = node.parent;
        }

        Ok(chain
            .iter()
            .rev()
            .fold(Transform::identity(), |world, local| world.combine(local)))
    }

    /// Position of `id` relative to the scene root
    pub fn world_position(&self, id: NodeId) -> Result<Vec3, SceneError> {
        Ok(self.world_transform(id)?.position)
    }

    /// `id` followed by all of its descendants, depth first
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        self.get(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            out.push(node_id);
            // Reverse so children are visited in insertion order
            stack.extend(self.nodes[node_id].children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Visit `id` and its descendants depth first
    pub fn traverse(&self, id: NodeId, mut visit: impl FnMut(NodeId, &Node)) -> Result<(), SceneError> {
        for node_id in self.descendants(id)? {
            visit(node_id, &self.nodes[node_id]);
        }
        Ok(())
    }

    /// Visit `id` and its descendants depth first, mutably
    pub fn traverse_mut(&mut self, id: NodeId, mut visit: impl FnMut(&mut Node)) -> Result<(), SceneError> {
        for node_id in self.descendants(id)? {
            visit(&mut self.nodes[node_id]);
        }
        Ok(())
    }

    /// First node with the given name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .ok()?
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    /// Number of nodes listing `id` as a child
    #[cfg(test)]
    pub(crate) fn parent_links(&self, id: NodeId) -> usize {
        self.nodes
            .values()
            .filter(|node| node.children.contains(&id))
            .count()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
