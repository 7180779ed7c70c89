//! # Scene Hierarchy
//!
//! A minimal parent/child node tree standing in for the host engine's scene
//! graph. Nodes carry a local [`Transform`], an optional tag, an optional
//! collider handle and an optional flower marker; world transforms are
//! composed on demand by walking up the parent chain.

use crate::error::GardenError;
use physics::{ColliderId, Quat, Transform};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NodeTag {
    #[default]
    Untagged,
    /// Grouping node holding one or more flowers that are posed together.
    FlowerPlant,
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub tag: NodeTag,
    pub local: Transform,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub collider: Option<ColliderId>,
    /// Whether the node carries a flower component.
    pub flower: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        self.push(name.into(), local, None)
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] if `parent` is not part of this graph.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform,
    ) -> Result<NodeId, GardenError> {
        if parent.0 >= self.nodes.len() {
            return Err(GardenError::UnknownNode(parent));
        }
        let id = self.push(name.into(), local, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push(&mut self, name: String, local: Transform, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            tag: NodeTag::Untagged,
            local,
            parent,
            children: Vec::new(),
            collider: None,
            flower: false,
        });
        id
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn node(&self, id: NodeId) -> Result<&SceneNode, GardenError> {
        self.nodes.get(id.0).ok_or(GardenError::UnknownNode(id))
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, GardenError> {
        self.nodes.get_mut(id.0).ok_or(GardenError::UnknownNode(id))
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn set_tag(&mut self, id: NodeId, tag: NodeTag) -> Result<(), GardenError> {
        self.node_mut(id)?.tag = tag;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn attach_collider(&mut self, id: NodeId, collider: ColliderId) -> Result<(), GardenError> {
        self.node_mut(id)?.collider = Some(collider);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn mark_flower(&mut self, id: NodeId) -> Result<(), GardenError> {
        self.node_mut(id)?.flower = true;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn set_local_rotation(&mut self, id: NodeId, rotation: Quat) -> Result<(), GardenError> {
        self.node_mut(id)?.local.rotation = rotation;
        Ok(())
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// First direct child of `id` with the given name.
    #[must_use]
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name == name)
    }

    /// World transform of a node, composed from the root down.
    ///
    /// # Errors
    ///
    /// Returns [`GardenError::UnknownNode`] for a foreign id.
    pub fn world_transform(&self, id: NodeId) -> Result<Transform, GardenError> {
        let node = self.node(id)?;
        match node.parent {
            Some(parent) => Ok(self.world_transform(parent)?.mul_transform(&node.local)),
            None => Ok(node.local),
        }
    }

    /// Every node below `id` (excluding `id`), depth first in child order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Result of walking an arena subtree for flowers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Nodes tagged [`NodeTag::FlowerPlant`], in traversal order.
    pub plants: Vec<NodeId>,
    /// Nodes carrying a flower component, in traversal order.
    pub flowers: Vec<NodeId>,
}

/// Depth-first search below `root` for plants and flowers.
///
/// A plant node is recorded and searched further. A flower node is recorded
/// and not searched further. Any other node is searched for nested flowers.
#[must_use]
pub fn discover_flowers(scene: &SceneGraph, root: NodeId) -> Discovery {
    let mut found = Discovery::default();
    visit(scene, root, &mut found);
    found
}

fn visit(scene: &SceneGraph, parent: NodeId, found: &mut Discovery) {
    for &child in scene.children(parent) {
        let node = &scene.nodes[child.0];
        if node.tag == NodeTag::FlowerPlant {
            found.plants.push(child);
            visit(scene, child, found);
        } else if node.flower {
            found.flowers.push(child);
        } else {
            visit(scene, child, found);
        }
    }
}
