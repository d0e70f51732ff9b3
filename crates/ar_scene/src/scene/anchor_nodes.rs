//! Per-anchor container nodes
//!
//! Every tracked anchor gets one empty node directly under the root, posed at the
//! anchor's world transform. Content attached under a container follows the
//! anchor as tracking refines its pose.

use std::collections::HashMap;

use crate::foundation::collections::NodeId;
use crate::tracking::{Anchor, AnchorId};

use super::node::Node;
use super::scene_graph::{SceneError, SceneGraph};

/// Maps anchor ids to their container nodes
#[derive(Debug, Default)]
pub struct AnchorNodes {
    nodes: HashMap<AnchorId, NodeId>,
}

impl AnchorNodes {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Container for `anchor`, created under the root on first sight
    ///
    /// A repeated add for a known id reuses the existing container and refreshes
    /// its pose.
    pub fn attach(&mut self, graph: &mut SceneGraph, anchor: &Anchor) -> Result<NodeId, SceneError> {
        if let Some(&existing) = self.nodes.get(anchor.id()) {
            graph.set_transform(existing, *anchor.transform())?;
            return Ok(existing);
        }

        let container = Node::new()
            .with_name(format!("anchor:{}", anchor.id()))
            .with_transform(*anchor.transform());
        let id = graph.add_child(graph.root(), container)?;
        self.nodes.insert(anchor.id().clone(), id);

        log::debug!("Created container {:?} for anchor {}", id, anchor.id());
        Ok(id)
    }

    /// Copy the anchor's latest pose onto its container
    ///
    /// Returns `None` for anchors that never got a container.
    pub fn sync(&self, graph: &mut SceneGraph, anchor: &Anchor) -> Result<Option<NodeId>, SceneError> {
        let Some(&id) = self.nodes.get(anchor.id()) else {
            return Ok(None);
        };
        graph.set_transform(id, *anchor.transform())?;
        Ok(Some(id))
    }

    /// Container node of an anchor
    pub fn get(&self, id: &AnchorId) -> Option<NodeId> {
        self.nodes.get(id).copied()
    }

    /// Number of containers
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no container exists yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
