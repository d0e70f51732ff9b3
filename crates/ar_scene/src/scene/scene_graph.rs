//! Ownership tree of scene nodes
//!
//! Nodes live in a slot-map arena owned by the graph. The root is created with the
//! graph and can never be removed, so every node is reachable from it.

use thiserror::Error;

use crate::foundation::collections::{NodeArena, NodeId};
use crate::foundation::math::Transform;

use super::node::{Node, NodeTemplate};

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Id does not refer to a live node of this graph
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),
}

/// Tree of nodes rooted at a single root node
#[derive(Debug)]
pub struct SceneGraph {
    nodes: NodeArena<Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph containing only the root node
    pub fn new() -> Self {
        let mut nodes = NodeArena::with_key();
        let root = nodes.insert(Node::new().with_name("root"));
        Self { nodes, root }
    }

    /// Root node id
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append `node` to `parent`'s children and return its id
    ///
    /// Children keep insertion order. Any parent/child links already set on `node`
    /// are discarded; use [`Self::instantiate`] to insert whole subtrees.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        Ok(self.attach(parent, node))
    }

    /// Insert a template and all of its descendants under `parent`
    pub fn instantiate(&mut self, parent: NodeId, template: &NodeTemplate) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        Ok(self.attach_subtree(parent, template))
    }

    /// Insert a template and its descendants as a direct child of the root
    pub fn instantiate_at_root(&mut self, template: &NodeTemplate) -> NodeId {
        self.attach_subtree(self.root, template)
    }

    // `parent` must be live
    fn attach(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        node.parent = Some(parent);
        node.children.clear();
        let id = self.nodes.insert(node);
        self.nodes[parent].children.push(id);

        log::trace!("Added node {:?} under {:?}", id, parent);
        id
    }

    fn attach_subtree(&mut self, parent: NodeId, template: &NodeTemplate) -> NodeId {
        let id = self.attach(parent, template.to_node());
        for child in &template.children {
            self.attach_subtree(id, child);
        }
        id
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutably borrow a node
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Child ids of a node in insertion order (empty for unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|node| node.children.as_slice()).unwrap_or_default()
    }

    /// Parent id of a node (`None` for the root or unknown ids)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(Node::parent)
    }

    /// Replace a node's local transform
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))?;
        node.transform = transform;
        Ok(())
    }

    /// Transform of a node in world space (root frame)
    pub fn world_transform(&self, id: NodeId) -> Result<Transform, SceneError> {
        let mut node = self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))?;
        let mut world = node.transform;
        while let Some(parent) = node.parent {
            node = &self.nodes[parent];
            world = node.transform.combine(&world);
        }
        Ok(world)
    }

    /// First node with the given name, depth-first from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .map(|(id, _)| id)
            .find(|id| self.nodes[*id].name.as_deref() == Some(name))
    }

    /// Depth-first pre-order traversal as `(id, depth)` pairs, root at depth 0
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, 0)];
        while let Some((id, depth)) = stack.pop() {
            order.push((id, depth));
            // Reverse so the first child is visited first
            for child in self.nodes[id].children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        order
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{constants, utils, Vec3};
    use crate::scene::node::Geometry;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_graph_holds_root_only() {
        let graph = SceneGraph::new();
        assert_eq!(graph.len(), 1);
        assert!(graph.children(graph.root()).is_empty());
        assert_eq!(graph.parent(graph.root()), None);
    }

    #[test]
    fn test_add_child_keeps_insertion_order() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let first = graph.add_child(root, Node::new().with_name("first")).unwrap();
        let second = graph.add_child(root, Node::new().with_name("second")).unwrap();
        let nested = graph.add_child(first, Node::new().with_name("nested")).unwrap();

        assert_eq!(graph.children(root), &[first, second]);
        assert_eq!(graph.children(first), &[nested]);
        assert_eq!(graph.parent(nested), Some(first));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_add_child_to_unknown_parent_fails() {
        let mut other = SceneGraph::new();
        let foreign = other.add_child(other.root(), Node::new()).unwrap();

        let mut graph = SceneGraph::new();
        let result = graph.add_child(foreign, Node::new());
        assert_eq!(result, Err(SceneError::NodeNotFound(foreign)));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut graph = SceneGraph::new();
        let anchor = graph
            .add_child(graph.root(), Node::new().with_position(Vec3::new(1.0, 0.5, -2.0)))
            .unwrap();
        let child = graph
            .add_child(
                anchor,
                Node::new().with_transform(Transform::from_position_rotation(
                    Vec3::new(0.25, 0.0, 0.5),
                    utils::rotation_x(-constants::HALF_PI),
                )),
            )
            .unwrap();

        let world = graph.world_transform(child).unwrap();
        assert_relative_eq!(world.position, Vec3::new(1.25, 0.5, -1.5), epsilon = 1e-6);
    }

    #[test]
    fn test_instantiate_copies_subtree_and_find_by_name() {
        let template = NodeTemplate::named("shelf")
            .with_child(NodeTemplate::named("box").with_geometry(Geometry::cuboid(0.3, 0.3, 0.3)));

        let mut graph = SceneGraph::new();
        let shelf = graph.instantiate(graph.root(), &template).unwrap();

        let found = graph.find_by_name("box").unwrap();
        assert_eq!(graph.parent(found), Some(shelf));
        assert!(graph.node(found).unwrap().geometry.is_some());
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_instantiate_at_root_appends_after_existing_children() {
        let mut graph = SceneGraph::new();
        let container = graph.add_child(graph.root(), Node::new().with_name("anchor:A1")).unwrap();
        let template = NodeTemplate::named("box").with_child(NodeTemplate::named("lid"));

        let placed = graph.instantiate_at_root(&template);

        assert_eq!(graph.children(graph.root()), &[container, placed]);
        assert_eq!(graph.children(placed).len(), 1);
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_instantiate_under_unknown_parent_adds_nothing() {
        let mut other = SceneGraph::new();
        let foreign = other.add_child(other.root(), Node::new()).unwrap();

        let mut graph = SceneGraph::new();
        let result = graph.instantiate(foreign, &NodeTemplate::named("box"));
        assert_eq!(result, Err(SceneError::NodeNotFound(foreign)));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_walk_is_depth_first_preorder() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph.add_child(root, Node::new()).unwrap();
        let a1 = graph.add_child(a, Node::new()).unwrap();
        let b = graph.add_child(root, Node::new()).unwrap();

        let order: Vec<_> = graph.walk();
        assert_eq!(order, vec![(root, 0), (a, 1), (a1, 2), (b, 1)]);
    }
}
