//! Handle types for stable references into arenas

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable identity of a node inside a [`crate::scene::SceneGraph`]
    pub struct NodeId;
}

/// Node arena keyed by [`NodeId`]
pub type NodeArena<T> = SlotMap<NodeId, T>;
