//! Scene management
//!
//! Provides the node tree that renderers walk, plus the container nodes that tie
//! tracked anchors into that tree.
//!
//! ## Layout
//!
//! ```text
//! root
//!  ├── anchor:A1          (container, follows the tracked anchor)
//!  │    └── plane visual  (grid, rotated into the anchor's XZ plane)
//!  └── box                (placed by a tap, world-fixed)
//! ```

mod node;
mod scene_graph;
mod anchor_nodes;

pub use node::{Geometry, Material, MaterialContents, Node, NodeTemplate, Shape};
pub use scene_graph::{SceneError, SceneGraph};
pub use anchor_nodes::AnchorNodes;
pub use crate::foundation::collections::NodeId;
