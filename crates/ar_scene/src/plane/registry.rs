//! Plane visual registry
//!
//! Builds a grid-textured rectangle for each detected plane and remembers which
//! visual belongs to which anchor.

use std::collections::HashMap;

use crate::assets::AssetLibrary;
use crate::core::PlaneVisualConfig;
use crate::events::{EventHandler, SceneContext, SceneEvent};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{constants, utils, Transform, Vec3};
use crate::scene::{Geometry, Material, Node, SceneError, SceneGraph};
use crate::tracking::{Anchor, AnchorId, PlaneAnchor};

/// Maps anchor ids to the plane visuals built for them
#[derive(Debug)]
pub struct PlaneRegistry {
    config: PlaneVisualConfig,
    visuals: HashMap<AnchorId, NodeId>,
}

impl PlaneRegistry {
    /// Create an empty registry
    pub fn new(config: PlaneVisualConfig) -> Self {
        Self {
            config,
            visuals: HashMap::new(),
        }
    }

    /// Grid texture used for new visuals
    pub fn grid_texture(&self) -> &str {
        &self.config.grid_texture
    }

    /// Build the visual for `plane` and insert it under `anchor_node`
    ///
    /// The rectangle is authored in XY, so the node is turned -90 degrees about X
    /// to lie in the anchor's XZ plane. Its height above the anchor is pinned to 0.
    ///
    /// A second call for the same anchor adds a second visual; the map then refers
    /// to the newest one.
    pub fn on_plane_detected(
        &mut self,
        graph: &mut SceneGraph,
        assets: &dyn AssetLibrary,
        anchor_node: NodeId,
        plane: &PlaneAnchor,
    ) -> Result<NodeId, SceneError> {
        if let Err(err) = assets.image(&self.config.grid_texture) {
            log::warn!("Grid texture unavailable for plane {}: {}", plane.id, err);
        }

        let geometry = Geometry::plane(plane.extent.width, plane.extent.depth)
            .with_materials(vec![Material::textured(self.config.grid_texture.clone())]);

        let transform = Transform::from_position_rotation(
            Vec3::new(plane.center.x, 0.0, plane.center.z),
            utils::rotation_x(-constants::HALF_PI),
        );

        let visual = Node::new()
            .with_name(format!("plane:{}", plane.id))
            .with_transform(transform)
            .with_geometry(geometry);
        let id = graph.add_child(anchor_node, visual)?;

        if let Some(previous) = self.visuals.insert(plane.id.clone(), id) {
            log::warn!(
                "Plane {} already had visual {:?}; added another ({:?})",
                plane.id,
                previous,
                id
            );
        } else {
            log::info!(
                "Plane {} visualized: {:.2} x {:.2} at ({:.2}, 0, {:.2})",
                plane.id,
                plane.extent.width,
                plane.extent.depth,
                plane.center.x,
                plane.center.z
            );
        }
        Ok(id)
    }

    /// Visual most recently built for an anchor
    pub fn visual_for(&self, anchor: &AnchorId) -> Option<NodeId> {
        self.visuals.get(anchor).copied()
    }

    /// Anchors with a visual
    pub fn anchor_ids(&self) -> impl Iterator<Item = &AnchorId> {
        self.visuals.keys()
    }

    /// Number of anchors with a visual
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    /// Whether no plane has been visualized
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

impl EventHandler for PlaneRegistry {
    fn on_event(&mut self, ctx: &mut SceneContext<'_>, event: &SceneEvent) -> bool {
        match event {
            SceneEvent::AnchorAdded { anchor: Anchor::Plane(plane), node } => {
                if let Err(err) = self.on_plane_detected(ctx.graph, ctx.assets, *node, plane) {
                    log::warn!("Could not add visual for plane {}: {}", plane.id, err);
                }
            }
            SceneEvent::AnchorAdded { anchor, .. } => {
                log::debug!("Anchor {} is not a plane, no visual", anchor.id());
            }
            SceneEvent::AnchorUpdated { anchor, .. } => {
                log::trace!("Anchor {} updated, visual left as built", anchor.id());
            }
            SceneEvent::AnchorRemoved { id, .. } => {
                // Visuals stay in the tree
                log::debug!("Anchor {} removed", id);
            }
            SceneEvent::Tap { .. } => {}
        }
        false
    }
}
