//! Tap-to-place controller
//!
//! A tap is resolved through the session's hit test, then a copy of the configured
//! asset node is dropped at the hit point as a direct child of the root. Placed
//! objects are world-fixed and untracked: they do not follow anchor refinements.

use crate::assets::AssetLibrary;
use crate::core::PlacementConfig;
use crate::events::{EventHandler, SceneContext, SceneEvent};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Vec3;
use crate::scene::SceneGraph;
use crate::tracking::{ScreenPoint, TrackingSession};

/// What a tap turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// A node was inserted under the root
    Placed(NodeId),
    /// The touch carried no location
    NoTouch,
    /// Placement is turned off in the configuration
    Disabled,
    /// The tap did not land on a detected plane
    NoHit,
    /// The asset node could not be loaded
    AssetMissing,
}

/// Places the configured asset wherever the user taps a detected plane
#[derive(Debug)]
pub struct PlacementController {
    config: PlacementConfig,
    placed: usize,
}

impl PlacementController {
    /// Create a controller
    pub fn new(config: PlacementConfig) -> Self {
        Self { config, placed: 0 }
    }

    /// Active configuration
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Number of successful placements so far
    pub fn placed_count(&self) -> usize {
        self.placed
    }

    /// Handle a tap
    ///
    /// Every failure path leaves the graph untouched and is reported through the
    /// returned [`TapOutcome`] rather than an error.
    pub fn on_tap(
        &mut self,
        graph: &mut SceneGraph,
        session: &dyn TrackingSession,
        assets: &dyn AssetLibrary,
        point: Option<ScreenPoint>,
    ) -> TapOutcome {
        let Some(point) = point else {
            log::debug!("Tap without a location ignored");
            return TapOutcome::NoTouch;
        };
        if !self.config.enabled {
            log::trace!("Placement disabled, tap at ({:.0}, {:.0}) ignored", point.x, point.y);
            return TapOutcome::Disabled;
        }

        let hits = session.hit_test(point, self.config.hit_test.types());
        let Some(hit) = hits.first() else {
            log::debug!("Tap at ({:.0}, {:.0}) hit no detected plane", point.x, point.y);
            return TapOutcome::NoHit;
        };

        let mut template = match assets.load_node(&self.config.asset_scene, &self.config.asset_node) {
            Ok(template) => template,
            Err(err) => {
                log::warn!("Placement skipped: {}", err);
                return TapOutcome::AssetMissing;
            }
        };

        let world = hit.world_position();
        template.transform.position = Vec3::new(world.x, world.y + self.config.vertical_offset, world.z);

        let id = graph.instantiate_at_root(&template);
        self.placed += 1;
        log::info!(
            "Placed '{}' at ({:.3}, {:.3}, {:.3})",
            self.config.asset_node,
            template.transform.position.x,
            template.transform.position.y,
            template.transform.position.z
        );
        TapOutcome::Placed(id)
    }
}

impl EventHandler for PlacementController {
    fn on_event(&mut self, ctx: &mut SceneContext<'_>, event: &SceneEvent) -> bool {
        if let SceneEvent::Tap { point } = event {
            self.on_tap(ctx.graph, ctx.session, ctx.assets, *point);
            return true;
        }
        false
    }
}
