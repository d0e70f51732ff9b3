//! AR scene view
//!
//! Hosts the scene graph and connects it to a tracking session: starts and pauses
//! the session, turns its events into scene events, and lets the plane registry and
//! the placement controller react to them.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::assets::AssetLibrary;
use crate::core::ArConfig;
use crate::events::{EventSystem, EventType, SceneContext, SceneEvent, SharedHandler};
use crate::foundation::collections::NodeId;
use crate::placement::PlacementController;
use crate::plane::PlaneRegistry;
use crate::scene::{AnchorNodes, SceneGraph};
use crate::tracking::{AnchorId, SessionError, SessionState, TrackingEvent, TrackingSession};

/// Scene graph bound to a tracking session
pub struct ArSceneView<S: TrackingSession, A: AssetLibrary> {
    config: ArConfig,
    session: S,
    assets: A,
    graph: SceneGraph,
    anchors: AnchorNodes,
    events: EventSystem,
    planes: Rc<RefCell<PlaneRegistry>>,
    placement: Rc<RefCell<PlacementController>>,
}

impl<S: TrackingSession, A: AssetLibrary> ArSceneView<S, A> {
    /// Create a view with the plane registry and placement controller subscribed
    pub fn new(config: ArConfig, session: S, assets: A) -> Self {
        let planes = Rc::new(RefCell::new(PlaneRegistry::new(config.plane.clone())));
        let placement = Rc::new(RefCell::new(PlacementController::new(config.placement.clone())));

        let mut events = EventSystem::new();
        for event_type in [EventType::AnchorAdded, EventType::AnchorUpdated, EventType::AnchorRemoved] {
            events.register_handler(event_type, planes.clone());
        }
        events.register_handler(EventType::Tap, placement.clone());

        Self {
            config,
            session,
            assets,
            graph: SceneGraph::new(),
            anchors: AnchorNodes::new(),
            events,
            planes,
            placement,
        }
    }

    /// Subscribe an extra handler; it runs after the built-in ones
    pub fn subscribe(&mut self, event_type: EventType, handler: SharedHandler) {
        self.events.register_handler(event_type, handler);
    }

    /// Start tracking with the configured options
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.session.run(&self.config.tracking)?;
        log::info!("Scene view started");
        Ok(())
    }

    /// Pause tracking
    pub fn pause(&mut self) {
        self.session.pause();
        log::info!("Scene view paused");
    }

    /// Session lifecycle state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Drain the session's pending events; returns how many were handled
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.session.poll_event() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Apply one tracking event to the scene and notify subscribers
    pub fn handle(&mut self, event: TrackingEvent) {
        let scene_event = match event {
            TrackingEvent::AnchorAdded(anchor) => match self.anchors.attach(&mut self.graph, &anchor) {
                Ok(node) => SceneEvent::AnchorAdded { anchor, node },
                Err(err) => {
                    log::warn!("No container for anchor {}: {}", anchor.id(), err);
                    return;
                }
            },
            TrackingEvent::AnchorUpdated(anchor) => {
                let node = self.anchors.sync(&mut self.graph, &anchor).unwrap_or_else(|err| {
                    log::warn!("Could not sync anchor {}: {}", anchor.id(), err);
                    None
                });
                SceneEvent::AnchorUpdated { anchor, node }
            }
            TrackingEvent::AnchorRemoved(id) => {
                // Containers and their content stay in the tree
                let node = self.anchors.get(&id);
                SceneEvent::AnchorRemoved { id, node }
            }
            TrackingEvent::Tap(point) => SceneEvent::Tap { point },
        };

        self.events.send(scene_event);
        let mut ctx = SceneContext {
            graph: &mut self.graph,
            session: &self.session,
            assets: &self.assets,
        };
        self.events.dispatch(&mut ctx);
    }

    /// Scene tree
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Plane visuals by anchor
    pub fn plane_registry(&self) -> Ref<'_, PlaneRegistry> {
        self.planes.borrow()
    }

    /// Tap placement state
    pub fn placement(&self) -> Ref<'_, PlacementController> {
        self.placement.borrow()
    }

    /// Container node of an anchor
    pub fn anchor_node(&self, id: &AnchorId) -> Option<NodeId> {
        self.anchors.get(id)
    }

    /// Tracking session
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Mutable tracking session, for feeding scripted input
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Active configuration
    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    /// Log the scene tree at info level
    pub fn log_tree(&self) {
        for (id, depth) in self.graph.walk() {
            let Some(node) = self.graph.node(id) else { continue };
            let p = node.position();
            log::info!(
                "{:indent$}{} ({:.3}, {:.3}, {:.3}){}",
                "",
                node.name.as_deref().unwrap_or("<unnamed>"),
                p.x,
                p.y,
                p.z,
                if node.geometry.is_some() { " [geometry]" } else { "" },
                indent = depth * 2
            );
        }
    }
}
