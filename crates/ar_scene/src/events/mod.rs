//! Scene event system
//!
//! Key principles:
//! - Typed events (one enum, matched by handlers)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queued delivery, drained in FIFO order by `dispatch`
//!
//! Handlers are shared `Rc<RefCell<..>>` so their owner can keep querying them;
//! all delivery happens on the thread that owns the scene.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::assets::AssetLibrary;
use crate::foundation::collections::NodeId;
use crate::scene::SceneGraph;
use crate::tracking::{Anchor, AnchorId, ScreenPoint, TrackingSession};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Anchor added, container node created
    AnchorAdded,
    /// Anchor pose or geometry refined
    AnchorUpdated,
    /// Anchor no longer tracked
    AnchorRemoved,
    /// User tapped the view
    Tap,
}

/// Event delivered to scene handlers
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A new anchor and the container node created for it
    AnchorAdded {
        /// The anchor
        anchor: Anchor,
        /// Its container node
        node: NodeId,
    },
    /// A tracked anchor changed
    AnchorUpdated {
        /// The anchor's latest state
        anchor: Anchor,
        /// Its container node, if one exists
        node: Option<NodeId>,
    },
    /// An anchor was dropped by the session
    AnchorRemoved {
        /// Id of the dropped anchor
        id: AnchorId,
        /// Its container node, if one exists
        node: Option<NodeId>,
    },
    /// A tap on the view
    Tap {
        /// Tap location, `None` when the touch had none
        point: Option<ScreenPoint>,
    },
}

impl SceneEvent {
    /// Type used for handler lookup
    pub fn event_type(&self) -> EventType {
        match self {
            Self::AnchorAdded { .. } => EventType::AnchorAdded,
            Self::AnchorUpdated { .. } => EventType::AnchorUpdated,
            Self::AnchorRemoved { .. } => EventType::AnchorRemoved,
            Self::Tap { .. } => EventType::Tap,
        }
    }
}

/// Everything a handler may touch while reacting to an event
pub struct SceneContext<'a> {
    /// Scene tree
    pub graph: &'a mut SceneGraph,
    /// Tracking session, for hit tests
    pub session: &'a dyn TrackingSession,
    /// Asset source
    pub assets: &'a dyn AssetLibrary,
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, ctx: &mut SceneContext<'_>, event: &SceneEvent) -> bool;
}

/// Handler shared between the event system and its owner
pub type SharedHandler = Rc<RefCell<dyn EventHandler>>;

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
#[derive(Default)]
pub struct EventSystem {
    queue: VecDeque<SceneEvent>,
    handlers: HashMap<EventType, Vec<SharedHandler>>,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event type
    /// Only handlers registered for this type will be notified, in registration order
    pub fn register_handler(&mut self, event_type: EventType, handler: SharedHandler) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Number of handlers registered for a type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    /// Queue an event for the next dispatch
    pub fn send(&mut self, event: SceneEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver every queued event, returns how many were delivered
    pub fn dispatch(&mut self, ctx: &mut SceneContext<'_>) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            self.dispatch_event(ctx, &event);
            delivered += 1;
        }
        delivered
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&self, ctx: &mut SceneContext<'_>, event: &SceneEvent) {
        let Some(handlers) = self.handlers.get(&event.event_type()) else {
            log::trace!("No handler for {:?}", event.event_type());
            return;
        };
        for handler in handlers {
            if handler.borrow_mut().on_event(ctx, event) {
                break;
            }
        }
    }

    /// Drop all queued events
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::tracking::{Camera, SimulatedSession};

    struct TestHandler {
        events_received: Vec<EventType>,
        consume: bool,
    }

    impl TestHandler {
        fn shared(consume: bool) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                events_received: Vec::new(),
                consume,
            }))
        }
    }

    impl EventHandler for TestHandler {
        fn on_event(&mut self, _ctx: &mut SceneContext<'_>, event: &SceneEvent) -> bool {
            self.events_received.push(event.event_type());
            self.consume
        }
    }

    fn with_context(f: impl FnOnce(&mut SceneContext<'_>)) {
        let mut graph = SceneGraph::new();
        let session = SimulatedSession::new(Camera::looking_down(1.0, 100, 100));
        let assets = AssetCatalog::new();
        let mut ctx = SceneContext {
            graph: &mut graph,
            session: &session,
            assets: &assets,
        };
        f(&mut ctx);
    }

    #[test]
    fn test_dispatch_reaches_only_registered_type() {
        let tap_handler = TestHandler::shared(false);
        let mut system = EventSystem::new();
        system.register_handler(EventType::Tap, tap_handler.clone());

        system.send(SceneEvent::Tap { point: None });
        system.send(SceneEvent::AnchorRemoved {
            id: AnchorId::new("A1"),
            node: None,
        });

        with_context(|ctx| assert_eq!(system.dispatch(ctx), 2));

        assert_eq!(tap_handler.borrow().events_received, vec![EventType::Tap]);
        assert_eq!(system.pending(), 0);
    }

    #[test]
    fn test_event_consumption_stops_forwarding() {
        let first = TestHandler::shared(true);
        let second = TestHandler::shared(false);
        let mut system = EventSystem::new();
        system.register_handler(EventType::Tap, first.clone());
        system.register_handler(EventType::Tap, second.clone());

        system.send(SceneEvent::Tap { point: None });
        with_context(|ctx| {
            system.dispatch(ctx);
        });

        assert_eq!(first.borrow().events_received.len(), 1);
        assert!(second.borrow().events_received.is_empty());
        assert_eq!(system.handler_count(EventType::Tap), 2);
    }

    #[test]
    fn test_events_delivered_in_send_order() {
        let handler = TestHandler::shared(false);
        let mut system = EventSystem::new();
        system.register_handler(EventType::Tap, handler.clone());
        system.register_handler(EventType::AnchorRemoved, handler.clone());

        system.send(SceneEvent::AnchorRemoved {
            id: AnchorId::new("A1"),
            node: None,
        });
        system.send(SceneEvent::Tap { point: None });
        with_context(|ctx| {
            system.dispatch(ctx);
        });

        assert_eq!(
            handler.borrow().events_received,
            vec![EventType::AnchorRemoved, EventType::Tap]
        );
    }

    #[test]
    fn test_clear_drops_queue() {
        let mut system = EventSystem::new();
        system.send(SceneEvent::Tap { point: None });
        system.clear();
        assert_eq!(system.pending(), 0);
    }
}
