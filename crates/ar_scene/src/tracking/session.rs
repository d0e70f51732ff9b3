//! Tracking session interface
//!
//! The session is the external engine that estimates camera pose and detects
//! planes. The scene core only drives its lifecycle, drains its events and asks it
//! to hit-test screen points.

use thiserror::Error;

use crate::core::TrackingConfig;

use super::anchor::{Anchor, AnchorId};
use super::hit_test::{HitResult, HitTestTypes, ScreenPoint};

/// Events emitted by a running session, delivered in order
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// A new anchor started being tracked
    AnchorAdded(Anchor),
    /// An existing anchor's pose or geometry was refined
    AnchorUpdated(Anchor),
    /// An anchor stopped being tracked
    AnchorRemoved(AnchorId),
    /// The user tapped the view; `None` when the touch carried no location
    Tap(Option<ScreenPoint>),
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Never started
    Idle,
    /// Tracking and emitting events
    Running,
    /// Stopped, may be started again
    Paused,
}

/// Session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The configuration cannot be run
    #[error("Unsupported tracking configuration: {0}")]
    UnsupportedConfiguration(String),
}

/// External AR tracking engine
pub trait TrackingSession {
    /// Start (or restart) tracking with the given configuration
    fn run(&mut self, config: &TrackingConfig) -> Result<(), SessionError>;

    /// Stop tracking; queued events are kept
    fn pause(&mut self);

    /// Current lifecycle state
    fn state(&self) -> SessionState;

    /// Next pending event, if any
    fn poll_event(&mut self) -> Option<TrackingEvent>;

    /// Project a screen point onto tracked geometry, nearest hit first
    fn hit_test(&self, point: ScreenPoint, types: HitTestTypes) -> Vec<HitResult>;
}
