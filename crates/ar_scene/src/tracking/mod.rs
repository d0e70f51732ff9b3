//! Tracking session seam
//!
//! Types exchanged with the external AR tracking engine: anchors, events, hit-test
//! queries and results, plus a scripted session for demos and tests.

pub mod anchor;
pub mod hit_test;
pub mod session;
pub mod simulated;

pub use anchor::{Anchor, AnchorId, PlaneAlignment, PlaneAnchor, PlaneExtent};
pub use hit_test::{HitResult, HitTestTypes, PlaneDetection, ScreenPoint};
pub use session::{SessionError, SessionState, TrackingEvent, TrackingSession};
pub use simulated::{Camera, Ray, SimulatedSession};
