//! Tap-to-place

mod controller;

pub use controller::{PlacementController, TapOutcome};
