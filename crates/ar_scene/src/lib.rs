//! # AR Scene
//!
//! Scene core for a plane-finding AR view: a tracking session reports anchors and
//! taps, the scene shows every detected horizontal plane as a grid and drops a box
//! wherever the user taps one.
//!
//! ## Features
//!
//! - **Scene Graph**: Arena-backed node tree with anchor containers
//! - **Plane Visuals**: Grid-textured rectangle per detected plane
//! - **Tap Placement**: Hit test against detected planes, insert an asset node
//! - **Tracking Seam**: Session trait plus a scripted session for demos and tests
//! - **Configuration**: TOML or RON files, validated before use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ar_scene::prelude::*;
//!
//! fn main() -> Result<(), ArError> {
//!     let config = ArConfig::load_from_file("config/ar_scene.toml")?;
//!     let assets = AssetCatalog::load_manifest("assets/manifest.ron")?;
//!     let session = SimulatedSession::new(Camera::looking_down(1.5, 1170, 2532));
//!
//!     let mut view = ArSceneView::new(config, session, assets);
//!     view.start()?;
//!     let center = view.session().camera().center();
//!     view.session_mut().tap(Some(center));
//!     view.pump();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

// Core modules
pub mod core;
pub mod config;
pub mod foundation;

// Scene and tracking
pub mod scene;
pub mod tracking;
pub mod events;
pub mod assets;

// Behaviors
pub mod plane;
pub mod placement;

mod scene_view;

use thiserror::Error;

pub use scene_view::ArSceneView;

/// Errors surfaced while setting up or driving a scene view
#[derive(Error, Debug)]
pub enum ArError {
    /// Configuration file could not be read or written
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Tracking session refused to start
    #[error("Session error: {0}")]
    Session(#[from] tracking::SessionError),

    /// Asset catalog could not be built
    #[error("Asset error: {0}")]
    Asset(#[from] assets::AssetError),

    /// Scene tree operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] scene::SceneError),
}

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        ArError, ArSceneView,
        assets::{AssetCatalog, AssetLibrary, ImageData},
        core::{ArConfig, Config, HitTestMode, PlacementConfig, PlaneVisualConfig, TrackingConfig},
        events::{EventHandler, EventType, SceneContext, SceneEvent},
        foundation::math::{Transform, Vec3},
        placement::{PlacementController, TapOutcome},
        plane::PlaneRegistry,
        scene::{Geometry, Node, NodeId, NodeTemplate, SceneGraph},
        tracking::{
            Anchor, AnchorId, Camera, PlaneAnchor, PlaneExtent, ScreenPoint, SimulatedSession,
            TrackingEvent, TrackingSession,
        },
    };
}
