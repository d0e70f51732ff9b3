//! # Core Module
//!
//! Shared configuration used by every subsystem of the scene core.

pub mod config;

pub use config::{
    ArConfig,
    TrackingConfig,
    PlaneVisualConfig,
    PlacementConfig,
    HitTestMode,
    Config,
    ConfigError,
};
