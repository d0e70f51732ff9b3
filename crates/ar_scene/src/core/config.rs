//! # Scene Configuration
//!
//! One configuration tree drives every piece of the scene core: which planes the
//! tracking session should detect, how plane visuals look, and how taps turn into
//! placed objects. Both the plane-only and the tap-to-place variants of the demo are
//! expressed as values of this tree rather than separate controllers.
//!
//! ## Configuration Categories
//!
//! - **Tracking Config**: plane detection flags handed to the session on start
//! - **Plane Visual Config**: grid texture used for detected planes
//! - **Placement Config**: placed asset, vertical offset, hit-test constraint
//! - **Log level**: default filter for the logger

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::tracking::{HitTestTypes, PlaneDetection};

/// # Tracking Configuration
///
/// World-tracking options passed to [`crate::tracking::TrackingSession::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Detect horizontal planes (floors, tables)
    pub horizontal_planes: bool,
    /// Detect vertical planes (walls)
    pub vertical_planes: bool,
}

impl TrackingConfig {
    /// Horizontal plane detection only
    pub fn horizontal() -> Self {
        Self {
            horizontal_planes: true,
            vertical_planes: false,
        }
    }

    /// Enable or disable vertical plane detection
    #[must_use]
    pub fn with_vertical_planes(mut self, enabled: bool) -> Self {
        self.vertical_planes = enabled;
        self
    }

    /// Plane detection flags for the session
    pub fn plane_detection(&self) -> PlaneDetection {
        let mut detection = PlaneDetection::empty();
        detection.set(PlaneDetection::HORIZONTAL, self.horizontal_planes);
        detection.set(PlaneDetection::VERTICAL, self.vertical_planes);
        detection
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::horizontal()
    }
}

/// # Plane Visual Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneVisualConfig {
    /// Image asset name used as the grid's diffuse texture
    pub grid_texture: String,
}

impl PlaneVisualConfig {
    /// Create a plane visual configuration with the given grid texture
    pub fn new(grid_texture: impl Into<String>) -> Self {
        Self {
            grid_texture: grid_texture.into(),
        }
    }
}

impl Default for PlaneVisualConfig {
    fn default() -> Self {
        Self::new("art.scnassets/grid.png")
    }
}

/// Which detected geometry a tap may land on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTestMode {
    /// Only inside the detected extent of a plane
    ExistingPlaneUsingExtent,
    /// Anywhere on the infinite plane through a detected anchor
    ExistingPlane,
}

impl HitTestMode {
    /// Hit-test flags for the session query
    pub fn types(self) -> HitTestTypes {
        match self {
            Self::ExistingPlaneUsingExtent => HitTestTypes::EXISTING_PLANE_USING_EXTENT,
            Self::ExistingPlane => HitTestTypes::EXISTING_PLANE,
        }
    }
}

/// # Placement Configuration
///
/// Controls the tap-to-place behavior. The default lifts the box by half of its
/// 0.3 unit height so it rests on the plane instead of sinking into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Whether taps place objects at all
    pub enabled: bool,
    /// Scene asset holding the placed object
    pub asset_scene: String,
    /// Name of the node to pull out of the scene asset
    pub asset_node: String,
    /// Added to the hit point's Y coordinate
    pub vertical_offset: f32,
    /// Hit-test constraint
    pub hit_test: HitTestMode,
}

impl PlacementConfig {
    /// Create a placement configuration with defaults
    pub fn new() -> Self {
        Self {
            enabled: true,
            asset_scene: "art.scnassets/box.scn".to_string(),
            asset_node: "box".to_string(),
            vertical_offset: 0.15,
            hit_test: HitTestMode::ExistingPlaneUsingExtent,
        }
    }

    /// Enable or disable tap placement
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the asset scene and node to place
    #[must_use]
    pub fn with_asset(mut self, scene: impl Into<String>, node: impl Into<String>) -> Self {
        self.asset_scene = scene.into();
        self.asset_node = node.into();
        self
    }

    /// Set the vertical offset
    #[must_use]
    pub fn with_vertical_offset(mut self, offset: f32) -> Self {
        self.vertical_offset = offset;
        self
    }

    /// Set the hit-test constraint
    #[must_use]
    pub fn with_hit_test(mut self, mode: HitTestMode) -> Self {
        self.hit_test = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.vertical_offset.is_finite() {
            return Err("Vertical offset must be a finite number".to_string());
        }
        if self.enabled && (self.asset_scene.is_empty() || self.asset_node.is_empty()) {
            return Err("Placement needs an asset scene and node name".to_string());
        }
        Ok(())
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Session tracking options
    pub tracking: TrackingConfig,
    /// Plane visual options
    pub plane: PlaneVisualConfig,
    /// Tap placement options
    pub placement: PlacementConfig,
}

impl ArConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            tracking: TrackingConfig::default(),
            plane: PlaneVisualConfig::default(),
            placement: PlacementConfig::default(),
        }
    }

    /// Plane visuals only, taps ignored
    pub fn planes_only(grid_texture: impl Into<String>) -> Self {
        Self {
            plane: PlaneVisualConfig::new(grid_texture),
            placement: PlacementConfig::new().with_enabled(false),
            ..Self::new()
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tracking.plane_detection().is_empty() {
            return Err("At least one plane alignment must be detected".to_string());
        }
        if self.plane.grid_texture.is_empty() {
            return Err("Grid texture name cannot be empty".to_string());
        }
        self.placement.validate()?;
        Ok(())
    }
}

impl Default for ArConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ArConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_detect_horizontal_planes_only() {
        let config = ArConfig::default();
        assert_eq!(config.tracking.plane_detection(), PlaneDetection::HORIZONTAL);
        assert!(config.placement.enabled);
        assert!((config.placement.vertical_offset - 0.15).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_planes_only_variant_disables_placement() {
        let config = ArConfig::planes_only("art.scnassets/z.png");
        assert!(!config.placement.enabled);
        assert_eq!(config.plane.grid_texture, "art.scnassets/z.png");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_disabled_detection() {
        let mut config = ArConfig::default();
        config.tracking.horizontal_planes = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_finite_offset() {
        let config = PlacementConfig::new().with_vertical_offset(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ArConfig = toml::from_str(
            r#"
            [placement]
            vertical_offset = 0.25
            hit_test = "existing_plane"
            "#,
        )
        .unwrap();

        assert!((config.placement.vertical_offset - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.placement.hit_test, HitTestMode::ExistingPlane);
        assert_eq!(config.placement.asset_node, "box");
        assert_eq!(config.tracking, TrackingConfig::horizontal());
    }

    #[test]
    fn test_ron_save_and_load() {
        let path = std::env::temp_dir().join(format!("ar_scene_config_{}.ron", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let config = ArConfig::planes_only("grid.png");
        config.save_to_file(&path).unwrap();
        let loaded = ArConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = ArConfig::load_from_file("config.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(path)) if path == "config.yaml"));

        let config = ArConfig::default();
        assert!(matches!(
            config.save_to_file("config.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_toml_file_is_an_io_error() {
        let result = ArConfig::load_from_file("does/not/exist/ar_scene.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
