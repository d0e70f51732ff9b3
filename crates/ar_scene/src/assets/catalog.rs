//! In-memory asset catalog with an optional RON manifest
//!
//! Manifest layout:
//!
//! ```ron
//! (
//!     scenes: {
//!         "art.scnassets/box.scn": (
//!             name: Some("scene"),
//!             children: [(name: Some("box"), geometry: Some((shape: Box(width: 0.3, height: 0.3, length: 0.3))))],
//!         ),
//!     },
//!     images: {
//!         "art.scnassets/grid.png": Grid(size: 256, cells: 8, line_width: 2),
//!         "art.scnassets/z.png": File("textures/z.png"),
//!     },
//! )
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scene::NodeTemplate;

use super::image_loader::ImageData;
use super::{AssetError, AssetLibrary};

const GRID_LINE: [u8; 4] = [255, 255, 255, 200];
const GRID_FILL: [u8; 4] = [255, 255, 255, 40];

/// Where an image entry comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Image file, relative to the manifest's directory
    File(String),
    /// Generated grid pattern
    Grid {
        /// Edge length in pixels
        size: u32,
        /// Cells per edge
        cells: u32,
        /// Line thickness in pixels
        #[serde(default = "default_line_width")]
        line_width: u32,
    },
    /// Generated single color
    Solid {
        /// Edge length in pixels
        size: u32,
        /// RGBA color
        color: [u8; 4],
    },
}

fn default_line_width() -> u32 {
    1
}

/// Serialized form of a catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Scene name to root template
    pub scenes: HashMap<String, NodeTemplate>,
    /// Image name to source
    pub images: HashMap<String, ImageSource>,
}

/// Named scenes and images held in memory
#[derive(Debug, Default)]
pub struct AssetCatalog {
    scenes: HashMap<String, NodeTemplate>,
    images: HashMap<String, ImageData>,
}

impl AssetCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene under `name`
    pub fn insert_scene(&mut self, name: impl Into<String>, scene: NodeTemplate) {
        self.scenes.insert(name.into(), scene);
    }

    /// Register an image under `name`
    pub fn insert_image(&mut self, name: impl Into<String>, image: ImageData) {
        self.images.insert(name.into(), image);
    }

    /// Builder: register a scene
    #[must_use]
    pub fn with_scene(mut self, name: impl Into<String>, scene: NodeTemplate) -> Self {
        self.insert_scene(name, scene);
        self
    }

    /// Builder: register an image
    #[must_use]
    pub fn with_image(mut self, name: impl Into<String>, image: ImageData) -> Self {
        self.insert_image(name, image);
        self
    }

    /// Build a catalog from a manifest, resolving image files against `base_dir`
    ///
    /// An image file that cannot be decoded is skipped with a warning; lookups for
    /// it then fail like any unknown name.
    pub fn from_manifest(manifest: AssetManifest, base_dir: &Path) -> Self {
        let mut catalog = Self::new();
        for (name, scene) in manifest.scenes {
            catalog.insert_scene(name, scene);
        }
        for (name, source) in manifest.images {
            let image = match source {
                ImageSource::File(path) => match ImageData::from_file(base_dir.join(&path)) {
                    Ok(image) => image,
                    Err(err) => {
                        log::warn!("Skipping image '{}': {}", name, err);
                        continue;
                    }
                },
                ImageSource::Grid { size, cells, line_width } => {
                    ImageData::grid(size, cells, line_width, GRID_LINE, GRID_FILL)
                }
                ImageSource::Solid { size, color } => ImageData::solid_color(size, size, color),
            };
            catalog.insert_image(name, image);
        }
        log::info!(
            "Asset catalog ready: {} scene(s), {} image(s)",
            catalog.scenes.len(),
            catalog.images.len()
        );
        catalog
    }

    /// Load a RON manifest file
    pub fn load_manifest(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let manifest: AssetManifest =
            ron::from_str(&contents).map_err(|e| AssetError::Parse(format!("{}: {}", path.display(), e)))?;
        let base_dir = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        Ok(Self::from_manifest(manifest, &base_dir))
    }

    /// Number of registered scenes
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

impl AssetLibrary for AssetCatalog {
    fn load_node(&self, scene: &str, node_name: &str) -> Result<NodeTemplate, AssetError> {
        let root = self
            .scenes
            .get(scene)
            .ok_or_else(|| AssetError::NotFound(scene.to_string()))?;
        root.find(node_name)
            .cloned()
            .ok_or_else(|| AssetError::NodeNotFound {
                scene: scene.to_string(),
                node: node_name.to_string(),
            })
    }

    fn image(&self, name: &str) -> Result<&ImageData, AssetError> {
        self.images
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, Shape};

    const MANIFEST: &str = r#"(
        scenes: {
            "art.scnassets/box.scn": (
                name: Some("scene"),
                children: [
                    (
                        name: Some("box"),
                        geometry: Some((
                            shape: Box(width: 0.3, height: 0.3, length: 0.3),
                            materials: [(diffuse: Color((0.2, 0.4, 1.0, 1.0)))],
                        )),
                    ),
                ],
            ),
        },
        images: {
            "art.scnassets/grid.png": Grid(size: 32, cells: 4),
        },
    )"#;

    #[test]
    fn test_load_node_finds_nested_node() {
        let catalog = AssetCatalog::new().with_scene(
            "box.scn",
            NodeTemplate::named("scene")
                .with_child(NodeTemplate::named("box").with_geometry(Geometry::cuboid(0.3, 0.3, 0.3))),
        );

        let node = catalog.load_node("box.scn", "box").unwrap();
        assert_eq!(node.name.as_deref(), Some("box"));
    }

    #[test]
    fn test_missing_scene_and_missing_node_are_distinct_errors() {
        let catalog = AssetCatalog::new().with_scene("box.scn", NodeTemplate::named("scene"));

        assert!(matches!(catalog.load_node("ship.scn", "box"), Err(AssetError::NotFound(_))));
        assert!(matches!(
            catalog.load_node("box.scn", "box"),
            Err(AssetError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_manifest_parses_scenes_and_generated_images() {
        let manifest: AssetManifest = ron::from_str(MANIFEST).unwrap();
        let catalog = AssetCatalog::from_manifest(manifest, Path::new("."));

        let node = catalog.load_node("art.scnassets/box.scn", "box").unwrap();
        let geometry = node.geometry.unwrap();
        assert!(matches!(geometry.shape, Shape::Box { .. }));
        assert!((geometry.shape.half_height() - 0.15).abs() < 1e-6);

        let grid = catalog.image("art.scnassets/grid.png").unwrap();
        assert_eq!((grid.width, grid.height), (32, 32));
        assert!(catalog.image("art.scnassets/z.png").is_err());
    }

    #[test]
    fn test_unreadable_image_file_is_skipped() {
        let mut manifest = AssetManifest::default();
        manifest
            .scenes
            .insert("box.scn".to_string(), NodeTemplate::named("scene").with_child(NodeTemplate::named("box")));
        manifest
            .images
            .insert("z.png".to_string(), ImageSource::File("does/not/exist.png".to_string()));
        manifest.images.insert(
            "grid.png".to_string(),
            ImageSource::Grid {
                size: 8,
                cells: 2,
                line_width: 1,
            },
        );

        let catalog = AssetCatalog::from_manifest(manifest, Path::new("."));

        assert_eq!(catalog.scene_count(), 1);
        assert!(catalog.load_node("box.scn", "box").is_ok());
        assert!(catalog.image("grid.png").is_ok());
        assert!(matches!(catalog.image("z.png"), Err(AssetError::NotFound(_))));
    }
}
