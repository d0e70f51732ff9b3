//! Asset management system
//!
//! The scene core never touches files directly: it asks an [`AssetLibrary`] for a
//! node out of a named scene and for images referenced by materials.

pub mod image_loader;
pub mod catalog;

pub use image_loader::ImageData;
pub use catalog::{AssetCatalog, AssetManifest, ImageSource};

use thiserror::Error;

use crate::scene::NodeTemplate;

/// Source of scenes and images by name
pub trait AssetLibrary {
    /// Copy of the node called `node_name` inside `scene`, searched recursively
    fn load_node(&self, scene: &str, node_name: &str) -> Result<NodeTemplate, AssetError>;

    /// Image registered under `name`
    fn image(&self, name: &str) -> Result<&ImageData, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Scene exists but has no node with that name
    #[error("Node '{node}' not found in scene '{scene}'")]
    NodeNotFound {
        /// Scene that was searched
        scene: String,
        /// Requested node name
        node: String,
    },

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Manifest could not be parsed
    #[error("Manifest parse error: {0}")]
    Parse(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
