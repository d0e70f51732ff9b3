//! Scene nodes, geometry and materials

use serde::{Deserialize, Serialize};

use crate::foundation::collections::NodeId;
use crate::foundation::math::{Transform, Vec3};

/// What a material shows on its diffuse channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialContents {
    /// Nothing assigned
    None,
    /// Flat RGBA color
    Color([f32; 4]),
    /// Image asset referenced by name
    Texture(String),
}

/// Surface description attached to a geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Optional debug name
    #[serde(default)]
    pub name: Option<String>,
    /// Diffuse contents
    pub diffuse: MaterialContents,
}

impl Material {
    /// Material textured with the named image asset
    pub fn textured(image: impl Into<String>) -> Self {
        Self {
            name: None,
            diffuse: MaterialContents::Texture(image.into()),
        }
    }

    /// Material with a flat color
    pub fn color(rgba: [f32; 4]) -> Self {
        Self {
            name: None,
            diffuse: MaterialContents::Color(rgba),
        }
    }

    /// Texture name, if the diffuse channel is textured
    pub fn texture(&self) -> Option<&str> {
        match &self.diffuse {
            MaterialContents::Texture(name) => Some(name),
            _ => None,
        }
    }
}

/// Primitive shapes a node can carry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Flat rectangle authored in the local XY plane
    Plane {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        height: f32,
    },
    /// Box centered on the local origin
    Box {
        /// Extent along local X
        width: f32,
        /// Extent along local Y
        height: f32,
        /// Extent along local Z
        length: f32,
        /// Edge rounding
        #[serde(default)]
        chamfer_radius: f32,
    },
}

impl Shape {
    /// Half of the shape's local Y extent
    pub fn half_height(&self) -> f32 {
        match self {
            Self::Plane { height, .. } | Self::Box { height, .. } => height * 0.5,
        }
    }
}

/// Shape plus its materials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Shape
    pub shape: Shape,
    /// Materials, applied in order to the shape's elements
    #[serde(default)]
    pub materials: Vec<Material>,
}

impl Geometry {
    /// Flat rectangle of `width x height` in the local XY plane
    pub fn plane(width: f32, height: f32) -> Self {
        Self {
            shape: Shape::Plane { width, height },
            materials: Vec::new(),
        }
    }

    /// Box with square edges
    pub fn cuboid(width: f32, height: f32, length: f32) -> Self {
        Self {
            shape: Shape::Box {
                width,
                height,
                length,
                chamfer_radius: 0.0,
            },
            materials: Vec::new(),
        }
    }

    /// Builder: replace the materials
    #[must_use]
    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    /// First material, if any
    pub fn first_material(&self) -> Option<&Material> {
        self.materials.first()
    }
}

/// A positioned, parentable unit in the scene graph
///
/// Nodes are owned by the [`crate::scene::SceneGraph`] arena; parent and children
/// are stored as ids into that arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional lookup name
    pub name: Option<String>,
    /// Transform relative to the parent node
    pub transform: Transform,
    /// Visible geometry
    pub geometry: Option<Geometry>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// Empty node at the parent's origin
    pub fn new() -> Self {
        Self {
            name: None,
            transform: Transform::identity(),
            geometry: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder: set the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Builder: set the local position
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Builder: attach geometry
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Local position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Parent id, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Serializable node description used by asset scenes
///
/// Instantiated into a graph with [`crate::scene::SceneGraph::instantiate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTemplate {
    /// Lookup name
    pub name: Option<String>,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Visible geometry
    pub geometry: Option<Geometry>,
    /// Child templates
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    /// Named, empty template
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Builder: attach geometry
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Builder: append a child template
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for a template by name, including `self`
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Detached node carrying this template's own data (children excluded)
    pub fn to_node(&self) -> Node {
        Node {
            name: self.name.clone(),
            transform: self.transform,
            geometry: self.geometry.clone(),
            parent: None,
            children: Vec::new(),
        }
    }
}
