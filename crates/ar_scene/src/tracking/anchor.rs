//! Anchors reported by the tracking session

use std::fmt;

use crate::foundation::math::{Point3, Transform, Vec3};

/// Opaque anchor identifier assigned by the tracking session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(String);

impl AnchorId {
    /// Wrap an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnchorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Orientation class of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneAlignment {
    /// Floors, tables
    Horizontal,
    /// Walls
    Vertical,
}

/// Detected width and depth of a plane, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneExtent {
    /// Size along the anchor's local X axis
    pub width: f32,
    /// Size along the anchor's local Z axis
    pub depth: f32,
}

impl PlaneExtent {
    /// Create an extent
    pub fn new(width: f32, depth: f32) -> Self {
        Self { width, depth }
    }
}

/// A detected planar surface
///
/// The plane lies in the XZ plane of the anchor's local frame. `center` is given in
/// that frame and moves as tracking refines the estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchor {
    /// Anchor identity
    pub id: AnchorId,
    /// Anchor pose in world space
    pub transform: Transform,
    /// Plane orientation class
    pub alignment: PlaneAlignment,
    /// Plane center relative to the anchor
    pub center: Vec3,
    /// Plane size
    pub extent: PlaneExtent,
}

impl PlaneAnchor {
    /// Horizontal plane anchor posed at `transform`
    pub fn horizontal(id: impl Into<AnchorId>, transform: Transform, center: Vec3, extent: PlaneExtent) -> Self {
        Self {
            id: id.into(),
            transform,
            alignment: PlaneAlignment::Horizontal,
            center,
            extent,
        }
    }

    /// Whether a point given in the anchor's local frame lies within the extent
    pub fn contains_local(&self, local: Point3) -> bool {
        (local.x - self.center.x).abs() <= self.extent.width * 0.5
            && (local.z - self.center.z).abs() <= self.extent.depth * 0.5
    }
}

/// Every anchor kind the session can report
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Detected plane
    Plane(PlaneAnchor),
    /// Bare tracked point with no geometry
    Point {
        /// Anchor identity
        id: AnchorId,
        /// Anchor pose in world space
        transform: Transform,
    },
}

impl Anchor {
    /// Anchor identity
    pub fn id(&self) -> &AnchorId {
        match self {
            Self::Plane(plane) => &plane.id,
            Self::Point { id, .. } => id,
        }
    }

    /// Anchor pose in world space
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Plane(plane) => &plane.transform,
            Self::Point { transform, .. } => transform,
        }
    }

    /// Plane data, if this is a plane anchor
    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            Self::Plane(plane) => Some(plane),
            Self::Point { .. } => None,
        }
    }
}

impl From<PlaneAnchor> for Anchor {
    fn from(plane: PlaneAnchor) -> Self {
        Self::Plane(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_local_respects_center_offset() {
        let plane = PlaneAnchor::horizontal(
            "A1",
            Transform::identity(),
            Vec3::new(1.0, 0.0, 2.0),
            PlaneExtent::new(0.5, 0.8),
        );

        assert!(plane.contains_local(Point3::new(1.2, 0.0, 2.35)));
        assert!(!plane.contains_local(Point3::new(1.3, 0.0, 2.0)));
        assert!(!plane.contains_local(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_point_anchor_is_not_a_plane() {
        let anchor = Anchor::Point {
            id: AnchorId::new("P1"),
            transform: Transform::identity(),
        };
        assert!(anchor.as_plane().is_none());
        assert_eq!(anchor.id().as_str(), "P1");
    }
}
