//! Screen points and hit-test results

use bitflags::bitflags;

use crate::foundation::math::{translation_of, Mat4, Vec3};

use super::anchor::AnchorId;

bitflags! {
    /// Which kinds of tracked geometry a hit test may intersect
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HitTestTypes: u32 {
        /// Loose feature points
        const FEATURE_POINT = 1 << 0;
        /// Infinite plane through a detected plane anchor
        const EXISTING_PLANE = 1 << 3;
        /// Detected plane, limited to its extent
        const EXISTING_PLANE_USING_EXTENT = 1 << 4;
    }
}

bitflags! {
    /// Plane alignments the session should detect
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneDetection: u32 {
        /// Floors, tables
        const HORIZONTAL = 1 << 0;
        /// Walls
        const VERTICAL = 1 << 1;
    }
}

/// A point on the view, in pixels from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixels from the left edge
    pub x: f32,
    /// Pixels from the top edge
    pub y: f32,
}

impl ScreenPoint {
    /// Create a screen point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One intersection of a screen ray with tracked geometry
#[derive(Debug, Clone, PartialEq)]
pub struct HitResult {
    /// Kind of geometry that was hit (a single flag)
    pub kind: HitTestTypes,
    /// Distance from the camera along the ray, in meters
    pub distance: f32,
    /// Pose of the intersection in world space
    pub world_transform: Mat4,
    /// Anchor that was hit, if any
    pub anchor: Option<AnchorId>,
}

impl HitResult {
    /// Hit result at a world position with an identity orientation
    pub fn at(kind: HitTestTypes, position: Vec3) -> Self {
        Self {
            kind,
            distance: 0.0,
            world_transform: Mat4::new_translation(&position),
            anchor: None,
        }
    }

    /// World position of the intersection
    pub fn world_position(&self) -> Vec3 {
        translation_of(&self.world_transform)
    }
}
