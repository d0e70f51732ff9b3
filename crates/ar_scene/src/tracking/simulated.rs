//! Scripted tracking session
//!
//! Stands in for a device tracking engine in the demo and in tests. Anchors are fed
//! in by the caller instead of being estimated from camera frames; hit tests cast a
//! ray from a pinhole camera against the known planes.

use std::collections::VecDeque;

use crate::core::TrackingConfig;
use crate::foundation::math::{utils, Mat4, Transform, Vec3};

use super::anchor::{Anchor, AnchorId, PlaneAlignment, PlaneAnchor};
use super::hit_test::{HitResult, HitTestTypes, PlaneDetection, ScreenPoint};
use super::session::{SessionError, SessionState, TrackingEvent, TrackingSession};

/// Rays closer than this to parallel with a plane never hit it
const PARALLEL_EPSILON: f32 = 1e-6;

/// Half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

/// Pinhole camera used to turn screen points into world rays
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera pose in world space; the camera looks down its local -Z
    pub transform: Transform,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
}

impl Camera {
    /// Create a camera
    pub fn new(transform: Transform, fov_y_degrees: f32, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            transform,
            fov_y: utils::deg_to_rad(fov_y_degrees),
            viewport_width,
            viewport_height,
        }
    }

    /// Camera `height` meters above the world origin, looking straight down
    pub fn looking_down(height: f32, viewport_width: u32, viewport_height: u32) -> Self {
        let transform = Transform::from_position_rotation(
            Vec3::new(0.0, height, 0.0),
            utils::rotation_x(-crate::foundation::math::constants::HALF_PI),
        );
        Self::new(transform, 60.0, viewport_width, viewport_height)
    }

    /// Screen point in the middle of the viewport
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.viewport_width as f32 * 0.5, self.viewport_height as f32 * 0.5)
    }

    /// Convert screen coordinates to Normalized Device Coordinates
    ///
    /// X: -1 = left, +1 = right. Y: -1 = top, +1 = bottom.
    pub fn screen_to_ndc(&self, point: ScreenPoint) -> (f32, f32) {
        let ndc_x = point.x / self.viewport_width as f32 * 2.0 - 1.0;
        let ndc_y = point.y / self.viewport_height as f32 * 2.0 - 1.0;
        (ndc_x, ndc_y)
    }

    /// World-space ray through a screen point
    pub fn ray(&self, point: ScreenPoint) -> Ray {
        let (ndc_x, ndc_y) = self.screen_to_ndc(point);
        let aspect = self.viewport_width as f32 / self.viewport_height as f32;
        let tan_half_fovy = (self.fov_y * 0.5).tan();

        // Screen Y grows downward, camera Y grows upward
        let local = Vec3::new(ndc_x * tan_half_fovy * aspect, -ndc_y * tan_half_fovy, -1.0);

        Ray {
            origin: self.transform.position,
            direction: (self.transform.rotation * local).normalize(),
        }
    }
}

/// Tracking session driven by explicit calls instead of camera frames
#[derive(Debug)]
pub struct SimulatedSession {
    camera: Camera,
    state: SessionState,
    detection: PlaneDetection,
    planes: Vec<PlaneAnchor>,
    points: Vec<(AnchorId, Transform)>,
    events: VecDeque<TrackingEvent>,
}

impl SimulatedSession {
    /// Create an idle session viewing the world through `camera`
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            state: SessionState::Idle,
            detection: PlaneDetection::empty(),
            planes: Vec::new(),
            points: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Camera used for hit testing
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Move the camera
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Planes currently tracked
    pub fn planes(&self) -> &[PlaneAnchor] {
        &self.planes
    }

    fn detects(&self, alignment: PlaneAlignment) -> bool {
        match alignment {
            PlaneAlignment::Horizontal => self.detection.contains(PlaneDetection::HORIZONTAL),
            PlaneAlignment::Vertical => self.detection.contains(PlaneDetection::VERTICAL),
        }
    }

    /// Report a plane as detected
    ///
    /// Returns `false` when the session is not running or the plane's alignment is
    /// not enabled. A plane with a known id is treated as an update.
    pub fn detect_plane(&mut self, plane: PlaneAnchor) -> bool {
        if self.state != SessionState::Running {
            log::debug!("Session not running, dropping plane {}", plane.id);
            return false;
        }
        if !self.detects(plane.alignment) {
            log::debug!("{:?} plane detection disabled, dropping plane {}", plane.alignment, plane.id);
            return false;
        }

        if let Some(existing) = self.planes.iter_mut().find(|p| p.id == plane.id) {
            *existing = plane.clone();
            self.events.push_back(TrackingEvent::AnchorUpdated(Anchor::Plane(plane)));
        } else {
            self.planes.push(plane.clone());
            self.events.push_back(TrackingEvent::AnchorAdded(Anchor::Plane(plane)));
        }
        true
    }

    /// Refine a tracked plane's pose or extent
    pub fn update_plane(&mut self, plane: PlaneAnchor) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let Some(existing) = self.planes.iter_mut().find(|p| p.id == plane.id) else {
            log::debug!("Update for unknown plane {}", plane.id);
            return false;
        };
        *existing = plane.clone();
        self.events.push_back(TrackingEvent::AnchorUpdated(Anchor::Plane(plane)));
        true
    }

    /// Track a bare point anchor
    pub fn add_point_anchor(&mut self, id: impl Into<AnchorId>, transform: Transform) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let id = id.into();
        self.points.push((id.clone(), transform));
        self.events.push_back(TrackingEvent::AnchorAdded(Anchor::Point { id, transform }));
        true
    }

    /// Stop tracking an anchor of any kind
    pub fn remove_anchor(&mut self, id: &AnchorId) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let before = self.planes.len() + self.points.len();
        self.planes.retain(|p| &p.id != id);
        self.points.retain(|(point_id, _)| point_id != id);
        if self.planes.len() + self.points.len() == before {
            return false;
        }
        self.events.push_back(TrackingEvent::AnchorRemoved(id.clone()));
        true
    }

    /// Queue a tap on the view; ignored unless running
    pub fn tap(&mut self, point: Option<ScreenPoint>) {
        if self.state != SessionState::Running {
            log::debug!("Session not running, dropping tap");
            return;
        }
        self.events.push_back(TrackingEvent::Tap(point));
    }

    fn intersect_plane(&self, ray: &Ray, plane: &PlaneAnchor, types: HitTestTypes) -> Option<HitResult> {
        let normal = plane.transform.up();
        // The surface is the anchor's local y = 0 plane; `center` only bounds the extent
        let plane_point = plane.transform.position;

        let denom = normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = normal.dot(&(plane_point - ray.origin)) / denom;
        if distance <= 0.0 {
            return None;
        }

        let hit = ray.origin + ray.direction * distance;
        let local = plane.transform.inverse().transform_point(hit.into());

        let kind = if types.contains(HitTestTypes::EXISTING_PLANE_USING_EXTENT) && plane.contains_local(local) {
            HitTestTypes::EXISTING_PLANE_USING_EXTENT
        } else if types.contains(HitTestTypes::EXISTING_PLANE) {
            HitTestTypes::EXISTING_PLANE
        } else {
            return None;
        };

        Some(HitResult {
            kind,
            distance,
            world_transform: Mat4::new_translation(&hit) * plane.transform.rotation.to_homogeneous(),
            anchor: Some(plane.id.clone()),
        })
    }
}

impl TrackingSession for SimulatedSession {
    fn run(&mut self, config: &TrackingConfig) -> Result<(), SessionError> {
        let detection = config.plane_detection();
        if detection.is_empty() {
            return Err(SessionError::UnsupportedConfiguration(
                "no plane alignment enabled".to_string(),
            ));
        }
        self.detection = detection;
        self.state = SessionState::Running;
        log::info!("Simulated session running with {:?}", detection);
        Ok(())
    }

    fn pause(&mut self) {
        self.state = SessionState::Paused;
        log::info!("Simulated session paused");
    }

    fn state(&self) -> SessionState {
        self.state
    }

    fn poll_event(&mut self) -> Option<TrackingEvent> {
        self.events.pop_front()
    }

    fn hit_test(&self, point: ScreenPoint, types: HitTestTypes) -> Vec<HitResult> {
        if !types.intersects(HitTestTypes::EXISTING_PLANE | HitTestTypes::EXISTING_PLANE_USING_EXTENT) {
            // Feature points are not simulated
            return Vec::new();
        }

        let ray = self.camera.ray(point);
        let mut results: Vec<HitResult> = self
            .planes
            .iter()
            .filter_map(|plane| self.intersect_plane(&ray, plane, types))
            .collect();
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}
