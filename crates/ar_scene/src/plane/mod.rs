//! Plane visualisation

mod registry;

pub use registry::PlaneRegistry;
