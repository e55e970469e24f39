// Re-export glam for convenience
pub use glam::*;

// NFF math types
mod camera;
mod frustum;
mod interval;
mod ray;
mod transform;

pub use camera::{Camera, ViewBasis};
pub use frustum::{Frustum, FAR_PLANE_SCALE};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::DMat4Ext;
