//! View frustum planes for the perspective projection.
//!
//! Planes are expressed in camera space, where the camera looks down `-w`, so
//! `near` and `far` are negative.

use glam::DMat4;

use crate::DMat4Ext;

/// Ratio of the far plane to the near plane.
pub const FAR_PLANE_SCALE: f64 = 1000.0;

/// A view frustum defined by 6 planes (left, right, bottom, top, near, far).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl Frustum {
    /// Build the frustum for a vertical field of view (degrees), hither
    /// distance and aspect ratio (width / height).
    pub fn new(angle: f64, hither: f64, aspect: f64) -> Self {
        let h = (angle / 2.0).to_radians().tan();
        let near = -hither;

        Self {
            left: -h,
            right: h,
            bottom: -h / aspect,
            top: h / aspect,
            near,
            far: FAR_PLANE_SCALE * near,
        }
    }

    /// Perspective matrix mapping the frustum to the canonical view volume.
    ///
    /// The output `w` is the camera-space `z`, so the caller must divide by it.
    pub fn projection_matrix(&self) -> DMat4 {
        let Frustum { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;
        DMat4::from_rows([
            [2.0 * n / (r - l), 0.0, (l + r) / (l - r), 0.0],
            [0.0, 2.0 * n / (t - b), (b + t) / (b - t), 0.0],
            [0.0, 0.0, (f + n) / (n - f), 2.0 * f * n / (f - n)],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }
}
