use std::fmt;

use glam::{DMat4, DVec3};

use crate::{DMat4Ext, Frustum, Ray};

/// Orthonormal camera frame.
///
/// `w` points from the look-at target back toward the viewer, `u` to the
/// right and `v` up. The frame degenerates when `up` is parallel to the view
/// direction; scenes must not do that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub u: DVec3,
    pub v: DVec3,
    pub w: DVec3,
}

/// Viewing parameters shared by the ray tracer and the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position
    pub from: DVec3,
    /// Look-at target
    pub at: DVec3,
    pub up: DVec3,
    /// Full vertical field of view, in degrees
    pub angle: f64,
    /// Near distance; closer intersections are ignored
    pub hither: f64,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self {
            from: DVec3::new(0.0, 0.0, 1.0),
            at: DVec3::ZERO,
            up: DVec3::Y,
            angle: 45.0,
            hither: 1.0,
            width: 512,
            height: 512,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, from: DVec3, at: DVec3, up: DVec3) -> Self {
        self.from = from;
        self.at = at;
        self.up = up;
        self
    }

    /// Set field of view (degrees) and hither distance.
    pub fn with_lens(mut self, angle: f64, hither: f64) -> Self {
        self.angle = angle;
        self.hither = hither;
        self
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Compute the camera frame `(u, v, w)`.
    pub fn basis(&self) -> ViewBasis {
        let w = (self.from - self.at).normalize();
        let u = self.up.cross(w).normalize();
        let v = w.cross(u);
        ViewBasis { u, v, w }
    }

    /// View frustum planes for this camera.
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.angle, self.hither, self.aspect())
    }

    /// Maps canonical view volume coordinates to pixel coordinates.
    ///
    /// Pixel centers land on integer coordinates; NDC `+y` maps to row 0 so
    /// rows grow downward.
    pub fn viewport_matrix(&self) -> DMat4 {
        let nx = self.width as f64;
        let ny = self.height as f64;
        DMat4::from_rows([
            [nx / 2.0, 0.0, 0.0, (nx - 1.0) / 2.0],
            [0.0, -ny / 2.0, 0.0, (ny - 1.0) / 2.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Perspective projection matrix (camera space -> canonical volume).
    pub fn perspective_matrix(&self) -> DMat4 {
        self.frustum().projection_matrix()
    }

    /// World space -> camera space (inverse of the `[u v w eye]` frame).
    pub fn camera_matrix(&self) -> DMat4 {
        let ViewBasis { u, v, w } = self.basis();
        DMat4::from_cols(u.extend(0.0), v.extend(0.0), w.extend(0.0), self.from.extend(1.0))
            .inverse()
    }

    /// Full world -> image transform: `Viewport * Perspective * Camera^-1`.
    ///
    /// After the homogeneous divide, `x`/`y` are pixel coordinates and `z` is
    /// a depth value where larger means nearer to the eye.
    pub fn world_to_image(&self) -> DMat4 {
        self.viewport_matrix() * self.perspective_matrix() * self.camera_matrix()
    }

    /// Distance from the eye to the image plane used for primary rays.
    pub fn focal_distance(&self) -> f64 {
        (self.at - self.from).length()
    }

    /// Side length of a (square) pixel on the image plane.
    pub fn pixel_size(&self) -> f64 {
        let half_angle = (self.angle / 2.0).to_radians();
        2.0 * self.focal_distance() * half_angle.tan() / self.width as f64
    }

    /// Ray from the eye through the center of pixel `(i, j)`.
    ///
    /// `(0, 0)` is the top-left pixel. The direction is not normalized.
    pub fn primary_ray(&self, i: u32, j: u32) -> Ray {
        self.primary_ray_with(&self.basis(), i, j)
    }

    /// Same as [`Camera::primary_ray`] with a precomputed basis.
    pub fn primary_ray_with(&self, basis: &ViewBasis, i: u32, j: u32) -> Ray {
        let delta = self.pixel_size();
        let init_x = -delta * (self.width as f64 / 2.0 - 0.5);
        let init_y = delta * (self.height as f64 / 2.0 - 0.5);

        let x = init_x + delta * i as f64;
        let y = init_y - delta * j as f64;
        let z = -self.focal_distance();
        let pixel_center = x * basis.u + y * basis.v + z * basis.w + self.from;

        Ray::new(self.from, pixel_center - self.from)
    }

    /// Rotate the eye around the look-at target about the camera's `v` axis.
    pub fn orbited(&self, radians: f64) -> Camera {
        let axis = self.basis().v;
        let rotation = DMat4::from_translation(self.at)
            * DMat4::from_axis_angle(axis, radians)
            * DMat4::from_translation(-self.at);

        Camera {
            from: rotation.transform_point3(self.from),
            ..*self
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "from: {} {} {}", self.from.x, self.from.y, self.from.z)?;
        writeln!(f, "at: {} {} {}", self.at.x, self.at.y, self.at.z)?;
        writeln!(f, "up: {} {} {}", self.up.x, self.up.y, self.up.z)?;
        writeln!(f, "angle: {}", self.angle)?;
        writeln!(f, "hither: {}", self.hither)?;
        write!(f, "resolution: {} {}", self.width, self.height)
    }
}
