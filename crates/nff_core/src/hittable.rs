//! Hittable trait and HitRecord for ray-surface intersection.

use std::fmt;

use nff_math::{DVec3, Interval, Ray};

/// Which kind of surface produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Triangle,
    Polygon,
    Sphere,
}

/// Barycentric weights `(alpha, beta, gamma)` of a point in a triangle.
///
/// The point is `alpha * P0 + beta * P1 + gamma * P2` and the weights sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Barycentric {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Barycentric {
    /// Weights from `beta` and `gamma`, with `alpha = 1 - beta - gamma`.
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self {
            alpha: 1.0 - beta - gamma,
            beta,
            gamma,
        }
    }

    /// True when all three weights are non-negative (closed triangle).
    pub fn is_inside(&self) -> bool {
        self.alpha >= 0.0 && self.beta >= 0.0 && self.gamma >= 0.0
    }

    /// Blend three per-vertex values.
    pub fn interpolate(&self, values: &[DVec3; 3]) -> DVec3 {
        self.alpha * values[0] + self.beta * values[1] + self.gamma * values[2]
    }

    /// Blend three per-vertex scalars.
    pub fn interpolate_scalar(&self, values: [f64; 3]) -> f64 {
        self.alpha * values[0] + self.beta * values[1] + self.gamma * values[2]
    }
}

/// Record of a ray-surface intersection.
///
/// A miss is `None`, never a record, so every `HitRecord` has `t > 0` and a
/// non-negative `dist`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Kind of surface that was hit
    pub kind: SurfaceKind,
    /// Ray parameter of the intersection
    pub t: f64,
    /// Euclidean distance from the ray origin to the hit point
    pub dist: f64,
    /// World-space intersection point
    pub point: DVec3,
    /// Barycentric coordinates (triangles and polygons only)
    pub bary: Barycentric,
    /// Index of the fan triangle that was hit (polygons only)
    pub triangle_index: Option<usize>,
    /// Index of the surface in the scene's surface list
    pub surface_index: Option<usize>,
}

impl HitRecord {
    /// Create a hit record for a point along `ray` at parameter `t`.
    pub fn new(kind: SurfaceKind, ray: &Ray, t: f64, bary: Barycentric) -> Self {
        let point = ray.at(t);
        Self {
            kind,
            t,
            dist: (point - ray.eye).length(),
            point,
            bary,
            triangle_index: None,
            surface_index: None,
        }
    }

    /// `(t, dist)` with `(-1, -1)` standing in for a miss.
    pub fn sentinel_values(hit: Option<&HitRecord>) -> (f64, f64) {
        hit.map_or((-1.0, -1.0), |h| (h.t, h.dist))
    }
}

impl fmt::Display for HitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HitRecord: kind={:?}, t={}, dist={}, point=({},{},{})",
            self.kind, self.t, self.dist, self.point.x, self.point.y, self.point.z
        )?;
        if self.kind != SurfaceKind::Sphere {
            write!(f, ", B={}, g={}", self.bary.beta, self.bary.gamma)?;
        }
        if let Some(index) = self.triangle_index {
            write!(f, ", triIndex={}", index)?;
        }
        Ok(())
    }
}

/// Trait for surfaces that can be hit by rays.
pub trait Hittable {
    /// Intersect `ray` with this surface.
    ///
    /// Only hits whose distance from the ray origin lies in `range` count.
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<HitRecord>;

    /// Surface normal at a hit previously returned by [`Hittable::intersect`].
    ///
    /// `interpolate` requests the smooth per-vertex normal on patches.
    fn normal(&self, hit: &HitRecord, interpolate: bool) -> DVec3;
}
