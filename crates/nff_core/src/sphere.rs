//! Sphere primitive for ray tracing.

use std::fmt;
use std::sync::Arc;

use nff_math::{DVec3, Interval, Ray};

use crate::hittable::{Barycentric, HitRecord, Hittable, SurfaceKind};
use crate::scene::Material;

/// A sphere primitive.
#[derive(Clone, Debug)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: DVec3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    /// Only the nearer root is considered, so a ray starting inside the
    /// sphere does not see its far wall.
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<HitRecord> {
        let diff = ray.eye - self.center;
        let a = ray.dir.length_squared();
        let h = ray.dir.dot(diff);
        let c = diff.length_squared() - self.radius * self.radius;

        let disc = h * h - a * c;
        if disc < 0.0 {
            return None;
        }

        let t = if disc == 0.0 {
            // Tangent ray, a single root
            -h / a
        } else {
            (-h - disc.sqrt()) / a
        };
        if t <= 0.0 {
            return None;
        }

        let hit = HitRecord::new(SurfaceKind::Sphere, ray, t, Barycentric::default());
        range.contains(hit.dist).then_some(hit)
    }

    fn normal(&self, hit: &HitRecord, _interpolate: bool) -> DVec3 {
        (hit.point - self.center).normalize()
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sphere: at ({},{},{}), radius = {}",
            self.center.x, self.center.y, self.center.z, self.radius
        )
    }
}
