//! The closed set of scene surfaces.

use std::fmt;
use std::sync::Arc;

use nff_math::{DVec3, Interval, Ray};

use crate::hittable::{HitRecord, Hittable};
use crate::polygon::Polygon;
use crate::scene::Material;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Any surface that can appear in a scene.
#[derive(Clone, Debug)]
pub enum Surface {
    Triangle(Triangle),
    Polygon(Polygon),
    Sphere(Sphere),
}

impl Surface {
    /// Material shared with other surfaces of the scene.
    pub fn material(&self) -> &Arc<Material> {
        match self {
            Surface::Triangle(t) => t.material(),
            Surface::Polygon(p) => p.material(),
            Surface::Sphere(s) => s.material(),
        }
    }

    /// Triangles this surface rasterizes into; empty for spheres.
    pub fn triangles(&self) -> &[Triangle] {
        match self {
            Surface::Triangle(t) => std::slice::from_ref(t),
            Surface::Polygon(p) => p.triangles(),
            Surface::Sphere(_) => &[],
        }
    }
}

impl Hittable for Surface {
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<HitRecord> {
        match self {
            Surface::Triangle(t) => t.intersect(ray, range),
            Surface::Polygon(p) => p.intersect(ray, range),
            Surface::Sphere(s) => s.intersect(ray, range),
        }
    }

    fn normal(&self, hit: &HitRecord, interpolate: bool) -> DVec3 {
        match self {
            Surface::Triangle(t) => t.normal(hit, interpolate),
            Surface::Polygon(p) => p.normal(hit, interpolate),
            Surface::Sphere(s) => s.normal(hit, interpolate),
        }
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Surface::Triangle(triangle)
    }
}

impl From<Polygon> for Surface {
    fn from(polygon: Polygon) -> Self {
        Surface::Polygon(polygon)
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Triangle(t) => fmt::Display::fmt(t, f),
            Surface::Polygon(p) => fmt::Display::fmt(p, f),
            Surface::Sphere(s) => fmt::Display::fmt(s, f),
        }
    }
}
