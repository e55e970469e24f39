//! Triangle primitive for ray tracing.
//!
//! Intersection solves `P0 + beta(P1 - P0) + gamma(P2 - P0) = eye + t dir`
//! with Cramer's rule.

use std::fmt;
use std::sync::Arc;

use nff_math::{DMat3, DVec3, Interval, Ray};

use crate::hittable::{Barycentric, HitRecord, Hittable, SurfaceKind};
use crate::scene::Material;

/// A triangle, optionally carrying per-vertex normals (a "patch").
#[derive(Clone, Debug)]
pub struct Triangle {
    /// Vertices
    points: [DVec3; 3],
    /// Per-vertex normals, present on patches
    normals: Option<[DVec3; 3]>,
    /// Flat face normal, `normalize((P1 - P0) x (P2 - P1))`
    face_normal: DVec3,
    material: Arc<Material>,
}

impl Triangle {
    /// Create a flat-shaded triangle.
    ///
    /// Vertices listed counter-clockwise as seen from the viewer give a face
    /// normal pointing toward the viewer.
    pub fn new(points: [DVec3; 3], material: Arc<Material>) -> Self {
        let face_normal = (points[1] - points[0])
            .cross(points[2] - points[1])
            .normalize();

        Self {
            points,
            normals: None,
            face_normal,
            material,
        }
    }

    /// Create a triangle patch with known vertex normals.
    pub fn patch(points: [DVec3; 3], normals: [DVec3; 3], material: Arc<Material>) -> Self {
        Self {
            normals: Some(normals),
            ..Self::new(points, material)
        }
    }

    pub fn points(&self) -> &[DVec3; 3] {
        &self.points
    }

    /// Per-vertex normals if this is a patch.
    pub fn vertex_normals(&self) -> Option<&[DVec3; 3]> {
        self.normals.as_ref()
    }

    pub fn face_normal(&self) -> DVec3 {
        self.face_normal
    }

    pub fn is_patch(&self) -> bool {
        self.normals.is_some()
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<HitRecord> {
        let [p0, p1, p2] = self.points;
        let e1 = p0 - p1;
        let e2 = p0 - p2;
        let to_eye = p0 - ray.eye;

        let det = DMat3::from_cols(e1, e2, ray.dir).determinant();
        // Ray is parallel to the triangle's plane
        if det == 0.0 {
            return None;
        }

        let beta = DMat3::from_cols(to_eye, e2, ray.dir).determinant() / det;
        let gamma = DMat3::from_cols(e1, to_eye, ray.dir).determinant() / det;
        let t = DMat3::from_cols(e1, e2, to_eye).determinant() / det;

        if !(t > 0.0 && beta >= 0.0 && gamma >= 0.0 && beta + gamma <= 1.0) {
            return None;
        }

        let hit = HitRecord::new(SurfaceKind::Triangle, ray, t, Barycentric::new(beta, gamma));
        range.contains(hit.dist).then_some(hit)
    }

    fn normal(&self, hit: &HitRecord, interpolate: bool) -> DVec3 {
        match self.normals {
            Some(normals) if interpolate => hit.bary.interpolate(&normals).normalize(),
            _ => self.face_normal,
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangle:")?;
        for (i, p) in self.points.iter().enumerate() {
            write!(f, " ({},{},{})", p.x, p.y, p.z)?;
            if let Some(normals) = &self.normals {
                let n = normals[i];
                write!(f, " normal: ({},{},{})", n.x, n.y, n.z)?;
            }
        }
        Ok(())
    }
}
