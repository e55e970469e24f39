//! Convex polygons, intersected as a triangle fan.

use std::fmt;
use std::sync::Arc;

use nff_math::{DVec3, Interval, Ray};

use crate::hittable::{HitRecord, Hittable, SurfaceKind};
use crate::scene::Material;
use crate::triangle::Triangle;

/// A planar polygon split into the fan `(v0, v[i-1], v[i])`.
///
/// The fan is only a correct triangulation for convex polygons; convexity is
/// not checked.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<DVec3>,
    normals: Option<Vec<DVec3>>,
    triangles: Vec<Triangle>,
    material: Arc<Material>,
}

impl Polygon {
    /// Create a flat-shaded polygon.
    pub fn new(vertices: Vec<DVec3>, material: Arc<Material>) -> Self {
        let triangles = (2..vertices.len())
            .map(|i| Triangle::new([vertices[0], vertices[i - 1], vertices[i]], material.clone()))
            .collect();

        Self {
            vertices,
            normals: None,
            triangles,
            material,
        }
    }

    /// Create a polygon patch with one normal per vertex.
    ///
    /// `normals` must have the same length as `vertices`.
    pub fn patch(vertices: Vec<DVec3>, normals: Vec<DVec3>, material: Arc<Material>) -> Self {
        debug_assert_eq!(vertices.len(), normals.len());
        let triangles = (2..vertices.len())
            .map(|i| {
                Triangle::patch(
                    [vertices[0], vertices[i - 1], vertices[i]],
                    [normals[0], normals[i - 1], normals[i]],
                    material.clone(),
                )
            })
            .collect();

        Self {
            vertices,
            normals: Some(normals),
            triangles,
            material,
        }
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// The triangle fan, anchored at vertex 0.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_patch(&self) -> bool {
        self.normals.is_some()
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Polygon {
    fn intersect(&self, ray: &Ray, range: Interval) -> Option<HitRecord> {
        let mut best: Option<HitRecord> = None;

        for (i, triangle) in self.triangles.iter().enumerate() {
            let Some(mut hit) = triangle.intersect(ray, range) else {
                continue;
            };
            if best.map_or(true, |b| hit.t < b.t) {
                hit.kind = SurfaceKind::Polygon;
                hit.triangle_index = Some(i);
                best = Some(hit);
            }
        }

        best
    }

    fn normal(&self, hit: &HitRecord, interpolate: bool) -> DVec3 {
        let index = hit.triangle_index.unwrap_or(0);
        self.triangles[index].normal(hit, interpolate)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon ({} vertices):", self.vertices.len())?;
        for (i, v) in self.vertices.iter().enumerate() {
            write!(f, " ({},{},{})", v.x, v.y, v.z)?;
            if let Some(normals) = &self.normals {
                let n = normals[i];
                write!(f, " normal: ({},{},{})", n.x, n.y, n.z)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagon() -> Polygon {
        Polygon::new(
            vec![
                DVec3::new(0.0, 0.0, 5.0),
                DVec3::new(3.0, 0.0, 5.0),
                DVec3::new(4.0, 1.0, 5.0),
                DVec3::new(3.0, 2.0, 5.0),
                DVec3::new(1.5, 3.0, 5.0),
                DVec3::new(0.0, 1.0, 5.0),
            ],
            Arc::new(Material::default()),
        )
    }

    #[test]
    fn test_fan_triangulation() {
        let poly = hexagon();
        assert_eq!(poly.triangles().len(), poly.vertices().len() - 2);

        for (i, tri) in poly.triangles().iter().enumerate() {
            assert_eq!(tri.points()[0], poly.vertices()[0]);
            assert_eq!(tri.points()[1], poly.vertices()[i + 1]);
            assert_eq!(tri.points()[2], poly.vertices()[i + 2]);
        }
    }

    #[test]
    fn test_degenerate_polygon_has_no_fan() {
        let poly = Polygon::new(vec![DVec3::ZERO, DVec3::X], Arc::new(Material::default()));
        assert!(poly.triangles().is_empty());

        let ray = Ray::new(DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0));
        assert!(poly.intersect(&ray, Interval::at_least(0.0)).is_none());
    }

    #[test]
    fn test_polygon_hither() {
        let poly = hexagon();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(2.0, 1.0, 5.0));
        let expected = (ray.eye - DVec3::new(2.0, 1.0, 5.0)).length();

        // Hither beyond the hit filters it out
        assert!(poly.intersect(&ray, Interval::at_least(5.5)).is_none());

        let hit = poly.intersect(&ray, Interval::at_least(5.4)).unwrap();
        assert_eq!(hit.dist, expected);
        assert_eq!(hit.kind, SurfaceKind::Polygon);
        assert!(hit.triangle_index.is_some());

        let hit = poly.intersect(&ray, Interval::UNIVERSE).unwrap();
        assert_eq!(hit.dist, expected);
    }

    #[test]
    fn test_polygon_hither_boundary() {
        let poly = hexagon();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(2.0, 1.0, 5.0));
        let d = poly.intersect(&ray, Interval::UNIVERSE).unwrap().dist;

        assert!(poly.intersect(&ray, Interval::at_least(d)).is_some());
    }

    #[test]
    fn test_polygon_normal_uses_hit_triangle() {
        let poly = hexagon();
        let ray = Ray::new(DVec3::ZERO, DVec3::new(2.0, 1.0, 5.0));
        let hit = poly.intersect(&ray, Interval::UNIVERSE).unwrap();

        let index = hit.triangle_index.unwrap();
        assert_eq!(poly.normal(&hit, false), poly.triangles()[index].face_normal());
        // Vertices run counter-clockwise in the xy-plane, so the normal is +z
        assert!((poly.normal(&hit, false) - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_polygon_patch() {
        let normals = vec![DVec3::Z; 4];
        let poly = Polygon::patch(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            normals,
            Arc::new(Material::default()),
        );
        assert!(poly.is_patch());
        assert!(poly.triangles().iter().all(Triangle::is_patch));
    }
}
