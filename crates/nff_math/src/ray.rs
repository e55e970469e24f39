use std::fmt;

use crate::DVec3;

/// A ray in 3D space: the parametric line `eye + t * dir`.
///
/// `dir` is not necessarily normalized. Only `t > 0` counts as a forward
/// intersection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub eye: DVec3,
    pub dir: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(eye: DVec3, dir: DVec3) -> Self {
        Self { eye, dir }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: eye + t * dir
    #[inline]
    pub fn at(&self, t: f64) -> DVec3 {
        self.eye + t * self.dir
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ray: ({},{},{}) -> ({},{},{})",
            self.eye.x, self.eye.y, self.eye.z, self.dir.x, self.dir.y, self.dir.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let eye = DVec3::new(1.0, 2.0, 3.0);
        let dir = DVec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(eye, dir);

        assert_eq!(ray.eye, eye);
        assert_eq!(ray.dir, dir);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_display() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(4.0, 0.0, 5.0));
        assert_eq!(ray.to_string(), "Ray: (0,0,0) -> (4,0,5)");
    }
}
