//! Blinn-Phong local illumination shared by the tracer and the rasterizer.

use nff_core::{Color, Light, Material};
use nff_math::DVec3;

/// Geometry of the point being shaded.
#[derive(Debug, Clone, Copy)]
pub struct ShadePoint {
    pub position: DVec3,
    /// Unit surface normal
    pub normal: DVec3,
    /// Unit vector from the point toward the viewer
    pub to_viewer: DVec3,
}

/// Per-light weight that keeps brightness comparable as lights are added.
pub fn light_weight(light_count: usize) -> f64 {
    1.0 / (light_count as f64).sqrt()
}

/// Mirror direction of `to_viewer` about `normal`: `R = -V + 2(V.N)N`.
pub fn reflect(to_viewer: DVec3, normal: DVec3) -> DVec3 {
    -to_viewer + 2.0 * to_viewer.dot(normal) * normal
}

/// Sum the diffuse and specular contributions of every light.
///
/// Lights are treated as white; an `l` record's color is kept on the
/// [`Light`] but does not tint the result.
///
/// `visible` receives the unit direction toward a light and decides whether
/// that light reaches the point; lights it rejects contribute nothing.
pub fn phong<F>(material: &Material, lights: &[Light], point: &ShadePoint, mut visible: F) -> Color
where
    F: FnMut(DVec3) -> bool,
{
    let weight = light_weight(lights.len());
    let mut color = Color::ZERO;

    for light in lights {
        let to_light = (light.position - point.position).normalize();
        if !visible(to_light) {
            continue;
        }

        let half = (to_light + point.to_viewer).normalize();
        let diffuse = point.normal.dot(to_light).max(0.0);
        let specular = point.normal.dot(half).max(0.0).powf(material.shine);

        color += (material.kd * material.color * diffuse + Color::splat(material.ks * specular))
            * weight;
    }

    color
}
