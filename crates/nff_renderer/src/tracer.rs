//! Whitted-style recursive ray tracer.
//!
//! Each primary ray finds the nearest surface, shades it with Blinn-Phong
//! using hard shadow rays, and (budget permitting) adds a mirror reflection
//! weighted by the material's specular coefficient.

use std::time::Instant;

use nff_core::{Color, HitRecord, Hittable, Scene};
use nff_math::{Interval, Ray};
use rayon::prelude::*;

use crate::output::ImageBuffer;
use crate::shading::{self, ShadePoint};

/// Near limit for shadow and reflection rays, so they do not re-hit the
/// surface they leave from.
pub const SHADOW_BIAS: f64 = 1e-6;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Ray budget per pixel: 1 means no reflections
    pub bounces: u32,
    /// Log camera setup and every primary hit
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounces: 5,
            debug: false,
        }
    }
}

/// Ray tracer over a borrowed, read-only scene.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            config: config.clone(),
        }
    }

    /// Closest hit over all surfaces (by distance), tagged with the index of
    /// the surface that produced it. Ties keep the earlier surface.
    pub fn nearest_hit(&self, ray: &Ray, range: Interval) -> Option<HitRecord> {
        self.scene
            .surfaces
            .iter()
            .enumerate()
            .filter_map(|(index, surface)| {
                surface.intersect(ray, range).map(|mut hit| {
                    hit.surface_index = Some(index);
                    hit
                })
            })
            .min_by(|a, b| a.dist.total_cmp(&b.dist))
    }

    /// Color seen along `ray`. Colors are not clamped here.
    pub fn trace(&self, ray: &Ray, range: Interval, bounces: u32) -> Color {
        let Some(hit) = self.nearest_hit(ray, range) else {
            return self.scene.background;
        };
        let Some(surface) = hit.surface_index.map(|i| &self.scene.surfaces[i]) else {
            return self.scene.background;
        };

        let material = surface.material();
        let point = ShadePoint {
            position: hit.point,
            normal: surface.normal(&hit, true),
            to_viewer: (ray.eye - hit.point).normalize(),
        };

        let mut color = shading::phong(material, &self.scene.lights, &point, |to_light| {
            let shadow = Ray::new(hit.point, to_light);
            self.nearest_hit(&shadow, Interval::at_least(SHADOW_BIAS))
                .is_none()
        });

        if bounces > 1 && material.ks != 0.0 {
            let reflected = Ray::new(hit.point, shading::reflect(point.to_viewer, point.normal));
            color += material.ks
                * self.trace(&reflected, Interval::at_least(SHADOW_BIAS), bounces - 1);
        }

        color
    }

    /// Color of pixel `(i, j)`.
    pub fn trace_pixel(&self, i: u32, j: u32) -> Color {
        let camera = &self.scene.camera;
        let ray = camera.primary_ray(i, j);
        let range = Interval::at_least(camera.hither);

        if self.config.debug {
            match self.nearest_hit(&ray, range) {
                Some(hit) => log::debug!("pixel ({}, {}): {}", i, j, hit),
                None => log::debug!("pixel ({}, {}): miss", i, j),
            }
        }

        self.trace(&ray, range, self.config.bounces)
    }

    /// Trace every pixel. Rows are rendered in parallel.
    pub fn render(&self) -> ImageBuffer {
        let camera = &self.scene.camera;
        let (width, height) = (camera.width, camera.height);

        log::info!(
            "Ray tracing {}x{} with {} bounces",
            width,
            height,
            self.config.bounces
        );
        if self.config.debug {
            let basis = camera.basis();
            log::debug!("u: {}, v: {}, w: {}", basis.u, basis.v, basis.w);
            log::debug!("pixel size: {}", camera.pixel_size());
        }

        let start = Instant::now();
        let mut image = ImageBuffer::new(width, height, self.scene.background);
        if width == 0 {
            return image;
        }

        image
            .pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(j, row)| {
                for (i, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.trace_pixel(i as u32, j as u32);
                }
            });

        log::info!("Ray tracing finished in {:.2?}", start.elapsed());
        image
    }
}
