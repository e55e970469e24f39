//! Triangle rasterizer.
//!
//! A frame runs four stages in order:
//!
//! 1. **Vertex processing**: flatten surfaces into triangles, shade every
//!    vertex (Phong, no shadows) and project it to image space.
//! 2. **Rasterization**: scan each triangle's pixel bounding box and emit a
//!    [`Fragment`] for every pixel center inside the triangle.
//! 3. **Fragment processing**: currently a no-op.
//! 4. **Blending**: keep the nearest fragment of each pixel.
//!
//! Image-space depth grows toward the eye, so blending keeps the fragment with
//! the greatest `z`.

use std::time::Instant;

use nff_core::{Barycentric, Color, Scene, Surface, Triangle};
use nff_math::{DMat4, DMat4Ext, DVec3, Interval};

use crate::output::ImageBuffer;
use crate::shading::{self, ShadePoint};

/// Per-frame state of one triangle, kept apart from the scene geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterTriangle {
    /// Vertex positions in world space
    pub world: [DVec3; 3],
    /// Unit shading normals (vertex normals for patches, else the face normal)
    pub normals: [DVec3; 3],
    /// Shaded vertex colors, clamped to [0, 1]
    pub colors: [Color; 3],
    /// Vertex positions after projection: pixel `x`, `y` and depth `z`
    pub image: [DVec3; 3],
}

impl RasterTriangle {
    /// Shade and project one scene triangle.
    pub fn new(triangle: &Triangle, scene: &Scene, world_to_image: &DMat4) -> Self {
        let world = *triangle.points();
        let normals = match triangle.vertex_normals() {
            Some(n) => [n[0].normalize(), n[1].normalize(), n[2].normalize()],
            None => [triangle.face_normal(); 3],
        };

        let eye = scene.camera.from;
        let colors = std::array::from_fn(|k| {
            let point = ShadePoint {
                position: world[k],
                normal: normals[k],
                to_viewer: (eye - world[k]).normalize(),
            };
            let color = shading::phong(triangle.material(), &scene.lights, &point, |_| true);
            color.clamp(Color::ZERO, Color::ONE)
        });

        let image = world.map(|p| world_to_image.project_point3(p));

        Self {
            world,
            normals,
            colors,
            image,
        }
    }

    /// Barycentric weights of pixel center `(x, y)` in image space, ignoring z.
    pub fn image_barycentric(&self, x: f64, y: f64) -> Barycentric {
        let [a, b, c] = self.image;

        let beta = ((a.y - c.y) * x + (c.x - a.x) * y + a.x * c.y - c.x * a.y)
            / ((a.y - c.y) * b.x + (c.x - a.x) * b.y + a.x * c.y - c.x * a.y);
        let gamma = ((a.y - b.y) * x + (b.x - a.x) * y + a.x * b.y - b.x * a.y)
            / ((a.y - b.y) * c.x + (b.x - a.x) * c.y + a.x * b.y - b.x * a.y);

        Barycentric::new(beta, gamma)
    }

    /// Interpolate a fragment at the given weights.
    pub fn fragment(&self, bary: &Barycentric) -> Fragment {
        Fragment {
            z: bary.interpolate_scalar(self.image.map(|p| p.z)),
            color: bary.interpolate(&self.colors),
            normal: bary.interpolate(&self.normals),
            world_position: bary.interpolate(&self.world),
        }
    }
}

/// Candidate coverage of one pixel by one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Image-space depth; larger is nearer
    pub z: f64,
    pub color: Color,
    pub normal: DVec3,
    pub world_position: DVec3,
}

/// Fragment lists for every pixel, row-major.
#[derive(Debug, Clone)]
pub struct FragmentBuffer {
    width: u32,
    height: u32,
    lists: Vec<Vec<Fragment>>,
}

impl FragmentBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            lists: vec![Vec::new(); width as usize * height as usize],
        }
    }

    pub fn push(&mut self, x: u32, y: u32, fragment: Fragment) {
        let index = self.index(x, y);
        self.lists[index].push(fragment);
    }

    /// Fragments of pixel (x, y), in the order their triangles were processed.
    pub fn at(&self, x: u32, y: u32) -> &[Fragment] {
        &self.lists[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fragment lists in row-major pixel order.
    pub fn lists(&self) -> &[Vec<Fragment>] {
        &self.lists
    }

    pub fn fragment_count(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Number of pixels with at least one fragment.
    pub fn covered_pixels(&self) -> usize {
        self.lists.iter().filter(|l| !l.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.lists.iter_mut().for_each(Vec::clear);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Nearest fragment of a list, if any.
pub fn nearest_fragment(fragments: &[Fragment]) -> Option<&Fragment> {
    fragments.iter().max_by(|a, b| a.z.total_cmp(&b.z))
}

/// Rasterizer over a borrowed, read-only scene.
pub struct Rasterizer<'a> {
    scene: &'a Scene,
    debug: bool,
    triangles: Vec<RasterTriangle>,
    fragments: FragmentBuffer,
}

impl<'a> Rasterizer<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            debug: false,
            triangles: Vec::new(),
            fragments: FragmentBuffer::new(scene.camera.width, scene.camera.height),
        }
    }

    /// Log the viewing matrices at `debug` level on every render.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// `M_vp`, `M_per`, `M_cam` and their product `M`, the world to image
    /// transform used by vertex processing.
    pub fn viewing_matrices(&self) -> [(&'static str, DMat4); 4] {
        let camera = &self.scene.camera;
        let viewport = camera.viewport_matrix();
        let perspective = camera.perspective_matrix();
        let view = camera.camera_matrix();
        [
            ("M_vp", viewport),
            ("M_per", perspective),
            ("M_cam", view),
            ("M", viewport * perspective * view),
        ]
    }

    /// Triangles produced by the last vertex processing stage.
    pub fn triangles(&self) -> &[RasterTriangle] {
        &self.triangles
    }

    pub fn fragments(&self) -> &FragmentBuffer {
        &self.fragments
    }

    /// Run all four stages and return the finished image.
    pub fn render(&mut self) -> ImageBuffer {
        let scene = self.scene;
        let camera = &scene.camera;
        log::info!("Rasterizing {}x{}", camera.width, camera.height);
        let start = Instant::now();

        let matrices = self.viewing_matrices();
        if self.debug {
            for (name, m) in &matrices {
                log::debug!("{}:", name);
                for row in m.to_rows() {
                    log::debug!("  {:.6?}", row);
                }
            }
        }

        self.vertex_processing(&matrices[3].1);
        self.rasterization();
        self.fragment_processing();
        let image = self.blending();

        log::info!("Rasterization finished in {:.2?}", start.elapsed());
        image
    }

    /// Stage 1: flatten surfaces, shade vertices, project with `m`.
    pub fn vertex_processing(&mut self, m: &DMat4) {
        let scene = self.scene;
        self.triangles.clear();

        for (index, surface) in scene.surfaces.iter().enumerate() {
            if let Surface::Sphere(_) = surface {
                log::debug!("Skipping sphere (surface {}): not rasterizable", index);
                continue;
            }
            for triangle in surface.triangles() {
                self.triangles.push(RasterTriangle::new(triangle, scene, m));
            }
        }

        log::info!("Vertex processing: {} triangles", self.triangles.len());
    }

    /// Stage 2: emit fragments for every covered pixel center.
    pub fn rasterization(&mut self) {
        self.fragments.clear();
        let (width, height) = self.fragments.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let x_range = Interval::new(0.0, (width - 1) as f64);
        let y_range = Interval::new(0.0, (height - 1) as f64);

        for tri in &self.triangles {
            let xs = tri.image.map(|p| p.x);
            let ys = tri.image.map(|p| p.y);
            let x_min = xs[0].min(xs[1]).min(xs[2]).floor();
            let x_max = xs[0].max(xs[1]).max(xs[2]).ceil();
            let y_min = ys[0].min(ys[1]).min(ys[2]).floor();
            let y_max = ys[0].max(ys[1]).max(ys[2]).ceil();

            // Entirely off the raster
            if x_max < x_range.min || x_min > x_range.max || y_max < y_range.min || y_min > y_range.max {
                continue;
            }

            let (x0, x1) = (x_range.clamp(x_min) as u32, x_range.clamp(x_max) as u32);
            let (y0, y1) = (y_range.clamp(y_min) as u32, y_range.clamp(y_max) as u32);

            for y in y0..=y1 {
                for x in x0..=x1 {
                    let bary = tri.image_barycentric(x as f64, y as f64);
                    if bary.is_inside() {
                        self.fragments.push(x, y, tri.fragment(&bary));
                    }
                }
            }
        }

        log::debug!(
            "Rasterization: {} fragments over {} pixels",
            self.fragments.fragment_count(),
            self.fragments.covered_pixels()
        );
    }

    /// Stage 3: per-fragment effects. Nothing to do yet.
    pub fn fragment_processing(&mut self) {}

    /// Stage 4: resolve each pixel to its nearest fragment's color.
    pub fn blending(&self) -> ImageBuffer {
        let (width, height) = self.fragments.dimensions();
        let background = self.scene.background;
        let mut image = ImageBuffer::new(width, height, background);

        for (pixel, list) in image.pixels.iter_mut().zip(self.fragments.lists()) {
            if let Some(fragment) = nearest_fragment(list) {
                *pixel = fragment.color;
            }
        }

        log::info!(
            "Blending: {} of {} pixels colored",
            self.fragments.covered_pixels(),
            image.pixels.len()
        );
        image
    }
}
