//! Scene description types.
//!
//! A `Scene` is built once (usually by the NFF loader) and is read-only for
//! the rest of the program. Both renderers borrow it.

use std::fmt;
use std::sync::Arc;

use nff_math::{Camera, DVec3};

use crate::surface::Surface;

/// RGB color, components nominally in [0, 1].
pub type Color = DVec3;

/// Phong material from an NFF fill (`f`) record.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (RGB, 0-1)
    pub color: Color,

    /// Diffuse coefficient
    pub kd: f64,

    /// Specular coefficient, also the weight of mirror reflections
    pub ks: f64,

    /// Phong exponent for highlights
    pub shine: f64,

    /// Fraction of the contribution of the transmitted ray
    pub transmittance: f64,

    /// Index of refraction
    pub refraction_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            kd: 1.0,
            ks: 0.0,
            shine: 1.0,
            transmittance: 0.0,
            refraction_index: 1.0,
        }
    }
}

impl Material {
    /// Create a purely diffuse material.
    pub fn diffuse(color: Color, kd: f64) -> Self {
        Self {
            color,
            kd,
            ..Default::default()
        }
    }

    /// Set the specular coefficient and Phong exponent.
    pub fn with_specular(mut self, ks: f64, shine: f64) -> Self {
        self.ks = ks;
        self.shine = shine;
        self
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Material: color=({}, {}, {}), Kd={}, Ks={}, shine={}, T={}, refIndx={}",
            self.color.x,
            self.color.y,
            self.color.z,
            self.kd,
            self.ks,
            self.shine,
            self.transmittance,
            self.refraction_index
        )
    }
}

/// A point light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: DVec3,
    pub color: Color,
}

impl Light {
    /// Create a white light.
    pub fn new(position: DVec3) -> Self {
        Self::with_color(position, Color::ONE)
    }

    pub fn with_color(position: DVec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// A complete scene: camera, background, surfaces, materials and lights.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Viewing parameters
    pub camera: Camera,

    /// Color of rays that hit nothing
    pub background: Color,

    /// All surfaces, in file order
    pub surfaces: Vec<Surface>,

    /// Materials, shared by the surfaces that use them
    pub materials: Vec<Arc<Material>>,

    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material and return the shared handle surfaces should hold.
    pub fn add_material(&mut self, material: Material) -> Arc<Material> {
        let material = Arc::new(material);
        self.materials.push(material.clone());
        material
    }

    /// Add a surface and return its index.
    pub fn add_surface(&mut self, surface: impl Into<Surface>) -> usize {
        self.surfaces.push(surface.into());
        self.surfaces.len() - 1
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.surfaces
            .iter()
            .filter(|s| matches!(s, Surface::Polygon(_)))
            .count()
    }

    pub fn sphere_count(&self) -> usize {
        self.surfaces
            .iter()
            .filter(|s| matches!(s, Surface::Sphere(_)))
            .count()
    }

    /// Total triangles across all triangle and polygon surfaces.
    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.triangles().len()).sum()
    }

    /// One-line description for logging.
    pub fn summary(&self) -> String {
        format!(
            "{}: {}x{}, {} surfaces ({} polygons, {} spheres, {} triangles), {} materials, {} lights",
            self.name,
            self.camera.width,
            self.camera.height,
            self.surface_count(),
            self.polygon_count(),
            self.sphere_count(),
            self.triangle_count(),
            self.materials.len(),
            self.lights.len()
        )
    }
}
