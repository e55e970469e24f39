//! NFF Core - geometry and scene model for the NFF renderers.
//!
//! This crate provides:
//!
//! - **Geometry**: `Triangle`, `Polygon`, `Sphere` and the `Surface` sum type,
//!   all intersected through the `Hittable` trait
//! - **Scene types**: `Scene`, `Material`, `Light`
//! - **NFF support**: text scene parsing and loading
//!
//! # Example
//!
//! ```ignore
//! use nff_core::nff::load_nff;
//!
//! let scene = load_nff("scene.nff")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surface_count(),
//!     scene.lights.len());
//! ```

pub mod hittable;
pub mod nff;
pub mod polygon;
pub mod scene;
pub mod sphere;
pub mod surface;
pub mod triangle;

// Re-export commonly used types
pub use hittable::{Barycentric, HitRecord, Hittable, SurfaceKind};
pub use nff::{load_nff, load_nff_from_string, LoadError, ParseError};
pub use polygon::Polygon;
pub use scene::{Color, Light, Material, Scene};
pub use sphere::Sphere;
pub use surface::Surface;
pub use triangle::Triangle;
