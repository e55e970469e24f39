//! NFF Renderer - CPU ray tracing and rasterization of NFF scenes.
//!
//! Two renderers share one camera model and one Phong shading routine:
//!
//! - [`Tracer`]: recursive Whitted-style ray tracer with hard shadows and
//!   mirror reflections, rows traced in parallel
//! - [`Rasterizer`]: four-stage triangle pipeline with per-pixel fragment
//!   lists and depth blending
//!
//! Both produce an [`ImageBuffer`] that can be written as PPM, PNG, JPEG or BMP.

mod animation;
mod output;
mod rasterizer;
mod shading;
mod tracer;

pub use animation::{frame_path, orbit};
pub use output::{color_to_rgb, ImageBuffer, OutputError};
pub use rasterizer::{nearest_fragment, Fragment, FragmentBuffer, RasterTriangle, Rasterizer};
pub use shading::{light_weight, phong, reflect, ShadePoint};
pub use tracer::{RenderConfig, Tracer, SHADOW_BIAS};

/// Re-export the scene types renderers consume
pub use nff_core::{Color, Scene};
