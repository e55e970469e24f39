//! NFF (Neutral File Format) scene reading.
//!
//! The reader runs in two passes: [`parse_nff`] turns text into a flat list of
//! line-tagged records, and [`load_nff_from_string`] folds those records into
//! a [`Scene`](crate::Scene), binding each surface to the most recent fill
//! material.
//!
//! ## Supported records
//!
//! - `b`: background color
//! - `v` with `from`, `at`, `up`, `angle`, `hither`, `resolution`
//! - `l`: point light, optional color
//! - `f`: fill material
//! - `s`: sphere
//! - `p` / `pp`: polygon and polygon patch (multi-line)
//!
//! Cones, cylinders and the other classic NFF primitives are skipped with a
//! warning.
//!
//! # Example
//!
//! ```ignore
//! use nff_core::nff::load_nff;
//!
//! let scene = load_nff("scenes/tetra.nff")?;
//! println!("{}", scene.summary());
//! ```

mod loader;
mod parser;

pub use loader::*;
pub use parser::*;
