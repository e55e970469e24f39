//! Turntable animation: the eye circles the look-at point.

use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use nff_math::Camera;

/// One camera per frame, rotating `from` about the camera's up axis through
/// `at` by a full turn over `frames` frames. Frame 0 is the unchanged camera.
pub fn orbit(camera: &Camera, frames: u32) -> Vec<Camera> {
    (0..frames)
        .map(|i| camera.orbited(TAU * i as f64 / frames as f64))
        .collect()
}

/// Output path for frame `index`: `out.ppm` becomes `out{index}.ppm`.
pub fn frame_path(output: &Path, index: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let name = match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, index, ext),
        None => format!("{}{}", stem, index),
    };
    output.with_file_name(name)
}
