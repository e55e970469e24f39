//! Render output: a floating-point RGB buffer and its encoders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nff_core::Color;
use nff_math::Interval;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Clamp a color to [0, 1] and quantize it to 8 bits per channel.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (255.0 * Interval::UNIT.clamp(c)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Row-major image with a top-left origin. Colors are unclamped until output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with one color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Flat `width * height * 3` byte buffer.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgb(*color));
        }
        bytes
    }

    /// Write a binary (P6) PPM.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.to_rgb8())?;
        writer.flush()
    }

    /// Save to `path`. `.ppm` files use the built-in writer; other extensions
    /// are encoded by the `image` crate.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            image::save_buffer(
                path,
                &self.to_rgb8(),
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }

        log::info!("Image written to {}", path.display());
        Ok(())
    }
}
