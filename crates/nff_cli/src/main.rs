use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nff_core::{load_nff, Scene};
use nff_renderer::{frame_path, orbit, ImageBuffer, Rasterizer, RenderConfig, Tracer};

/// Which renderer produces the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Recursive ray tracing with shadows and reflections
    Trace,
    /// Triangle rasterization with depth blending
    Raster,
}

/// Render an NFF scene to an image.
#[derive(Debug, Parser)]
#[command(name = "nffrender", version, about)]
struct Args {
    /// NFF scene file
    input: PathBuf,

    /// Output image (.ppm, .png, .jpg or .bmp)
    #[arg(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Renderer to use
    #[arg(short, long, value_enum, default_value_t = Mode::Trace)]
    mode: Mode,

    /// Ray budget per pixel (1 disables reflections)
    #[arg(short, long, default_value_t = 5)]
    bounces: u32,

    /// Log intermediate values
    #[arg(short, long)]
    debug: bool,

    /// Render FRAMES images orbiting the look-at point
    #[arg(long, value_name = "FRAMES")]
    animate: Option<u32>,
}

fn render(scene: &Scene, args: &Args) -> ImageBuffer {
    match args.mode {
        Mode::Trace => {
            let config = RenderConfig {
                bounces: args.bounces,
                debug: args.debug,
            };
            Tracer::new(scene, &config).render()
        }
        Mode::Raster => Rasterizer::new(scene).with_debug(args.debug).render(),
    }
}

fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut scene = load_nff(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    match args.animate {
        Some(frames) => {
            log::info!("Rendering {} animation frames", frames);
            for (i, camera) in orbit(&scene.camera, frames).into_iter().enumerate() {
                scene.camera = camera;
                let image = render(&scene, &args);
                save(&image, &frame_path(&args.output, i as u32))?;
            }
        }
        None => {
            let image = render(&scene, &args);
            save(&image, &args.output)?;
        }
    }

    Ok(())
}
