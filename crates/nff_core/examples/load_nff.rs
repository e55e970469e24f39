//! Example: Load and inspect an NFF file.
//!
//! Run with: cargo run --example load_nff -- scenes/balls.nff

use std::env;

use nff_core::nff::load_nff;
use nff_core::Surface;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_nff <path-to-nff-file>");
        return;
    }

    let path = &args[1];
    println!("Loading NFF file: {}", path);

    match load_nff(path) {
        Ok(scene) => {
            println!("\n=== Scene: {} ===", scene.name);
            println!("{}", scene.camera);
            println!(
                "Background: ({:.2}, {:.2}, {:.2})",
                scene.background.x, scene.background.y, scene.background.z
            );
            println!("Surfaces: {}", scene.surface_count());
            println!("Triangles: {}", scene.triangle_count());

            println!("\n--- Materials ---");
            for (i, material) in scene.materials.iter().enumerate() {
                println!("  [{}] {}", i, material);
            }

            println!("\n--- Lights ---");
            for light in &scene.lights {
                println!(
                    "  at ({:.2}, {:.2}, {:.2})",
                    light.position.x, light.position.y, light.position.z
                );
            }

            println!("\n--- Surfaces ---");
            for (i, surface) in scene.surfaces.iter().enumerate() {
                let kind = match surface {
                    Surface::Triangle(_) => "triangle",
                    Surface::Polygon(p) if p.is_patch() => "polygon patch",
                    Surface::Polygon(_) => "polygon",
                    Surface::Sphere(_) => "sphere",
                };
                println!("  [{}] {} ({} triangles)", i, kind, surface.triangles().len());
            }
        }
        Err(e) => {
            eprintln!("Error loading NFF file: {}", e);
        }
    }
}
