//! Building a [`Scene`] from NFF records.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::nff::parser::{parse_nff, NffRecord, NffStatement, ParseError};
use crate::polygon::Polygon;
use crate::scene::{Light, Material, Scene};
use crate::sphere::Sphere;

/// Errors that can occur during NFF loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("No surfaces found in NFF file")]
    NoSurfaces,

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load an NFF file. The scene is named after the file stem.
///
/// # Example
///
/// ```ignore
/// use nff_core::nff::load_nff;
///
/// let scene = load_nff("scenes/balls.nff")?;
/// println!("Loaded {} surfaces", scene.surface_count());
/// ```
pub fn load_nff<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let content = std::fs::read_to_string(path)?;
    load_nff_from_string(name, &content)
}

/// Load a scene from NFF text.
pub fn load_nff_from_string(name: &str, content: &str) -> LoadResult<Scene> {
    let statements = parse_nff(content)?;

    let mut scene = Scene::new(name);
    let mut fill: Option<Arc<Material>> = None;

    for NffStatement { line, record } in statements {
        match record {
            NffRecord::Background(color) => scene.background = color,
            NffRecord::View => {}
            NffRecord::From(from) => scene.camera.from = from,
            NffRecord::At(at) => scene.camera.at = at,
            NffRecord::Up(up) => scene.camera.up = up,
            NffRecord::Angle(angle) => scene.camera.angle = angle,
            NffRecord::Hither(hither) => scene.camera.hither = hither,
            NffRecord::Resolution(width, height) => {
                scene.camera.width = width;
                scene.camera.height = height;
            }
            NffRecord::Light { position, color } => {
                scene.add_light(Light::with_color(position, color));
            }
            NffRecord::Fill(material) => {
                fill = Some(scene.add_material(material));
            }
            NffRecord::Sphere { center, radius } => {
                let material = current_fill(&fill, line)?;
                scene.add_surface(Sphere::new(center, radius, material));
            }
            NffRecord::Polygon { vertices } => {
                let material = current_fill(&fill, line)?;
                scene.add_surface(Polygon::new(vertices, material));
            }
            NffRecord::PolygonPatch { vertices, normals } => {
                let material = current_fill(&fill, line)?;
                scene.add_surface(Polygon::patch(vertices, normals, material));
            }
        }
    }

    if scene.surfaces.is_empty() {
        return Err(LoadError::NoSurfaces);
    }

    let (width, height) = (scene.camera.width, scene.camera.height);
    if width == 0 || height == 0 {
        return Err(LoadError::InvalidResolution { width, height });
    }

    log::info!("Loaded {}", scene.summary());
    log::debug!("{}", scene.camera);

    Ok(scene)
}

fn current_fill(fill: &Option<Arc<Material>>, line: usize) -> Result<Arc<Material>, ParseError> {
    fill.clone().ok_or(ParseError::MissingMaterial { line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use nff_math::DVec3;

    const TRIANGLE_SCENE: &str = r#"
b 0.1 0.1 0.1
v
from 0 0 5
at 0 0 0
up 0 1 0
angle 45
hither 1
resolution 16 16
l 0 0 10
f 1 1 1 1 0 1 0 1
p 3
-1 -1 0
1 -1 0
0 1 0
f 1 0 0 0.5 0.5 10 0 1
s 0 0 -2 0.5
"#;

    #[test]
    fn test_load_triangle_scene() {
        let scene = load_nff_from_string("triangle", TRIANGLE_SCENE).unwrap();

        assert_eq!(scene.name, "triangle");
        assert_eq!(scene.background, DVec3::splat(0.1));
        assert_eq!(scene.camera.from, DVec3::new(0.0, 0.0, 5.0));
        assert_eq!((scene.camera.width, scene.camera.height), (16, 16));
        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.materials.len(), 2);
        assert_eq!(scene.polygon_count(), 1);
        assert_eq!(scene.sphere_count(), 1);

        // Each surface takes the fill that precedes it
        assert!(Arc::ptr_eq(scene.surfaces[0].material(), &scene.materials[0]));
        assert!(Arc::ptr_eq(scene.surfaces[1].material(), &scene.materials[1]));
        assert!(matches!(scene.surfaces[1], Surface::Sphere(_)));
    }

    #[test]
    fn test_missing_material() {
        let result = load_nff_from_string("bad", "resolution 4 4\ns 0 0 0 1\n");

        assert!(matches!(
            result,
            Err(LoadError::Parse(ParseError::MissingMaterial { line: 2 }))
        ));
    }

    #[test]
    fn test_no_surfaces() {
        let result = load_nff_from_string("empty", "b 0 0 0\nf 1 1 1 1 0 1 0 1\n");
        assert!(matches!(result, Err(LoadError::NoSurfaces)));
    }

    #[test]
    fn test_invalid_resolution() {
        let result = load_nff_from_string("flat", "resolution 0 16\nf 1 1 1 1 0 1 0 1\ns 0 0 0 1\n");
        assert!(matches!(
            result,
            Err(LoadError::InvalidResolution { width: 0, height: 16 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_nff("/nonexistent/scene.nff");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
