//! Full renders of small scenes through both renderers.

use nff_core::{load_nff_from_string, Scene};
use nff_math::DVec3;
use nff_renderer::{ImageBuffer, Rasterizer, RenderConfig, Tracer};

const WHITE_TRIANGLE: &str = r#"
# one white triangle facing the camera and the light
b 0.2 0.2 0.2
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
"#;

fn load() -> Scene {
    load_nff_from_string("white_triangle", WHITE_TRIANGLE).unwrap()
}

/// Pixel bounds of the triangle's projection, widened by one pixel.
fn covered_region(scene: &Scene) -> (f64, f64, f64, f64) {
    let m = scene.camera.world_to_image();
    let points: Vec<DVec3> = scene.surfaces[0].triangles()[0]
        .points()
        .iter()
        .map(|p| m.project_point3(*p))
        .collect();

    let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    (x_min.floor() - 1.0, x_max.ceil() + 1.0, y_min.floor() - 1.0, y_max.ceil() + 1.0)
}

fn check_image(scene: &Scene, image: &ImageBuffer) {
    assert_eq!((image.width, image.height), (16, 16));

    let background = scene.background;
    let (x_min, x_max, y_min, y_max) = covered_region(scene);
    let mut outside = 0;

    for y in 0..image.height {
        for x in 0..image.width {
            let (fx, fy) = (x as f64, y as f64);
            if fx < x_min || fx > x_max || fy < y_min || fy > y_max {
                assert_eq!(image.get(x, y), background, "pixel ({}, {})", x, y);
                outside += 1;
            }
        }
    }
    assert!(outside > 0);

    // Pixels near the image center sit well inside the triangle
    for (x, y) in [(7, 8), (8, 8), (7, 9), (8, 9)] {
        let color = image.get(x, y);
        assert!(
            color.min_element() > background.max_element(),
            "pixel ({}, {}) = {:?} should be brighter than the background",
            x,
            y,
            color
        );
    }
}

/// Route renderer logs through the test harness; `RUST_LOG=debug` shows them.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_traced_triangle() {
    init_logging();
    let scene = load();
    let image = Tracer::new(&scene, &RenderConfig::default()).render();
    check_image(&scene, &image);
}

#[test]
fn test_rasterized_triangle() {
    init_logging();
    let scene = load();
    let image = Rasterizer::new(&scene).render();
    check_image(&scene, &image);
}

#[test]
fn test_renderers_agree_at_center() {
    init_logging();
    let scene = load();
    let traced = Tracer::new(&scene, &RenderConfig::default()).render();
    let rasterized = Rasterizer::new(&scene).render();

    // Flat white surface lit head-on: both renderers saturate near 1
    let t = traced.get(8, 8);
    let r = rasterized.get(8, 8);
    assert!((t - r).abs().max_element() < 0.05, "traced {:?}, rasterized {:?}", t, r);
}

#[test]
fn test_rgb8_buffer_layout() {
    init_logging();
    let scene = load();
    let image = Tracer::new(&scene, &RenderConfig::default()).render();
    let bytes = image.to_rgb8();

    assert_eq!(bytes.len(), 16 * 16 * 3);
    // Top-left pixel is background: 0.2 * 255 truncates to 51
    assert_eq!(&bytes[..3], &[51, 51, 51]);
}

#[test]
fn test_colored_light_does_not_tint() {
    init_logging();
    let white = load();
    let red = load_nff_from_string(
        "red_light",
        &WHITE_TRIANGLE.replace("l 0 0 10\n", "l 0 0 10 1 0 0\n"),
    )
    .unwrap();
    assert_eq!(red.lights[0].color, DVec3::new(1.0, 0.0, 0.0));

    let config = RenderConfig::default();
    let center = Tracer::new(&red, &config).render().get(8, 8);
    assert_eq!(center, Tracer::new(&white, &config).render().get(8, 8));
    assert!(center.min_element() > 0.9, "center {:?}", center);
}

#[test]
fn test_debug_renders_match() {
    init_logging();
    let scene = load();
    let config = RenderConfig {
        debug: true,
        ..RenderConfig::default()
    };

    assert_eq!(
        Tracer::new(&scene, &config).render(),
        Tracer::new(&scene, &RenderConfig::default()).render()
    );
    assert_eq!(
        Rasterizer::new(&scene).with_debug(true).render(),
        Rasterizer::new(&scene).render()
    );
}
