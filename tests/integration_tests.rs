//! Library-level integration tests for scene rendering
//!
//! These tests load the bundled scene files and the built-in demo, render
//! them, and check the overlap colors at known points.

use std::path::{Path, PathBuf};

use image::Rgba;
use rastrum::canvas::RasterCanvas;
use rastrum::color::{mix_colors, GRAY, RED};
use rastrum::config::{load_config, SceneConfig};
use rastrum::overlay::{OverlayOptions, Scene};
use rastrum::renderer::render_scene;
use rastrum::shapes::Shape;

fn scene_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes").join(name)
}

#[test]
fn test_venn_scene_colors() {
    let config = load_config(&scene_path("venn.toml")).unwrap();
    let outcome = render_scene(&config).unwrap();

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(outcome.image.dimensions(), (320, 240));
    // Three pairs and one triple, all overlapping
    assert_eq!(outcome.report.subsets_visited, 4);
    assert_eq!(outcome.report.regions_painted, 4);

    // Center: inside all three circles
    assert_eq!(*outcome.image.get_pixel(160, 120), Rgba([63, 63, 127, 255]));
    // (0, 0.6): red and lime only
    assert_eq!(*outcome.image.get_pixel(160, 48), Rgba([127, 127, 0, 255]));
    // (-0.6, 0.3): red only
    assert_eq!(*outcome.image.get_pixel(88, 84), RED);
    // Corner: background
    assert_eq!(*outcome.image.get_pixel(0, 0), GRAY);
}

#[test]
fn test_tiles_scene_renders() {
    let config = load_config(&scene_path("tiles.toml")).unwrap();
    assert_eq!(config.output.scale, 2);

    let outcome = render_scene(&config).unwrap();
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    // Scaling is applied when saving, not when rendering
    assert_eq!(outcome.image.dimensions(), (256, 256));
    // Only pairs are painted
    assert_eq!(outcome.report.subsets_visited, 6);
}

#[test]
fn test_demo_scene_on_small_canvas() {
    let mut config = SceneConfig::demo();
    config.canvas.width = 192;
    config.canvas.height = 108;
    config.decorations.grid = None;
    config.decorations.diagonals = None;

    let outcome = render_scene(&config).unwrap();
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    // C(10, 2) + C(10, 3)
    assert_eq!(outcome.report.subsets_visited, 45 + 120);
    assert!(outcome.report.regions_painted > 0);
    assert!(outcome.report.regions_painted <= outcome.report.subsets_visited);
}

#[test]
fn test_overlay_only_touches_overlaps() {
    // Disjoint shapes: the overlay pass changes nothing
    let mut scene = Scene::new(RasterCanvas::new(40, 20, GRAY).unwrap());
    scene.add(Shape::circle(-1.0, 0.0, 0.5, RED));
    scene.add(Shape::rectangle(0.5, -0.5, 1.0, 1.0, Rgba([0, 0, 255, 255])));
    scene.render_shapes();
    let before = scene.canvas().image().clone();

    let report = scene.render_overlay(&OverlayOptions::default());
    assert_eq!(report.subsets_visited, 1);
    assert_eq!(report.regions_painted, 0);
    assert_eq!(scene.canvas().image(), &before);
}

#[test]
fn test_overlay_blend_weights_by_alpha() {
    let half_red = Rgba([255, 0, 0, 128]);
    let blue = Rgba([0, 0, 255, 255]);

    let mut forward = Scene::new(RasterCanvas::new(10, 10, GRAY).unwrap());
    forward.add(Shape::circle(0.0, 0.0, 1.0, half_red));
    forward.add(Shape::circle(0.0, 0.0, 1.0, blue));
    forward.render_overlay(&OverlayOptions::default());

    let expected = mix_colors(mix_colors(Rgba([0, 0, 0, 0]), half_red), blue);
    assert_eq!(forward.into_canvas().image().get_pixel(5, 5), &expected);
}
