//! CLI integration tests
//!
//! These tests run the built binary against scene files written into a
//! temporary directory and check exit codes, messages and output images.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const VENN: &str = r#"
[canvas]
width = 40
height = 30

[[shapes]]
type = "circle"
center = [-0.25, 0.2]
radius = 0.5
color = "red"

[[shapes]]
type = "circle"
center = [0.25, 0.2]
radius = 0.5
color = "lime"

[[shapes]]
type = "circle"
center = [0.0, -0.2]
radius = 0.5
color = "blue"
"#;

fn rastrum(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rastrum"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute rastrum")
}

fn write_scene(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn image_dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output image");
    (img.width(), img.height())
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_render_explicit_output() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);
    let out = dir.path().join("nested").join("venn_out.png");

    let output = rastrum(&["render", arg(&scene), "-o", arg(&out)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved:"), "stdout: {}", stdout);
    assert_eq!(image_dimensions(&out), (40, 30));
}

#[test]
fn test_render_default_output_beside_scene() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);

    let output = rastrum(&["render", arg(&scene)]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("venn.png").exists());
}

#[test]
fn test_render_scale() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);
    let out = dir.path().join("scaled.png");

    let output = rastrum(&["render", arg(&scene), "-o", arg(&out), "--scale", "3"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(image_dimensions(&out), (120, 90));
}

#[test]
fn test_render_scale_out_of_range() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);

    let output = rastrum(&["render", arg(&scene), "--scale", "0"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_render_no_overlay_keeps_last_shape_color() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);
    let out = dir.path().join("plain.png");

    let output = rastrum(&["render", arg(&scene), "-o", arg(&out), "--no-overlay"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let img = image::open(&out).unwrap().to_rgba8();
    // Canvas center lies in every circle; blue was drawn last
    assert_eq!(img.get_pixel(20, 15).0, [0, 0, 255, 255]);
}

#[test]
fn test_render_lenient_and_strict_warnings() {
    let dir = TempDir::new().unwrap();
    let contents = format!(
        "{}\n[[shapes]]\ntype = \"circle\"\ncenter = [9.0, 9.0]\nradius = 0.5\ncolor = \"white\"\n",
        VENN
    );
    let scene = write_scene(&dir, "warn.toml", &contents);
    let out = dir.path().join("warn.png");

    let lenient = rastrum(&["render", arg(&scene), "-o", arg(&out)]);
    assert!(lenient.status.success());
    let stderr = String::from_utf8_lossy(&lenient.stderr);
    assert!(stderr.contains("Warning:") && stderr.contains("outside the canvas"), "{}", stderr);

    fs::remove_file(&out).unwrap();
    let strict = rastrum(&["render", arg(&scene), "-o", arg(&out), "--strict"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(!out.exists());
}

#[test]
fn test_render_invalid_scene() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "bad.toml", "[canvas]\nwidth = 0\nheight = 10\n");

    let output = rastrum(&["render", arg(&scene)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("canvas"));
}

#[test]
fn test_render_oversized_canvas() {
    let dir = TempDir::new().unwrap();
    let scene =
        write_scene(&dir, "huge.toml", "[canvas]\nwidth = 4294967295\nheight = 4294967295\n");

    let output = rastrum(&["render", arg(&scene)]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("exceeds the limit"));
    assert!(!dir.path().join("huge.png").exists());
}

#[test]
fn test_demo_rejects_oversized_scaled_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("demo.png");

    let output = rastrum(&["demo", "-o", arg(&out), "--scale", "16"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!out.exists());
}

#[test]
fn test_render_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");

    let output = rastrum(&["render", arg(&missing)]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_intersect_json() {
    let dir = TempDir::new().unwrap();
    let contents = format!(
        "{}\n[[shapes]]\ntype = \"rectangle\"\norigin = [3.0, 3.0]\nsize = [0.5, 0.5]\ncolor = \"white\"\n",
        VENN
    );
    let scene = write_scene(&dir, "venn.toml", &contents);

    let output = rastrum(&["intersect", arg(&scene), "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["shapes"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["matrix"][0][1], true);
    assert_eq!(value["matrix"][2][0], true);
    assert_eq!(value["matrix"][3][0], false);
    assert_eq!(value["matrix"][3][3], true);
}

#[test]
fn test_intersect_table() {
    let dir = TempDir::new().unwrap();
    let scene = write_scene(&dir, "venn.toml", VENN);

    let output = rastrum(&["intersect", arg(&scene)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("Circle"));
}

#[test]
fn test_demo_rejects_bad_scale() {
    let output = rastrum(&["demo", "--scale", "17"]);
    assert_eq!(output.status.code(), Some(2));
}
