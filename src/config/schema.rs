//! Scene schema types
//!
//! Defines the structure and validation rules of a rastrum scene file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::canvas::{fits_image_limit, MAX_IMAGE_PIXELS};
use crate::color::{parse_color, ColorError};
use crate::overlay::OverlayOptions;
use crate::shapes::Shape;

/// Largest accepted output scale factor
pub const MAX_SCALE: u8 = 16;

/// Canvas section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Background color (any CSS color)
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_background() -> String {
    "#BDC3C7".to_string()
}

/// One shape of the scene, in normalized coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeConfig {
    Circle {
        center: [f32; 2],
        /// Sign is ignored
        radius: f32,
        color: String,
    },
    Rectangle {
        /// Anchor corner; negative sizes extend towards lower coordinates
        origin: [f32; 2],
        size: [f32; 2],
        color: String,
    },
}

impl ShapeConfig {
    pub fn color(&self) -> &str {
        match self {
            ShapeConfig::Circle { color, .. } | ShapeConfig::Rectangle { color, .. } => color,
        }
    }

    /// Build the shape, resolving its color.
    pub fn to_shape(&self) -> Result<Shape, ColorError> {
        let color = parse_color(self.color())?;
        Ok(match *self {
            ShapeConfig::Circle { center: [x, y], radius, .. } => {
                Shape::circle(x, y, radius, color)
            }
            ShapeConfig::Rectangle { origin: [x, y], size: [w, h], .. } => {
                Shape::rectangle(x, y, w, h, color)
            }
        })
    }
}

/// Overlay pass settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    /// Run the overlay pass at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Smallest subset size painted
    #[serde(default = "default_min_k")]
    pub min_k: usize,
    /// Largest subset size painted (defaults to the shape count)
    #[serde(default)]
    pub max_k: Option<usize>,
    /// Gamma-correct blended colors
    #[serde(default)]
    pub gamma: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self { enabled: true, min_k: default_min_k(), max_k: None, gamma: false }
    }
}

fn default_true() -> bool {
    true
}

fn default_min_k() -> usize {
    2
}

/// A repeating line pattern painted after the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternConfig {
    /// Distance between lines in pixels
    pub spacing: u32,
    #[serde(default = "default_pattern_color")]
    pub color: String,
}

fn default_pattern_color() -> String {
    "black".to_string()
}

/// Post-processing section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecorationsConfig {
    /// Horizontal and vertical grid lines
    #[serde(default)]
    pub grid: Option<PatternConfig>,
    /// Lines where `x + y` is a multiple of the spacing
    #[serde(default)]
    pub diagonals: Option<PatternConfig>,
}

/// Output section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output PNG path, relative to the working directory
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Integer nearest-neighbor upscale factor
    #[serde(default = "default_scale")]
    pub scale: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: None, scale: default_scale() }
    }
}

fn default_scale() -> u8 {
    1
}

/// A complete scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub decorations: DecorationsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "shapes[2].color")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scene: '{}' {}", self.field, self.message)
    }
}

impl SceneConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: String, message: String| {
            errors.push(ConfigValidationError { field, message });
        };

        if self.canvas.width == 0 || self.canvas.height == 0 {
            push(
                "canvas".to_string(),
                format!("size must be positive, got {}x{}", self.canvas.width, self.canvas.height),
            );
        }
        let (width, height) = (self.canvas.width as u64, self.canvas.height as u64);
        let canvas_fits = fits_image_limit(width, height);
        if !canvas_fits {
            push(
                "canvas".to_string(),
                format!(
                    "size {}x{} exceeds the limit of {} pixels",
                    width, height, MAX_IMAGE_PIXELS
                ),
            );
        }
        if let Err(e) = parse_color(&self.canvas.background) {
            push("canvas.background".to_string(), format!("is not a color: {}", e));
        }

        for (i, shape) in self.shapes.iter().enumerate() {
            if let Err(e) = parse_color(shape.color()) {
                push(format!("shapes[{}].color", i), format!("is not a color: {}", e));
            }
            let finite = match shape {
                ShapeConfig::Circle { center, radius, .. } => {
                    center.iter().chain([radius]).all(|v| v.is_finite())
                }
                ShapeConfig::Rectangle { origin, size, .. } => {
                    origin.iter().chain(size.iter()).all(|v| v.is_finite())
                }
            };
            if !finite {
                push(format!("shapes[{}]", i), "must only contain finite numbers".to_string());
            }
        }

        if self.overlay.min_k < 2 {
            push("overlay.min_k".to_string(), "must be at least 2".to_string());
        }
        if let Some(max_k) = self.overlay.max_k {
            if max_k < self.overlay.min_k {
                push(
                    "overlay.max_k".to_string(),
                    format!("must not be below min_k ({})", self.overlay.min_k),
                );
            }
        }

        let patterns =
            [("grid", &self.decorations.grid), ("diagonals", &self.decorations.diagonals)];
        for (name, pattern) in patterns {
            let Some(pattern) = pattern else { continue };
            if pattern.spacing == 0 {
                push(
                    format!("decorations.{}.spacing", name),
                    "must be a positive integer".to_string(),
                );
            }
            if let Err(e) = parse_color(&pattern.color) {
                push(format!("decorations.{}.color", name), format!("is not a color: {}", e));
            }
        }

        let scale = self.output.scale as u64;
        if scale == 0 || scale > MAX_SCALE as u64 {
            push("output.scale".to_string(), format!("must be between 1 and {}", MAX_SCALE));
        } else if canvas_fits && !fits_image_limit(width * scale, height * scale) {
            push(
                "output.scale".to_string(),
                format!(
                    "{}x output of a {}x{} canvas exceeds the limit of {} pixels",
                    scale, width, height, MAX_IMAGE_PIXELS
                ),
            );
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Overlay settings as consumed by the overlay driver
    pub fn overlay_options(&self) -> OverlayOptions {
        OverlayOptions {
            min_k: self.overlay.min_k,
            max_k: self.overlay.max_k,
            gamma: self.overlay.gamma,
        }
    }

    /// The reference scene: six circles and four rectangles on a gray
    /// 1920x1080 canvas, overlaid for pairs and triples.
    pub fn demo() -> Self {
        let circle = |x: f32, y: f32, r: f32, color: &str| ShapeConfig::Circle {
            center: [x, y],
            radius: r,
            color: color.to_string(),
        };
        let rect = |x: f32, y: f32, w: f32, h: f32, color: &str| ShapeConfig::Rectangle {
            origin: [x, y],
            size: [w, h],
            color: color.to_string(),
        };

        SceneConfig {
            canvas: CanvasConfig { width: 1920, height: 1080, background: default_background() },
            shapes: vec![
                circle(0.4, 0.4, 0.5, "red"),
                circle(-0.4, 0.4, 0.5, "lime"),
                circle(-0.4, -0.4, -0.5, "blue"),
                circle(0.4, -0.4, 0.5, "yellow"),
                circle(0.9, 0.0, 0.5, "white"),
                circle(-0.9, 0.0, 0.5, "black"),
                rect(0.2, 0.2, 0.4, 0.4, "yellow"),
                rect(-0.2, 0.2, -0.4, 0.4, "blue"),
                rect(-0.2, -0.2, -0.4, -0.4, "lime"),
                rect(0.2, -0.2, 0.4, -0.4, "red"),
            ],
            overlay: OverlayConfig { enabled: true, min_k: 2, max_k: Some(3), gamma: true },
            decorations: DecorationsConfig {
                grid: Some(PatternConfig { spacing: 64, color: default_pattern_color() }),
                diagonals: Some(PatternConfig { spacing: 64, color: default_pattern_color() }),
            },
            output: OutputConfig { path: Some(PathBuf::from("result.png")), scale: 1 },
        }
    }
}
