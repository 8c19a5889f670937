//! Scene rendering to image buffers

use image::RgbaImage;
use log::info;
use thiserror::Error;

use crate::canvas::{Canvas, CanvasError, RasterCanvas};
use crate::color::{parse_color, ColorError};
use crate::config::{ensure_valid, ConfigError, SceneConfig};
use crate::decorate::{diagonal_pixel_set, GridLines};
use crate::output::OutputError;
use crate::overlay::{OverlayReport, Scene, LARGE_OVERLAY_SUBSETS};
use crate::shapes::Shape;

/// A warning generated during rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Any failure that aborts a render pass
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid color for {field}: {source}")]
    Color {
        field: String,
        #[source]
        source: ColorError,
    },
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result of a successful render pass
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub image: RgbaImage,
    pub report: OverlayReport,
    pub warnings: Vec<Warning>,
}

/// Render a scene to an RGBA image buffer.
///
/// Order of operations: fill the background, draw each shape once in file
/// order, run the overlay pass, then apply the grid and diagonal
/// decorations.
///
/// # Warnings (lenient mode)
///
/// - A shape lies entirely outside the canvas
/// - A shape has zero area
/// - `overlay.max_k` exceeds the shape count
/// - The overlay pass visits a very large number of subsets
///
/// # Examples
///
/// ```
/// use rastrum::config::parse_config;
/// use rastrum::renderer::render_scene;
///
/// let scene = parse_config(r#"
/// [canvas]
/// width = 10
/// height = 10
///
/// [[shapes]]
/// type = "circle"
/// center = [0.0, 0.0]
/// radius = 1.0
/// color = "red"
///
/// [[shapes]]
/// type = "rectangle"
/// origin = [0.0, 0.0]
/// size = [1.0, 1.0]
/// color = "blue"
/// "#).unwrap();
///
/// let outcome = render_scene(&scene).unwrap();
/// assert_eq!(outcome.report.regions_painted, 1);
/// assert_eq!(*outcome.image.get_pixel(6, 4), image::Rgba([127, 0, 127, 255]));
/// ```
pub fn render_scene(config: &SceneConfig) -> Result<RenderOutcome, RenderError> {
    ensure_valid(config)?;
    let mut warnings = Vec::new();

    let background = resolve_color("canvas.background", &config.canvas.background)?;
    let canvas = RasterCanvas::new(config.canvas.width, config.canvas.height, background)?;
    let size = canvas.size();

    let mut scene = Scene::new(canvas);
    for (i, shape_config) in config.shapes.iter().enumerate() {
        let shape = shape_config.to_shape().map_err(|source| RenderError::Color {
            field: format!("shapes[{}].color", i),
            source,
        })?;
        warnings.extend(shape_warnings(i, &shape, size));
        scene.add(shape);
    }

    let drawn = scene.render_shapes();
    info!("drew {} shapes on a {}x{} canvas", drawn, size.0, size.1);

    let shape_count = scene.shapes().len();
    let report = if config.overlay.enabled && shape_count >= 2 {
        let options = config.overlay_options();
        if let Some(max_k) = options.max_k {
            if max_k > shape_count {
                warnings.push(Warning::new(format!(
                    "overlay.max_k is {} but the scene only has {} shapes",
                    max_k, shape_count
                )));
            }
        }
        let planned = options.planned_subsets(shape_count);
        if planned > LARGE_OVERLAY_SUBSETS {
            warnings.push(Warning::new(format!(
                "overlay visits {} subsets of {} shapes, rendering may be slow",
                planned, shape_count
            )));
        }
        scene.render_overlay(&options)
    } else {
        OverlayReport::default()
    };

    let mut canvas = scene.into_canvas();
    if let Some(grid) = &config.decorations.grid {
        let color = resolve_color("decorations.grid.color", &grid.color)?;
        canvas.visit(&GridLines { spacing: grid.spacing, color });
    }
    if let Some(diagonals) = &config.decorations.diagonals {
        let color = resolve_color("decorations.diagonals.color", &diagonals.color)?;
        let pixels = diagonal_pixel_set(size.0, size.1, diagonals.spacing);
        canvas.set_pixel_set(&pixels, color);
    }

    Ok(RenderOutcome { image: canvas.into_image(), report, warnings })
}

fn resolve_color(field: &str, value: &str) -> Result<image::Rgba<u8>, RenderError> {
    parse_color(value).map_err(|source| RenderError::Color { field: field.to_string(), source })
}

fn shape_warnings(index: usize, shape: &Shape, size: (u32, u32)) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if shape.geometry().area() == 0.0 {
        warnings.push(Warning::new(format!("shape {} ({}) has zero area", index, shape.kind())));
    }
    if shape.pixel_bounds(size).is_none() {
        warnings.push(Warning::new(format!(
            "shape {} ({}) lies entirely outside the canvas",
            index,
            shape.kind()
        )));
    }
    warnings
}
