//! Command-line interface implementation

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{
    check, load_config, merge_cli_overrides, CliOverrides, SceneConfig, MAX_SCALE,
};
use crate::intersect::intersection_matrix;
use crate::output::{generate_output_path, save_png, scale_image};
use crate::renderer::{render_scene, RenderError};
use crate::shapes::{Geometry, ShapeKind};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Rastrum - Rasterize overlapping circles and rectangles and color their overlaps
#[derive(Parser)]
#[command(name = "rastrum")]
#[command(about = "Rastrum - Rasterize overlapping circles and rectangles and color their overlaps")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a TOML scene file to PNG
    Render {
        /// Scene file
        input: PathBuf,

        /// Output file. If omitted: [output].path, else {input}.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_SCALE as i64))]
        scale: Option<u8>,

        /// Largest overlap subset size to color
        #[arg(long)]
        max_k: Option<usize>,

        /// Only draw the shapes, skip overlap coloring
        #[arg(long)]
        no_overlay: bool,

        /// Gamma-correct overlap colors
        #[arg(long)]
        gamma: bool,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Render the built-in demo scene
    Demo {
        /// Output file (default: result.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=MAX_SCALE as i64))]
        scale: Option<u8>,
    },

    /// Print which shapes of a scene intersect each other
    Intersect {
        /// Scene file
        input: PathBuf,

        /// Print the matrix as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render { input, output, scale, max_k, no_overlay, gamma, strict } => {
            let overrides = CliOverrides { output, scale, max_k, no_overlay, gamma };
            run_render(&input, &overrides, strict)
        }
        Commands::Demo { output, scale } => {
            let overrides = CliOverrides { output, scale, ..Default::default() };
            run_demo(&overrides)
        }
        Commands::Intersect { input, json } => run_intersect(&input, json),
    }
}

/// Install the logger. `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(default_log_filter(verbose));
    // A logger may already be installed when embedded
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Log filter used when `RUST_LOG` is unset.
fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Execute the render command
fn run_render(input: &Path, overrides: &CliOverrides, strict: bool) -> ExitCode {
    let config = match load_scene(input, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let output_path = generate_output_path(Some(input), config.output.path.as_deref());
    render_and_save(&config, &output_path, strict)
}

/// Execute the demo command
fn run_demo(overrides: &CliOverrides) -> ExitCode {
    let mut config = SceneConfig::demo();
    merge_cli_overrides(&mut config, overrides);
    let output_path = generate_output_path(None, config.output.path.as_deref());
    render_and_save(&config, &output_path, false)
}

/// Execute the intersect command
fn run_intersect(input: &Path, json: bool) -> ExitCode {
    let config = match load_scene(input, &CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let mut geometries = Vec::with_capacity(config.shapes.len());
    for (i, shape_config) in config.shapes.iter().enumerate() {
        match shape_config.to_shape() {
            Ok(shape) => geometries.push(*shape.geometry()),
            Err(e) => {
                eprintln!("Error: shape {}: {}", i, e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }
    let matrix = intersection_matrix(&geometries);

    if json {
        match serde_json::to_string_pretty(&IntersectReport::new(&geometries, matrix)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Failed to encode JSON: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", format_matrix(&geometries, &matrix));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Load a scene file and apply CLI overrides, reporting failures on stderr.
fn load_scene(input: &Path, overrides: &CliOverrides) -> Result<SceneConfig, ExitCode> {
    let mut config = match load_config(input) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: '{}': {}", input.display(), e);
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };
    merge_cli_overrides(&mut config, overrides);
    check(config).map_err(|e| {
        eprintln!("Error: '{}': {}", input.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

fn render_and_save(config: &SceneConfig, output_path: &Path, strict: bool) -> ExitCode {
    let outcome = match render_scene(config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = match e {
                RenderError::Config(_) => EXIT_INVALID_ARGS,
                _ => EXIT_ERROR,
            };
            return ExitCode::from(code);
        }
    };

    // In strict mode, render warnings are fatal
    if strict && !outcome.warnings.is_empty() {
        for warning in &outcome.warnings {
            eprintln!("Error: {}", warning.message);
        }
        return ExitCode::from(EXIT_ERROR);
    }

    info!(
        "overlay visited {} subsets, painted {} regions ({} pixels)",
        outcome.report.subsets_visited,
        outcome.report.regions_painted,
        outcome.report.pixels_painted
    );

    let image = match scale_image(outcome.image, config.output.scale) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Err(e) = save_png(&image, output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());

    // Print warnings to stderr (in lenient mode)
    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning.message);
    }

    ExitCode::from(EXIT_SUCCESS)
}

#[derive(Serialize)]
struct IntersectShape {
    index: usize,
    kind: ShapeKind,
}

#[derive(Serialize)]
struct IntersectReport {
    shapes: Vec<IntersectShape>,
    matrix: Vec<Vec<bool>>,
}

impl IntersectReport {
    fn new(geometries: &[Geometry], matrix: Vec<Vec<bool>>) -> Self {
        let shapes = geometries
            .iter()
            .enumerate()
            .map(|(index, g)| IntersectShape { index, kind: g.kind() })
            .collect();
        Self { shapes, matrix }
    }
}

/// Text table: one row per shape, `x` where the pair intersects.
fn format_matrix(geometries: &[Geometry], matrix: &[Vec<bool>]) -> String {
    let mut out = String::from("shape          ");
    for j in 0..geometries.len() {
        out.push_str(&format!("{:>3}", j));
    }
    out.push('\n');

    for (i, (geometry, row)) in geometries.iter().zip(matrix).enumerate() {
        out.push_str(&format!("{:>3} {:<11}", i, geometry.kind().to_string()));
        for &hit in row {
            out.push_str(if hit { "  x" } else { "  ." });
        }
        out.push('\n');
    }
    out
}
