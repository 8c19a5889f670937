//! PNG output and file path generation

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

use crate::canvas::{fits_image_limit, MAX_IMAGE_PIXELS};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// Scaled dimensions exceed the image size limit
    TooLarge { width: u64, height: u64 },
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::TooLarge { width, height } => write!(
                f,
                "Scaled image {}x{} exceeds the limit of {} pixels",
                width, height, MAX_IMAGE_PIXELS
            ),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::TooLarge { .. } => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// A factor of 0 or 1 returns the image unchanged. Fails without allocating
/// when the scaled image would exceed [`MAX_IMAGE_PIXELS`].
pub fn scale_image(image: RgbaImage, factor: u8) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let width = w as u64 * factor as u64;
    let height = h as u64 * factor as u64;
    if !fits_image_limit(width, height) {
        return Err(OutputError::TooLarge { width, height });
    }
    Ok(image::imageops::resize(&image, width as u32, height as u32, FilterType::Nearest))
}

/// Decide where a rendered scene is written.
///
/// | Scenario | Output |
/// |----------|--------|
/// | Explicit path | that path |
/// | Scene file `dir/venn.toml` | `dir/venn.png` |
/// | No scene file (built-in demo) | `result.png` |
pub fn generate_output_path(scene_path: Option<&Path>, explicit: Option<&Path>) -> PathBuf {
    if let Some(output) = explicit {
        return output.to_path_buf();
    }

    match scene_path {
        Some(scene) => {
            let stem = scene.file_stem().and_then(|s| s.to_str()).unwrap_or("result");
            let parent = scene.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(format!("{}.png", stem))
            } else {
                parent.join(format!("{}.png", stem))
            }
        }
        None => PathBuf::from("result.png"),
    }
}
