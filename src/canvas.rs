//! Raster canvas abstraction and its `image`-backed implementation

use std::collections::HashSet;
use std::path::Path;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::color::TRANSPARENT;
use crate::decorate::CanvasVisitor;
use crate::mask::PixelMask;
use crate::output::{save_png, OutputError};

/// Largest image, in pixels, a canvas or a scaled output may hold (1 GiB of RGBA8)
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

/// Does a `width x height` RGBA8 buffer stay within [`MAX_IMAGE_PIXELS`]?
pub fn fits_image_limit(width: u64, height: u64) -> bool {
    width.checked_mul(height).is_some_and(|pixels| pixels <= MAX_IMAGE_PIXELS)
}

/// Error type for canvas creation and persistence
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Width or height is zero
    #[error("canvas must have a non-zero size, got {0}x{1}")]
    EmptyCanvas(u32, u32),
    /// The pixel buffer would exceed [`MAX_IMAGE_PIXELS`]
    #[error("canvas {0}x{1} exceeds the limit of {max} pixels", max = MAX_IMAGE_PIXELS)]
    TooLarge(u32, u32),
    /// Decoding an existing image failed
    #[error("failed to load '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },
    /// Writing the image failed
    #[error("failed to save canvas: {0}")]
    Save(#[from] OutputError),
}

/// The pixel sink shapes and overlays are painted onto.
///
/// Coordinates outside the canvas are ignored by writes and read back as
/// [`TRANSPARENT`].
pub trait Canvas {
    /// `(width, height)`, fixed for the canvas lifetime.
    fn size(&self) -> (u32, u32);

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>);

    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8>;

    /// Paint every selected mask entry.
    ///
    /// Entry `i` addresses pixel `(i % width, i / width)`; entries beyond the
    /// canvas area are ignored.
    fn set_pixel_mask(&mut self, mask: &PixelMask, color: Rgba<u8>) {
        let (width, height) = self.size();
        let limit = mask.len().min(width as usize * height as usize);
        for (i, &selected) in mask.bits()[..limit].iter().enumerate() {
            if selected {
                self.set_pixel((i % width as usize) as u32, (i / width as usize) as u32, color);
            }
        }
    }

    /// Paint an arbitrary set of pixel coordinates.
    fn set_pixel_set(&mut self, pixels: &HashSet<(u32, u32)>, color: Rgba<u8>) {
        for &(x, y) in pixels {
            self.set_pixel(x, y, color);
        }
    }
}

/// A canvas stored as an RGBA8 image buffer.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Result<Self, CanvasError> {
        check_size(width, height)?;
        Ok(Self { image: RgbaImage::from_pixel(width, height, background) })
    }

    /// Wrap an existing image buffer.
    pub fn from_image(image: RgbaImage) -> Result<Self, CanvasError> {
        check_size(image.width(), image.height())?;
        Ok(Self { image })
    }

    /// Load any image format the `image` crate can decode, converted to RGBA8.
    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let image = image::open(path).map_err(|source| CanvasError::Load {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_image(image.to_rgba8())
    }

    /// Write the canvas as PNG, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), CanvasError> {
        save_png(&self.image, path)?;
        Ok(())
    }

    /// Run a post-processing visitor over the canvas.
    pub fn visit(&mut self, visitor: &dyn CanvasVisitor) {
        visitor.visit(self);
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn check_size(width: u32, height: u32) -> Result<(), CanvasError> {
    if width == 0 || height == 0 {
        return Err(CanvasError::EmptyCanvas(width, height));
    }
    if !fits_image_limit(width as u64, height as u64) {
        return Err(CanvasError::TooLarge(width, height));
    }
    Ok(())
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        if x < self.image.width() && y < self.image.height() {
            *self.image.get_pixel(x, y)
        } else {
            TRANSPARENT
        }
    }
}
