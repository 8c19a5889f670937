//! Post-processing passes applied to a finished canvas

use std::collections::HashSet;

use image::Rgba;

use crate::canvas::{Canvas, RasterCanvas};

/// A post-processing pass run through [`RasterCanvas::visit`].
pub trait CanvasVisitor {
    fn visit(&self, canvas: &mut RasterCanvas);
}

/// Horizontal and vertical lines every `spacing` pixels, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLines {
    pub spacing: u32,
    pub color: Rgba<u8>,
}

impl CanvasVisitor for GridLines {
    fn visit(&self, canvas: &mut RasterCanvas) {
        if self.spacing == 0 {
            return;
        }
        let (width, height) = canvas.size();
        for y in 0..height {
            for x in 0..width {
                if x % self.spacing == 0 || y % self.spacing == 0 {
                    canvas.set_pixel(x, y, self.color);
                }
            }
        }
    }
}

/// Pixels on the anti-diagonals `x + y = n * spacing`.
///
/// Returns an empty set for a zero spacing.
pub fn diagonal_pixel_set(width: u32, height: u32, spacing: u32) -> HashSet<(u32, u32)> {
    let mut pixels = HashSet::new();
    if spacing == 0 {
        return pixels;
    }
    for x in 0..width {
        for y in 0..height {
            if (x as u64 + y as u64) % spacing as u64 == 0 {
                pixels.insert((x, y));
            }
        }
    }
    pixels
}
