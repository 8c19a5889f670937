//! Mapping between pixel space and normalized shape space.
//!
//! Shape space is centered on the canvas center with the y axis pointing up.
//! One unit equals half of the shorter canvas dimension, so the square
//! `[-1, 1] x [-1, 1]` is inscribed in the canvas.

/// Convert a pixel coordinate to a normalized shape-space coordinate.
///
/// With `S = min(width, height)`:
/// `x = (px - W/2) / (S/2)` and `y = (H/2 - py) / (S/2)`.
///
/// # Examples
///
/// ```
/// use rastrum::coords::pixel_to_normalized;
///
/// assert_eq!(pixel_to_normalized((100, 100), 50, 50), (0.0, 0.0));
/// assert_eq!(pixel_to_normalized((100, 100), 0, 0), (-1.0, 1.0));
/// ```
#[inline]
pub fn pixel_to_normalized(size: (u32, u32), px: u32, py: u32) -> (f32, f32) {
    let (width, height) = size;
    let half_square = width.min(height) as f32 / 2.0;
    let x = (px as f32 - width as f32 / 2.0) / half_square;
    let y = (height as f32 / 2.0 - py as f32) / half_square;
    (x, y)
}

/// Inverse of [`pixel_to_normalized`], returning fractional pixel coordinates.
///
/// The result is not clamped to the canvas; callers decide how to round it.
#[inline]
pub fn normalized_to_pixel(size: (u32, u32), x: f32, y: f32) -> (f32, f32) {
    let (width, height) = size;
    let half_square = width.min(height) as f32 / 2.0;
    let px = width as f32 / 2.0 + x * half_square;
    let py = height as f32 / 2.0 - y * half_square;
    (px, py)
}
