//! Color parsing, the named color table and blend helpers
//!
//! Parsing supports the following formats:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, `transparent`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

use crate::shapes::Shape;

pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);
pub const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);
pub const CYAN: Rgba<u8> = Rgba([0, 255, 255, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Default canvas background
pub const GRAY: Rgba<u8> = Rgba([189, 195, 199, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex strings take a fast path; everything else is handed to lightningcss.
///
/// # Examples
///
/// ```
/// use rastrum::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let gray = parse_color("#BDC3C7").unwrap();
/// assert_eq!(gray, rastrum::color::GRAY);
///
/// let blue = parse_color("blue").unwrap();
/// assert_eq!(blue, image::Rgba([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // Short forms double each digit
        &[r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        &[r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        &[r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        &[r1, r2, g1, g2, b1, b2, a1, a2] => {
            Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2]))
        }
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Replace the alpha channel of a color.
pub fn with_alpha(color: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let [r, g, b, _] = color.0;
    Rgba([r, g, b, alpha])
}

/// Blend two colors weighted by their alpha channels.
///
/// Each channel, alpha included, becomes `c1 * a1/(a1+a2) + c2 * a2/(a1+a2)`
/// truncated to `u8`. Two fully transparent inputs give [`TRANSPARENT`].
///
/// The operation is not bit-exact associative, so folds must keep a fixed
/// order.
///
/// ```
/// use rastrum::color::{mix_colors, BLUE, RED};
///
/// assert_eq!(mix_colors(RED, BLUE), image::Rgba([127, 0, 127, 255]));
/// ```
pub fn mix_colors(first: Rgba<u8>, second: Rgba<u8>) -> Rgba<u8> {
    let a1 = first[3] as f32;
    let a2 = second[3] as f32;
    let total = a1 + a2;
    if total == 0.0 {
        return TRANSPARENT;
    }

    let w1 = a1 / total;
    let w2 = a2 / total;
    let mix = |c1: u8, c2: u8| (c1 as f32 * w1 + c2 as f32 * w2) as u8;

    Rgba([
        mix(first[0], second[0]),
        mix(first[1], second[1]),
        mix(first[2], second[2]),
        mix(first[3], second[3]),
    ])
}

/// Apply a 2.2 display gamma to the color channels; alpha is kept.
pub fn gamma_correct(color: Rgba<u8>) -> Rgba<u8> {
    let correct = |c: u8| ((c as f32 / 255.0).powf(1.0 / 2.2) * 255.0) as u8;
    let [r, g, b, a] = color.0;
    Rgba([correct(r), correct(g), correct(b), a])
}

/// Fold the colors of the selected shapes with [`mix_colors`].
///
/// Starts from [`TRANSPARENT`] and walks shapes in ascending index order.
/// A `selection` whose length differs from `shapes` selects every shape.
pub fn blend_selection(shapes: &[Shape], selection: &[bool]) -> Rgba<u8> {
    let use_selection = selection.len() == shapes.len();
    shapes
        .iter()
        .enumerate()
        .filter(|(i, _)| !use_selection || selection[*i])
        .fold(TRANSPARENT, |acc, (_, shape)| mix_colors(acc, shape.color()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#F00"), Ok(RED));
        assert_eq!(parse_color("#0F08"), Ok(Rgba([0, 255, 0, 136])));
        assert_eq!(parse_color("#0000FF"), Ok(BLUE));
        assert_eq!(parse_color("#FFFF0080"), Ok(Rgba([255, 255, 0, 128])));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12"), Err(ColorError::InvalidLength(2)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_parse_named_and_functional() {
        assert_eq!(parse_color("red"), Ok(RED));
        assert_eq!(parse_color("rgb(0, 255, 255)"), Ok(CYAN));
        assert_eq!(parse_color("transparent").map(|c| c[3]), Ok(0));
    }

    #[test]
    fn test_parse_garbage_is_css_error() {
        assert!(matches!(parse_color("not-a-color"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_mix_equal_alpha_is_midpoint() {
        assert_eq!(mix_colors(RED, BLUE), Rgba([127, 0, 127, 255]));
    }

    #[test]
    fn test_mix_with_transparent_returns_other() {
        assert_eq!(mix_colors(TRANSPARENT, GREEN), GREEN);
        assert_eq!(mix_colors(YELLOW, TRANSPARENT), YELLOW);
        assert_eq!(mix_colors(TRANSPARENT, TRANSPARENT), TRANSPARENT);
    }

    #[test]
    fn test_mix_weights_by_alpha() {
        // 3:1 weighting towards the first color
        let mixed = mix_colors(Rgba([200, 0, 0, 192]), Rgba([0, 200, 0, 64]));
        assert_eq!(mixed, Rgba([150, 50, 0, 160]));
    }

    #[test]
    fn test_gamma_correct_keeps_extremes_and_alpha() {
        assert_eq!(gamma_correct(BLACK), BLACK);
        assert_eq!(gamma_correct(with_alpha(WHITE, 7)), with_alpha(WHITE, 7));
        let mid = gamma_correct(Rgba([127, 127, 127, 255]));
        assert!(mid[0] > 127, "gamma lifts mid tones, got {}", mid[0]);
    }

    #[test]
    fn test_blend_selection_folds_in_index_order() {
        let shapes = vec![
            Shape::circle(0.0, 0.0, 1.0, RED),
            Shape::circle(0.0, 0.0, 1.0, GREEN),
            Shape::circle(0.0, 0.0, 1.0, BLUE),
        ];
        assert_eq!(blend_selection(&shapes, &[true, false, true]), Rgba([127, 0, 127, 255]));
        // ((red + green) / 2 + blue) / 2 with truncation at every step
        assert_eq!(blend_selection(&shapes, &[true, true, true]), Rgba([63, 63, 127, 255]));
        assert_eq!(blend_selection(&shapes, &[false, false, false]), TRANSPARENT);
    }
}
