//! Analytic shape primitives in normalized coordinates.
//!
//! A [`Shape`] pairs a [`Geometry`] with a fill color and a rendered flag.
//! Membership is tested analytically, and drawing rasterizes exactly the
//! pixels whose mapped coordinate passes that test, so hit-testing through
//! [`crate::mask::PixelMask`] and drawing always agree.

use std::fmt;

use image::Rgba;
use serde::Serialize;

use crate::canvas::Canvas;
use crate::coords::{normalized_to_pixel, pixel_to_normalized};
use crate::intersect;

/// Discriminant of the closed set of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "Circle"),
            ShapeKind::Rectangle => write!(f, "Rectangle"),
        }
    }
}

/// A circle with a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    xc: f32,
    yc: f32,
    r: f32,
}

impl Circle {
    /// Create a circle; a negative radius is replaced by its absolute value.
    pub fn new(xc: f32, yc: f32, r: f32) -> Self {
        Self { xc, yc, r: r.abs() }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.xc, self.yc)
    }

    pub fn radius(&self) -> f32 {
        self.r
    }

    /// Closed disk membership.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.xc;
        let dy = y - self.yc;
        dx * dx + dy * dy <= self.r * self.r
    }
}

/// An axis-aligned rectangle in canonical form.
///
/// The anchor is always the lower-left corner and the extents are never
/// negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Rectangle {
    /// Create a rectangle anchored at `(x, y)` spanning `(w, h)`.
    ///
    /// A negative extent spans towards lower coordinates; the anchor is
    /// shifted so the stored rectangle is canonical.
    ///
    /// ```
    /// use rastrum::shapes::Rectangle;
    ///
    /// let flipped = Rectangle::new(0.5, 0.5, -0.25, -0.5);
    /// assert_eq!(flipped, Rectangle::new(0.25, 0.0, 0.25, 0.5));
    /// ```
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x: if w >= 0.0 { x } else { x + w },
            y: if h >= 0.0 { y } else { y + h },
            w: w.abs(),
            h: h.abs(),
        }
    }

    /// Lower-left corner
    pub fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn half_extents(&self) -> (f32, f32) {
        (self.w / 2.0, self.h / 2.0)
    }

    /// Membership with both edges inclusive on each axis.
    ///
    /// A point on the edge shared by two adjacent rectangles belongs to both
    /// of them, so shared edges show up in their overlap region.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.x <= x && x <= self.x + self.w) && (self.y <= y && y <= self.y + self.h)
    }
}

/// The geometric part of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
        }
    }

    /// Exact membership of a normalized point.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        match self {
            Geometry::Circle(c) => c.contains(x, y),
            Geometry::Rectangle(r) => r.contains(x, y),
        }
    }

    /// Normalized bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            Geometry::Circle(c) => {
                let (xc, yc) = c.center();
                let r = c.radius();
                (xc - r, yc - r, xc + r, yc + r)
            }
            Geometry::Rectangle(r) => {
                let (x, y) = r.origin();
                let (w, h) = r.size();
                (x, y, x + w, y + h)
            }
        }
    }

    /// Area in squared normalized units.
    pub fn area(&self) -> f32 {
        match self {
            Geometry::Circle(c) => std::f32::consts::PI * c.radius() * c.radius(),
            Geometry::Rectangle(r) => {
                let (w, h) = r.size();
                w * h
            }
        }
    }
}

/// Inclusive pixel rectangle clipped to a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// A filled shape placed on a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    geometry: Geometry,
    color: Rgba<u8>,
    rendered: bool,
}

impl Shape {
    pub fn new(geometry: Geometry, color: Rgba<u8>) -> Self {
        Self { geometry, color, rendered: false }
    }

    /// Circle centered at `(xc, yc)`; the radius sign is ignored.
    pub fn circle(xc: f32, yc: f32, r: f32, color: Rgba<u8>) -> Self {
        Self::new(Geometry::Circle(Circle::new(xc, yc, r)), color)
    }

    /// Rectangle anchored at `(x, y)`, canonicalized by [`Rectangle::new`].
    pub fn rectangle(x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) -> Self {
        Self::new(Geometry::Rectangle(Rectangle::new(x, y, w, h)), color)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Does the normalized point `(x, y)` lie inside the shape?
    #[inline]
    pub fn is_belong_point(&self, x: f32, y: f32) -> bool {
        self.geometry.contains(x, y)
    }

    /// Do the two shapes share at least one point? Symmetric in its operands.
    pub fn is_intersect(&self, other: &Shape) -> bool {
        intersect::intersects(&self.geometry, &other.geometry)
    }

    /// Pixel region covering the shape on a canvas of `size`, or `None` if
    /// the shape lies entirely outside it.
    pub fn pixel_bounds(&self, size: (u32, u32)) -> Option<PixelBounds> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return None;
        }

        let (min_x, min_y, max_x, max_y) = self.geometry.bounds();
        let (left, top) = normalized_to_pixel(size, min_x, max_y);
        let (right, bottom) = normalized_to_pixel(size, max_x, min_y);

        let left = left.floor() as i64;
        let top = top.floor() as i64;
        let right = right.ceil() as i64;
        let bottom = bottom.ceil() as i64;

        let max_px = width as i64 - 1;
        let max_py = height as i64 - 1;
        if right < 0 || bottom < 0 || left > max_px || top > max_py {
            return None;
        }

        Some(PixelBounds {
            left: left.max(0) as u32,
            top: top.max(0) as u32,
            right: right.min(max_px) as u32,
            bottom: bottom.min(max_py) as u32,
        })
    }

    /// Rasterize the shape onto `canvas` and mark it rendered.
    ///
    /// Every pixel of the bounding region whose normalized coordinate passes
    /// [`Shape::is_belong_point`] is set to the shape color. Calling this
    /// twice draws twice; use [`Shape::ensure_rendered`] for the
    /// draw-at-most-once behavior. Returns the number of pixels set.
    pub fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> usize {
        self.rendered = true;
        let size = canvas.size();
        let Some(bounds) = self.pixel_bounds(size) else {
            return 0;
        };

        let mut painted = 0;
        for py in bounds.top..=bounds.bottom {
            for px in bounds.left..=bounds.right {
                let (x, y) = pixel_to_normalized(size, px, py);
                if self.geometry.contains(x, y) {
                    canvas.set_pixel(px, py, self.color);
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Draw the shape unless it has already been rendered.
    ///
    /// Returns `true` if this call drew it.
    pub fn ensure_rendered<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        if self.rendered {
            return false;
        }
        self.draw(canvas);
        true
    }
}
