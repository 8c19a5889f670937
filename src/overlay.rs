//! Inclusion-exclusion overlay rendering.
//!
//! For every subset size `k` in the configured range, each `k`-subset of the
//! scene's shapes is reduced to the pixels common to all of its members.
//! Non-empty regions are painted with the alpha-weighted blend of the
//! members' colors. Larger subsets are painted after smaller ones, so each
//! region ends up with the color of the largest set of shapes covering it.
//!
//! Work grows as `sum(C(n, k) * pixels * k)`, exponential in the shape
//! count. This is the accepted cost of exhaustive visualization; the driver
//! only warns about it.

use log::{debug, info, warn};
use serde::Serialize;

use crate::backtrack::{for_each_subset, subset_count};
use crate::canvas::Canvas;
use crate::color::{blend_selection, gamma_correct};
use crate::mask::PixelMask;
use crate::shapes::Shape;

/// Subset visits above which an overlay pass logs a cost warning
pub const LARGE_OVERLAY_SUBSETS: u128 = 1 << 16;

/// Parameters of one overlay pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayOptions {
    /// Smallest subset size painted
    pub min_k: usize,
    /// Largest subset size painted; `None` means the shape count
    pub max_k: Option<usize>,
    /// Gamma-correct the blended color before painting
    pub gamma: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self { min_k: 2, max_k: None, gamma: false }
    }
}

impl OverlayOptions {
    /// Inclusive range of subset sizes for `shape_count` shapes.
    ///
    /// Empty (`start > end`) when nothing is to be painted.
    pub fn k_range(&self, shape_count: usize) -> std::ops::RangeInclusive<usize> {
        let max_k = self.max_k.map_or(shape_count, |k| k.min(shape_count));
        self.min_k.max(1)..=max_k
    }

    /// Total subsets a pass over `shape_count` shapes will visit.
    pub fn planned_subsets(&self, shape_count: usize) -> u128 {
        self.k_range(shape_count)
            .map(|k| subset_count(shape_count, k))
            .fold(0u128, |acc, c| acc.saturating_add(c))
    }
}

/// Statistics of one overlay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayReport {
    /// Subsets enumerated
    pub subsets_visited: usize,
    /// Subsets whose common region was non-empty
    pub regions_painted: usize,
    /// Sum of painted region sizes (pixels repainted by later subsets count again)
    pub pixels_painted: usize,
}

/// Paint the overlap regions of `shapes` onto `canvas`.
///
/// Shapes are expected to have been drawn already; see
/// [`Scene::render_shapes`]. The scratch mask is allocated once and refilled
/// for every subset.
pub fn render_overlay<C: Canvas + ?Sized>(
    canvas: &mut C,
    shapes: &[Shape],
    options: &OverlayOptions,
) -> OverlayReport {
    let mut report = OverlayReport::default();
    if shapes.is_empty() {
        return report;
    }

    let planned = options.planned_subsets(shapes.len());
    if planned > LARGE_OVERLAY_SUBSETS {
        warn!(
            "overlay of {} shapes visits {} subsets; this may take a long time",
            shapes.len(),
            planned
        );
    }

    let (width, height) = canvas.size();
    let mut scratch = PixelMask::new(width, height, true);

    for k in options.k_range(shapes.len()) {
        let mut regions = 0;
        let visited = for_each_subset(shapes.len(), k, |selection| {
            scratch.fill(true);
            let pixels = scratch.restrict_to_subset_count(shapes, Some(selection));
            if pixels == 0 {
                return;
            }

            let mut color = blend_selection(shapes, selection);
            if options.gamma {
                color = gamma_correct(color);
            }
            debug!(
                "k={} subset {:?}: {} pixels, color {:?}",
                k,
                members(selection),
                pixels,
                color.0
            );

            canvas.set_pixel_mask(&scratch, color);
            regions += 1;
            report.pixels_painted += pixels;
        });

        info!("k={}: {} subsets, {} non-empty regions", k, visited, regions);
        report.subsets_visited += visited;
        report.regions_painted += regions;
    }

    report
}

fn members(selection: &[bool]) -> Vec<usize> {
    selection.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| i).collect()
}

/// A canvas together with the shapes placed on it.
///
/// The scene owns both; shapes never hold a reference to the canvas.
#[derive(Debug, Clone)]
pub struct Scene<C: Canvas> {
    canvas: C,
    shapes: Vec<Shape>,
}

impl<C: Canvas> Scene<C> {
    pub fn new(canvas: C) -> Self {
        Self { canvas, shapes: Vec::new() }
    }

    /// Add a shape and return its index.
    pub fn add(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    /// Draw every shape that has not been drawn yet, in insertion order.
    ///
    /// Returns how many shapes were drawn by this call.
    pub fn render_shapes(&mut self) -> usize {
        let mut drawn = 0;
        for shape in &mut self.shapes {
            if shape.ensure_rendered(&mut self.canvas) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Draw any pending shapes, then run the overlay pass.
    pub fn render_overlay(&mut self, options: &OverlayOptions) -> OverlayReport {
        self.render_shapes();
        render_overlay(&mut self.canvas, &self.shapes, options)
    }

    /// Draw any pending shapes and release the canvas.
    pub fn into_canvas(mut self) -> C {
        self.render_shapes();
        self.canvas
    }
}
