//! Dense per-pixel selection masks and their reduction by shape membership.
//!
//! Entry `i` of a mask addresses pixel `(i % width, i / width)`. Reductions
//! only ever clear entries, so a mask can be refilled and reused across many
//! reductions without reallocating.

use crate::coords::pixel_to_normalized;
use crate::shapes::Shape;

/// A boolean selection over the pixels of a `width x height` canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl PixelMask {
    /// Create a mask with every entry set to `value`.
    pub fn new(width: u32, height: u32, value: bool) -> Self {
        Self { width, height, bits: vec![value; width as usize * height as usize] }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// No entry is selected.
    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of selected entries.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Set every entry to `value` in place.
    pub fn fill(&mut self, value: bool) {
        self.bits.fill(value);
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[self.index(x, y)]
    }

    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.bits[i] = value;
        }
    }

    /// Coordinates of the selected pixels in index order.
    pub fn iter_selected(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Keep only the selected pixels that lie inside `shape`.
    ///
    /// Returns `true` if at least one pixel remains selected.
    pub fn restrict_to_shape(&mut self, shape: &Shape) -> bool {
        self.retain(|x, y| shape.is_belong_point(x, y)) > 0
    }

    /// Keep only the selected pixels that lie inside every required shape.
    ///
    /// With `Some(selection)` of the same length as `shapes`, shape `j` is
    /// required iff `selection[j]`; with `None` (or a selection of another
    /// length) every shape is required. An empty shape list or a selection
    /// that requires no shape is "no intersection": the mask is left
    /// untouched and the result is `false`.
    ///
    /// Returns `true` if at least one pixel remains selected.
    pub fn restrict_to_subset(&mut self, shapes: &[Shape], selection: Option<&[bool]>) -> bool {
        self.restrict_to_subset_count(shapes, selection) > 0
    }

    /// [`restrict_to_subset`](Self::restrict_to_subset) returning the number
    /// of pixels left selected, or 0 for "no intersection".
    pub fn restrict_to_subset_count(
        &mut self,
        shapes: &[Shape],
        selection: Option<&[bool]>,
    ) -> usize {
        if shapes.is_empty() {
            return 0;
        }

        let selection = selection.filter(|s| s.len() == shapes.len());
        if selection.is_some_and(|s| !s.contains(&true)) {
            return 0;
        }
        let required = |j: usize| selection.map_or(true, |s| s[j]);

        self.retain(|x, y| {
            shapes.iter().enumerate().all(|(j, shape)| !required(j) || shape.is_belong_point(x, y))
        })
    }

    /// Clear every selected entry whose normalized coordinate fails `keep`.
    ///
    /// Returns the number of entries still selected.
    fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(f32, f32) -> bool,
    {
        let size = (self.width, self.height);
        let width = self.width.max(1) as usize;
        let mut left = 0;

        for (i, bit) in self.bits.iter_mut().enumerate() {
            if !*bit {
                continue;
            }
            let (x, y) = pixel_to_normalized(size, (i % width) as u32, (i / width) as u32);
            if keep(x, y) {
                left += 1;
            } else {
                *bit = false;
            }
        }

        left
    }
}
