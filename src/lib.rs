//! Rastrum - Library for rasterizing circles and rectangles and coloring their overlaps
//!
//! This library provides functionality to:
//! - Map pixels to normalized coordinates and test shape membership
//! - Decide analytically whether two shapes intersect
//! - Reduce pixel masks to the common area of a subset of shapes
//! - Enumerate k-subsets and paint every multi-shape overlap with a blended color
//! - Load TOML scene files and render them to PNG

pub mod backtrack;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod coords;
pub mod decorate;
pub mod intersect;
pub mod mask;
pub mod output;
pub mod overlay;
pub mod renderer;
pub mod shapes;
