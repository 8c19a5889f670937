//! Analytic intersection predicates between shape geometries.
//!
//! Every predicate treats boundary contact as an intersection.

use log::debug;

use crate::shapes::{Circle, Geometry, Rectangle};

/// Do two geometries share at least one point?
///
/// Dispatches on the concrete kinds of both operands to exactly one of
/// [`circle_circle`], [`circle_rectangle`] or [`rectangle_rectangle`]. The
/// result does not depend on operand order.
pub fn intersects(a: &Geometry, b: &Geometry) -> bool {
    debug!("intersect ({} x {})", a.kind(), b.kind());
    match (a, b) {
        (Geometry::Circle(c1), Geometry::Circle(c2)) => circle_circle(c1, c2),
        (Geometry::Circle(c), Geometry::Rectangle(r))
        | (Geometry::Rectangle(r), Geometry::Circle(c)) => circle_rectangle(c, r),
        (Geometry::Rectangle(r1), Geometry::Rectangle(r2)) => rectangle_rectangle(r1, r2),
    }
}

/// Squared center distance against the squared sum of radii.
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let dx = ax - bx;
    let dy = ay - by;
    let reach = a.radius() + b.radius();
    dx * dx + dy * dy <= reach * reach
}

/// Clearance test between a circle and an axis-aligned rectangle.
///
/// `drig` and `dtop` are the distances from the circle center to the
/// rectangle's nearest vertical and horizontal edge lines, folded into the
/// first quadrant. A non-positive clearance means the center lies within the
/// rectangle's extent on that axis.
pub fn circle_rectangle(circle: &Circle, rect: &Rectangle) -> bool {
    let (xc, yc) = circle.center();
    let (rx, ry) = rect.center();
    let (half_w, half_h) = rect.half_extents();
    let r = circle.radius();

    let drig = (xc - rx).abs() - half_w;
    let dtop = (yc - ry).abs() - half_h;

    match (drig > 0.0, dtop > 0.0) {
        // Nearest point is a corner
        (true, true) => drig * drig + dtop * dtop <= r * r,
        (true, false) => drig <= r,
        (false, true) => dtop <= r,
        (false, false) => true,
    }
}

/// Axis-aligned overlap test on center distance minus half extents.
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> bool {
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    let (aw, ah) = a.size();
    let (bw, bh) = b.size();

    let overlap_x = (aw + bw) / 2.0 - (ax - bx).abs();
    let overlap_y = (ah + bh) / 2.0 - (ay - by).abs();
    overlap_x >= 0.0 && overlap_y >= 0.0
}

/// Pairwise intersection table of `geometries`, row-major.
///
/// Entry `[i][j]` is `intersects(&geometries[i], &geometries[j])`; the
/// diagonal compares a geometry with itself.
pub fn intersection_matrix(geometries: &[Geometry]) -> Vec<Vec<bool>> {
    geometries.iter().map(|a| geometries.iter().map(|b| intersects(a, b)).collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f32, y: f32, r: f32) -> Geometry {
        Geometry::Circle(Circle::new(x, y, r))
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Geometry {
        Geometry::Rectangle(Rectangle::new(x, y, w, h))
    }

    fn sample_geometries() -> Vec<Geometry> {
        vec![
            circle(0.0, 0.0, 0.5),
            circle(1.0, 0.0, 0.5),
            circle(-0.9, 0.3, -0.25),
            circle(3.0, 3.0, 0.1),
            rect(0.2, 0.2, 0.4, 0.4),
            rect(-0.2, 0.2, -0.4, 0.4),
            rect(0.5, -0.5, 1.0, 1.0),
            rect(-2.0, -2.0, 0.5, 0.5),
            rect(-0.1, -1.0, 0.2, 2.0),
        ]
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let geometries = sample_geometries();
        for a in &geometries {
            for b in &geometries {
                assert_eq!(intersects(a, b), intersects(b, a), "asymmetric for {a:?} and {b:?}");
            }
        }
    }

    #[test]
    fn test_geometry_intersects_itself() {
        for g in sample_geometries() {
            let copy = g;
            assert!(intersects(&g, &copy), "{g:?} should intersect itself");
        }
    }

    #[test]
    fn test_touching_circles_intersect() {
        assert!(intersects(&circle(0.0, 0.0, 0.5), &circle(1.0, 0.0, 0.5)));
    }

    #[test]
    fn test_separate_circles() {
        assert!(!intersects(&circle(0.0, 0.0, 0.5), &circle(1.5, 0.0, 0.5)));
    }

    #[test]
    fn test_nested_circles_intersect() {
        assert!(intersects(&circle(0.0, 0.0, 1.0), &circle(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_circle_rectangle_side_contact() {
        // Circle reaches exactly to the rectangle's left edge
        assert!(intersects(&circle(0.0, 0.0, 1.0), &rect(1.0, -0.5, 1.0, 1.0)));
        assert!(!intersects(&circle(0.0, 0.0, 1.0), &rect(1.25, -0.5, 1.0, 1.0)));
    }

    #[test]
    fn test_circle_rectangle_top_contact() {
        assert!(intersects(&circle(0.0, 0.0, 0.5), &rect(-1.0, 0.5, 2.0, 1.0)));
        assert!(!intersects(&circle(0.0, 0.0, 0.5), &rect(-1.0, 0.75, 2.0, 1.0)));
    }

    #[test]
    fn test_circle_rectangle_corner_case() {
        // Corner at (1, 1): distance sqrt(2) from the origin
        assert!(!intersects(&circle(0.0, 0.0, 1.4), &rect(1.0, 1.0, 1.0, 1.0)));
        assert!(intersects(&circle(0.0, 0.0, 1.5), &rect(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_circle_inside_rectangle() {
        assert!(intersects(&circle(0.0, 0.0, 0.1), &rect(-1.0, -1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_rectangle_edge_contact() {
        assert!(intersects(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 0.0, 1.0, 1.0)));
        assert!(intersects(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.0, 1.0, 1.0, 1.0)));
        assert!(!intersects(&rect(0.0, 0.0, 1.0, 1.0), &rect(1.5, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rectangle_cross_overlap() {
        // A tall thin bar crossing a wide flat bar: no corner is inside the other
        assert!(intersects(&rect(-0.1, -1.0, 0.2, 2.0), &rect(-1.0, -0.1, 2.0, 0.2)));
    }

    #[test]
    fn test_canonicalized_rectangles_compare_equal() {
        assert!(intersects(&rect(-0.2, 0.2, -0.4, 0.4), &rect(-0.6, 0.2, 0.4, 0.4)));
        assert!(!intersects(&rect(-0.2, 0.2, -0.4, 0.4), &rect(0.0, 0.0, 0.1, 0.1)));
    }

    #[test]
    fn test_intersection_matrix() {
        let geometries = vec![circle(0.0, 0.0, 1.0), rect(0.0, 0.0, 1.0, 1.0), circle(3.0, 3.0, 0.5)];
        let matrix = intersection_matrix(&geometries);
        assert_eq!(
            matrix,
            vec![vec![true, true, false], vec![true, true, false], vec![false, false, true]]
        );
        assert!(intersection_matrix(&[]).is_empty());
    }
}
