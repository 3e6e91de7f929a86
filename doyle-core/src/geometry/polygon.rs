//! Polygon helpers for closed cell outlines.
//!
//! Outlines arrive as flat point sequences (possibly with a duplicated
//! closing point), so everything here operates on `&[R2]` rather than a
//! wrapper type.

use crate::geometry::r2::R2;

/// Number of effective vertices, ignoring a duplicated closing point.
pub fn effective_len(points: &[R2]) -> usize {
    let n = points.len();
    if n > 1 {
        let first = points[0];
        let last = points[n - 1];
        if (first.x - last.x).abs() < 1e-9 && (first.y - last.y).abs() < 1e-9 {
            return n - 1;
        }
    }
    n
}

/// Signed area via the shoelace formula; positive for counter-clockwise
/// winding.
pub fn signed_area(points: &[R2]) -> f64 {
    let n = effective_len(points);
    if n < 3 {
        return 0.;
    }
    let mut sum = 0.;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Absolute polygon area, regardless of winding order.
pub fn area(points: &[R2]) -> f64 {
    signed_area(points).abs()
}

/// Vertex mean of the effective vertices.
pub fn centroid(points: &[R2]) -> R2 {
    let n = effective_len(points);
    let mut sum = R2::new(0., 0.);
    for p in &points[..n] {
        sum = sum + *p;
    }
    sum / n as f64
}

/// Diagonal of the axis-aligned bounding box.
pub fn bbox_diagonal(points: &[R2]) -> f64 {
    let n = effective_len(points);
    if n == 0 {
        return 0.;
    }
    let (mut min_x, mut max_x) = (points[0].x, points[0].x);
    let (mut min_y, mut max_y) = (points[0].y, points[0].y);
    for p in &points[..n] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).hypot(max_y - min_y)
}

/// Point-in-polygon test by ray casting: a horizontal ray to the right,
/// counting edge crossings. Odd crossings means inside.
pub fn contains(points: &[R2], p: R2) -> bool {
    let n = effective_len(points);
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);
        if ((yi > p.y) != (yj > p.y)) && (p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inset a polygon inward by `offset`: each edge is shifted along its
/// inward normal and adjacent shifted edges are re-intersected. Near
///-parallel corners fall back to shifting the vertex directly.
///
/// Cells produced by the spiral are close to convex, which this handles
/// exactly; a non-positive offset returns the input unchanged.
pub fn apply_inset(points: &[R2], offset: f64) -> Vec<R2> {
    let n = effective_len(points);
    if offset <= 0. || n < 3 {
        return points[..n].to_vec();
    }
    // Inward is left of each edge for CCW winding, right for CW.
    let sign = if signed_area(points) >= 0. { 1. } else { -1. };

    // Shifted edge lines as (anchor, direction).
    let edges: Vec<(R2, R2)> = (0..n)
        .map(|i| {
            let v0 = points[i];
            let v1 = points[(i + 1) % n];
            let d = v1 - v0;
            let len = d.norm().max(1e-12);
            let dir = d / len;
            let normal = R2::new(-dir.y, dir.x) * sign;
            (v0 + normal * offset, dir)
        })
        .collect();

    (0..n)
        .map(|i| {
            let (a0, d0) = edges[(i + n - 1) % n];
            let (a1, d1) = edges[i];
            let denom = d0.cross(&d1);
            if denom.abs() < 1e-12 {
                // Collinear edges: the shifted anchor already is the corner.
                a1
            } else {
                let t = (a1 - a0).cross(&d1) / denom;
                a0 + d0 * t
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<R2> {
        vec![
            R2::new(0., 0.),
            R2::new(1., 0.),
            R2::new(1., 1.),
            R2::new(0., 1.),
        ]
    }

    #[test]
    fn test_square_area() {
        assert_relative_eq!(area(&square()), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_closing_point_ignored() {
        let mut pts = square();
        pts.push(R2::new(0., 0.));
        assert_eq!(effective_len(&pts), 4);
        assert_relative_eq!(area(&pts), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_contains() {
        let s = square();
        assert!(contains(&s, R2::new(0.5, 0.5)));
        assert!(!contains(&s, R2::new(1.5, 0.5)));
        assert!(!contains(&s, R2::new(-0.1, 0.5)));
    }

    #[test]
    fn test_centroid_and_diagonal() {
        let s = square();
        let c = centroid(&s);
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-10);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-10);
        assert_relative_eq!(bbox_diagonal(&s), 2f64.sqrt(), epsilon = 1e-10);
    }

    #[test]
    fn test_inset_square() {
        let inner = apply_inset(&square(), 0.1);
        assert_eq!(inner.len(), 4);
        assert_relative_eq!(area(&inner), 0.64, epsilon = 1e-9);
        for p in &inner {
            assert!(p.x > 0.09 && p.x < 0.91);
            assert!(p.y > 0.09 && p.y < 0.91);
        }
    }

    #[test]
    fn test_inset_clockwise_square() {
        let mut cw = square();
        cw.reverse();
        let inner = apply_inset(&cw, 0.1);
        assert_relative_eq!(area(&inner), 0.64, epsilon = 1e-9);
    }
}
