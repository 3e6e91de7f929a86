//! Circle-circle intersections for the whole packing.

use itertools::Itertools;
use log::debug;
use num_complex::Complex64;

use crate::geometry::circle::{Circle, Intersection};

/// Relative tolerance for tangency detection, scaled by the sum of the
/// two radii. Packed circles touch rather than cross, so this decides
/// whether a near-tangent pair contributes one point or two.
pub const TANGENCY_TOL: f64 = 1e-4;

/// Intersection points of two circles (standard two-circle formula).
///
/// Returns no points for disjoint, contained, or (near-)concentric
/// pairs; one point within `tol` of tangency; two otherwise.
pub fn circle_circle(
    c1: Complex64,
    r1: f64,
    c2: Complex64,
    r2: f64,
    tol: f64,
) -> Vec<Complex64> {
    let delta = c2 - c1;
    let d = delta.norm();
    let sum_r = r1 + r2;
    let diff_r = (r1 - r2).abs();

    if d > sum_r + tol || d < diff_r - tol || d < tol {
        return Vec::new();
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2. * d);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -tol {
        return Vec::new();
    }
    let h = h_sq.max(0.).sqrt();

    let dir = delta / d;
    let mid = c1 + dir * a;
    let perp = dir * Complex64::new(0., 1.);

    let mut points = vec![mid + perp * h];
    if h > tol {
        points.push(mid - perp * h);
    }
    points
}

/// Populate every circle's intersection list in one batch pass over all
/// pairs, then sort each list by angle relative to `reference` so arc
/// index `i → i+1` means the same adjacency on every circle.
pub fn compute_all_intersections(circles: &mut [Circle], reference: Complex64) {
    for c in circles.iter_mut() {
        c.intersections.clear();
    }
    // Snapshot geometry so pair results can be pushed to both circles.
    let geo: Vec<(Complex64, f64)> = circles.iter().map(|c| (c.c, c.r)).collect();

    let mut total = 0usize;
    for (i, j) in (0..circles.len()).tuple_combinations() {
        let (c1, r1) = geo[i];
        let (c2, r2) = geo[j];
        let tol = TANGENCY_TOL * (r1 + r2);
        for p in circle_circle(c1, r1, c2, r2, tol) {
            circles[i].intersections.push(Intersection { p, other: j });
            circles[j].intersections.push(Intersection { p, other: i });
            total += 1;
        }
    }
    for c in circles.iter_mut() {
        c.sort_intersections(reference);
    }
    debug!(
        "intersection pass: {} circles, {} intersection points",
        circles.len(),
        total
    );
}
