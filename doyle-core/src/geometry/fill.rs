//! Parallel-line hatching clipped to a cell polygon.
//!
//! The clip is sampled, not exact: each candidate line is walked at a
//! bounded number of samples and maximal runs of inside samples become
//! segments. Precision is bounded by the sample density
//! ([`MAX_SAMPLES_PER_LINE`] is the knob); endpoints land within one
//! sample step of the true polygon boundary.

use log::debug;

use crate::error::{Error, Result};
use crate::geometry::polygon;
use crate::geometry::r2::R2;

/// Upper bound on samples taken along one candidate line.
pub const MAX_SAMPLES_PER_LINE: usize = 800;

const MIN_SAMPLES_PER_LINE: usize = 64;

/// Floor for the line-count divisor; spacings below it are still used
/// verbatim for line placement.
const MIN_SPACING: f64 = 1e-6;

/// Span multiplier past the bounding-box diagonal, so rotated lines still
/// cover the whole polygon.
const OVERSHOOT: f64 = 2.0;

/// Clip a family of parallel lines to `points`, optionally inset inward
/// by `offset` first.
///
/// Lines run at `angle_deg` (degrees, 0 = horizontal) spaced `spacing`
/// apart, centered on the polygon centroid and spanning the bounding-box
/// diagonal. Returns the segments strictly inside the polygon.
pub fn clip_lines(
    points: &[R2],
    spacing: f64,
    angle_deg: f64,
    offset: f64,
) -> Result<Vec<(R2, R2)>> {
    if spacing <= 0. {
        return Err(Error::NonPositiveSpacing(spacing));
    }
    if polygon::effective_len(points) < 3 {
        return Ok(Vec::new());
    }
    let poly = polygon::apply_inset(points, offset);
    if polygon::effective_len(&poly) < 3 {
        return Ok(Vec::new());
    }

    let centroid = polygon::centroid(&poly);
    let diagonal = polygon::bbox_diagonal(&poly);
    if diagonal <= 0. {
        return Ok(Vec::new());
    }

    let radians = angle_deg.to_radians();
    let dir = R2::new(radians.cos(), radians.sin());
    let perp = R2::new(-dir.y, dir.x);

    // Clamp the divisor so a tiny spacing cannot explode the line count.
    let num_lines = (diagonal / spacing.max(MIN_SPACING)) as i64 + 3;
    let span = diagonal * OVERSHOOT;
    // Sample roughly every quarter spacing along each line, within bounds.
    let samples = ((2.0 * span / (0.25 * spacing)).ceil() as usize)
        .clamp(MIN_SAMPLES_PER_LINE, MAX_SAMPLES_PER_LINE);

    let mut segments = Vec::new();
    for idx in -num_lines..=num_lines {
        let shift = perp * (idx as f64 * spacing);
        let start = centroid - dir * span + shift;
        let end = centroid + dir * span + shift;
        collect_inside_runs(&poly, start, end, samples, &mut segments);
    }
    debug!(
        "clip_lines: {} lines x {} samples -> {} segments",
        2 * num_lines + 1,
        samples + 1,
        segments.len()
    );
    Ok(segments)
}

/// Walk `samples + 1` points from `start` to `end`, collapsing maximal
/// runs of inside samples into segments. Single-sample runs are dropped
/// (they would be zero-length).
fn collect_inside_runs(
    poly: &[R2],
    start: R2,
    end: R2,
    samples: usize,
    out: &mut Vec<(R2, R2)>,
) {
    let step = (end - start) / samples as f64;
    let mut run_start: Option<R2> = None;
    let mut last_inside = start;

    for k in 0..=samples {
        let p = start + step * k as f64;
        if polygon::contains(poly, p) {
            if run_start.is_none() {
                run_start = Some(p);
            }
            last_inside = p;
        } else if let Some(a) = run_start.take() {
            if (last_inside - a).norm() > 0. {
                out.push((a, last_inside));
            }
        }
    }
    if let Some(a) = run_start {
        if (last_inside - a).norm() > 0. {
            out.push((a, last_inside));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<R2> {
        vec![
            R2::new(0., 0.),
            R2::new(1., 0.),
            R2::new(1., 1.),
            R2::new(0., 1.),
        ]
    }

    #[test]
    fn test_horizontal_fill_in_unit_square() {
        let segments = clip_lines(&unit_square(), 0.5, 0., 0.).unwrap();
        assert!(!segments.is_empty());
        for (a, b) in &segments {
            // Horizontal lines stay at constant y.
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
            for p in [a, b] {
                assert!(p.x >= -1e-9 && p.x <= 1. + 1e-9, "x={}", p.x);
                assert!(p.y >= -1e-9 && p.y <= 1. + 1e-9, "y={}", p.y);
            }
            // Segments span most of the square's width; sampled endpoints
            // sit within one step of the true boundary.
            assert!((b.x - a.x).abs() > 0.8);
        }
    }

    #[test]
    fn test_offset_shrinks_fill() {
        let plain = clip_lines(&unit_square(), 0.25, 0., 0.).unwrap();
        let inset = clip_lines(&unit_square(), 0.25, 0., 0.2).unwrap();
        assert!(!inset.is_empty());
        let max_plain = plain.iter().map(|(a, b)| (*b - *a).norm()).fold(0., f64::max);
        let max_inset = inset.iter().map(|(a, b)| (*b - *a).norm()).fold(0., f64::max);
        assert!(max_inset < max_plain);
        for (a, b) in &inset {
            for p in [a, b] {
                assert!(p.x > 0.19 && p.x < 0.81);
                assert!(p.y > 0.19 && p.y < 0.81);
            }
        }
    }

    #[test]
    fn test_angled_fill_stays_inside() {
        let segments = clip_lines(&unit_square(), 0.3, 37., 0.).unwrap();
        assert!(!segments.is_empty());
        for (a, b) in &segments {
            for p in [a, b] {
                assert!(polygon::contains(&unit_square(), *p) || p.norm() <= 2f64.sqrt());
                assert!(p.x >= -1e-9 && p.x <= 1. + 1e-9);
                assert!(p.y >= -1e-9 && p.y <= 1. + 1e-9);
            }
        }
    }

    #[test]
    fn test_tiny_spacing_keeps_line_count_bounded() {
        let micro_square = vec![
            R2::new(0., 0.),
            R2::new(1e-5, 0.),
            R2::new(1e-5, 1e-5),
            R2::new(0., 1e-5),
        ];
        let segments = clip_lines(&micro_square, 1e-12, 0., 0.).unwrap();
        // diag / max(spacing, 1e-6) + 3 lines per side of the centroid.
        let diagonal = polygon::bbox_diagonal(&micro_square);
        let max_lines = 2 * ((diagonal / 1e-6) as usize + 3) + 1;
        assert!(!segments.is_empty());
        assert!(
            segments.len() <= max_lines,
            "{} segments from {} candidate lines",
            segments.len(),
            max_lines
        );
    }

    #[test]
    fn test_non_positive_spacing_rejected() {
        assert!(matches!(
            clip_lines(&unit_square(), 0., 0., 0.),
            Err(Error::NonPositiveSpacing(_))
        ));
    }

    #[test]
    fn test_degenerate_polygon_yields_nothing() {
        let segments = clip_lines(&[R2::new(0., 0.), R2::new(1., 1.)], 0.5, 0., 0.).unwrap();
        assert!(segments.is_empty());
    }
}
