//! Arcs: boundary segments of a circle between two intersection points.

use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::geometry::circle::Circle;
use crate::geometry::r2::R2;

/// Samples per arc when tessellating an outline.
pub const DEFAULT_ARC_STEPS: usize = 16;

/// A circular arc owned (by index) by a circle in the spiral's arena.
///
/// Start and end are the exact intersection points, never re-derived
/// from angles; only interior samples are synthesized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub circle: usize,
    pub start: Complex64,
    pub end: Complex64,
    pub visible: bool,
    /// Tessellation resolution for [`Arc::sample`].
    pub steps: usize,
}

impl Arc {
    pub fn new(circle: usize, start: Complex64, end: Complex64) -> Self {
        Arc {
            circle,
            start,
            end,
            visible: true,
            steps: DEFAULT_ARC_STEPS,
        }
    }

    /// Counter-clockwise sweep from start to end, in `[0, 2π)`.
    pub fn sweep(&self, circles: &[Circle]) -> f64 {
        let c = circles[self.circle].c;
        ((self.end - c).arg() - (self.start - c).arg()).rem_euclid(TAU)
    }

    /// Tessellate the arc into `steps + 1` points, sweeping
    /// counter-clockwise. The first and last points are the exact
    /// endpoints.
    pub fn sample(&self, circles: &[Circle]) -> Vec<R2> {
        let circle = &circles[self.circle];
        let c = circle.c;
        let theta0 = (self.start - c).arg();
        let sweep = self.sweep(circles);

        let mut points = Vec::with_capacity(self.steps + 1);
        points.push(R2::from(self.start));
        for k in 1..self.steps {
            let theta = theta0 + sweep * k as f64 / self.steps as f64;
            points.push(R2::from(c + Complex64::from_polar(circle.r, theta)));
        }
        points.push(R2::from(self.end));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn unit_circle() -> Vec<Circle> {
        vec![Circle::new(0, Complex64::new(0., 0.), 1., true)]
    }

    #[test]
    fn test_sample_endpoints_exact() {
        let circles = unit_circle();
        let start = Complex64::new(1., 0.);
        let end = Complex64::new(0., 1.);
        let arc = Arc::new(0, start, end);
        let pts = arc.sample(&circles);
        assert_eq!(pts.len(), DEFAULT_ARC_STEPS + 1);
        assert_eq!(pts[0], R2::from(start));
        assert_eq!(pts[pts.len() - 1], R2::from(end));
        for p in &pts {
            assert_relative_eq!(p.norm(), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sweep_is_ccw() {
        let circles = unit_circle();
        let quarter = Arc::new(0, Complex64::new(1., 0.), Complex64::new(0., 1.));
        assert_relative_eq!(quarter.sweep(&circles), PI / 2., epsilon = 1e-12);
        // Reversed endpoints sweep the long way around.
        let rev = Arc::new(0, Complex64::new(0., 1.), Complex64::new(1., 0.));
        assert_relative_eq!(rev.sweep(&circles), 3. * PI / 2., epsilon = 1e-12);
    }
}
