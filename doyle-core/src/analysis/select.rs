//! Per-circle arc selection heuristics.
//!
//! A circle with `n` sorted intersections has `n` candidate arcs between
//! consecutive points. Each mode decides which arcs to keep and which to
//! leave as gaps, ranked against the line (or direction) from the circle
//! center to the spiral center.

use std::collections::BTreeSet;
use std::f64::consts::{PI, TAU};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use num_complex::Complex64;
use ordered_float::OrderedFloat;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::geometry::circle::Circle;

/// Degenerate threshold for the center-line vector: below this the
/// circle center coincides with the spiral center and rankings fall back
/// to raw distance / absolute angle.
const CENTER_EPS: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcMode {
    /// Drop the `num_gaps` arcs closest to the center line.
    Closest,
    /// Drop the `num_gaps` arcs farthest from the center line.
    Farthest,
    /// Drop every arc at a multiple of `n / (num_gaps + 1)`.
    Alternating,
    /// Keep every arc; `num_gaps` is ignored.
    All,
    /// Drop `num_gaps` uniformly chosen arcs (caller supplies the rng).
    Random,
    /// Drop gaps in pairs placed symmetrically about the center axis.
    Symmetric,
    /// Drop the `num_gaps` arcs angularly nearest the center direction.
    Angular,
}

impl ArcMode {
    pub const ALL: [ArcMode; 7] = [
        ArcMode::Closest,
        ArcMode::Farthest,
        ArcMode::Alternating,
        ArcMode::All,
        ArcMode::Random,
        ArcMode::Symmetric,
        ArcMode::Angular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArcMode::Closest => "closest",
            ArcMode::Farthest => "farthest",
            ArcMode::Alternating => "alternating",
            ArcMode::All => "all",
            ArcMode::Random => "random",
            ArcMode::Symmetric => "symmetric",
            ArcMode::Angular => "angular",
        }
    }
}

impl Display for ArcMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameter-validation boundary: unrecognized mode strings are
/// rejected here, before any generation starts.
impl FromStr for ArcMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArcMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::InvalidMode(s.to_string()))
    }
}

/// Absolute angular distance between two directions, in `[0, π]`.
fn angular_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI {
        TAU - d
    } else {
        d
    }
}

/// Perpendicular distance of `p` to the line through `c` along `line_vec`.
fn line_distance(p: Complex64, c: Complex64, line_vec: Complex64) -> f64 {
    (line_vec.conj() * (p - c)).im.abs() / line_vec.norm()
}

/// Stable index order by ascending key.
fn argsort(keys: &[f64]) -> Vec<usize> {
    let mut idxs: Vec<usize> = (0..keys.len()).collect();
    idxs.sort_by_key(|&i| OrderedFloat(keys[i]));
    idxs
}

/// Choose which arcs of `circle` to draw.
///
/// Returns `(start_idx, end_idx)` pairs into the circle's sorted
/// intersection list; empty when the circle has fewer than 2
/// intersections. Non-random modes are deterministic; `Random` draws
/// from the caller-supplied `rng`.
pub fn select_arcs<R: Rng>(
    circle: &Circle,
    spiral_center: Complex64,
    num_gaps: usize,
    mode: ArcMode,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let pts = circle.points();
    let n = pts.len();
    if n < 2 {
        return Vec::new();
    }
    let c = circle.c;
    let s = spiral_center;

    let arcs: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
    let midpoints: Vec<Complex64> = arcs.iter().map(|&(i, j)| (pts[i] + pts[j]) / 2.).collect();
    let line_vec = s - c;

    match mode {
        ArcMode::Closest | ArcMode::Farthest => {
            // Distance of each arc midpoint to the center line; raw
            // distance to the spiral center when the circle sits on it.
            let distances: Vec<f64> = if line_vec.norm() < CENTER_EPS {
                midpoints.iter().map(|m| (m - s).norm()).collect()
            } else {
                midpoints
                    .iter()
                    .map(|m| line_distance(*m, c, line_vec))
                    .collect()
            };
            let mut order = argsort(&distances);
            if mode == ArcMode::Farthest {
                order.reverse();
            }
            order
                .into_iter()
                .skip(num_gaps)
                .map(|i| arcs[i])
                .collect()
        }
        ArcMode::Alternating => {
            if num_gaps >= n {
                return Vec::new();
            }
            let interval = (n / (num_gaps + 1)).max(1);
            (0..n)
                .filter(|i| i % interval != 0)
                .map(|i| arcs[i])
                .collect()
        }
        ArcMode::All => arcs,
        ArcMode::Random => {
            let skip: BTreeSet<usize> = index::sample(rng, n, num_gaps.min(n))
                .into_iter()
                .collect();
            (0..n)
                .filter(|i| !skip.contains(i))
                .map(|i| arcs[i])
                .collect()
        }
        ArcMode::Symmetric => {
            let target = if line_vec.norm() < CENTER_EPS {
                0.
            } else {
                line_vec.arg()
            };
            let diffs: Vec<f64> = midpoints
                .iter()
                .map(|m| angular_diff((m - c).arg(), target))
                .collect();
            let order = argsort(&diffs);

            let mut skip = BTreeSet::new();
            for &idx in order.iter().take(num_gaps / 2) {
                skip.insert(idx);
                // Pair each chosen gap with the arc starting at the
                // intersection nearest 180° opposite its midpoint.
                let opposite = (midpoints[idx] - c).arg() + PI;
                let paired = (0..n)
                    .min_by_key(|&i| OrderedFloat(angular_diff((pts[i] - c).arg(), opposite)))
                    .unwrap();
                skip.insert(paired);
            }
            // Odd gap counts additionally drop the arc crossing the line.
            if num_gaps % 2 != 0 && line_vec.norm() > CENTER_EPS {
                let crossing = (0..n)
                    .min_by_key(|&i| OrderedFloat(line_distance(pts[i], c, line_vec)))
                    .unwrap();
                skip.insert(crossing);
            }
            (0..n)
                .filter(|i| !skip.contains(i))
                .map(|i| arcs[i])
                .collect()
        }
        ArcMode::Angular => {
            let target = if line_vec.norm() < CENTER_EPS {
                0.
            } else {
                line_vec.arg()
            };
            let diffs: Vec<f64> = midpoints
                .iter()
                .map(|m| angular_diff((m - c).arg(), target))
                .collect();
            argsort(&diffs)
                .into_iter()
                .skip(num_gaps)
                .map(|i| arcs[i])
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::circle::Intersection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A circle at (3, 0) with 6 evenly spaced intersection points,
    /// sorted the way the batch pass sorts them (relative to the origin).
    fn hex_circle() -> Circle {
        let mut c = Circle::new(0, Complex64::new(3., 0.), 1., true);
        for k in 0..6 {
            let theta = TAU * k as f64 / 6. + 0.1;
            c.intersections.push(Intersection {
                p: c.c + Complex64::from_polar(1., theta),
                other: k + 1,
            });
        }
        c.sort_intersections(Complex64::new(0., 0.));
        c
    }

    fn origin() -> Complex64 {
        Complex64::new(0., 0.)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_too_few_intersections() {
        let mut c = Circle::new(0, Complex64::new(3., 0.), 1., true);
        c.intersections.push(Intersection {
            p: Complex64::new(2., 0.),
            other: 1,
        });
        assert!(select_arcs(&c, origin(), 0, ArcMode::All, &mut rng()).is_empty());
    }

    #[test]
    fn test_all_keeps_every_arc() {
        let c = hex_circle();
        let arcs = select_arcs(&c, origin(), 4, ArcMode::All, &mut rng());
        assert_eq!(arcs.len(), 6);
        assert_eq!(arcs[0], (0, 1));
        assert_eq!(arcs[5], (5, 0));
    }

    #[test]
    fn test_closest_drops_num_gaps() {
        let c = hex_circle();
        let arcs = select_arcs(&c, origin(), 2, ArcMode::Closest, &mut rng());
        assert_eq!(arcs.len(), 4);
    }

    #[test]
    fn test_closest_farthest_are_reversed_rankings() {
        let c = hex_circle();
        let closest = select_arcs(&c, origin(), 0, ArcMode::Closest, &mut rng());
        let mut farthest = select_arcs(&c, origin(), 0, ArcMode::Farthest, &mut rng());
        farthest.reverse();
        assert_eq!(closest, farthest);
    }

    #[test]
    fn test_closest_drops_arcs_nearest_center_line() {
        let c = hex_circle();
        let kept = select_arcs(&c, origin(), 2, ArcMode::Closest, &mut rng());
        let dropped: Vec<(usize, usize)> = (0..6)
            .map(|i| (i, (i + 1) % 6))
            .filter(|a| !kept.contains(a))
            .collect();
        assert_eq!(dropped.len(), 2);
        let pts = c.points();
        let line_vec = origin() - c.c;
        let dist = |&(i, j): &(usize, usize)| {
            line_distance((pts[i] + pts[j]) / 2., c.c, line_vec)
        };
        let max_dropped = dropped.iter().map(dist).fold(0., f64::max);
        let min_kept = kept.iter().map(dist).fold(f64::INFINITY, f64::min);
        assert!(max_dropped <= min_kept + 1e-12);
    }

    /// Boundary documented rather than assumed: `num_gaps = 0` gives
    /// `interval = n`, and the `i % interval != 0` filter still drops
    /// index 0, yielding n-1 arcs (not all n).
    #[test]
    fn test_alternating_zero_gaps_drops_index_zero() {
        let c = hex_circle();
        let arcs = select_arcs(&c, origin(), 0, ArcMode::Alternating, &mut rng());
        assert_eq!(arcs.len(), 5);
        assert!(!arcs.contains(&(0, 1)));
    }

    #[test]
    fn test_alternating_gap_interval() {
        let c = hex_circle();
        // num_gaps=2 -> interval 2 -> drop indices 0, 2, 4.
        let arcs = select_arcs(&c, origin(), 2, ArcMode::Alternating, &mut rng());
        assert_eq!(arcs, vec![(1, 2), (3, 4), (5, 0)]);
    }

    #[test]
    fn test_alternating_saturates_to_empty() {
        let c = hex_circle();
        assert!(select_arcs(&c, origin(), 6, ArcMode::Alternating, &mut rng()).is_empty());
        assert!(select_arcs(&c, origin(), 9, ArcMode::Alternating, &mut rng()).is_empty());
    }

    #[test]
    fn test_random_is_injectable_and_reproducible() {
        let c = hex_circle();
        let a = select_arcs(&c, origin(), 2, ArcMode::Random, &mut StdRng::seed_from_u64(42));
        let b = select_arcs(&c, origin(), 2, ArcMode::Random, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        // More gaps than arcs saturates.
        let none = select_arcs(&c, origin(), 10, ArcMode::Random, &mut rng());
        assert!(none.is_empty());
    }

    #[test]
    fn test_symmetric_even_gaps_drop_in_pairs() {
        let c = hex_circle();
        let arcs = select_arcs(&c, origin(), 2, ArcMode::Symmetric, &mut rng());
        assert_eq!(arcs.len(), 4);
    }

    #[test]
    fn test_symmetric_odd_gap_drops_crossing_arc() {
        let c = hex_circle();
        let even = select_arcs(&c, origin(), 2, ArcMode::Symmetric, &mut rng());
        let odd = select_arcs(&c, origin(), 3, ArcMode::Symmetric, &mut rng());
        assert!(odd.len() <= even.len());
        assert!(odd.len() >= 3);
    }

    #[test]
    fn test_angular_drops_arcs_facing_center() {
        let c = hex_circle();
        let arcs = select_arcs(&c, origin(), 2, ArcMode::Angular, &mut rng());
        assert_eq!(arcs.len(), 4);
        // The arcs whose midpoints face the spiral center are gone.
        let pts = c.points();
        let target = (origin() - c.c).arg();
        for &(i, j) in &arcs {
            let mid = (pts[i] + pts[j]) / 2.;
            let diff = angular_diff((mid - c.c).arg(), target);
            assert!(diff > 0.3, "kept arc unexpectedly near center line: {}", diff);
        }
    }

    #[test]
    fn test_mode_round_trips_through_strings() {
        for mode in ArcMode::ALL {
            assert_eq!(mode.as_str().parse::<ArcMode>().unwrap(), mode);
        }
        assert!(matches!(
            "arram_boyle".parse::<ArcMode>(),
            Err(Error::InvalidMode(_))
        ));
    }
}
