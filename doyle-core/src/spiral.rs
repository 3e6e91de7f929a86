//! Spiral generation: the bounded circle family, its closure ring, the
//! intersection pass, and cell assembly.

use std::collections::BTreeMap;

use log::debug;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::group::{self, ArcGroup, GroupKey};
use crate::analysis::intersect;
use crate::analysis::rings::RingIndexMap;
use crate::analysis::select::ArcMode;
use crate::error::Result;
use crate::geometry::circle::Circle;
use crate::math::doyle::DoyleSolution;

/// Parameters of one spiral rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralParams {
    /// Rotational offset per step.
    pub p: i64,
    /// Number of interleaved families; must be >= 2.
    pub q: i64,
    /// Continuous deformation parameter: rescales and rotates the whole
    /// solved family.
    pub t: f64,
    /// Generation radius bound.
    pub max_d: f64,
    pub arc_mode: ArcMode,
    /// Arcs to exclude per circle.
    pub num_gaps: usize,
}

impl Default for SpiralParams {
    fn default() -> Self {
        SpiralParams {
            p: 7,
            q: 32,
            t: 0.,
            max_d: 2000.,
            arc_mode: ArcMode::Closest,
            num_gaps: 2,
        }
    }
}

/// One generated Doyle spiral.
///
/// Owns the circle arena (visible circles first, then the closure ring)
/// and the assembled arc groups; arcs and groups reference circles by
/// arena index and never outlive this instance.
#[derive(Debug, Clone)]
pub struct Spiral {
    pub params: SpiralParams,
    pub solution: DoyleSolution,
    pub circles: Vec<Circle>,
    pub groups: BTreeMap<GroupKey, ArcGroup>,
    visible_count: usize,
}

/// The shared reference point for intersection sorting and arc ranking.
pub const SPIRAL_CENTER: Complex64 = Complex64 { re: 0., im: 0. };

impl Spiral {
    /// Solve the Doyle system for the given parameters. Fails if `q < 2`
    /// or the root-find does not converge; nothing is generated yet.
    pub fn new(params: SpiralParams) -> Result<Self> {
        let solution = DoyleSolution::solve(params.p, params.q)?;
        Ok(Spiral {
            params,
            solution,
            circles: Vec::new(),
            groups: BTreeMap::new(),
            visible_count: 0,
        })
    }

    fn scale(&self) -> f64 {
        self.solution.mod_a.powf(self.params.t)
    }

    fn rotation(&self) -> Complex64 {
        Complex64::from_polar(1., self.solution.arg_a * self.params.t)
    }

    /// Generate the visible circle family, the closure ring, and all
    /// intersections. Idempotent: regenerating clears previous state.
    pub fn generate(&mut self) {
        self.circles.clear();
        self.groups.clear();
        self.generate_circles();
        self.visible_count = self.circles.len();
        self.generate_closure_ring();
        intersect::compute_all_intersections(&mut self.circles, SPIRAL_CENTER);
        debug!(
            "generated {} visible + {} closure circles",
            self.visible_count,
            self.circles.len() - self.visible_count
        );
    }

    /// Forward/backward recurrence per family: multiply by `a` outward
    /// while the scaled distance stays below `max_d`, divide by `a`
    /// inward while it stays above `min_d = 1/scale`, then advance the
    /// family start by `b`.
    fn generate_circles(&mut self) {
        let DoyleSolution { a, b, r, .. } = self.solution;
        let scale = self.scale();
        let w = self.rotation();
        let min_d = 1. / scale;

        let mut start = a;
        for _ in 0..self.params.q {
            let mut qv = start;
            while scale * qv.norm() < self.params.max_d {
                self.push_circle(scale * qv * w, r * scale * qv.norm(), true);
                qv *= a;
            }

            let mut qv = start / a;
            while scale * qv.norm() > min_d {
                self.push_circle(scale * qv * w, r * scale * qv.norm(), true);
                qv /= a;
            }

            start *= b;
        }
    }

    /// Exactly one invisible circle per family, one step beyond the last
    /// visible one, so boundary circles still get 6-way intersection
    /// topology.
    fn generate_closure_ring(&mut self) {
        let DoyleSolution { a, b, r, .. } = self.solution;
        let scale = self.scale();
        let w = self.rotation();

        let mut start = a;
        for _ in 0..self.params.q {
            let mut qv = start;
            while scale * qv.norm() < self.params.max_d {
                qv *= a;
            }
            // Generous bound so the next ring is always admitted.
            if scale * qv.norm() < self.params.max_d * a.norm() * 2. {
                self.push_circle(scale * qv * w, r * scale * qv.norm(), false);
            }
            start *= b;
        }
    }

    fn push_circle(&mut self, center: Complex64, radius: f64, visible: bool) {
        let idx = self.circles.len();
        self.circles.push(Circle::new(idx, center, radius, visible));
    }

    pub fn visible_circles(&self) -> &[Circle] {
        &self.circles[..self.visible_count]
    }

    pub fn closure_circles(&self) -> &[Circle] {
        &self.circles[self.visible_count..]
    }

    /// Ring ordinals for the current visible circles.
    pub fn ring_indices(&self) -> RingIndexMap {
        RingIndexMap::from_circles(self.visible_circles())
    }

    /// Assemble all arc groups (cells, borrowed arcs, closure groups)
    /// from the generated circles.
    pub fn assemble_groups<R: Rng>(&mut self, rng: &mut R) {
        let rings = self.ring_indices();
        self.groups = group::assemble_groups(
            &self.circles,
            SPIRAL_CENTER,
            &rings,
            self.params.num_gaps,
            self.params.arc_mode,
            rng,
        );
        debug!("assembled {} arc groups", self.groups.len());
    }
}
