use std::f64::consts::TAU;
use std::fmt::{self, Display, Formatter};

use num_complex::Complex64;
use ordered_float::OrderedFloat;

/// An intersection point on a circle's boundary, paired with the index of
/// the neighboring circle in the owning spiral's arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub p: Complex64,
    pub other: usize,
}

/// One circle of the packing. Geometry is fixed at construction; the
/// intersection list is populated once by the spiral's batch pass and
/// never mutated afterward.
///
/// Neighbor references are arena indices, not pointers: the spiral owns
/// all circles for the lifetime of one generation.
#[derive(Debug, Clone)]
pub struct Circle {
    pub idx: usize,
    pub c: Complex64,
    pub r: f64,
    /// Closure-ring circles are invisible: they exist only to give
    /// boundary circles correct 6-way intersection topology.
    pub visible: bool,
    pub intersections: Vec<Intersection>,
}

impl Circle {
    pub fn new(idx: usize, c: Complex64, r: f64, visible: bool) -> Self {
        Circle {
            idx,
            c,
            r,
            visible,
            intersections: Vec::new(),
        }
    }

    /// Neighbor arena indices, in intersection order.
    pub fn neighbors(&self) -> Vec<usize> {
        self.intersections.iter().map(|i| i.other).collect()
    }

    /// Intersection points, in intersection order.
    pub fn points(&self) -> Vec<Complex64> {
        self.intersections.iter().map(|i| i.p).collect()
    }

    /// Angle of `p` around this circle's center, measured from the
    /// direction toward `reference` and normalized to `[0, 2π)`.
    ///
    /// Using one shared reference point (the spiral center) keeps the
    /// orientation consistent across all circles, so arc index `i → i+1`
    /// means the same hex-ring adjacency everywhere.
    pub fn relative_angle(&self, p: Complex64, reference: Complex64) -> f64 {
        let to_ref = reference - self.c;
        let base = if to_ref.norm() < 1e-9 { 0. } else { to_ref.arg() };
        ((p - self.c).arg() - base).rem_euclid(TAU)
    }

    /// Sort accumulated intersections by angle relative to `reference`.
    pub fn sort_intersections(&mut self, reference: Complex64) {
        let c = self.c;
        let to_ref = reference - c;
        let base = if to_ref.norm() < 1e-9 { 0. } else { to_ref.arg() };
        self.intersections
            .sort_by_key(|i| OrderedFloat(((i.p - c).arg() - base).rem_euclid(TAU)));
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{}(({:.3}, {:.3}), r={:.3}{})",
            self.idx,
            self.c.re,
            self.c.im,
            self.r,
            if self.visible { "" } else { ", closure" }
        )
    }
}
