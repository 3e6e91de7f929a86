//! Arc groups: closed polygonal cells stitched from a circle's own kept
//! arcs plus arcs borrowed from specific neighbors.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use num_complex::Complex64;
use ordered_float::OrderedFloat;
use rand::Rng;

use crate::analysis::arc::Arc;
use crate::analysis::rings::RingIndexMap;
use crate::analysis::select::{select_arcs, ArcMode};
use crate::geometry::circle::Circle;
use crate::geometry::r2::R2;

/// Neighbor slots (relative indices into a circle's 6-entry neighbor
/// list) whose arcs are borrowed into the cell, paired with the arc
/// index to take from each neighbor.
///
/// This table is a literal behavioral contract inherited from the
/// reference pattern; its geometric rationale is unconfirmed, so treat
/// deviations as regressions rather than cleanups.
const BORROW_TABLE: [(isize, isize); 4] = [(-1, -3), (-2, -2), (-5, 1), (-6, 0)];

/// Typed cell identifier: one group per visible circle, one per closure
/// circle. Scoped to a single spiral instance, never process-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    /// Cell built around the circle at this arena index.
    Cell(usize),
    /// Closure group from the invisible circle at this arena index.
    Closure(usize),
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Cell(idx) => write!(f, "circle_{}", idx),
            GroupKey::Closure(idx) => write!(f, "outer_{}", idx),
        }
    }
}

/// An ordered collection of arcs forming one cell outline.
#[derive(Debug, Clone)]
pub struct ArcGroup {
    pub key: GroupKey,
    pub arcs: Vec<Arc>,
    /// Concentric ring ordinal, -1 for closure groups.
    pub ring_index: i32,
    pub debug_fill: Option<String>,
    pub debug_stroke: Option<String>,
}

impl ArcGroup {
    pub fn new(key: GroupKey, ring_index: i32) -> Self {
        ArcGroup {
            key,
            arcs: Vec::new(),
            ring_index,
            debug_fill: None,
            debug_stroke: None,
        }
    }

    pub fn add_arc(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }

    /// Concatenated tessellation of every arc, in group order.
    ///
    /// When the arcs form a connected chain this traces a closed
    /// polygon. Results with fewer than 3 points are not valid cells;
    /// consumers skip them rather than failing.
    pub fn closed_outline(&self, circles: &[Circle]) -> Vec<R2> {
        self.arcs
            .iter()
            .flat_map(|arc| arc.sample(circles))
            .collect()
    }
}

/// Index into a slice with Python-style negative wraparound.
fn wrap<T: Copy>(items: &[T], idx: isize) -> T {
    let n = items.len() as isize;
    items[(((idx % n) + n) % n) as usize]
}

/// Build every arc group for one generated spiral.
///
/// Cells are created only for visible circles with exactly 6
/// intersections (fewer marks a boundary circle that yields no cell).
/// Each cell then borrows one specific arc from 4 of its 6 neighbors per
/// [`BORROW_TABLE`]. Closure circles with at least 2 intersections
/// contribute their 2nd- and 3rd-closest arcs to dedicated groups with
/// `ring_index` -1.
pub fn assemble_groups<R: Rng>(
    circles: &[Circle],
    spiral_center: Complex64,
    rings: &RingIndexMap,
    num_gaps: usize,
    mode: ArcMode,
    rng: &mut R,
) -> BTreeMap<GroupKey, ArcGroup> {
    let mut groups = BTreeMap::new();

    // Own arcs of each regular interior cell.
    for circle in circles.iter().filter(|c| c.visible) {
        if circle.intersections.len() != 6 {
            continue;
        }
        let selected = select_arcs(circle, spiral_center, num_gaps, mode, rng);
        if selected.is_empty() {
            continue;
        }
        let ring_index = rings.index_for(circle.r).map(|i| i as i32).unwrap_or(0);
        let key = GroupKey::Cell(circle.idx);
        let mut group = ArcGroup::new(key, ring_index);
        let pts = circle.points();
        for (i, j) in selected {
            group.add_arc(Arc::new(circle.idx, pts[i], pts[j]));
        }
        groups.insert(key, group);
    }

    // Closure groups from the invisible outer ring: the 2nd and 3rd
    // arcs by midpoint distance to the spiral center.
    for circle in circles.iter().filter(|c| !c.visible) {
        let pts = circle.points();
        let n = pts.len();
        if n < 2 {
            continue;
        }
        let mut ranked: Vec<(f64, usize, usize)> = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let midpoint = (pts[i] + pts[j]) / 2.;
                ((midpoint - spiral_center).norm(), i, j)
            })
            .collect();
        ranked.sort_by_key(|&(d, i, _)| (OrderedFloat(d), i));
        let key = GroupKey::Closure(circle.idx);
        for &(_, i, j) in ranked.iter().take(3).skip(1) {
            let group = groups
                .entry(key)
                .or_insert_with(|| ArcGroup::new(key, -1));
            group.add_arc(Arc::new(circle.idx, pts[i], pts[j]));
        }
    }

    // Borrowed arcs: complete each cell with one arc from 4 of its 6
    // neighbors, chosen by the fixed slot -> arc-index table.
    for circle in circles.iter().filter(|c| c.visible) {
        let key = GroupKey::Cell(circle.idx);
        if !groups.contains_key(&key) {
            continue;
        }
        let neighbors = circle.neighbors();
        if neighbors.len() != 6 {
            continue;
        }
        for (slot, arc_idx) in BORROW_TABLE {
            let neighbor = &circles[wrap(&neighbors, slot)];
            let all_arcs = select_arcs(neighbor, spiral_center, 0, ArcMode::All, rng);
            // The table indexes arcs -3..=1; anything shorter is a
            // degenerate neighbor that contributes nothing.
            if all_arcs.len() < 3 {
                continue;
            }
            let (i, j) = wrap(&all_arcs, arc_idx);
            let pts = neighbor.points();
            let group = groups.get_mut(&key).unwrap();
            group.add_arc(Arc::new(neighbor.idx, pts[i], pts[j]));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::arc::DEFAULT_ARC_STEPS;

    #[test]
    fn test_wrap_matches_python_negative_indexing() {
        let v = [10, 11, 12, 13, 14, 15];
        assert_eq!(wrap(&v, -1), 15);
        assert_eq!(wrap(&v, -2), 14);
        assert_eq!(wrap(&v, -5), 11);
        assert_eq!(wrap(&v, -6), 10);
        assert_eq!(wrap(&v, 1), 11);
        assert_eq!(wrap(&v, 0), 10);
    }

    #[test]
    fn test_group_key_display() {
        assert_eq!(GroupKey::Cell(4).to_string(), "circle_4");
        assert_eq!(GroupKey::Closure(9).to_string(), "outer_9");
    }

    #[test]
    fn test_closed_outline_concatenates_arcs() {
        let circles = vec![Circle::new(0, Complex64::new(0., 0.), 1., true)];
        let mut group = ArcGroup::new(GroupKey::Cell(0), 0);
        group.add_arc(Arc::new(0, Complex64::new(1., 0.), Complex64::new(0., 1.)));
        group.add_arc(Arc::new(0, Complex64::new(0., 1.), Complex64::new(-1., 0.)));
        let outline = group.closed_outline(&circles);
        assert_eq!(outline.len(), 2 * (DEFAULT_ARC_STEPS + 1));
        assert_eq!(outline[0], R2::new(1., 0.));
        assert_eq!(outline[outline.len() - 1], R2::new(-1., 0.));
    }
}
