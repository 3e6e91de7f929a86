//! Concentric ring ordinals derived from circle radii.

use std::collections::BTreeSet;

use ordered_float::OrderedFloat;

use crate::geometry::circle::Circle;

/// Decimal digits kept when collapsing floating-point radius noise.
const RADIUS_PRECISION: f64 = 1e6;

fn round_radius(r: f64) -> OrderedFloat<f64> {
    OrderedFloat((r * RADIUS_PRECISION).round() / RADIUS_PRECISION)
}

/// Maps rounded radius to an ascending ring ordinal.
///
/// Purely derived from one spiral's visible circles and rebuilt per
/// render; circles in the same ring share a radius up to 6 decimals.
/// Used only to vary the hatch angle per ring.
#[derive(Debug, Clone, Default)]
pub struct RingIndexMap {
    radii: Vec<OrderedFloat<f64>>,
}

impl RingIndexMap {
    /// Collect unique rounded radii of the visible circles, ascending.
    pub fn from_circles(circles: &[Circle]) -> Self {
        let unique: BTreeSet<OrderedFloat<f64>> = circles
            .iter()
            .filter(|c| c.visible)
            .map(|c| round_radius(c.r))
            .collect();
        RingIndexMap {
            radii: unique.into_iter().collect(),
        }
    }

    pub fn index_for(&self, radius: f64) -> Option<usize> {
        self.radii.binary_search(&round_radius(radius)).ok()
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}
