//! JSON-serializable geometry payload for viewer and mesh-building
//! collaborators.

use serde::{Deserialize, Serialize};

use crate::analysis::group::GroupKey;
use crate::geometry::polygon;
use crate::spiral::Spiral;

/// One cell: its key, closed 2-D outline, and hatch rotation angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshGroup {
    pub id: String,
    pub outline: Vec<[f64; 2]>,
    #[serde(rename = "ringAngle")]
    pub ring_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPayload {
    pub arcgroups: Vec<MeshGroup>,
}

impl MeshPayload {
    /// Collect the outlines of all assembled cells.
    ///
    /// Closure groups are omitted (viewers consume cells only), as are
    /// degenerate outlines with fewer than 3 points: per-cell
    /// degeneracies are filtered best-effort, never fatal.
    /// `fill_angle` is the per-ring hatch rotation increment in degrees.
    pub fn from_spiral(spiral: &Spiral, fill_angle: f64) -> Self {
        let mut arcgroups = Vec::new();
        for (key, group) in &spiral.groups {
            if matches!(key, GroupKey::Closure(_)) {
                continue;
            }
            let outline = group.closed_outline(&spiral.circles);
            if outline.len() < 3 {
                continue;
            }
            arcgroups.push(MeshGroup {
                id: key.to_string(),
                outline: outline.iter().map(|p| [p.x, p.y]).collect(),
                ring_angle: group.ring_index as f64 * fill_angle,
            });
        }
        MeshPayload { arcgroups }
    }
}

/// Area of a mesh outline, for consumers that sanity-check cells.
pub fn outline_area(outline: &[[f64; 2]]) -> f64 {
    let points: Vec<crate::geometry::r2::R2> = outline
        .iter()
        .map(|&[x, y]| crate::geometry::r2::R2::new(x, y))
        .collect();
    polygon::area(&points)
}
