//! Doyle spiral circle packings.
//!
//! A Doyle spiral arranges circles in `q` interleaved logarithmic-spiral
//! families such that every interior circle is tangent to exactly 6
//! neighbors. This crate solves the underlying nonlinear system, generates
//! the bounded circle family (plus one invisible closure ring), computes
//! every circle-circle intersection, selects arcs per circle under a set of
//! gap heuristics, stitches arcs into closed polygonal cells, and clips
//! parallel hatch lines to those cells.

#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod analysis;
pub mod geometry;
pub mod math;

pub mod error;
pub mod mesh;
pub mod spiral;

pub use analysis::arc::Arc;
pub use analysis::group::{ArcGroup, GroupKey};
pub use analysis::rings::RingIndexMap;
pub use analysis::select::{select_arcs, ArcMode};
pub use error::{Error, Result};
pub use geometry::circle::{Circle, Intersection};
pub use geometry::r2::R2;
pub use math::doyle::DoyleSolution;
pub use mesh::{MeshGroup, MeshPayload};
pub use spiral::{Spiral, SpiralParams};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => panic!("invalid log level: {}", level),
    }
}
