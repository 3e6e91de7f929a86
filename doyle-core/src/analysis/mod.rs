pub mod arc;
pub mod group;
pub mod intersect;
pub mod rings;
pub mod select;
