pub mod circle;
pub mod fill;
pub mod polygon;
pub mod r2;
