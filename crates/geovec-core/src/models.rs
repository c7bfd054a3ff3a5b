pub mod bounds;
pub mod crs;

pub use bounds::{Bounds, PixelSize};
pub use crs::{Crs, DEFAULT_CRS};
