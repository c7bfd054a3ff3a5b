//! geovec geo - CRS-aware vector geometry on top of `geo` and `proj`
//!
//! This crate provides [`GeoVector`], its delegated geometry algebra,
//! reprojection, GeoJSON I/O, SVG rendering, rasterization requests and the
//! tile coordinate generators.

pub mod io;
pub mod kernel;
pub mod ops;
pub mod rasterize;
pub mod svg;
pub mod tiles;
pub mod transform;
pub mod validation;
pub mod vector;

pub use ops::{
    BinaryOperation, BinaryPredicate, CapStyle, UnaryOperation, UnaryPredicate, UnaryProperty,
};
pub use rasterize::{RasterBounds, Rasterizer};
pub use tiles::{generate_tile_coordinates, generate_tile_coordinates_from_pixels, TileCoordinates};
pub use transform::reproject_geometry;
pub use validation::{validate_geometry, ValidationResult};
pub use vector::GeoVector;

pub use geovec_core::{get_dimension, Bounds, Crs, GeovecError, PixelSize, Result, DEFAULT_CRS};
