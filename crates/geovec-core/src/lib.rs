//! geovec core - CRS values, bounds, errors and configuration
//!
//! This crate contains the geometry-kernel-independent building blocks shared
//! by the vector crates.

pub mod config;
pub mod dimension;
pub mod error;
pub mod models;

pub use dimension::get_dimension;
pub use error::{GeovecError, Result};
pub use models::{Bounds, Crs, PixelSize, DEFAULT_CRS};
