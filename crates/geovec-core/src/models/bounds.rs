//! Axis-aligned extents and pixel block sizes.

use crate::error::{GeovecError, Result};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle.
///
/// Fields are named so that call sites read `Bounds { xmin: .., ymin: .., .. }`
/// in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// `(xmin, ymin, xmax, ymax)`
    pub fn to_tuple(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }

    /// Corner ring starting at `(xmin, ymin)` and closing on it
    pub fn ring(&self) -> [(f64, f64); 5] {
        [
            (self.xmin, self.ymin),
            (self.xmin, self.ymax),
            (self.xmax, self.ymax),
            (self.xmax, self.ymin),
            (self.xmin, self.ymin),
        ]
    }
}

const PIXEL_SIZE_ERROR: &str = "Pixel size must be a tuple of integers";

/// Tile size in pixels, `(width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl TryFrom<(u32, u32)> for PixelSize {
    type Error = GeovecError;

    fn try_from((width, height): (u32, u32)) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GeovecError::invalid_argument(format!(
                "{} greater than zero, got ({}, {})",
                PIXEL_SIZE_ERROR, width, height
            )));
        }
        Ok(Self { width, height })
    }
}

/// Untyped integer literals such as `(256, 256)` land here
impl TryFrom<(i32, i32)> for PixelSize {
    type Error = GeovecError;

    fn try_from((width, height): (i32, i32)) -> Result<Self> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) => PixelSize::try_from((width, height)),
            _ => Err(GeovecError::invalid_argument(format!(
                "{} greater than zero, got ({}, {})",
                PIXEL_SIZE_ERROR, width, height
            ))),
        }
    }
}

impl TryFrom<(f64, f64)> for PixelSize {
    type Error = GeovecError;

    /// Only integral values are accepted; `(1.5, 1.5)` is rejected rather
    /// than rounded.
    fn try_from((width, height): (f64, f64)) -> Result<Self> {
        let integral =
            |v: f64| v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX);
        if !integral(width) || !integral(height) {
            return Err(GeovecError::invalid_argument(PIXEL_SIZE_ERROR));
        }
        PixelSize::try_from((width as u32, height as u32))
    }
}
