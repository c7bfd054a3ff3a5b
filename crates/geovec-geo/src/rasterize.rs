//! Rasterization requests.
//!
//! Burning shapes into a grid is the job of a [`Rasterizer`] implementation
//! supplied by the caller; [`GeoVector::rasterize`] only resolves arguments.

use crate::vector::GeoVector;
use geo::Geometry;
use geovec_core::error::GeovecError;
use geovec_core::models::Crs;
use tracing::debug;

/// Port for rasterization engines
pub trait Rasterizer {
    /// Raster produced by the engine
    type Raster;

    /// Engine error; argument resolution failures convert into it
    type Error: From<GeovecError>;

    /// Burn `shapes` (expressed in `crs`) into a grid covering `bounds`
    fn rasterize(
        &self,
        shapes: &[Geometry<f64>],
        crs: &Crs,
        bounds: &Geometry<f64>,
        resolution: f64,
        fill_value: Option<f64>,
        nodata_value: Option<f64>,
    ) -> Result<Self::Raster, Self::Error>;
}

/// Extent of a rasterization request
#[derive(Debug, Clone, PartialEq)]
pub enum RasterBounds {
    /// Reprojected into the rasterized vector's CRS when needed
    Vector(GeoVector),
    /// Taken as already expressed in the rasterized vector's CRS
    Shape(Geometry<f64>),
}

impl From<GeoVector> for RasterBounds {
    fn from(vector: GeoVector) -> Self {
        RasterBounds::Vector(vector)
    }
}

impl From<Geometry<f64>> for RasterBounds {
    fn from(shape: Geometry<f64>) -> Self {
        RasterBounds::Shape(shape)
    }
}

impl GeoVector {
    /// Request a raster of this vector from `rasterizer`.
    ///
    /// Without explicit `bounds` the vector's envelope is used. The engine
    /// receives the shape as a one-element slice together with this
    /// vector's CRS; its result and errors are returned untouched.
    pub fn rasterize<R: Rasterizer>(
        &self,
        rasterizer: &R,
        dest_resolution: f64,
        fill_value: Option<f64>,
        nodata_value: Option<f64>,
        bounds: Option<RasterBounds>,
    ) -> Result<R::Raster, R::Error> {
        let crs = self.crs();
        let bounds = match bounds {
            None => self
                .envelope()
                .map(GeoVector::into_shape)
                .ok_or_else(|| {
                    GeovecError::invalid_argument("Cannot rasterize an empty vector without bounds")
                })?,
            Some(RasterBounds::Vector(vector)) => vector.get_shape(crs)?.into_owned(),
            Some(RasterBounds::Shape(shape)) => shape,
        };

        debug!(crs = %crs, resolution = dest_resolution, "Requesting rasterization");
        let shapes = [self.shape().clone()];
        rasterizer.rasterize(&shapes, crs, &bounds, dest_resolution, fill_value, nodata_value)
    }
}
