//! Rectangular tiling of a region of interest.
//!
//! Both generators return a [`TileCoordinates`] iterator that computes each
//! tile on demand from its index, so taking a prefix of a huge grid costs
//! only the tiles consumed. Calling a generator again with the same
//! arguments reproduces the same sequence.

use crate::vector::GeoVector;
use geovec_core::error::{GeovecError, Result};
use geovec_core::models::{Bounds, Crs, PixelSize};
use std::iter::FusedIterator;
use tracing::debug;

/// Lazy sequence of tiles, columns varying fastest.
///
/// Tile `i` lies in column `i % columns` and row `i / columns`, counted from
/// `(xmin, ymin)`. Every tile shares the region's CRS.
#[derive(Debug, Clone)]
pub struct TileCoordinates {
    extent: Bounds,
    crs: Crs,
    columns: usize,
    rows: usize,
    step_x: f64,
    step_y: f64,
    front: usize,
    back: usize,
}

impl TileCoordinates {
    fn new(
        extent: Bounds,
        crs: Crs,
        (columns, rows): (usize, usize),
        (step_x, step_y): (f64, f64),
    ) -> Result<Self> {
        let total = columns.checked_mul(rows).ok_or_else(|| {
            GeovecError::invalid_argument(format!(
                "A {} x {} tile grid has more tiles than can be indexed",
                columns, rows
            ))
        })?;
        debug!(columns, rows, crs = %crs, "Creating tile sequence");
        Ok(Self { extent, crs, columns, rows, step_x, step_y, front: 0, back: total })
    }

    /// `(columns, rows)` of the full grid
    pub fn grid(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Bounds of tile `index` in grid order, without building the vector
    pub fn tile_bounds(&self, index: usize) -> Option<Bounds> {
        if self.columns == 0 || index >= self.columns.saturating_mul(self.rows) {
            return None;
        }
        let (col, row) = (index % self.columns, index / self.columns);
        Some(Bounds {
            xmin: edge(self.extent.xmin, self.extent.xmax, self.step_x, col, self.columns),
            ymin: edge(self.extent.ymin, self.extent.ymax, self.step_y, row, self.rows),
            xmax: edge(self.extent.xmin, self.extent.xmax, self.step_x, col + 1, self.columns),
            ymax: edge(self.extent.ymin, self.extent.ymax, self.step_y, row + 1, self.rows),
        })
    }

    fn tile(&self, index: usize) -> Option<GeoVector> {
        self.tile_bounds(index).map(|bounds| GeoVector::from_bounds(bounds, self.crs.clone()))
    }
}

/// Grid line `i` of `n` along one axis; the last line sits exactly on `max`
fn edge(min: f64, max: f64, step: f64, i: usize, n: usize) -> f64 {
    if i >= n {
        max
    } else {
        (min + i as f64 * step).min(max)
    }
}

impl Iterator for TileCoordinates {
    type Item = GeoVector;

    fn next(&mut self) -> Option<GeoVector> {
        if self.front >= self.back {
            return None;
        }
        let tile = self.tile(self.front);
        self.front += 1;
        tile
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back.saturating_sub(self.front);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<GeoVector> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for TileCoordinates {
    fn next_back(&mut self) -> Option<GeoVector> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.tile(self.back)
    }
}

impl ExactSizeIterator for TileCoordinates {}

impl FusedIterator for TileCoordinates {}

fn roi_extent(roi: &GeoVector) -> Result<Bounds> {
    roi.bounds()
        .ok_or_else(|| GeovecError::invalid_argument("Region of interest has no extent to tile"))
}

/// Split the bounding box of `roi` into `columns x rows` equal tiles.
///
/// A zero count along either axis gives an empty sequence.
pub fn generate_tile_coordinates(
    roi: &GeoVector,
    (columns, rows): (usize, usize),
) -> Result<TileCoordinates> {
    let extent = roi_extent(roi)?;
    let step_x = if columns > 0 { extent.width() / columns as f64 } else { 0.0 };
    let step_y = if rows > 0 { extent.height() / rows as f64 } else { 0.0 };

    TileCoordinates::new(extent, roi.crs().clone(), (columns, rows), (step_x, step_y))
}

/// Split the bounding box of `roi` into blocks of `pixel_size` pixels at
/// `resolution` ground units per pixel.
///
/// The trailing column and row are clipped to the bounding box, so they may
/// be narrower than the rest. Pixel sizes must be integral:
///
/// ```
/// use geovec_core::models::{Bounds, Crs};
/// use geovec_geo::{generate_tile_coordinates_from_pixels, GeoVector};
///
/// let roi = GeoVector::from_bounds(
///     Bounds { xmin: 0.0, ymin: 0.0, xmax: 10.0, ymax: 20.0 },
///     Crs::wgs84(),
/// );
/// assert_eq!(generate_tile_coordinates_from_pixels(&roi, 1.0, (1, 1)).unwrap().len(), 200);
///
/// let err = generate_tile_coordinates_from_pixels(&roi, 1.0, (1.5, 1.5)).unwrap_err();
/// assert!(err.to_string().contains("Pixel size must be a tuple of integers"));
/// ```
pub fn generate_tile_coordinates_from_pixels<P>(
    roi: &GeoVector,
    resolution: f64,
    pixel_size: P,
) -> Result<TileCoordinates>
where
    P: TryInto<PixelSize>,
    GeovecError: From<P::Error>,
{
    let pixel_size: PixelSize = pixel_size.try_into()?;
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(GeovecError::invalid_argument(format!(
            "Resolution must be a positive number, got {}",
            resolution
        )));
    }

    let extent = roi_extent(roi)?;
    let step_x = f64::from(pixel_size.width) * resolution;
    let step_y = f64::from(pixel_size.height) * resolution;
    let columns = cells_along(extent.xmin, extent.xmax, step_x);
    let rows = cells_along(extent.ymin, extent.ymax, step_y);

    TileCoordinates::new(extent, roi.crs().clone(), (columns, rows), (step_x, step_y))
}

/// `ceil(extent / step)`, dropping a trailing cell that would start at `max`
fn cells_along(min: f64, max: f64, step: f64) -> usize {
    let count = ((max - min) / step).ceil();
    if !count.is_finite() || count <= 0.0 {
        return 0;
    }
    let mut count = count as usize;
    if count > 0 && min + (count - 1) as f64 * step >= max {
        count -= 1;
    }
    count
}
