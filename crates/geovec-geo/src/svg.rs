//! SVG rendering of a vector's shape, for rich display in notebooks and
//! report generators. Coordinates are drawn as-is, whatever the CRS units.

use crate::vector::GeoVector;
use geovec_core::error::{GeovecError, Result};
use geovec_core::models::Bounds;
use geozero::error::GeozeroError;
use geozero::svg::SvgWriter;
use geozero::{FeatureProcessor, GeozeroGeometry};

/// Side of the square frame, in pixels
const FRAME_SIZE: u32 = 300;

fn svg_error(err: GeozeroError) -> GeovecError {
    GeovecError::Serialization(format!("SVG rendering failed: {}", err))
}

/// Frame around the shape, padded so strokes on the edge stay visible
fn frame(bounds: Option<Bounds>) -> (f64, f64, f64, f64) {
    let Some(bounds) = bounds else {
        return (0.0, 0.0, 0.0, 0.0);
    };

    let (xmin, ymin, xmax, ymax) = bounds.to_tuple();
    if xmin == xmax && ymin == ymax {
        // Single point: give it a unit frame
        return (xmin - 1.0, ymin - 1.0, xmax + 1.0, ymax + 1.0);
    }
    let expand = 0.04 * (xmax - xmin).max(ymax - ymin);
    (xmin - expand, ymin - expand, xmax + expand, ymax + expand)
}

impl GeoVector {
    /// Standalone SVG document showing the shape, y axis pointing up
    pub fn to_svg(&self) -> Result<String> {
        let (xmin, ymin, xmax, ymax) = frame(self.bounds());

        let mut svg_data = Vec::new();
        let mut svg = SvgWriter::new(&mut svg_data, true);
        svg.set_dimensions(xmin, ymin, xmax, ymax, FRAME_SIZE, FRAME_SIZE);

        // The header is only written once a dataset and a feature are open
        svg.dataset_begin(None).map_err(svg_error)?;
        svg.feature_begin(0).map_err(svg_error)?;
        self.shape().process_geom(&mut svg).map_err(svg_error)?;
        svg.feature_end(0).map_err(svg_error)?;
        svg.dataset_end().map_err(svg_error)?;

        String::from_utf8(svg_data).map_err(|e| GeovecError::Serialization(e.to_string()))
    }
}
