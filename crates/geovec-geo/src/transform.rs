//! CRS transformation through PROJ

use geo::{Coord, Geometry, MapCoords};
use geovec_core::error::{GeovecError, Result};
use geovec_core::models::Crs;
use proj::Proj;

/// Reproject a geometry from one CRS to another.
///
/// Identical CRS values short-circuit to a clone; PROJ is only consulted when
/// the coordinates actually change.
pub fn reproject_geometry(
    geometry: &Geometry<f64>,
    from_crs: &Crs,
    to_crs: &Crs,
) -> Result<Geometry<f64>> {
    if from_crs == to_crs {
        return Ok(geometry.clone());
    }

    let from_proj = from_crs.definition();
    let to_proj = to_crs.definition();
    tracing::debug!(from = %from_crs, to = %to_crs, "Reprojecting geometry");

    let proj = Proj::new_known_crs(&from_proj, &to_proj, None).map_err(|e| {
        projection_error(from_crs, to_crs, format!("Failed to create projection: {}", e))
    })?;

    geometry
        .try_map_coords(|coord| proj.convert((coord.x, coord.y)).map(|(x, y)| Coord { x, y }))
        .map_err(|e| projection_error(from_crs, to_crs, format!("Projection failed: {}", e)))
}

fn projection_error(from_crs: &Crs, to_crs: &Crs, reason: String) -> GeovecError {
    GeovecError::Projection { from: from_crs.to_string(), to: to_crs.to_string(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    #[test]
    fn test_same_crs_is_a_clone() {
        let geom = Geometry::Point(Point::new(115.0, -8.5));
        let out = reproject_geometry(&geom, &Crs::wgs84(), &Crs::wgs84()).unwrap();
        assert_eq!(out, geom);
    }

    #[test]
    fn test_wgs84_to_web_mercator() {
        let geom = Geometry::Point(Point::new(180.0, 0.0));
        let out = reproject_geometry(&geom, &Crs::wgs84(), &Crs::web_mercator()).unwrap();

        let Geometry::Point(p) = out else { panic!("Expected Point geometry") };
        assert!((p.x() - 20_037_508.342_789_244).abs() < 1e-3);
        assert!(p.y().abs() < 1e-6);
    }

    #[test]
    fn test_unknown_crs_is_a_projection_error() {
        let geom = Geometry::Point(Point::new(0.0, 0.0));
        let err =
            reproject_geometry(&geom, &Crs::wgs84(), &Crs::proj("+proj=nonsense")).unwrap_err();
        assert!(matches!(err, GeovecError::Projection { .. }));
    }
}
