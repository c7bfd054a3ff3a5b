//! Coordinate dimensionality of raw GeoJSON geometries.

use crate::error::{GeovecError, Result};
use serde_json::Value;

/// Nesting depth of the first position inside `coordinates`, per geometry type
fn position_depth(geometry_type: &str) -> Option<usize> {
    match geometry_type {
        "Point" => Some(0),
        "LineString" | "MultiPoint" => Some(1),
        "Polygon" | "MultiLineString" => Some(2),
        "MultiPolygon" => Some(3),
        _ => None,
    }
}

/// Return 2 or 3 depending on how many numbers the coordinate tuples carry.
///
/// Only the first position is inspected. A `GeometryCollection` is resolved
/// through its first member geometry.
pub fn get_dimension(geometry: &Value) -> Result<usize> {
    let geometry_type = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("geometry has no \"type\" member"))?;

    if geometry_type == "GeometryCollection" {
        let first = geometry
            .get("geometries")
            .and_then(Value::as_array)
            .and_then(|members| members.first())
            .ok_or_else(|| invalid("GeometryCollection has no member geometries"))?;
        return get_dimension(first);
    }

    let depth = position_depth(geometry_type)
        .ok_or_else(|| invalid(format!("Invalid type '{}'", geometry_type)))?;

    let mut position = geometry
        .get("coordinates")
        .ok_or_else(|| invalid(format!("{} has no \"coordinates\" member", geometry_type)))?;
    for _ in 0..depth {
        position = position
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| invalid(format!("{} has empty coordinates", geometry_type)))?;
    }

    match position.as_array().map(Vec::len) {
        Some(n @ (2 | 3)) => Ok(n),
        Some(n) => Err(invalid(format!("positions must have 2 or 3 ordinates, found {}", n))),
        None => Err(invalid(format!("{} coordinates are not nested as expected", geometry_type))),
    }
}

fn invalid(reason: impl Into<String>) -> GeovecError {
    GeovecError::InvalidGeoJson { reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point() {
        assert_eq!(get_dimension(&json!({"type": "Point", "coordinates": [30, 10]})).unwrap(), 2);
        assert_eq!(
            get_dimension(&json!({"type": "Point", "coordinates": [30, 10, 1]})).unwrap(),
            3
        );
    }

    #[test]
    fn test_line_string() {
        let flat = json!({"type": "LineString", "coordinates": [[30, 10], [10, 30], [40, 40]]});
        let tall = json!({"type": "LineString", "coordinates": [[30, 10, 1], [10, 30, 1]]});
        assert_eq!(get_dimension(&flat).unwrap(), 2);
        assert_eq!(get_dimension(&tall).unwrap(), 3);
    }

    #[test]
    fn test_polygon_with_hole() {
        let flat = json!({
            "type": "Polygon",
            "coordinates": [
                [[35, 10], [45, 45], [15, 40], [10, 20], [35, 10]],
                [[20, 30], [35, 35], [30, 20], [20, 30]]
            ]
        });
        let tall = json!({
            "type": "Polygon",
            "coordinates": [
                [[35, 10, 1], [45, 45, 1], [15, 40, 1], [10, 20, 1], [35, 10, 1]],
                [[20, 30, 1], [35, 35, 1], [30, 20, 1], [20, 30, 1]]
            ]
        });
        assert_eq!(get_dimension(&flat).unwrap(), 2);
        assert_eq!(get_dimension(&tall).unwrap(), 3);
    }

    #[test]
    fn test_multi_point() {
        let flat = json!({"type": "MultiPoint", "coordinates": [[10, 40], [40, 30], [20, 20]]});
        let tall = json!({"type": "MultiPoint", "coordinates": [[10, 40, 1], [40, 30, 1]]});
        assert_eq!(get_dimension(&flat).unwrap(), 2);
        assert_eq!(get_dimension(&tall).unwrap(), 3);
    }

    #[test]
    fn test_multi_line_string() {
        let flat = json!({
            "type": "MultiLineString",
            "coordinates": [[[10, 10], [20, 20], [10, 40]], [[40, 40], [30, 30], [40, 20]]]
        });
        let tall = json!({
            "type": "MultiLineString",
            "coordinates": [[[10, 10, 1], [20, 20, 1]], [[40, 40, 1], [30, 30, 1]]]
        });
        assert_eq!(get_dimension(&flat).unwrap(), 2);
        assert_eq!(get_dimension(&tall).unwrap(), 3);
    }

    #[test]
    fn test_multi_polygon() {
        let flat = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[40, 40], [20, 45], [45, 30], [40, 40]]],
                [
                    [[20, 35], [10, 30], [10, 10], [30, 5], [45, 20], [20, 35]],
                    [[30, 20], [20, 15], [20, 25], [30, 20]]
                ]
            ]
        });
        let tall = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[30, 20, 1], [45, 40, 1], [10, 40, 1], [30, 20, 1]]],
                [[[15, 5, 1], [40, 10, 1], [10, 20, 1], [5, 10, 1], [15, 5, 1]]]
            ]
        });
        assert_eq!(get_dimension(&flat).unwrap(), 2);
        assert_eq!(get_dimension(&tall).unwrap(), 3);
    }

    #[test]
    fn test_geometry_collection_uses_first_member() {
        let collection = json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1, 2, 3]},
                {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            ]
        });
        assert_eq!(get_dimension(&collection).unwrap(), 3);
    }

    #[test]
    fn test_unknown_type_fails() {
        let err = get_dimension(&json!({"type": "Circle", "coordinates": [0, 0]})).unwrap_err();
        assert!(err.to_string().contains("Invalid type 'Circle'"));
    }

    #[test]
    fn test_missing_or_empty_coordinates_fail() {
        assert!(get_dimension(&json!({"type": "Point"})).is_err());
        assert!(get_dimension(&json!({"type": "LineString", "coordinates": []})).is_err());
        assert!(get_dimension(&json!({"coordinates": [0, 0]})).is_err());
    }
}
