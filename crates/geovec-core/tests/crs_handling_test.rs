//! Integration tests for CRS values, extents and GeoJSON dimension inspection
//!
//! This test suite verifies that:
//! - CRS values survive serialization inside larger documents
//! - Equivalent CRS spellings parse to the same value
//! - Non-EPSG definitions survive unchanged
//! - Dimension inspection works on GeoJSON read from disk

use geovec_core::models::{Bounds, Crs, PixelSize};
use geovec_core::{get_dimension, GeovecError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Layer {
    crs: Crs,
    extent: Bounds,
    block: PixelSize,
}

#[test]
fn test_crs_in_json_document() {
    let layer = Layer {
        crs: Crs::epsg(32630),
        extent: Bounds { xmin: 0.0, ymin: 0.0, xmax: 10.0, ymax: 20.0 },
        block: PixelSize { width: 256, height: 256 },
    };

    let json = serde_json::to_value(&layer).unwrap();
    assert_eq!(json["crs"], "EPSG:32630");

    let back: Layer = serde_json::from_value(json).unwrap();
    assert_eq!(back, layer);
}

#[test]
fn test_crs_in_toml_document() {
    let text = r#"
crs = "+proj=cea +lon_0=0 +lat_ts=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs"

[extent]
xmin = -180.0
ymin = -90.0
xmax = 180.0
ymax = 90.0

[block]
width = 512
height = 256
"#;

    let layer: Layer = toml::from_str(text).unwrap();
    assert_eq!(layer.crs.epsg_code(), None);
    assert_eq!(layer.extent.width(), 360.0);
    assert_eq!(layer.block, PixelSize { width: 512, height: 256 });
}

#[test]
fn test_authority_code_in_document_round_trips() {
    let layer = Layer {
        crs: Crs::proj("ESRI:54009"),
        extent: Bounds { xmin: -1e6, ymin: -1e6, xmax: 1e6, ymax: 1e6 },
        block: PixelSize { width: 512, height: 512 },
    };

    let json = serde_json::to_string(&layer).unwrap();
    let back: Layer = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layer);
    assert_eq!(back.crs.epsg_code(), None);
}

#[test]
fn test_unknown_crs_in_document_is_rejected() {
    let result: Result<Layer, _> = serde_json::from_str(
        r#"{
            "crs": "Mars 2000",
            "extent": {"xmin": 0, "ymin": 0, "xmax": 1, "ymax": 1},
            "block": {"width": 1, "height": 1}
        }"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_equivalent_spellings_share_a_map_slot() {
    let mut names: HashMap<Crs, &str> = HashMap::new();
    names.insert("EPSG:4326".parse().unwrap(), "wgs84");
    names.insert("urn:ogc:def:crs:OGC:1.3:CRS84".parse().unwrap(), "crs84");
    names.insert("urn:ogc:def:crs:EPSG::3857".parse().unwrap(), "mercator");

    assert_eq!(names.len(), 2);
    assert_eq!(names[&Crs::web_mercator()], "mercator");
}

#[test]
fn test_dimension_of_geojson_files() {
    let temp_dir = TempDir::new().unwrap();
    let cases = [
        (r#"{"type": "Point", "coordinates": [30, 10]}"#, 2),
        (r#"{"type": "LineString", "coordinates": [[30, 10, 1], [10, 30, 1], [40, 40, 1]]}"#, 3),
        (
            r#"{
                "type": "MultiPolygon",
                "coordinates": [[[[40, 40], [20, 45], [45, 30], [40, 40]]]]
            }"#,
            2,
        ),
        (
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "Point", "coordinates": [40, 10, 5]},
                {"type": "LineString", "coordinates": [[10, 10], [20, 20]]}
            ]}"#,
            3,
        ),
    ];

    for (ii, (content, expected)) in cases.iter().enumerate() {
        let path = temp_dir.path().join(format!("geometry_{}.geojson", ii));
        fs::write(&path, content).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(get_dimension(&value).unwrap(), *expected, "{}", content);
    }
}

#[test]
fn test_dimension_rejects_non_geometry() {
    let value = serde_json::json!({"type": "Feature", "geometry": null});
    let err = get_dimension(&value).unwrap_err();
    assert!(matches!(err, GeovecError::InvalidGeoJson { .. }));
}
