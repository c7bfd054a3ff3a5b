//! GeoJSON reading and writing for [`GeoVector`].
//!
//! A source may be a bare geometry, a Feature or a FeatureCollection (the
//! first feature is used). The CRS comes from a named `crs` member when one
//! is present, otherwise from the configured default (WGS84).

use crate::vector::GeoVector;
use geovec_core::config::LayeredConfig;
use geovec_core::dimension::get_dimension;
use geovec_core::error::{GeovecError, Result};
use geovec_core::models::{Crs, DEFAULT_CRS};
use geo::CoordsIter;
use geojson::{GeoJson, JsonObject, JsonValue};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

impl GeoVector {
    /// Load a vector from a GeoJSON file
    pub fn from_geojson<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_geojson_str(&content)
    }

    /// Load a vector from a GeoJSON file, falling back to the configured CRS
    pub fn from_geojson_with_config<P: AsRef<Path>>(
        path: P,
        config: &LayeredConfig,
    ) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_geojson(&content, &config.default_crs.value)
    }

    pub fn from_geojson_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_geojson_str(&content)
    }

    pub fn from_geojson_str(content: &str) -> Result<Self> {
        parse_geojson(content, &DEFAULT_CRS)
    }

    /// Save the vector as a GeoJSON geometry.
    ///
    /// Coordinates are written in the vector's own CRS; anything other than
    /// WGS84 is recorded in a named `crs` member so the file reads back
    /// into an equal vector.
    pub fn to_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_geojson_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_geojson_writer<W: Write>(&self, writer: W) -> Result<()> {
        // JSON has no NaN or infinity; serde_json would write null instead
        if self.shape().coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(GeovecError::InvalidGeometry {
                reason: "GeoJSON cannot encode non-finite coordinates".to_string(),
            });
        }

        let mut geometry = geojson::Geometry::new(geojson::Value::from(self.shape()));
        if *self.crs() != DEFAULT_CRS {
            geometry.foreign_members = Some(named_crs_member(self.crs()));
        }
        serde_json::to_writer(writer, &GeoJson::Geometry(geometry))
            .map_err(|e| GeovecError::Serialization(format!("Failed to write GeoJSON: {}", e)))
    }

    /// The shape as a GeoJSON geometry expressed in `crs`
    pub fn to_record(&self, crs: &Crs) -> Result<geojson::Geometry> {
        let shape = self.get_shape(crs)?;
        Ok(geojson::Geometry::new(geojson::Value::from(shape.as_ref())))
    }

    /// [`GeoVector::to_record`] in WGS84
    pub fn geo_interface(&self) -> Result<geojson::Geometry> {
        self.to_record(&Crs::wgs84())
    }
}

fn parse_geojson(content: &str, default_crs: &Crs) -> Result<GeoVector> {
    let geojson: GeoJson = content.parse().map_err(|e| GeovecError::InvalidGeoJson {
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    let (geometry, members) = match geojson {
        GeoJson::Geometry(geometry) => {
            let members = geometry.foreign_members.clone();
            (Some(geometry), members)
        }
        GeoJson::Feature(feature) => (feature.geometry, feature.foreign_members),
        GeoJson::FeatureCollection(collection) => {
            let first = collection.features.into_iter().next().ok_or_else(|| {
                GeovecError::InvalidGeoJson {
                    reason: "FeatureCollection has no features".to_string(),
                }
            })?;
            // A collection-level crs applies unless the feature names its own
            let members = first.foreign_members.or(collection.foreign_members);
            (first.geometry, members)
        }
    };

    let geometry = geometry.ok_or_else(|| GeovecError::InvalidGeoJson {
        reason: "Feature has no geometry".to_string(),
    })?;

    let crs = match members.as_ref().and_then(|m| m.get("crs")) {
        Some(crs) => crs_from_member(crs)?,
        None => default_crs.clone(),
    };

    warn_if_three_dimensional(&geometry);

    let shape =
        geo::Geometry::<f64>::try_from(geometry).map_err(|e| GeovecError::InvalidGeoJson {
            reason: format!("Unsupported geometry: {}", e),
        })?;

    debug!(
        crs = %crs,
        geometry_type = crate::kernel::geometry_type_name(&shape),
        "Loaded GeoJSON vector"
    );
    Ok(GeoVector::new(shape, crs))
}

/// `{"type": "name", "properties": {"name": "EPSG:3857"}}`
fn named_crs_member(crs: &Crs) -> JsonObject {
    let mut properties = JsonObject::new();
    properties.insert("name".to_string(), JsonValue::from(crs.to_string()));

    let mut member = JsonObject::new();
    member.insert("type".to_string(), JsonValue::from("name"));
    member.insert("properties".to_string(), JsonValue::Object(properties));

    let mut members = JsonObject::new();
    members.insert("crs".to_string(), JsonValue::Object(member));
    members
}

fn crs_from_member(member: &JsonValue) -> Result<Crs> {
    let name = member
        .get("properties")
        .and_then(|props| props.get("name"))
        .and_then(JsonValue::as_str)
        .ok_or_else(|| GeovecError::InvalidGeoJson {
            reason: "crs member must be a named CRS".to_string(),
        })?;

    name.parse::<Crs>().map_err(|e| GeovecError::InvalidGeoJson {
        reason: format!("Unrecognised crs '{}': {}", name, e),
    })
}

fn warn_if_three_dimensional(geometry: &geojson::Geometry) {
    let Ok(value) = serde_json::to_value(geometry) else {
        return;
    };
    if let Ok(3) = get_dimension(&value) {
        warn!("GeoJSON geometry has 3-D coordinates; the Z ordinate is dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, polygon};
    use geovec_core::models::Bounds;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_bare_geometry_defaults_to_wgs84() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write(&dir, "point.geojson", r#"{"type": "Point", "coordinates": [30.0, 10.0]}"#);

        let gv = GeoVector::from_geojson(&path).unwrap();
        assert_eq!(gv, GeoVector::point(30.0, 10.0, Crs::wgs84()));
    }

    #[test]
    fn test_read_feature_with_named_crs() {
        let content = r#"{
            "type": "Feature",
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::32630"}},
            "geometry": {"type": "Point", "coordinates": [500000.0, 0.0]},
            "properties": {"name": "origin"}
        }"#;

        let gv = GeoVector::from_geojson_str(content).unwrap();
        assert_eq!(*gv.crs(), Crs::epsg(32630));
        assert_eq!(gv.x(), Some(500000.0));
    }

    #[test]
    fn test_read_feature_collection_takes_first_feature() {
        let content = r#"{
            "type": "FeatureCollection",
            "crs": {"type": "name", "properties": {"name": "EPSG:3857"}},
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                    "properties": {}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [3.0, 4.0]},
                    "properties": {}
                }
            ]
        }"#;

        let gv = GeoVector::from_geojson_reader(content.as_bytes()).unwrap();
        assert_eq!(gv, GeoVector::point(1.0, 2.0, Crs::web_mercator()));
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            GeoVector::from_geojson_str("not valid json"),
            Err(GeovecError::InvalidGeoJson { .. })
        ));
        assert!(matches!(
            GeoVector::from_geojson_str(r#"{"type": "FeatureCollection", "features": []}"#),
            Err(GeovecError::InvalidGeoJson { .. })
        ));
        assert!(matches!(
            GeoVector::from_geojson_str(
                r#"{"type": "Feature", "geometry": null, "properties": {}}"#
            ),
            Err(GeovecError::InvalidGeoJson { .. })
        ));
        assert!(matches!(
            GeoVector::from_geojson("/nonexistent/vector.geojson"),
            Err(GeovecError::Io(_))
        ));
    }

    #[test]
    fn test_read_drops_z() {
        let gv = GeoVector::from_geojson_str(r#"{"type": "Point", "coordinates": [1.0, 2.0, 3.0]}"#)
            .unwrap();
        assert_eq!(gv.coords(), vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_round_trip_wgs84() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.geojson");
        let gv = GeoVector::from_bounds(
            Bounds { xmin: 0.0, ymin: 0.0, xmax: 1.0, ymax: 1.0 },
            Crs::wgs84(),
        );

        gv.to_geojson(&path).unwrap();
        assert_eq!(GeoVector::from_geojson(&path).unwrap(), gv);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.get("crs").is_none());
        assert_eq!(written["type"], "Polygon");
    }

    #[test]
    fn test_round_trip_projected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utm.geojson");
        let gv = GeoVector::new(
            polygon![(x: 500000.0, y: 0.0), (x: 500100.0, y: 0.0), (x: 500100.0, y: 100.0)],
            Crs::epsg(32630),
        );

        gv.to_geojson(&path).unwrap();
        assert_eq!(GeoVector::from_geojson(&path).unwrap(), gv);
    }

    #[test]
    fn test_round_trip_writer() {
        let gv = GeoVector::point(1.5, -2.25, Crs::web_mercator());
        let mut buffer = Vec::new();
        gv.to_geojson_writer(&mut buffer).unwrap();

        assert_eq!(GeoVector::from_geojson_reader(buffer.as_slice()).unwrap(), gv);
    }

    fn round_trip(gv: &GeoVector) -> GeoVector {
        let mut buffer = Vec::new();
        gv.to_geojson_writer(&mut buffer).unwrap();
        GeoVector::from_geojson_reader(buffer.as_slice()).unwrap()
    }

    #[test]
    fn test_round_trip_keeps_proj_definitions() {
        let esri = GeoVector::point(10.0, 20.0, Crs::proj("ESRI:54009"));
        assert_eq!(round_trip(&esri), esri);

        let spelled_out = GeoVector::point(10.0, 20.0, Crs::proj("EPSG:3857"));
        assert_eq!(round_trip(&spelled_out), spelled_out);
        assert_eq!(*round_trip(&spelled_out).crs(), Crs::web_mercator());

        let equal_area = GeoVector::point(10.0, 20.0, Crs::equal_area());
        assert_eq!(round_trip(&equal_area), equal_area);
    }

    #[test]
    fn test_round_trip_kernel_only_shapes() {
        let rect = GeoVector::new(geo::Rect::new((0.0, 0.0), (2.0, 1.0)), Crs::epsg(32630));
        assert_eq!(rect.geometry_type(), "Polygon");
        assert_eq!(round_trip(&rect), rect);

        let line = GeoVector::new(geo::Line::new((0.0, 0.0), (1.0, 1.0)), Crs::wgs84());
        assert_eq!(round_trip(&line), line);
    }

    #[test]
    fn test_write_rejects_non_finite_coordinates() {
        let gv = GeoVector::point(f64::NAN, 0.0, Crs::wgs84());
        let result = gv.to_geojson_writer(Vec::new());
        assert!(matches!(result, Err(GeovecError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_from_geojson_with_config_default_crs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "point.geojson", r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#);

        let mut config = LayeredConfig::with_defaults();
        config.update_from_overrides(geovec_core::config::ConfigOverrides {
            default_crs: Some(Crs::web_mercator()),
            almost_equal_decimal: None,
        });

        let gv = GeoVector::from_geojson_with_config(&path, &config).unwrap();
        assert_eq!(*gv.crs(), Crs::web_mercator());
    }

    #[test]
    fn test_to_record_same_crs() {
        let gv = GeoVector::new(point!(x: 1.0, y: 2.0), Crs::wgs84());
        let record = gv.to_record(&Crs::wgs84()).unwrap();

        assert_eq!(record.value, geojson::Value::Point(vec![1.0, 2.0]));
        assert_eq!(gv.geo_interface().unwrap(), record);
    }
}
