use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Geometry, Line, LineString, Polygon};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    fn absorb(&mut self, prefix: &str, other: ValidationResult) {
        for error in other.errors {
            self.add_error(format!("{}.{}", prefix, error.location), error.reason);
        }
    }
}

/// Validate a geometry
pub fn validate_geometry(geometry: &Geometry<f64>) -> ValidationResult {
    match geometry {
        Geometry::Point(p) => validate_coords("Point", [(p.x(), p.y())]),
        Geometry::Line(l) => validate_coords("Line", [l.start.x_y(), l.end.x_y()]),
        Geometry::LineString(ls) => validate_linestring(ls),
        Geometry::Polygon(poly) => validate_polygon(poly),
        Geometry::MultiPoint(mp) => validate_coords("MultiPoint", mp.iter().map(|p| p.x_y())),
        Geometry::MultiLineString(mls) => {
            let mut result = ValidationResult::valid();
            for (i, ls) in mls.0.iter().enumerate() {
                result.absorb(&format!("MultiLineString[{}]", i), validate_linestring(ls));
            }
            result
        }
        Geometry::MultiPolygon(mp) => {
            let mut result = ValidationResult::valid();
            for (i, poly) in mp.0.iter().enumerate() {
                result.absorb(&format!("MultiPolygon[{}]", i), validate_polygon(poly));
            }
            result
        }
        Geometry::GeometryCollection(gc) => {
            let mut result = ValidationResult::valid();
            for (i, member) in gc.0.iter().enumerate() {
                result.absorb(&format!("GeometryCollection[{}]", i), validate_geometry(member));
            }
            result
        }
        Geometry::Rect(r) => validate_polygon(&r.to_polygon()),
        Geometry::Triangle(t) => validate_polygon(&t.to_polygon()),
    }
}

fn validate_coords(
    location: &str,
    coords: impl IntoIterator<Item = (f64, f64)>,
) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for (i, (x, y)) in coords.into_iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            result.add_error(
                format!("{}[{}]", location, i),
                "Coordinates must be finite".to_string(),
            );
        }
    }
    result
}

fn validate_linestring(linestring: &LineString<f64>) -> ValidationResult {
    // LineString must have at least 2 points
    if linestring.0.len() < 2 {
        let mut result = ValidationResult::valid();
        result.add_error(
            "LineString".to_string(),
            format!("LineString must have at least 2 points, found {}", linestring.0.len()),
        );
        return result;
    }

    validate_coords("LineString", linestring.coords().map(|c| c.x_y()))
}

fn validate_ring(location: String, ring: &LineString<f64>, result: &mut ValidationResult) {
    if ring.0.len() < 4 {
        result.add_error(
            location.clone(),
            format!("Ring must have at least 4 points, found {}", ring.0.len()),
        );
        return;
    }

    if let (Some(first), Some(last)) = (ring.0.first(), ring.0.last()) {
        if first != last {
            result.add_error(
                location.clone(),
                "Ring must be closed (first point == last point)".to_string(),
            );
        }
    }

    if !line_string_is_simple(ring) {
        result.add_error(location, "Ring must not self-intersect".to_string());
    }
}

fn validate_polygon(polygon: &Polygon<f64>) -> ValidationResult {
    let exterior = polygon.exterior();
    let mut result = validate_coords("Polygon", exterior.coords().map(|c| c.x_y()));
    if !result.is_valid {
        return result;
    }

    validate_ring("Polygon exterior".to_string(), exterior, &mut result);
    for (i, interior) in polygon.interiors().iter().enumerate() {
        validate_ring(format!("Polygon interior[{}]", i), interior, &mut result);
    }

    result
}

/// A line string is simple when no two non-adjacent segments meet and
/// adjacent segments share nothing beyond their common vertex.
pub fn line_string_is_simple(linestring: &LineString<f64>) -> bool {
    let segments: Vec<Line<f64>> = linestring.lines().collect();
    let n = segments.len();
    let closed = n > 2 && linestring.is_closed();

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (closed && i == 0 && j == n - 1);
            match line_intersection(segments[i], segments[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => return false,
            }
        }
    }
    true
}
