//! Thin adapter over the `geo` algorithms.
//!
//! Everything here works on bare `geo::Geometry` values in a single
//! coordinate system; CRS bookkeeping lives in [`crate::vector`].

use crate::ops::{
    BinaryOperation, BinaryPredicate, CapStyle, UnaryOperation, UnaryPredicate, UnaryProperty,
};
use crate::validation::{line_string_is_simple, validate_geometry};
use geo::algorithm::buffer::{BufferStyle, LineCap};
use geo::{
    Area, BooleanOps, BoundingRect, Buffer, Centroid, ConvexHull, CoordsIter, Distance, Euclidean,
    Geometry, GeometryCollection, Intersects, Length, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Relate, Simplify,
};
use geovec_core::error::{GeovecError, Result};
use geovec_core::models::Bounds;

/// Kernel type name of a geometry
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

pub fn empty_geometry() -> Geometry<f64> {
    Geometry::GeometryCollection(GeometryCollection(Vec::new()))
}

/// Rewrite `Rect`, `Triangle` and `Line` as the GeoJSON-expressible types
/// they stand for, descending into collections
pub fn normalize(geometry: Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Rect(rect) => Geometry::Polygon(rect.to_polygon()),
        Geometry::Triangle(triangle) => Geometry::Polygon(triangle.to_polygon()),
        Geometry::Line(line) => Geometry::LineString(LineString::new(vec![line.start, line.end])),
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(
            gc.0.into_iter().map(normalize).collect(),
        )),
        other => other,
    }
}

/// Axis-aligned rectangle polygon for the given bounds
pub fn rectangle(bounds: &Bounds) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(LineString::from(bounds.ring().to_vec()), vec![]))
}

pub fn bounds(geometry: &Geometry<f64>) -> Option<Bounds> {
    geometry.bounding_rect().map(|rect| Bounds {
        xmin: rect.min().x,
        ymin: rect.min().y,
        xmax: rect.max().x,
        ymax: rect.max().y,
    })
}

pub fn area(geometry: &Geometry<f64>) -> f64 {
    geometry.unsigned_area()
}

fn polygon_perimeter(polygon: &Polygon<f64>) -> f64 {
    Euclidean.length(polygon.exterior())
        + polygon.interiors().iter().map(|ring| Euclidean.length(ring)).sum::<f64>()
}

/// Planar length; perimeter for areal geometries, zero for points
pub fn length(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => Euclidean.length(line),
        Geometry::LineString(ls) => Euclidean.length(ls),
        Geometry::MultiLineString(mls) => Euclidean.length(mls),
        Geometry::Polygon(poly) => polygon_perimeter(poly),
        Geometry::MultiPolygon(mp) => mp.0.iter().map(polygon_perimeter).sum(),
        Geometry::GeometryCollection(gc) => gc.0.iter().map(length).sum(),
        Geometry::Rect(rect) => polygon_perimeter(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_perimeter(&triangle.to_polygon()),
    }
}

pub fn is_empty(geometry: &Geometry<f64>) -> bool {
    geometry.coords_count() == 0
}

pub fn is_areal(geometry: &Geometry<f64>) -> bool {
    as_areal(geometry).is_some()
}

/// Vertex-wise comparison of two geometries of the same type
pub fn equals_exact(a: &Geometry<f64>, b: &Geometry<f64>, tolerance: f64) -> bool {
    if geometry_type_name(a) != geometry_type_name(b) || a.coords_count() != b.coords_count() {
        return false;
    }
    a.coords_iter()
        .zip(b.coords_iter())
        .all(|(p, q)| Euclidean.distance(Point::from(p), Point::from(q)) <= tolerance)
}

pub fn unary_property(geometry: &Geometry<f64>, property: UnaryProperty) -> Option<Geometry<f64>> {
    match property {
        UnaryProperty::Boundary => boundary(geometry),
        UnaryProperty::Centroid => geometry.centroid().map(Geometry::Point),
        UnaryProperty::ConvexHull => {
            (!is_empty(geometry)).then(|| Geometry::Polygon(geometry.convex_hull()))
        }
        UnaryProperty::Envelope => bounds(geometry).map(|b| rectangle(&b)),
        UnaryProperty::Exterior => match geometry {
            Geometry::Polygon(poly) => Some(Geometry::LineString(poly.exterior().clone())),
            Geometry::Rect(rect) => {
                Some(Geometry::LineString(rect.to_polygon().exterior().clone()))
            }
            Geometry::Triangle(triangle) => {
                Some(Geometry::LineString(triangle.to_polygon().exterior().clone()))
            }
            _ => None,
        },
    }
}

fn end_points(linestring: &LineString<f64>) -> Vec<Point<f64>> {
    match (linestring.0.first(), linestring.0.last()) {
        (Some(first), Some(last)) if first != last => vec![Point::from(*first), Point::from(*last)],
        _ => Vec::new(),
    }
}

fn rings(polygon: &Polygon<f64>) -> Vec<LineString<f64>> {
    std::iter::once(polygon.exterior().clone())
        .chain(polygon.interiors().iter().cloned())
        .collect()
}

fn polygon_boundary(polygon: &Polygon<f64>) -> Geometry<f64> {
    let mut rings = rings(polygon);
    if rings.len() == 1 {
        Geometry::LineString(rings.remove(0))
    } else {
        Geometry::MultiLineString(MultiLineString(rings))
    }
}

fn boundary(geometry: &Geometry<f64>) -> Option<Geometry<f64>> {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Some(empty_geometry()),
        Geometry::Line(line) => {
            Some(Geometry::MultiPoint(MultiPoint(vec![line.start_point(), line.end_point()])))
        }
        Geometry::LineString(ls) => Some(Geometry::MultiPoint(MultiPoint(end_points(ls)))),
        Geometry::MultiLineString(mls) => Some(Geometry::MultiPoint(MultiPoint(
            mls.0.iter().flat_map(end_points).collect(),
        ))),
        Geometry::Polygon(poly) => Some(polygon_boundary(poly)),
        Geometry::MultiPolygon(mp) => Some(Geometry::MultiLineString(MultiLineString(
            mp.0.iter().flat_map(rings).collect(),
        ))),
        Geometry::Rect(rect) => Some(polygon_boundary(&rect.to_polygon())),
        Geometry::Triangle(triangle) => Some(polygon_boundary(&triangle.to_polygon())),
        Geometry::GeometryCollection(_) => None,
    }
}

pub fn unary_predicate(geometry: &Geometry<f64>, predicate: UnaryPredicate) -> bool {
    match predicate {
        UnaryPredicate::IsEmpty => is_empty(geometry),
        UnaryPredicate::IsClosed => match geometry {
            Geometry::Line(line) => line.start == line.end,
            Geometry::LineString(ls) => !ls.0.is_empty() && ls.is_closed(),
            Geometry::MultiLineString(mls) => !mls.0.is_empty() && mls.is_closed(),
            _ => false,
        },
        UnaryPredicate::IsRing => match geometry {
            Geometry::LineString(ls) => {
                ls.0.len() >= 4 && ls.is_closed() && line_string_is_simple(ls)
            }
            _ => false,
        },
        UnaryPredicate::IsSimple => is_simple(geometry),
        UnaryPredicate::IsValid => validate_geometry(geometry).is_valid,
    }
}

fn is_simple(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::LineString(ls) => line_string_is_simple(ls),
        Geometry::MultiLineString(mls) => mls.0.iter().all(line_string_is_simple),
        Geometry::MultiPoint(mp) => {
            mp.0.iter().enumerate().all(|(i, p)| mp.0[i + 1..].iter().all(|q| q != p))
        }
        Geometry::Polygon(_)
        | Geometry::MultiPolygon(_)
        | Geometry::Rect(_)
        | Geometry::Triangle(_) => validate_geometry(geometry).is_valid,
        Geometry::GeometryCollection(gc) => gc.0.iter().all(is_simple),
        Geometry::Point(_) | Geometry::Line(_) => true,
    }
}

pub fn unary_operation(geometry: &Geometry<f64>, operation: UnaryOperation) -> Geometry<f64> {
    match operation {
        UnaryOperation::Buffer(distance) => collapse_polygons(geometry.buffer(distance)),
        UnaryOperation::Simplify(tolerance) => simplify(geometry, tolerance),
    }
}

/// Buffer with an explicit end-cap style for linear inputs
pub fn buffer_with_cap(geometry: &Geometry<f64>, distance: f64, cap: CapStyle) -> Geometry<f64> {
    // Round caps use the same arc step as geo's default joins
    let line_cap = match cap {
        CapStyle::Round => LineCap::Round(0.2),
        CapStyle::Flat => LineCap::Butt,
        CapStyle::Square => LineCap::Square,
    };
    let style = BufferStyle::new(distance).line_cap(line_cap);
    collapse_polygons(geometry.buffer_with_style(style))
}

fn simplify(geometry: &Geometry<f64>, tolerance: f64) -> Geometry<f64> {
    match geometry {
        Geometry::LineString(ls) => Geometry::LineString(ls.simplify(tolerance)),
        Geometry::MultiLineString(mls) => Geometry::MultiLineString(mls.simplify(tolerance)),
        Geometry::Polygon(poly) => Geometry::Polygon(poly.simplify(tolerance)),
        Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(mp.simplify(tolerance)),
        Geometry::Rect(rect) => Geometry::Polygon(rect.to_polygon().simplify(tolerance)),
        Geometry::Triangle(triangle) => {
            Geometry::Polygon(triangle.to_polygon().simplify(tolerance))
        }
        Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(GeometryCollection(
            gc.0.iter().map(|member| simplify(member, tolerance)).collect(),
        )),
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::Line(_) => geometry.clone(),
    }
}

pub fn binary_predicate(a: &Geometry<f64>, b: &Geometry<f64>, predicate: BinaryPredicate) -> bool {
    let matrix = a.relate(b);
    match predicate {
        BinaryPredicate::Covers => matrix.is_covers(),
        BinaryPredicate::Contains => matrix.is_contains(),
        BinaryPredicate::Crosses => matrix.is_crosses(),
        BinaryPredicate::Disjoint => matrix.is_disjoint(),
        BinaryPredicate::Equals => matrix.is_equal_topo(),
        BinaryPredicate::Intersects => matrix.is_intersects(),
        BinaryPredicate::Overlaps => matrix.is_overlaps(),
        BinaryPredicate::Touches => matrix.is_touches(),
        BinaryPredicate::Within => matrix.is_within(),
    }
}

/// Set operation between two geometries.
///
/// Areal operands support every operation. Linear and puntal left operands
/// support intersection and difference against anything the kernel can
/// clip or test against; points also support union with points.
pub fn binary_operation(
    a: &Geometry<f64>,
    b: &Geometry<f64>,
    operation: BinaryOperation,
) -> Result<Geometry<f64>> {
    if let (Some(left), Some(right)) = (as_areal(a), as_areal(b)) {
        let result = match operation {
            BinaryOperation::Union => left.union(&right),
            BinaryOperation::Intersection => left.intersection(&right),
            BinaryOperation::Difference => left.difference(&right),
            BinaryOperation::SymmetricDifference => left.xor(&right),
        };
        return Ok(collapse_polygons(result));
    }

    if let (Some(lines), Some(right)) = (as_linear(a), as_areal(b)) {
        match operation {
            BinaryOperation::Intersection => return Ok(collapse_lines(right.clip(&lines, false))),
            BinaryOperation::Difference => return Ok(collapse_lines(right.clip(&lines, true))),
            _ => {}
        }
    }

    if let Some(points) = as_puntal(a) {
        match operation {
            BinaryOperation::Intersection => {
                let inside = points.into_iter().filter(|p| b.intersects(p)).collect();
                return Ok(collapse_points(inside));
            }
            BinaryOperation::Difference => {
                let outside = points.into_iter().filter(|p| !b.intersects(p)).collect();
                return Ok(collapse_points(outside));
            }
            BinaryOperation::Union => {
                if let Some(others) = as_puntal(b) {
                    let mut merged = points;
                    for point in others {
                        if !merged.contains(&point) {
                            merged.push(point);
                        }
                    }
                    return Ok(collapse_points(merged));
                }
            }
            BinaryOperation::SymmetricDifference => {}
        }
    }

    Err(GeovecError::UnsupportedOperation {
        operation: operation.name().to_string(),
        geometry_type: format!("{}/{}", geometry_type_name(a), geometry_type_name(b)),
    })
}

fn as_areal(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(poly) => Some(MultiPolygon(vec![poly.clone()])),
        Geometry::MultiPolygon(mp) => Some(mp.clone()),
        Geometry::Rect(rect) => Some(MultiPolygon(vec![rect.to_polygon()])),
        Geometry::Triangle(triangle) => Some(MultiPolygon(vec![triangle.to_polygon()])),
        _ => None,
    }
}

fn as_linear(geometry: &Geometry<f64>) -> Option<MultiLineString<f64>> {
    match geometry {
        Geometry::Line(line) => {
            Some(MultiLineString(vec![LineString::new(vec![line.start, line.end])]))
        }
        Geometry::LineString(ls) => Some(MultiLineString(vec![ls.clone()])),
        Geometry::MultiLineString(mls) => Some(mls.clone()),
        _ => None,
    }
}

fn as_puntal(geometry: &Geometry<f64>) -> Option<Vec<Point<f64>>> {
    match geometry {
        Geometry::Point(p) => Some(vec![*p]),
        Geometry::MultiPoint(mp) => Some(mp.0.clone()),
        _ => None,
    }
}

fn collapse_polygons(mut mp: MultiPolygon<f64>) -> Geometry<f64> {
    if mp.0.len() == 1 {
        Geometry::Polygon(mp.0.remove(0))
    } else {
        Geometry::MultiPolygon(mp)
    }
}

fn collapse_lines(mut mls: MultiLineString<f64>) -> Geometry<f64> {
    if mls.0.len() == 1 {
        Geometry::LineString(mls.0.remove(0))
    } else {
        Geometry::MultiLineString(mls)
    }
}

fn collapse_points(mut points: Vec<Point<f64>>) -> Geometry<f64> {
    if points.len() == 1 {
        Geometry::Point(points.remove(0))
    } else {
        Geometry::MultiPoint(MultiPoint(points))
    }
}
