//! CRS-aware vector geometry.
//!
//! A [`GeoVector`] pairs one geometry with the CRS its coordinates are
//! expressed in. It is never mutated: every operation returns a new vector
//! (or borrows the original when nothing changes).

use crate::kernel;
use crate::ops::{
    BinaryOperation, BinaryPredicate, CapStyle, UnaryOperation, UnaryPredicate, UnaryProperty,
};
use crate::transform::reproject_geometry;
use geo::{CoordsIter, Geometry, LineString, Point};
use geovec_core::config::{decimal_tolerance, LayeredConfig, DEFAULT_ALMOST_EQUAL_DECIMAL};
use geovec_core::error::Result;
use geovec_core::models::{Bounds, Crs, DEFAULT_CRS};
use std::borrow::Cow;
use std::fmt;
use wkt::ToWkt;

/// Geometry with an associated coordinate reference system.
///
/// Equality (`==`) is exact: same CRS value and structurally identical
/// geometry. Use [`GeoVector::almost_equals`] to compare across CRSs.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoVector {
    shape: Geometry<f64>,
    crs: Crs,
}

impl GeoVector {
    /// Wrap `shape` in `crs`.
    ///
    /// `Rect` and `Triangle` shapes are stored as polygons and a `Line` as a
    /// two-point line string, so the vector always has a GeoJSON encoding.
    pub fn new(shape: impl Into<Geometry<f64>>, crs: Crs) -> Self {
        Self { shape: kernel::normalize(shape.into()), crs }
    }

    /// Wrap a shape in [`DEFAULT_CRS`]
    pub fn from_shape(shape: impl Into<Geometry<f64>>) -> Self {
        Self::new(shape, DEFAULT_CRS)
    }

    /// A vector with no shape, carrying only its CRS
    pub fn empty(crs: Crs) -> Self {
        Self::new(kernel::empty_geometry(), crs)
    }

    pub fn point(x: f64, y: f64, crs: Crs) -> Self {
        Self::new(Point::new(x, y), crs)
    }

    pub fn line(points: Vec<(f64, f64)>, crs: Crs) -> Self {
        Self::new(LineString::from(points), crs)
    }

    /// Axis-aligned rectangle.
    ///
    /// The ring runs `(xmin, ymin), (xmin, ymax), (xmax, ymax), (xmax, ymin)`
    /// and closes on its first vertex.
    pub fn from_bounds(bounds: Bounds, crs: Crs) -> Self {
        Self::new(kernel::rectangle(&bounds), crs)
    }

    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// The stored geometry, in [`GeoVector::crs`]
    pub fn shape(&self) -> &Geometry<f64> {
        &self.shape
    }

    pub fn into_shape(self) -> Geometry<f64> {
        self.shape
    }

    /// The geometry expressed in `crs`.
    ///
    /// Borrows the stored geometry when `crs` is the vector's own CRS,
    /// otherwise reprojects a copy.
    pub fn get_shape(&self, crs: &Crs) -> Result<Cow<'_, Geometry<f64>>> {
        if *crs == self.crs {
            Ok(Cow::Borrowed(&self.shape))
        } else {
            reproject_geometry(&self.shape, &self.crs, crs).map(Cow::Owned)
        }
    }

    /// This vector expressed in `crs`; `Cow::Borrowed(self)` when unchanged
    pub fn reproject(&self, crs: &Crs) -> Result<Cow<'_, GeoVector>> {
        if *crs == self.crs {
            return Ok(Cow::Borrowed(self));
        }
        let shape = reproject_geometry(&self.shape, &self.crs, crs)?;
        Ok(Cow::Owned(Self::new(shape, crs.clone())))
    }

    /// Same CRS, new geometry
    fn rewrap(&self, shape: Geometry<f64>) -> Self {
        Self::new(shape, self.crs.clone())
    }

    pub fn geometry_type(&self) -> &'static str {
        kernel::geometry_type_name(&self.shape)
    }

    /// Planar area in the units of [`GeoVector::crs`]
    pub fn area(&self) -> f64 {
        kernel::area(&self.shape)
    }

    /// Planar area after reprojecting into `crs`, e.g. [`Crs::equal_area`]
    pub fn area_in(&self, crs: &Crs) -> Result<f64> {
        Ok(kernel::area(&*self.get_shape(crs)?))
    }

    pub fn length(&self) -> f64 {
        kernel::length(&self.shape)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        kernel::bounds(&self.shape)
    }

    /// X coordinate of a point
    pub fn x(&self) -> Option<f64> {
        match &self.shape {
            Geometry::Point(p) => Some(p.x()),
            _ => None,
        }
    }

    /// Y coordinate of a point
    pub fn y(&self) -> Option<f64> {
        match &self.shape {
            Geometry::Point(p) => Some(p.y()),
            _ => None,
        }
    }

    /// Separate x and y sequences of a point or line
    pub fn xy(&self) -> Option<(Vec<f64>, Vec<f64>)> {
        match &self.shape {
            Geometry::Point(_) | Geometry::Line(_) | Geometry::LineString(_) => {
                Some(self.shape.coords_iter().map(|c| (c.x, c.y)).unzip())
            }
            _ => None,
        }
    }

    pub fn coords(&self) -> Vec<(f64, f64)> {
        self.shape.coords_iter().map(|c| (c.x, c.y)).collect()
    }

    pub fn property(&self, property: UnaryProperty) -> Option<GeoVector> {
        kernel::unary_property(&self.shape, property).map(|shape| self.rewrap(shape))
    }

    pub fn predicate(&self, predicate: UnaryPredicate) -> bool {
        kernel::unary_predicate(&self.shape, predicate)
    }

    pub fn operation(&self, operation: UnaryOperation) -> GeoVector {
        self.rewrap(kernel::unary_operation(&self.shape, operation))
    }

    /// Evaluate a predicate with `other` reprojected into this vector's CRS
    pub fn binary_predicate(&self, predicate: BinaryPredicate, other: &GeoVector) -> Result<bool> {
        let other_shape = other.get_shape(&self.crs)?;
        Ok(kernel::binary_predicate(&self.shape, &other_shape, predicate))
    }

    /// Apply a set operation with `other` reprojected into this vector's CRS.
    ///
    /// The result is expressed in this vector's CRS.
    pub fn binary_operation(
        &self,
        operation: BinaryOperation,
        other: &GeoVector,
    ) -> Result<GeoVector> {
        let other_shape = other.get_shape(&self.crs)?;
        kernel::binary_operation(&self.shape, &other_shape, operation)
            .map(|shape| self.rewrap(shape))
    }

    pub fn boundary(&self) -> Option<GeoVector> {
        self.property(UnaryProperty::Boundary)
    }

    pub fn centroid(&self) -> Option<GeoVector> {
        self.property(UnaryProperty::Centroid)
    }

    pub fn convex_hull(&self) -> Option<GeoVector> {
        self.property(UnaryProperty::ConvexHull)
    }

    pub fn envelope(&self) -> Option<GeoVector> {
        self.property(UnaryProperty::Envelope)
    }

    pub fn exterior(&self) -> Option<GeoVector> {
        self.property(UnaryProperty::Exterior)
    }

    pub fn is_empty(&self) -> bool {
        self.predicate(UnaryPredicate::IsEmpty)
    }

    pub fn is_ring(&self) -> bool {
        self.predicate(UnaryPredicate::IsRing)
    }

    pub fn is_closed(&self) -> bool {
        self.predicate(UnaryPredicate::IsClosed)
    }

    pub fn is_simple(&self) -> bool {
        self.predicate(UnaryPredicate::IsSimple)
    }

    pub fn is_valid(&self) -> bool {
        self.predicate(UnaryPredicate::IsValid)
    }

    pub fn buffer(&self, distance: f64) -> GeoVector {
        self.operation(UnaryOperation::Buffer(distance))
    }

    pub fn simplify(&self, tolerance: f64) -> GeoVector {
        self.operation(UnaryOperation::Simplify(tolerance))
    }

    pub fn covers(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Covers, other)
    }

    pub fn contains(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Contains, other)
    }

    pub fn crosses(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Crosses, other)
    }

    pub fn disjoint(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Disjoint, other)
    }

    /// Topological equality, independent of vertex order and CRS
    pub fn equals(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Equals, other)
    }

    pub fn intersects(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Intersects, other)
    }

    pub fn overlaps(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Overlaps, other)
    }

    pub fn touches(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Touches, other)
    }

    pub fn within(&self, other: &GeoVector) -> Result<bool> {
        self.binary_predicate(BinaryPredicate::Within, other)
    }

    pub fn difference(&self, other: &GeoVector) -> Result<GeoVector> {
        self.binary_operation(BinaryOperation::Difference, other)
    }

    pub fn intersection(&self, other: &GeoVector) -> Result<GeoVector> {
        self.binary_operation(BinaryOperation::Intersection, other)
    }

    pub fn symmetric_difference(&self, other: &GeoVector) -> Result<GeoVector> {
        self.binary_operation(BinaryOperation::SymmetricDifference, other)
    }

    pub fn union(&self, other: &GeoVector) -> Result<GeoVector> {
        self.binary_operation(BinaryOperation::Union, other)
    }

    /// Vertex-wise equality within `tolerance`, after reprojecting `other`
    pub fn equals_exact(&self, other: &GeoVector, tolerance: f64) -> Result<bool> {
        let other_shape = other.get_shape(&self.crs)?;
        Ok(kernel::equals_exact(&self.shape, &other_shape, tolerance))
    }

    /// [`GeoVector::almost_equals_decimal`] at six decimal places
    pub fn almost_equals(&self, other: &GeoVector) -> Result<bool> {
        self.almost_equals_decimal(other, DEFAULT_ALMOST_EQUAL_DECIMAL)
    }

    /// Vertices agree to `decimal` places (tolerance `0.5 * 10^-decimal`)
    pub fn almost_equals_decimal(&self, other: &GeoVector, decimal: u32) -> Result<bool> {
        self.equals_exact(other, decimal_tolerance(decimal))
    }

    pub fn almost_equals_with_config(
        &self,
        other: &GeoVector,
        config: &LayeredConfig,
    ) -> Result<bool> {
        self.equals_exact(other, config.tolerance())
    }

    /// Turn a line or point into an area of the given width.
    ///
    /// Points become discs of radius `width / 2`; lines become ribbons of
    /// half-width `width / 2` ended with `cap_style`. Areal vectors and
    /// collections are returned unchanged.
    pub fn polygonize_with_cap(&self, width: f64, cap_style: CapStyle) -> GeoVector {
        let distance = width / 2.0;
        match &self.shape {
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                self.rewrap(kernel::buffer_with_cap(&self.shape, distance, cap_style))
            }
            Geometry::Point(_) | Geometry::MultiPoint(_) => {
                self.rewrap(kernel::buffer_with_cap(&self.shape, distance, CapStyle::Round))
            }
            _ => self.clone(),
        }
    }

    /// [`GeoVector::polygonize_with_cap`] with round caps
    pub fn polygonize(&self, width: f64) -> GeoVector {
        self.polygonize_with_cap(width, CapStyle::default())
    }
}

impl fmt::Display for GeoVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoVector(shape={}, crs={})", self.shape.wkt_string(), self.crs)
    }
}
