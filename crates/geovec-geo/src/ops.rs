//! Catalogue of geometry-kernel capabilities reachable through a `GeoVector`.
//!
//! Each capability kind has its own enum so the call signature is fixed by
//! type: properties take nothing and yield a geometry, predicates yield a
//! bool, operations carry their scalar parameter, binary kinds take a second
//! vector.

use geovec_core::error::{GeovecError, Result};
use std::fmt;
use std::str::FromStr;

/// Geometry-valued properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryProperty {
    Boundary,
    Centroid,
    ConvexHull,
    /// Bounding box as a polygon
    Envelope,
    Exterior,
}

impl UnaryProperty {
    pub const ALL: [UnaryProperty; 5] = [
        UnaryProperty::Boundary,
        UnaryProperty::Centroid,
        UnaryProperty::ConvexHull,
        UnaryProperty::Envelope,
        UnaryProperty::Exterior,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnaryProperty::Boundary => "boundary",
            UnaryProperty::Centroid => "centroid",
            UnaryProperty::ConvexHull => "convex_hull",
            UnaryProperty::Envelope => "envelope",
            UnaryProperty::Exterior => "exterior",
        }
    }
}

/// Boolean properties of a single geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryPredicate {
    IsEmpty,
    IsRing,
    IsClosed,
    IsSimple,
    IsValid,
}

impl UnaryPredicate {
    pub const ALL: [UnaryPredicate; 5] = [
        UnaryPredicate::IsEmpty,
        UnaryPredicate::IsRing,
        UnaryPredicate::IsClosed,
        UnaryPredicate::IsSimple,
        UnaryPredicate::IsValid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnaryPredicate::IsEmpty => "is_empty",
            UnaryPredicate::IsRing => "is_ring",
            UnaryPredicate::IsClosed => "is_closed",
            UnaryPredicate::IsSimple => "is_simple",
            UnaryPredicate::IsValid => "is_valid",
        }
    }
}

/// Single-geometry operations with a scalar parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOperation {
    Buffer(f64),
    Simplify(f64),
}

impl UnaryOperation {
    pub const NAMES: [&'static str; 2] = ["buffer", "simplify"];

    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperation::Buffer(_) => "buffer",
            UnaryOperation::Simplify(_) => "simplify",
        }
    }

    /// Build an operation from its name and parameter
    pub fn from_name(name: &str, parameter: f64) -> Result<Self> {
        match name {
            "buffer" => Ok(UnaryOperation::Buffer(parameter)),
            "simplify" => Ok(UnaryOperation::Simplify(parameter)),
            _ => Err(unknown("unary operation", name)),
        }
    }
}

/// Relationship tests between two geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryPredicate {
    Covers,
    Contains,
    Crosses,
    Disjoint,
    /// Topological equality
    Equals,
    Intersects,
    Overlaps,
    Touches,
    Within,
}

impl BinaryPredicate {
    pub const ALL: [BinaryPredicate; 9] = [
        BinaryPredicate::Covers,
        BinaryPredicate::Contains,
        BinaryPredicate::Crosses,
        BinaryPredicate::Disjoint,
        BinaryPredicate::Equals,
        BinaryPredicate::Intersects,
        BinaryPredicate::Overlaps,
        BinaryPredicate::Touches,
        BinaryPredicate::Within,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BinaryPredicate::Covers => "covers",
            BinaryPredicate::Contains => "contains",
            BinaryPredicate::Crosses => "crosses",
            BinaryPredicate::Disjoint => "disjoint",
            BinaryPredicate::Equals => "equals",
            BinaryPredicate::Intersects => "intersects",
            BinaryPredicate::Overlaps => "overlaps",
            BinaryPredicate::Touches => "touches",
            BinaryPredicate::Within => "within",
        }
    }
}

/// Set operations between two geometries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperation {
    Difference,
    Intersection,
    SymmetricDifference,
    Union,
}

impl BinaryOperation {
    pub const ALL: [BinaryOperation; 4] = [
        BinaryOperation::Difference,
        BinaryOperation::Intersection,
        BinaryOperation::SymmetricDifference,
        BinaryOperation::Union,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperation::Difference => "difference",
            BinaryOperation::Intersection => "intersection",
            BinaryOperation::SymmetricDifference => "symmetric_difference",
            BinaryOperation::Union => "union",
        }
    }
}

/// End-cap style for buffered lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapStyle {
    #[default]
    Round,
    /// Butt cap, ends exactly at the line's endpoints
    Flat,
    Square,
}

impl CapStyle {
    pub fn name(&self) -> &'static str {
        match self {
            CapStyle::Round => "round",
            CapStyle::Flat => "flat",
            CapStyle::Square => "square",
        }
    }
}

fn unknown(kind: &str, name: &str) -> GeovecError {
    GeovecError::invalid_argument(format!("Unknown {} '{}'", kind, name))
}

macro_rules! named_catalogue {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = GeovecError;

                fn from_str(s: &str) -> Result<Self> {
                    $ty::ALL
                        .into_iter()
                        .find(|entry| entry.name() == s)
                        .ok_or_else(|| unknown($kind, s))
                }
            }
        )*
    };
}

named_catalogue!(
    UnaryProperty => "property",
    UnaryPredicate => "predicate",
    BinaryPredicate => "binary predicate",
    BinaryOperation => "binary operation",
);

impl fmt::Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperation::Buffer(distance) => write!(f, "buffer({})", distance),
            UnaryOperation::Simplify(tolerance) => write!(f, "simplify({})", tolerance),
        }
    }
}

impl fmt::Display for CapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CapStyle {
    type Err = GeovecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "round" => Ok(CapStyle::Round),
            "flat" | "butt" => Ok(CapStyle::Flat),
            "square" => Ok(CapStyle::Square),
            _ => Err(unknown("cap style", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for property in UnaryProperty::ALL {
            assert_eq!(property.name().parse::<UnaryProperty>().unwrap(), property);
        }
        for predicate in UnaryPredicate::ALL {
            assert_eq!(predicate.to_string().parse::<UnaryPredicate>().unwrap(), predicate);
        }
        for predicate in BinaryPredicate::ALL {
            assert_eq!(predicate.name().parse::<BinaryPredicate>().unwrap(), predicate);
        }
        for operation in BinaryOperation::ALL {
            assert_eq!(operation.name().parse::<BinaryOperation>().unwrap(), operation);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid_argument() {
        let err = "frobnicate".parse::<BinaryOperation>().unwrap_err();
        assert!(err.to_string().contains("Unknown binary operation 'frobnicate'"));
    }

    #[test]
    fn test_unary_operation_from_name() {
        for name in UnaryOperation::NAMES {
            let op = UnaryOperation::from_name(name, 0.5).unwrap();
            assert_eq!(op.name(), name);
        }
        assert_eq!(UnaryOperation::Buffer(2.0).to_string(), "buffer(2)");
        assert!(UnaryOperation::from_name("rotate", 1.0).is_err());
    }

    #[test]
    fn test_cap_style() {
        assert_eq!(CapStyle::default(), CapStyle::Round);
        assert_eq!("BUTT".parse::<CapStyle>().unwrap(), CapStyle::Flat);
        assert_eq!("square".parse::<CapStyle>().unwrap(), CapStyle::Square);
        assert!("pointy".parse::<CapStyle>().is_err());
    }
}
