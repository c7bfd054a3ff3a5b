//! Coordinate reference system values.
//!
//! A [`Crs`] is an opaque, structurally comparable descriptor. Spellings of
//! an EPSG code (`EPSG:4326`, `urn:ogc:def:crs:EPSG::4326`, CRS84) collapse
//! to one value, but `EPSG:4326` and the equivalent proj string are different
//! CRS values. The `Display` text of a value parses back into that value.

use crate::error::{GeovecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The CRS assumed when none is given
pub const DEFAULT_CRS: Crs = Crs::Epsg(4326);

/// Coordinate Reference System identified by EPSG code or proj definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Crs {
    /// A registered EPSG code
    Epsg(u32),
    /// Any other PROJ definition: a proj string such as
    /// `+proj=cea +datum=WGS84`, an `AUTHORITY:CODE` pair, WKT or PROJJSON.
    /// Build it with [`Crs::proj`] so EPSG spellings stay in `Epsg`.
    Proj(String),
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl Crs {
    pub fn epsg(code: u32) -> Self {
        Crs::Epsg(code)
    }

    /// CRS from a PROJ definition. Definitions naming an EPSG code or CRS84
    /// become [`Crs::Epsg`]; the text is otherwise kept, trimmed, unchecked.
    pub fn proj(definition: impl Into<String>) -> Self {
        let definition = definition.into();
        match definition.parse() {
            Ok(crs) => crs,
            Err(_) => Crs::Proj(definition.trim().to_string()),
        }
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Crs::Epsg(4326)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Crs::Epsg(3857)
    }

    /// Lambert cylindrical equal-area on the WGS 84 ellipsoid, metres
    pub fn equal_area() -> Self {
        Crs::proj("+proj=cea +lon_0=0 +lat_ts=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs")
    }

    /// EPSG code, if this CRS is registered
    pub fn epsg_code(&self) -> Option<u32> {
        match self {
            Crs::Epsg(code) => Some(*code),
            Crs::Proj(_) => None,
        }
    }

    /// Definition string accepted by PROJ
    pub fn definition(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crs::Epsg(code) => write!(f, "EPSG:{}", code),
            Crs::Proj(definition) => f.write_str(definition),
        }
    }
}

impl FromStr for Crs {
    type Err = GeovecError;

    /// Parse `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326`, CRS84 names, a proj
    /// string, an `AUTHORITY:CODE` pair such as `ESRI:54009`, WKT or PROJJSON.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.contains("proj=") {
            return Ok(Crs::Proj(trimmed.to_string()));
        }

        let upper = trimmed.to_uppercase();
        if upper.ends_with("CRS84") {
            return Ok(Crs::wgs84());
        }
        if let Some(code) = upper
            .strip_prefix("EPSG:")
            .or_else(|| upper.strip_prefix("URN:OGC:DEF:CRS:EPSG:"))
        {
            // The urn form carries an optional version before the code
            let code = code.rsplit(':').next().unwrap_or(code);
            return code.parse().map(Crs::Epsg).map_err(|_| {
                GeovecError::invalid_argument(format!("Invalid EPSG code in CRS '{}'", s))
            });
        }

        if is_authority_code(trimmed) || is_wkt_or_projjson(trimmed) {
            return Ok(Crs::Proj(trimmed.to_string()));
        }

        Err(GeovecError::invalid_argument(format!("Unrecognized CRS: '{}'", s)))
    }
}

/// `ESRI:54009`, `IGNF:LAMB93`
fn is_authority_code(s: &str) -> bool {
    match s.split_once(':') {
        Some((authority, code)) => {
            !authority.is_empty()
                && authority.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !code.is_empty()
                && !code.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn is_wkt_or_projjson(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.contains('[') && s.ends_with(']'))
}

impl TryFrom<String> for Crs {
    type Error = GeovecError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.to_string()
    }
}
