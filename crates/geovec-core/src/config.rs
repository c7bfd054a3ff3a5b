use crate::error::{GeovecError, Result};
use crate::models::Crs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Decimal precision used by tolerance comparisons unless configured
pub const DEFAULT_ALMOST_EQUAL_DECIMAL: u32 = 6;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Set programmatically by the caller
    Override,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Override => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for vector handling
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// CRS assumed for GeoJSON sources that declare none
    pub default_crs: ConfigValue<Crs>,
    pub almost_equal_decimal: ConfigValue<u32>,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            default_crs: ConfigValue::new(Crs::wgs84(), ConfigSource::Default),
            almost_equal_decimal: ConfigValue::new(
                DEFAULT_ALMOST_EQUAL_DECIMAL,
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeovecError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeovecError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(crs) = file_config.default_crs {
            let crs = parse_crs(&crs)?;
            self.default_crs.update(crs, ConfigSource::File);
        }

        if let Some(decimal) = file_config.almost_equal_decimal {
            self.almost_equal_decimal.update(decimal, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOVEC_DEFAULT_CRS
        if let Ok(crs_str) = env::var("GEOVEC_DEFAULT_CRS") {
            match parse_crs(&crs_str) {
                Ok(crs) => self.default_crs.update(crs, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOVEC_DEFAULT_CRS value '{}': expected e.g. EPSG:4326 \
                     or a proj string",
                    crs_str
                ),
            }
        }

        // GEOVEC_ALMOST_EQUAL_DECIMAL
        if let Ok(decimal_str) = env::var("GEOVEC_ALMOST_EQUAL_DECIMAL") {
            match decimal_str.parse::<u32>() {
                Ok(decimal) => self.almost_equal_decimal.update(decimal, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOVEC_ALMOST_EQUAL_DECIMAL value '{}': \
                     expected a non-negative integer",
                    decimal_str
                ),
            }
        }

        self
    }

    /// Apply caller-provided overrides
    pub fn update_from_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(crs) = overrides.default_crs {
            self.default_crs.update(crs, ConfigSource::Override);
        }

        if let Some(decimal) = overrides.almost_equal_decimal {
            self.almost_equal_decimal.update(decimal, ConfigSource::Override);
        }
    }

    /// Vertex tolerance derived from the configured decimal precision
    pub fn tolerance(&self) -> f64 {
        decimal_tolerance(self.almost_equal_decimal.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_crs".to_string(),
            (self.default_crs.value.to_string(), self.default_crs.source),
        );

        map.insert(
            "almost_equal_decimal".to_string(),
            (self.almost_equal_decimal.value.to_string(), self.almost_equal_decimal.source),
        );

        map
    }
}

/// `0.5 * 10^-decimal`, the largest per-ordinate difference still considered equal
pub fn decimal_tolerance(decimal: u32) -> f64 {
    let exponent = i32::try_from(decimal).unwrap_or(i32::MAX);
    0.5 * 10f64.powi(-exponent)
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    default_crs: Option<String>,
    almost_equal_decimal: Option<u32>,
}

/// Programmatic configuration overrides
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub default_crs: Option<Crs>,
    pub almost_equal_decimal: Option<u32>,
}

/// Parse a CRS from configuration text
pub fn parse_crs(s: &str) -> Result<Crs> {
    s.parse::<Crs>().map_err(|e| GeovecError::ConfigInvalid {
        key: "default_crs".to_string(),
        reason: e.to_string(),
    })
}
