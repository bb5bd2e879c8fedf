//! Scalar values of the free-form vendor configuration maps.

use std::fmt;

use crate::error::SchemaError;

/// A scalar value from `sdkconfig` or `pico_sdk_config`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ConfigValue {
    /// Convert a TOML value, rejecting arrays, tables and datetimes.
    pub(crate) fn from_toml(field: &str, value: toml::Value) -> Result<Self, SchemaError> {
        match value {
            toml::Value::String(s) => Ok(Self::Text(s)),
            toml::Value::Integer(i) => Ok(Self::Integer(i)),
            toml::Value::Float(f) => Ok(Self::Float(f)),
            toml::Value::Boolean(b) => Ok(Self::Boolean(b)),
            other => Err(SchemaError::InvalidValue {
                field: field.to_string(),
                detail: format!("expected a scalar value, found {}", other.type_str()),
            }),
        }
    }
}

/// Renders text verbatim; booleans as `true`/`false`.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}
