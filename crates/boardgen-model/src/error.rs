//! Error types for loading and validating board configuration documents.

use std::path::PathBuf;

use crate::kinds::{Family, FlashKind};

/// A schema-level problem with an otherwise well-formed document.
///
/// Every variant names the offending section or field so the diagnostic can
/// point the author at the exact key to fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A section or field the document (or its family) requires is absent.
    #[error("missing required field `{field}`")]
    MissingField { field: String },

    /// `board.family` names a family with no rule set.
    #[error(
        "unsupported board family `{family}` in `board.family` (expected one of: {})",
        Family::expected()
    )]
    UnsupportedFamily { family: String },

    /// `flash.kind` is outside the closed set of storage-interface kinds.
    #[error(
        "unsupported flash kind `{kind}` in `flash.kind` (expected one of: {})",
        FlashKind::expected()
    )]
    UnsupportedFlashKind { kind: String },

    /// `flash.kind` is a known kind, but not one this family supports.
    #[error("flash kind `{kind}` is not available for family `{family}`")]
    IllegalFlashKind { family: String, kind: String },

    /// A name appears twice in a section that requires unique names.
    #[error("duplicate name `{name}` in `{section}`")]
    DuplicateName { section: String, name: String },

    /// An alias points at a name that is not defined in `pins`.
    #[error("alias `aliases.{alias}` targets `{target}`, which is not defined in `pins`")]
    DanglingAlias { alias: String, target: String },

    /// An alias has the same name as a pin.
    #[error("alias `aliases.{alias}` shadows the pin of the same name")]
    AliasShadowsPin { alias: String },

    /// A name that becomes part of an emitted identifier is not a C identifier.
    #[error("`{field}` value `{value}` is not a valid identifier")]
    InvalidIdentifier { field: String, value: String },

    /// A field holds a value of the wrong shape.
    #[error("invalid value for `{field}`: {detail}")]
    InvalidValue { field: String, detail: String },

    /// Two feature names produce the same build flag.
    #[error("features `{first}` and `{second}` both enable build flag `{flag}`")]
    FeatureCollision {
        first: String,
        second: String,
        flag: String,
    },
}

impl SchemaError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Errors that can occur while loading a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// I/O error reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed TOML.
    #[error("TOML parse error: {0}")]
    Syntax(#[from] toml::de::Error),

    /// The document is well-formed but violates the schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
