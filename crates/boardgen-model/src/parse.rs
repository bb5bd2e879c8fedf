//! Loading configuration documents from text and from disk.

use std::path::Path;

use crate::config::{Configuration, Document};
use crate::error::{ConfigError, Result, SchemaError};

/// Sections whose keys are names that must be unique.
const NAME_SECTIONS: [&str; 2] = ["pins", "aliases"];

/// Load a configuration from a TOML file.
pub fn load(path: &Path) -> Result<Configuration> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded board document");
    parse(&content)
}

/// Parse and validate a configuration from a TOML string.
pub fn parse(input: &str) -> Result<Configuration> {
    let doc: Document = toml::from_str(input).map_err(classify)?;
    Ok(Configuration::from_document(doc)?)
}

/// TOML already refuses duplicate keys; when the duplicate sits in a name
/// section it is reported as the schema violation it is.
fn classify(err: toml::de::Error) -> ConfigError {
    match duplicate_name(err.message()) {
        Some((section, name)) => SchemaError::DuplicateName { section, name }.into(),
        None => ConfigError::Syntax(err),
    }
}

/// Extract `(section, name)` from a "duplicate key `X` in table `pins`" message.
fn duplicate_name(message: &str) -> Option<(String, String)> {
    let rest = message.strip_prefix("duplicate key `")?;
    let (name, rest) = rest.split_once("` in table `")?;
    let section = rest.trim_end().strip_suffix('`')?;
    NAME_SECTIONS
        .contains(&section)
        .then(|| (section.to_string(), name.trim_matches('"').to_string()))
}
