//! The mandatory `[board]` section.

use serde::Deserialize;

use crate::error::SchemaError;
use crate::kinds::Family;
use crate::Extra;

/// `[board]` as written in the document, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BoardSection {
    name: Option<String>,
    mcu: Option<String>,
    #[serde(alias = "port_type")]
    family: Option<String>,
    has_crystal: Option<bool>,
    chip_variant: Option<String>,
    chip_family: Option<String>,
    idf_target: Option<String>,
    directory_name: Option<String>,
    #[serde(flatten)]
    extra: Extra,
}

/// Validated board identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Human-readable board name.
    pub name: String,
    /// MCU name string.
    pub mcu: String,
    /// Hardware family.
    pub family: Family,
    /// Whether the board has an external crystal.
    pub has_crystal: Option<bool>,
    /// Chip variant (e.g. `NRF52840`, `RP2040`).
    pub chip_variant: Option<String>,
    /// Chip family (e.g. `rp2`).
    pub chip_family: Option<String>,
    /// Vendor SDK target chip (e.g. `esp32s3`).
    pub idf_target: Option<String>,
    /// Directory name used for the default destination.
    pub directory_name: Option<String>,
    /// Keys not recognized by the schema.
    pub extra: Extra,
}

impl TryFrom<BoardSection> for Board {
    type Error = SchemaError;

    fn try_from(raw: BoardSection) -> Result<Self, SchemaError> {
        let name = raw.name.ok_or_else(|| SchemaError::missing("board.name"))?;
        let mcu = raw.mcu.ok_or_else(|| SchemaError::missing("board.mcu"))?;
        let family = raw
            .family
            .ok_or_else(|| SchemaError::missing("board.family"))?
            .parse::<Family>()?;

        Ok(Board {
            name,
            mcu,
            family,
            has_crystal: raw.has_crystal,
            chip_variant: raw.chip_variant,
            chip_family: raw.chip_family,
            idf_target: raw.idf_target,
            directory_name: raw.directory_name,
            extra: raw.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(toml_str: &str) -> Result<Board, SchemaError> {
        let raw: BoardSection = toml::from_str(toml_str).unwrap();
        Board::try_from(raw)
    }

    #[test]
    fn minimal_board() {
        let b = board(
            r#"
name = "Raspberry Pi Pico"
mcu = "RP2040"
family = "raspberrypi"
"#,
        )
        .unwrap();
        assert_eq!(b.family, Family::RaspberryPi);
        assert!(b.has_crystal.is_none());
        assert!(b.chip_variant.is_none());
    }

    #[test]
    fn port_type_is_a_synonym() {
        let b = board(
            r#"
name = "Feather"
mcu = "nRF52840"
port_type = "Nordic"
"#,
        )
        .unwrap();
        assert_eq!(b.family, Family::Nordic);
    }

    #[test]
    fn missing_family() {
        let err = board("name = \"x\"\nmcu = \"y\"").unwrap_err();
        assert_eq!(err, SchemaError::missing("board.family"));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let b = board(
            r#"
name = "S3 DevKit"
mcu = "ESP32S3"
family = "espressif"
vendor = "Espressif"
url = "https://example.com"
"#,
        )
        .unwrap();
        assert_eq!(b.extra.len(), 2);
        assert_eq!(b.extra["vendor"].as_str(), Some("Espressif"));
    }
}
