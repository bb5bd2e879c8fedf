//! The validated configuration document.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::board::{Board, BoardSection};
use crate::error::SchemaError;
use crate::kinds::{BusKind, Family, FlashKind};
use crate::names::NameTable;
use crate::sections::{
    BusesSection, FlashSection, LedSection, PsramSection, QspiLine, SpiFlashLine, UsbSection,
};
use crate::value::ConfigValue;
use crate::Extra;

/// The document exactly as deserialized, before any validation.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Document {
    board: Option<BoardSection>,
    usb: Option<UsbSection>,
    led: Option<LedSection>,
    flash: Option<FlashSection>,
    psram: Option<PsramSection>,
    buses: Option<BusesSection>,
    pins: Option<NameTable>,
    aliases: Option<NameTable>,
    features: Option<BTreeMap<String, bool>>,
    sdkconfig: Option<toml::Table>,
    pico_sdk_config: Option<toml::Table>,
    #[serde(flatten)]
    extra: Extra,
}

/// A field whose presence a family may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ChipVariant,
    ChipFamily,
    IdfTarget,
    DirectoryName,
    Usb,
    UsbVid,
    UsbPid,
    UsbProduct,
    UsbManufacturer,
}

impl Field {
    /// Dotted path of the field in the document.
    pub fn path(&self) -> &'static str {
        match self {
            Self::ChipVariant => "board.chip_variant",
            Self::ChipFamily => "board.chip_family",
            Self::IdfTarget => "board.idf_target",
            Self::DirectoryName => "board.directory_name",
            Self::Usb => "usb",
            Self::UsbVid => "usb.vid",
            Self::UsbPid => "usb.pid",
            Self::UsbProduct => "usb.product",
            Self::UsbManufacturer => "usb.manufacturer",
        }
    }
}

/// A parsed and validated board configuration.
///
/// Construction through [`parse`](crate::parse) or [`Configuration::from_toml`]
/// guarantees every invariant of the schema: a supported family, unique pin
/// and alias names, alias targets that exist, and a known flash kind.
/// Optional sections are exposed as `Option<&T>`; `None` means the section was
/// not written, which is distinct from an empty section.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    board: Board,
    usb: Option<UsbSection>,
    led: Option<LedSection>,
    flash: Option<FlashSection>,
    psram: Option<PsramSection>,
    buses: Option<BusesSection>,
    pins: Option<NameTable>,
    aliases: Option<NameTable>,
    features: Option<BTreeMap<String, bool>>,
    sdkconfig: Option<BTreeMap<String, ConfigValue>>,
    pico_sdk_config: Option<BTreeMap<String, ConfigValue>>,
    extra: Extra,
}

impl Configuration {
    /// Parse and validate a TOML document.
    pub fn from_toml(input: &str) -> crate::error::Result<Self> {
        crate::parse::parse(input)
    }

    /// Validate a deserialized document.
    pub(crate) fn from_document(doc: Document) -> Result<Self, SchemaError> {
        let board = Board::try_from(doc.board.ok_or_else(|| SchemaError::missing("board"))?)?;

        if let Some(pins) = &doc.pins {
            check_names("pins", pins)?;
            for (name, physical) in pins {
                check_identifier(&format!("pins.{name}"), physical)?;
            }
        }

        if let Some(aliases) = &doc.aliases {
            check_names("aliases", aliases)?;
            check_aliases(aliases, doc.pins.as_ref())?;
        }

        if let Some(led) = &doc.led {
            for (key, pin) in [
                ("led.status", &led.status),
                ("led.neopixel", &led.neopixel),
                ("led.neopixel_power", &led.neopixel_power),
            ] {
                if let Some(pin) = pin {
                    check_identifier(key, pin)?;
                }
            }
        }

        if let Some(buses) = &doc.buses {
            for kind in BusKind::ALL {
                for (role, pin) in buses.pins(kind) {
                    check_identifier(&format!("buses.{kind}.{}", role.as_str()), pin)?;
                }
            }
        }

        let flash = doc.flash.map(validate_flash).transpose()?;

        if let Some(features) = &doc.features {
            check_features(features)?;
        }

        let sdkconfig = doc
            .sdkconfig
            .map(|table| vendor_map("sdkconfig", table))
            .transpose()?;
        let pico_sdk_config = doc
            .pico_sdk_config
            .map(|table| vendor_map("pico_sdk_config", table))
            .transpose()?;

        tracing::debug!(
            board = %board.name,
            family = %board.family,
            pins = doc.pins.as_ref().map_or(0, NameTable::len),
            aliases = doc.aliases.as_ref().map_or(0, NameTable::len),
            "validated board configuration"
        );

        Ok(Configuration {
            board,
            usb: doc.usb,
            led: doc.led,
            flash,
            psram: doc.psram,
            buses: doc.buses,
            pins: doc.pins,
            aliases: doc.aliases,
            features: doc.features,
            sdkconfig,
            pico_sdk_config,
            extra: doc.extra,
        })
    }

    /// The `[board]` section.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The declared hardware family.
    pub fn family(&self) -> Family {
        self.board.family
    }

    pub fn usb(&self) -> Option<&UsbSection> {
        self.usb.as_ref()
    }

    pub fn led(&self) -> Option<&LedSection> {
        self.led.as_ref()
    }

    pub fn flash(&self) -> Option<&FlashSection> {
        self.flash.as_ref()
    }

    /// The validated flash kind, if a `flash` section declares one.
    pub fn flash_kind(&self) -> Option<FlashKind> {
        self.flash.as_ref().and_then(FlashSection::kind)
    }

    pub fn psram(&self) -> Option<&PsramSection> {
        self.psram.as_ref()
    }

    pub fn buses(&self) -> Option<&BusesSection> {
        self.buses.as_ref()
    }

    /// Logical pin names mapped to physical pin identifiers, in document order.
    pub fn pins(&self) -> Option<&NameTable> {
        self.pins.as_ref()
    }

    /// Alias names mapped to logical pin names, in document order.
    pub fn aliases(&self) -> Option<&NameTable> {
        self.aliases.as_ref()
    }

    /// Feature switches, sorted by name.
    pub fn features(&self) -> Option<&BTreeMap<String, bool>> {
        self.features.as_ref()
    }

    /// Names of features switched on, sorted.
    pub fn enabled_features(&self) -> impl Iterator<Item = &str> {
        self.features
            .iter()
            .flatten()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| name.as_str())
    }

    pub fn sdkconfig(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        self.sdkconfig.as_ref()
    }

    pub fn pico_sdk_config(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        self.pico_sdk_config.as_ref()
    }

    /// Top-level keys the schema does not recognize.
    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    /// Physical pin identifier of a logical pin.
    pub fn pin(&self, name: &str) -> Option<&str> {
        self.pins.as_ref()?.get(name)
    }

    /// Physical pin identifier an alias resolves to.
    ///
    /// Alias targets are always pin names, so a single lookup suffices.
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        let target = self.aliases.as_ref()?.get(alias)?;
        self.pin(target)
    }

    /// Whether a family-checkable field is present.
    pub fn is_present(&self, field: Field) -> bool {
        let usb = self.usb.as_ref();
        match field {
            Field::ChipVariant => self.board.chip_variant.is_some(),
            Field::ChipFamily => self.board.chip_family.is_some(),
            Field::IdfTarget => self.board.idf_target.is_some(),
            Field::DirectoryName => self.board.directory_name.is_some(),
            Field::Usb => usb.is_some(),
            Field::UsbVid => usb.is_some_and(|u| u.vid.is_some()),
            Field::UsbPid => usb.is_some_and(|u| u.pid.is_some()),
            Field::UsbProduct => usb.is_some_and(|u| u.product.is_some()),
            Field::UsbManufacturer => usb.is_some_and(|u| u.manufacturer.is_some()),
        }
    }
}

/// Whether `s` is usable as (part of) a C identifier.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `s` can follow a prefix in an identifier (may start with a digit).
fn is_identifier_tail(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(field: &str, value: &str) -> Result<(), SchemaError> {
    if is_identifier_tail(value) {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn check_names(section: &str, table: &NameTable) -> Result<(), SchemaError> {
    for (name, _) in table {
        if !is_identifier(name) {
            return Err(SchemaError::InvalidIdentifier {
                field: section.to_string(),
                value: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_aliases(aliases: &NameTable, pins: Option<&NameTable>) -> Result<(), SchemaError> {
    for (alias, target) in aliases {
        let Some(pins) = pins.filter(|p| p.contains(target)) else {
            return Err(SchemaError::DanglingAlias {
                alias: alias.to_string(),
                target: target.to_string(),
            });
        };
        if pins.contains(alias) {
            return Err(SchemaError::AliasShadowsPin {
                alias: alias.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_flash(mut flash: FlashSection) -> Result<FlashSection, SchemaError> {
    let kind = match flash.declared_kind.as_deref() {
        None => None,
        Some(declared) => Some(FlashKind::parse(declared).ok_or_else(|| {
            SchemaError::UnsupportedFlashKind {
                kind: declared.to_string(),
            }
        })?),
    };
    flash.set_kind(kind);

    match kind {
        Some(FlashKind::Qspi) => {
            for line in QspiLine::ALL {
                match flash.qspi_halves(line) {
                    (Some(_), None) => {
                        return Err(SchemaError::missing(format!("flash.{}_pin", line.key())))
                    }
                    (None, Some(_)) => {
                        return Err(SchemaError::missing(format!("flash.{}_port", line.key())))
                    }
                    _ => {}
                }
            }
        }
        Some(FlashKind::Spi) => {
            for line in SpiFlashLine::ALL {
                if let Some(pin) = flash.spi_line(line) {
                    check_identifier(&format!("flash.{}", line.key()), pin)?;
                }
            }
        }
        _ => {}
    }

    Ok(flash)
}

fn check_features(features: &BTreeMap<String, bool>) -> Result<(), SchemaError> {
    let mut flags: BTreeMap<String, &str> = BTreeMap::new();
    for name in features.keys() {
        if !is_identifier(name) {
            return Err(SchemaError::InvalidIdentifier {
                field: "features".to_string(),
                value: name.clone(),
            });
        }
        let flag = name.to_ascii_uppercase();
        if let Some(first) = flags.get(&flag) {
            return Err(SchemaError::FeatureCollision {
                first: first.to_string(),
                second: name.clone(),
                flag,
            });
        }
        flags.insert(flag, name);
    }
    Ok(())
}

fn vendor_map(
    section: &str,
    table: toml::Table,
) -> Result<BTreeMap<String, ConfigValue>, SchemaError> {
    let mut out = BTreeMap::new();
    for (key, value) in table {
        if !is_identifier(&key) {
            return Err(SchemaError::InvalidIdentifier {
                field: section.to_string(),
                value: key,
            });
        }
        let value = ConfigValue::from_toml(&format!("{section}.{key}"), value)?;
        out.insert(key, value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::ConfigError;

    const NORDIC: &str = r#"
[board]
name = "Feather nRF52840"
mcu = "nRF52840"
family = "nordic"
has_crystal = true
chip_variant = "NRF52840"
directory_name = "custom_feather_nrf52840"

[usb]
vid = "0x239A"
pid = "0x8029"
product = "Feather nRF52840 Express"
manufacturer = "Adafruit Industries LLC"

[led]
status = "P1_15"
neopixel = "P0_16"

[flash]
kind = "qspi"
data0_port = 0
data0_pin = 17
cs_port = 0
cs_pin = 20
devices = ["GD25Q16C"]

[pins]
D13 = "P1_09"
A0 = "P0_04"
SCL = "P0_11"

[aliases]
LED = "D13"
"#;

    fn schema_err(input: &str) -> SchemaError {
        match parse(input) {
            Err(ConfigError::Schema(e)) => e,
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn parse_full_nordic() {
        let config = parse(NORDIC).unwrap();
        assert_eq!(config.family(), Family::Nordic);
        assert_eq!(config.flash_kind(), Some(FlashKind::Qspi));
        assert_eq!(config.pins().unwrap().len(), 3);
        assert_eq!(config.resolve_alias("LED"), Some("P1_09"));
        assert!(config.psram().is_none());
        assert!(config.buses().is_none());
        assert!(config.is_present(Field::UsbVid));
        assert!(!config.is_present(Field::IdfTarget));
    }

    #[test]
    fn absent_and_empty_sections_differ() {
        let config = parse(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[psram]
"#,
        )
        .unwrap();
        assert!(config.psram().is_some());
        assert!(config.psram().unwrap().size.is_none());
        assert!(config.led().is_none());
        assert!(config.pins().is_none());
    }

    #[test]
    fn missing_board_section() {
        assert_eq!(
            schema_err("[usb]\nvid = \"0x1\""),
            SchemaError::missing("board")
        );
    }

    #[test]
    fn unsupported_family_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "atmel-samd"
"#,
        );
        assert!(matches!(err, SchemaError::UnsupportedFamily { family } if family == "atmel-samd"));
    }

    #[test]
    fn unsupported_flash_kind_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[flash]
kind = "emmc"
"#,
        );
        assert!(matches!(err, SchemaError::UnsupportedFlashKind { kind } if kind == "emmc"));
    }

    #[test]
    fn dangling_alias_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[pins]
D13 = "P1_09"

[aliases]
LED = "D12"
"#,
        );
        assert_eq!(
            err,
            SchemaError::DanglingAlias {
                alias: "LED".into(),
                target: "D12".into()
            }
        );
    }

    #[test]
    fn alias_without_pins_is_dangling() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[aliases]
LED = "D13"
"#,
        );
        assert!(matches!(err, SchemaError::DanglingAlias { .. }));
    }

    #[test]
    fn alias_of_alias_is_dangling() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[pins]
D13 = "P1_09"

[aliases]
LED = "D13"
STATUS = "LED"
"#,
        );
        assert!(matches!(err, SchemaError::DanglingAlias { alias, .. } if alias == "STATUS"));
    }

    #[test]
    fn alias_shadowing_pin_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[pins]
D13 = "P1_09"
LED = "P1_15"

[aliases]
LED = "D13"
"#,
        );
        assert_eq!(err, SchemaError::AliasShadowsPin { alias: "LED".into() });
    }

    #[test]
    fn half_qspi_pair_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[flash]
kind = "qspi"
data2_port = 0
"#,
        );
        assert_eq!(err, SchemaError::missing("flash.data2_pin"));
    }

    #[test]
    fn half_qspi_pair_ignored_for_other_kinds() {
        let config = parse(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[flash]
kind = "spi"
data2_port = 0
mosi = "P0_13"
"#,
        )
        .unwrap();
        assert_eq!(config.flash_kind(), Some(FlashKind::Spi));
    }

    #[test]
    fn invalid_pin_name_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "nordic"

[pins]
"D-13" = "P1_09"
"#,
        );
        assert!(matches!(err, SchemaError::InvalidIdentifier { value, .. } if value == "D-13"));
    }

    #[test]
    fn colliding_feature_flags_are_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "raspberrypi"

[features]
camera = true
CAMERA = false
"#,
        );
        assert!(matches!(err, SchemaError::FeatureCollision { flag, .. } if flag == "CAMERA"));
    }

    #[test]
    fn enabled_features_are_sorted_and_filtered() {
        let config = parse(
            r#"
[board]
name = "b"
mcu = "m"
family = "raspberrypi"

[features]
usb_host = true
audiobusio = false
bitmapfilter = true
"#,
        )
        .unwrap();
        let enabled: Vec<_> = config.enabled_features().collect();
        assert_eq!(enabled, ["bitmapfilter", "usb_host"]);
    }

    #[test]
    fn non_scalar_vendor_value_is_rejected() {
        let err = schema_err(
            r#"
[board]
name = "b"
mcu = "m"
family = "espressif"

[sdkconfig]
CONFIG_LIST = [1, 2]
"#,
        );
        assert!(matches!(err, SchemaError::InvalidValue { field, .. } if field == "sdkconfig.CONFIG_LIST"));
    }

    #[test]
    fn unknown_sections_are_preserved() {
        let config = parse(
            r#"
[board]
name = "b"
mcu = "m"
family = "espressif"

[frozen]
libraries = ["Adafruit_CircuitPython_NeoPixel"]
"#,
        )
        .unwrap();
        assert!(config.extra().contains_key("frozen"));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("D13"));
        assert!(is_identifier("_x"));
        assert!(!is_identifier("13D"));
        assert!(!is_identifier(""));
        assert!(is_identifier_tail("0_17"));
    }
}
