//! The per-family rule table.
//!
//! Each supported family has exactly one [`FamilyRules`] entry. Generators
//! read the flags here instead of matching on the family, so adding a family
//! means adding a row, not editing every generator.

use boardgen_model::{BusKind, Configuration, Family, Field, FlashKind, SchemaError};

use crate::artifact::ArtifactKind;

/// A build variable fed from a `board` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipVar {
    /// Variable name in the build-variables file.
    pub name: &'static str,
    /// Source field.
    pub source: Field,
    /// Whether the value is lower-cased.
    pub lowercase: bool,
}

impl ChipVar {
    const fn verbatim(name: &'static str, source: Field) -> Self {
        Self {
            name,
            source,
            lowercase: false,
        }
    }

    /// The value to emit, if the source field is present.
    pub fn value(&self, config: &Configuration) -> Option<String> {
        let board = config.board();
        let raw = match self.source {
            Field::ChipVariant => board.chip_variant.as_deref(),
            Field::ChipFamily => board.chip_family.as_deref(),
            Field::IdfTarget => board.idf_target.as_deref(),
            Field::DirectoryName => board.directory_name.as_deref(),
            _ => None,
        }?;
        Some(if self.lowercase {
            raw.to_lowercase()
        } else {
            raw.to_string()
        })
    }
}

/// Everything family-specific about generating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRules {
    /// The family this entry describes.
    pub family: Family,
    /// One-line description for listings.
    pub description: &'static str,
    /// Directory under `ports/` holding this family's boards.
    pub ports_dir: &'static str,
    /// Artifacts generated for every board of the family, in emission order.
    pub artifacts: &'static [ArtifactKind],
    /// Legal values of `flash.kind`.
    pub flash_kinds: &'static [FlashKind],
    /// Whether `BOARD_HAS_CRYSTAL` is emitted.
    pub emits_crystal: bool,
    /// Bus kind that gets a first-class board bus object definition.
    pub board_bus: Option<BusKind>,
    /// Extra `#include` lines for the constants header.
    pub header_includes: &'static [&'static str],
    /// Port/pin mapping macro for the kind-gated flash pin block in the
    /// constants header. `None` means the header carries no flash pins.
    pub flash_pin_map: Option<&'static str>,
    /// Build variables taken from `board` fields, in emission order.
    pub chip_vars: &'static [ChipVar],
    /// Prefix for flash/PSRAM sizing build variables.
    pub sizing_prefix: Option<&'static str>,
    /// Whether the `psram` section is meaningful.
    pub supports_psram: bool,
    /// Fields that must be present.
    pub required: &'static [Field],
}

static FAMILY_TABLE: [FamilyRules; 3] = [
    FamilyRules {
        family: Family::Nordic,
        description: "Nordic nRF52 series",
        ports_dir: "nordic",
        artifacts: &ArtifactKind::COMMON,
        flash_kinds: &[
            FlashKind::None,
            FlashKind::Qspi,
            FlashKind::Spi,
            FlashKind::DeviceList,
        ],
        emits_crystal: true,
        board_bus: None,
        header_includes: &["nrfx/hal/nrf_gpio.h"],
        flash_pin_map: Some("NRF_GPIO_PIN_MAP"),
        chip_vars: &[ChipVar {
            name: "MCU_CHIP",
            source: Field::ChipVariant,
            lowercase: true,
        }],
        sizing_prefix: None,
        supports_psram: false,
        required: &[
            Field::Usb,
            Field::UsbVid,
            Field::UsbPid,
            Field::UsbProduct,
            Field::UsbManufacturer,
            Field::ChipVariant,
        ],
    },
    FamilyRules {
        family: Family::RaspberryPi,
        description: "Raspberry Pi RP2 series",
        ports_dir: "raspberrypi",
        artifacts: &[
            ArtifactKind::ConstantsHeader,
            ArtifactKind::BuildVariables,
            ArtifactKind::PeripheralTable,
            ArtifactKind::InitStub,
            ArtifactKind::VendorBoardHeader,
        ],
        flash_kinds: &[FlashKind::None, FlashKind::DeviceList],
        emits_crystal: true,
        board_bus: Some(BusKind::I2c),
        header_includes: &[],
        flash_pin_map: None,
        chip_vars: &[
            ChipVar::verbatim("CHIP_VARIANT", Field::ChipVariant),
            ChipVar::verbatim("CHIP_FAMILY", Field::ChipFamily),
        ],
        sizing_prefix: None,
        supports_psram: false,
        required: &[
            Field::Usb,
            Field::UsbVid,
            Field::UsbPid,
            Field::UsbProduct,
            Field::UsbManufacturer,
            Field::ChipVariant,
            Field::ChipFamily,
        ],
    },
    FamilyRules {
        family: Family::Espressif,
        description: "Espressif ESP32 series",
        ports_dir: "espressif",
        artifacts: &[
            ArtifactKind::ConstantsHeader,
            ArtifactKind::BuildVariables,
            ArtifactKind::PeripheralTable,
            ArtifactKind::InitStub,
            ArtifactKind::VendorSdkConfig,
        ],
        flash_kinds: &[FlashKind::None],
        emits_crystal: false,
        board_bus: None,
        header_includes: &[],
        flash_pin_map: None,
        chip_vars: &[ChipVar::verbatim("IDF_TARGET", Field::IdfTarget)],
        sizing_prefix: Some("CIRCUITPY_ESP"),
        supports_psram: true,
        required: &[
            Field::Usb,
            Field::UsbVid,
            Field::UsbPid,
            Field::UsbProduct,
            Field::UsbManufacturer,
            Field::IdfTarget,
        ],
    },
];

/// Every family's rules, in table order.
pub fn all() -> &'static [FamilyRules] {
    &FAMILY_TABLE
}

/// Rules for an already-validated family.
pub fn rules_for(family: Family) -> &'static FamilyRules {
    // The table has one row per `Family` variant, in declaration order.
    &FAMILY_TABLE[family as usize]
}

/// Resolve a family identifier to its rules.
pub fn resolve(board_family: &str) -> Result<&'static FamilyRules, SchemaError> {
    let family: Family = board_family.parse()?;
    let rules = rules_for(family);
    tracing::debug!(family = %rules.family, artifacts = rules.artifacts.len(), "resolved family rules");
    Ok(rules)
}

impl FamilyRules {
    /// Check the family's requirements against a configuration.
    ///
    /// Reports the first missing mandatory field, or a `flash.kind` this
    /// family does not support.
    pub fn check(&self, config: &Configuration) -> Result<(), SchemaError> {
        if let Some(missing) = self.required.iter().find(|f| !config.is_present(**f)) {
            return Err(SchemaError::MissingField {
                field: missing.path().to_string(),
            });
        }

        if let Some(kind) = config.flash_kind() {
            if !self.flash_kinds.contains(&kind) {
                return Err(SchemaError::IllegalFlashKind {
                    family: self.family.to_string(),
                    kind: kind.to_string(),
                });
            }
        }

        Ok(())
    }
}
