//! Optional document sections.
//!
//! Every field is an `Option` and no defaults are substituted: a field that
//! was not written in the document stays `None` all the way to the
//! generators. Keys a section does not know are kept in its `extra` table.

use serde::Deserialize;

use crate::kinds::{BusKind, BusRole, FlashKind};
use crate::Extra;

/// `[usb]`: USB device identification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsbSection {
    /// Vendor id, written verbatim (e.g. `"0x239A"`).
    pub vid: Option<String>,
    /// Product id, written verbatim.
    pub pid: Option<String>,
    /// Product string.
    pub product: Option<String>,
    /// Manufacturer string.
    pub manufacturer: Option<String>,
    /// Keys not recognized by the schema.
    #[serde(flatten)]
    pub extra: Extra,
}

/// `[led]`: status and indicator pins, as physical pin identifiers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LedSection {
    pub status: Option<String>,
    pub neopixel: Option<String>,
    pub neopixel_power: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One QSPI signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QspiLine {
    Data0,
    Data1,
    Data2,
    Data3,
    Sck,
    Cs,
}

impl QspiLine {
    /// Every line, in emission order.
    pub const ALL: [QspiLine; 6] = [
        QspiLine::Data0,
        QspiLine::Data1,
        QspiLine::Data2,
        QspiLine::Data3,
        QspiLine::Sck,
        QspiLine::Cs,
    ];

    /// Key stem in the `flash` section (`<stem>_port` / `<stem>_pin`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Data0 => "data0",
            Self::Data1 => "data1",
            Self::Data2 => "data2",
            Self::Data3 => "data3",
            Self::Sck => "sck",
            Self::Cs => "cs",
        }
    }

    /// Upper-case token used in emitted identifiers.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Data0 => "DATA0",
            Self::Data1 => "DATA1",
            Self::Data2 => "DATA2",
            Self::Data3 => "DATA3",
            Self::Sck => "SCK",
            Self::Cs => "CS",
        }
    }
}

/// A GPIO port and pin number pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPin {
    pub port: u32,
    pub pin: u32,
}

/// One plain-SPI flash signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiFlashLine {
    Mosi,
    Miso,
    Sck,
    Cs,
}

impl SpiFlashLine {
    /// Every line, in emission order.
    pub const ALL: [SpiFlashLine; 4] = [
        SpiFlashLine::Mosi,
        SpiFlashLine::Miso,
        SpiFlashLine::Sck,
        SpiFlashLine::Cs,
    ];

    /// Field key in the `flash` section.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Mosi => "mosi",
            Self::Miso => "miso",
            Self::Sck => "sck",
            Self::Cs => "cs",
        }
    }

    /// Upper-case token used in emitted identifiers.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Mosi => "MOSI",
            Self::Miso => "MISO",
            Self::Sck => "SCK",
            Self::Cs => "CS",
        }
    }
}

/// `[flash]`: filesystem flash description.
///
/// `kind` selects which of the pin fields are read; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FlashSection {
    /// The kind as written in the document (`kind`, or `type`).
    #[serde(rename = "kind", alias = "type")]
    pub declared_kind: Option<String>,
    /// Validated kind; filled in by [`Configuration`](crate::Configuration).
    #[serde(skip)]
    kind: Option<FlashKind>,

    pub data0_port: Option<u32>,
    pub data0_pin: Option<u32>,
    pub data1_port: Option<u32>,
    pub data1_pin: Option<u32>,
    pub data2_port: Option<u32>,
    pub data2_pin: Option<u32>,
    pub data3_port: Option<u32>,
    pub data3_pin: Option<u32>,
    pub sck_port: Option<u32>,
    pub sck_pin: Option<u32>,
    pub cs_port: Option<u32>,
    pub cs_pin: Option<u32>,

    pub mosi: Option<String>,
    pub miso: Option<String>,
    pub sck: Option<String>,
    pub cs: Option<String>,

    /// Supported external flash part numbers.
    pub devices: Option<Vec<String>>,

    /// Build-time sizing fields, independent of `kind`.
    pub size: Option<String>,
    pub mode: Option<String>,
    pub freq: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl FlashSection {
    /// The validated storage-interface kind, or `None` if the document did not
    /// declare one.
    pub fn kind(&self) -> Option<FlashKind> {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: Option<FlashKind>) {
        self.kind = kind;
    }

    /// Raw port and pin halves for a QSPI line.
    pub fn qspi_halves(&self, line: QspiLine) -> (Option<u32>, Option<u32>) {
        match line {
            QspiLine::Data0 => (self.data0_port, self.data0_pin),
            QspiLine::Data1 => (self.data1_port, self.data1_pin),
            QspiLine::Data2 => (self.data2_port, self.data2_pin),
            QspiLine::Data3 => (self.data3_port, self.data3_pin),
            QspiLine::Sck => (self.sck_port, self.sck_pin),
            QspiLine::Cs => (self.cs_port, self.cs_pin),
        }
    }

    /// A complete QSPI port/pin pair, if both halves are present.
    pub fn qspi_line(&self, line: QspiLine) -> Option<PortPin> {
        match self.qspi_halves(line) {
            (Some(port), Some(pin)) => Some(PortPin { port, pin }),
            _ => None,
        }
    }

    /// A plain-SPI flash pin reference.
    pub fn spi_line(&self, line: SpiFlashLine) -> Option<&str> {
        match line {
            SpiFlashLine::Mosi => self.mosi.as_deref(),
            SpiFlashLine::Miso => self.miso.as_deref(),
            SpiFlashLine::Sck => self.sck.as_deref(),
            SpiFlashLine::Cs => self.cs.as_deref(),
        }
    }

    /// The device list, unless the declared kind rules external flash out.
    pub fn active_devices(&self) -> Option<&[String]> {
        match self.kind {
            Some(kind) if !kind.uses_device_list() => None,
            _ => self.devices.as_deref(),
        }
    }
}

/// `[psram]`: external PSRAM parameters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PsramSection {
    pub size: Option<String>,
    pub mode: Option<String>,
    pub freq: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// One `[buses.<kind>]` section. Only the roles belonging to the bus kind
/// are read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BusSection {
    pub scl: Option<String>,
    pub sda: Option<String>,
    pub sck: Option<String>,
    pub mosi: Option<String>,
    pub miso: Option<String>,
    pub rx: Option<String>,
    pub tx: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl BusSection {
    /// The physical pin for a bus role, if declared.
    pub fn pin(&self, role: BusRole) -> Option<&str> {
        match role {
            BusRole::Scl => self.scl.as_deref(),
            BusRole::Sda => self.sda.as_deref(),
            BusRole::Sck => self.sck.as_deref(),
            BusRole::Mosi => self.mosi.as_deref(),
            BusRole::Miso => self.miso.as_deref(),
            BusRole::Rx => self.rx.as_deref(),
            BusRole::Tx => self.tx.as_deref(),
        }
    }
}

/// `[buses]`: default peripheral bus pin sets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BusesSection {
    pub i2c: Option<BusSection>,
    pub spi: Option<BusSection>,
    pub uart: Option<BusSection>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl BusesSection {
    /// The section for a bus kind, if declared.
    pub fn get(&self, kind: BusKind) -> Option<&BusSection> {
        match kind {
            BusKind::I2c => self.i2c.as_ref(),
            BusKind::Spi => self.spi.as_ref(),
            BusKind::Uart => self.uart.as_ref(),
        }
    }

    /// Declared roles of a bus kind, in role order.
    pub fn pins(&self, kind: BusKind) -> Vec<(BusRole, &str)> {
        let Some(bus) = self.get(kind) else {
            return Vec::new();
        };
        kind.roles()
            .iter()
            .filter_map(|role| bus.pin(*role).map(|pin| (*role, pin)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qspi_line_requires_both_halves() {
        let flash = FlashSection {
            data0_port: Some(0),
            data0_pin: Some(17),
            data1_port: Some(0),
            ..Default::default()
        };
        assert_eq!(
            flash.qspi_line(QspiLine::Data0),
            Some(PortPin { port: 0, pin: 17 })
        );
        assert_eq!(flash.qspi_line(QspiLine::Data1), None);
        assert_eq!(flash.qspi_line(QspiLine::Cs), None);
    }

    #[test]
    fn devices_kept_unless_kind_is_none() {
        let mut flash = FlashSection {
            devices: Some(vec!["GD25Q16C".into()]),
            ..Default::default()
        };
        assert_eq!(flash.active_devices().unwrap().len(), 1);
        flash.set_kind(Some(FlashKind::None));
        assert!(flash.active_devices().is_none());
        flash.set_kind(Some(FlashKind::DeviceList));
        assert_eq!(flash.active_devices().unwrap().len(), 1);
    }

    #[test]
    fn bus_pins_follow_role_order_and_skip_foreign_roles() {
        let buses: BusesSection = toml::from_str(
            r#"
[i2c]
sda = "GP0"
scl = "GP1"
rx = "GP5"
"#,
        )
        .unwrap();
        let pins = buses.pins(BusKind::I2c);
        assert_eq!(pins, vec![(BusRole::Scl, "GP1"), (BusRole::Sda, "GP0")]);
        assert!(buses.pins(BusKind::Uart).is_empty());
    }

    #[test]
    fn type_is_accepted_for_kind() {
        let flash: FlashSection = toml::from_str(r#"type = "qspi""#).unwrap();
        assert_eq!(flash.declared_kind.as_deref(), Some("qspi"));
    }
}
