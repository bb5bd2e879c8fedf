//! Closed enumerations referenced by the document: hardware families, flash
//! storage-interface kinds, and peripheral bus kinds.

use std::fmt;
use std::str::FromStr;

/// A supported hardware family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Nordic nRF52 series.
    Nordic,
    /// Raspberry Pi RP2 series.
    RaspberryPi,
    /// Espressif ESP32 series.
    Espressif,
}

impl Family {
    /// Every supported family, in table order.
    pub const ALL: [Family; 3] = [Family::Nordic, Family::RaspberryPi, Family::Espressif];

    /// The identifier used in `board.family`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nordic => "nordic",
            Self::RaspberryPi => "raspberrypi",
            Self::Espressif => "espressif",
        }
    }

    /// Parse a family identifier. Matching ignores ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub(crate) fn expected() -> String {
        Self::ALL.map(|f| f.as_str()).join(", ")
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = crate::error::SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::error::SchemaError::UnsupportedFamily {
            family: s.to_string(),
        })
    }
}

/// The storage interface used for the board's filesystem flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlashKind {
    /// Internal flash only.
    None,
    /// External quad-SPI flash with dedicated data lines.
    Qspi,
    /// External flash on a plain SPI bus.
    Spi,
    /// External flash chosen from a list of supported devices.
    DeviceList,
}

impl FlashKind {
    /// Every flash kind.
    pub const ALL: [FlashKind; 4] = [
        FlashKind::None,
        FlashKind::Qspi,
        FlashKind::Spi,
        FlashKind::DeviceList,
    ];

    /// The identifier used in `flash.kind`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Qspi => "qspi",
            Self::Spi => "spi",
            Self::DeviceList => "device-list",
        }
    }

    /// Parse a flash kind identifier (exact match).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Conditional-compilation token guarding this kind's pin block, and the
    /// build variable that enables it.
    pub fn filesystem_token(&self) -> Option<&'static str> {
        match self {
            Self::Qspi => Some("QSPI_FLASH_FILESYSTEM"),
            Self::Spi => Some("SPI_FLASH_FILESYSTEM"),
            Self::None | Self::DeviceList => None,
        }
    }

    /// Whether `flash.devices` is meaningful for this kind.
    pub fn uses_device_list(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub(crate) fn expected() -> String {
        Self::ALL.map(|k| k.as_str()).join(", ")
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A peripheral bus kind with a conventional default pin set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusKind {
    I2c,
    Spi,
    Uart,
}

impl BusKind {
    /// Every bus kind, in emission order.
    pub const ALL: [BusKind; 3] = [BusKind::I2c, BusKind::Spi, BusKind::Uart];

    /// Section key under `buses`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I2c => "i2c",
            Self::Spi => "spi",
            Self::Uart => "uart",
        }
    }

    /// Upper-case token used in emitted identifiers.
    pub fn token(&self) -> &'static str {
        match self {
            Self::I2c => "I2C",
            Self::Spi => "SPI",
            Self::Uart => "UART",
        }
    }

    /// The pin roles that make up this bus, in emission order.
    pub fn roles(&self) -> &'static [BusRole] {
        match self {
            Self::I2c => &[BusRole::Scl, BusRole::Sda],
            Self::Spi => &[BusRole::Sck, BusRole::Mosi, BusRole::Miso],
            Self::Uart => &[BusRole::Rx, BusRole::Tx],
        }
    }
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single signal within a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusRole {
    Scl,
    Sda,
    Sck,
    Mosi,
    Miso,
    Rx,
    Tx,
}

impl BusRole {
    /// Field key inside a `buses.<kind>` section.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scl => "scl",
            Self::Sda => "sda",
            Self::Sck => "sck",
            Self::Mosi => "mosi",
            Self::Miso => "miso",
            Self::Rx => "rx",
            Self::Tx => "tx",
        }
    }

    /// Upper-case token used in emitted identifiers.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Scl => "SCL",
            Self::Sda => "SDA",
            Self::Sck => "SCK",
            Self::Mosi => "MOSI",
            Self::Miso => "MISO",
            Self::Rx => "RX",
            Self::Tx => "TX",
        }
    }
}
