//! Board configuration document model for boardgen.
//!
//! A board is described by one TOML document. This crate parses it into a
//! [`Configuration`] and enforces the schema invariants every generator
//! relies on:
//!
//! - `board.family` names a supported [`Family`]
//! - pin and alias names are unique, case-sensitive identifiers
//! - every alias targets a name defined in `pins`
//! - `flash.kind` is one of the closed set of [`FlashKind`]s
//!
//! Family-specific requirements (mandatory fields, legal flash kinds) are not
//! checked here; they belong to the family rule table.

pub mod board;
pub mod config;
pub mod error;
pub mod kinds;
pub mod names;
pub mod parse;
pub mod sections;
pub mod value;

use std::collections::BTreeMap;

/// Keys a section does not recognize, kept verbatim.
pub type Extra = BTreeMap<String, toml::Value>;

pub use board::Board;
pub use config::{Configuration, Field};
pub use error::{ConfigError, Result, SchemaError};
pub use kinds::{BusKind, BusRole, Family, FlashKind};
pub use names::NameTable;
pub use parse::{load, parse};
pub use sections::{
    BusSection, BusesSection, FlashSection, LedSection, PortPin, PsramSection, QspiLine,
    SpiFlashLine, UsbSection,
};
pub use value::ConfigValue;
