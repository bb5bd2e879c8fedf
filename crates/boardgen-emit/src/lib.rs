//! Artifact generators and the emission orchestrator for boardgen.
//!
//! Every artifact is produced by a [`Generator`], a pure function of the
//! validated configuration, the family rules and the [`EmitOptions`]. The
//! [`orchestrator`] renders a board's full artifact set in memory before
//! anything is written.

pub mod build_vars;
pub mod context;
pub mod error;
pub mod generator;
pub mod header;
pub mod init_stub;
pub mod orchestrator;
pub mod pin_table;
mod text;
pub mod vendor;

#[cfg(test)]
mod testing;

pub use context::{EmitOptions, GenContext};
pub use error::{EmitError, Result};
pub use generator::{generator_for, Generator};
pub use orchestrator::{default_destination, generate, render, Artifact, WrittenFile};
