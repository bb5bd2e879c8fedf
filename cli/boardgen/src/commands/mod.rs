//! CLI command implementations.

pub mod check;
pub mod families;
pub mod generate;

use std::path::Path;

use anyhow::{Context, Result};
use boardgen_emit::EmitOptions;
use boardgen_model::Configuration;
use chrono::Datelike;

/// Load and validate a board description.
fn load_board(path: &Path) -> Result<Configuration> {
    boardgen_model::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Emission options, defaulting the banner year to the current local year.
fn emit_options(year: Option<i32>) -> EmitOptions {
    EmitOptions::new(year.unwrap_or_else(|| chrono::Local::now().year()))
}
