//! `boardgen generate`: write a board's artifacts.

use std::path::Path;

use anyhow::{Context, Result};
use boardgen_emit::{default_destination, generate};

use super::{emit_options, load_board};

pub fn run(
    config_path: &Path,
    output_dir: Option<&Path>,
    root: Option<&Path>,
    year: Option<i32>,
) -> Result<()> {
    let config = load_board(config_path)?;

    let destination = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_destination(&config, root.unwrap_or(Path::new(".")))?,
    };
    tracing::debug!(destination = %destination.display(), "resolved destination");

    let written = generate(&config, &destination, &emit_options(year))
        .with_context(|| format!("generating {}", config.board().name))?;
    for file in &written {
        println!("Generated {}", file.path.display());
    }
    Ok(())
}
