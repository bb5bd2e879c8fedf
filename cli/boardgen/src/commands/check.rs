//! `boardgen check`: validate and render in memory without writing.

use std::path::Path;

use anyhow::{bail, Result};
use boardgen_emit::{render, Artifact};
use boardgen_family::ArtifactKind;
use serde::Serialize;

use super::{emit_options, load_board};

#[derive(Serialize)]
struct CheckReport<'a> {
    board: &'a str,
    family: &'static str,
    artifacts: Vec<ArtifactEntry>,
}

#[derive(Serialize)]
struct ArtifactEntry {
    kind: ArtifactKind,
    file: &'static str,
    bytes: usize,
}

impl From<&Artifact> for ArtifactEntry {
    fn from(artifact: &Artifact) -> Self {
        Self {
            kind: artifact.kind,
            file: artifact.file_name(),
            bytes: artifact.contents.len(),
        }
    }
}

pub fn run(config_path: &Path, format: Option<&str>) -> Result<()> {
    let json = match format.unwrap_or("human") {
        "human" => false,
        "json" => true,
        other => bail!("unknown format '{other}' (expected human or json)"),
    };

    let config = load_board(config_path)?;
    let artifacts = render(&config, &emit_options(None))?;

    let report = CheckReport {
        board: &config.board().name,
        family: config.family().as_str(),
        artifacts: artifacts.iter().map(ArtifactEntry::from).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({}): ok", report.board, report.family);
    for entry in &report.artifacts {
        println!("  {:<24} {:>6} bytes", entry.file, entry.bytes);
    }
    Ok(())
}
