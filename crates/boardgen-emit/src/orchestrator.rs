//! Render every artifact a board's family requires, then write them as a set.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use boardgen_family::{resolve, rules_for, ArtifactKind};
use boardgen_model::{Configuration, SchemaError};
use tempfile::NamedTempFile;

use crate::context::{EmitOptions, GenContext};
use crate::error::{EmitError, Result};
use crate::generator::generator_for;

/// One rendered artifact, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub contents: String,
}

impl Artifact {
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }
}

/// A file written by [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Render the family's artifacts in memory, in emission order.
///
/// Fails if the configuration does not meet its family's requirements; no
/// generator runs in that case.
pub fn render(config: &Configuration, options: &EmitOptions) -> Result<Vec<Artifact>> {
    let rules = resolve(config.family().as_str())?;
    rules.check(config)?;

    let ctx = GenContext {
        config,
        rules,
        options,
    };
    let artifacts = rules
        .artifacts
        .iter()
        .map(|kind| {
            let contents = generator_for(*kind).render(&ctx);
            tracing::debug!(artifact = %kind, bytes = contents.len(), "rendered artifact");
            Artifact {
                kind: *kind,
                contents,
            }
        })
        .collect();
    Ok(artifacts)
}

/// Render and write the family's artifacts into `destination`.
///
/// Everything is rendered before the destination is touched. Each artifact is
/// first written to a temporary file inside `destination`; the temporaries
/// are renamed into place only once all of them have been written and every
/// target is known to be absent or a regular file. If a rename still fails,
/// the files already replaced are put back as they were.
pub fn generate(
    config: &Configuration,
    destination: &Path,
    options: &EmitOptions,
) -> Result<Vec<WrittenFile>> {
    let artifacts = render(config, options)?;

    std::fs::create_dir_all(destination)
        .map_err(|e| EmitError::destination(destination, e))?;

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        let mut tmp =
            NamedTempFile::new_in(destination).map_err(|e| EmitError::destination(destination, e))?;
        if let Err(e) = tmp.write_all(artifact.contents.as_bytes()) {
            return Err(EmitError::destination(tmp.path(), e));
        }
        staged.push((artifact, tmp));
    }

    let mut previous = Vec::with_capacity(staged.len());
    for (artifact, _) in &staged {
        let path = destination.join(artifact.file_name());
        let prior = prior_contents(&path).map_err(|e| EmitError::destination(&path, e))?;
        previous.push((path, prior));
    }

    let mut written = Vec::with_capacity(staged.len());
    for ((artifact, tmp), (path, _)) in staged.into_iter().zip(&previous) {
        if let Err(e) = tmp.persist(path) {
            restore(&previous[..written.len()]);
            return Err(EmitError::destination(path, e.error));
        }
        tracing::info!(path = %path.display(), bytes = artifact.contents.len(), "wrote artifact");
        written.push(WrittenFile {
            kind: artifact.kind,
            path: path.clone(),
            bytes: artifact.contents.len(),
        });
    }
    Ok(written)
}

/// Current contents of a target, `None` if it does not exist yet. Anything
/// other than a regular file is refused.
fn prior_contents(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_file() => std::fs::read(path).map(Some),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target exists and is not a regular file",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Put replaced targets back: rewrite their old contents, or remove them if
/// they did not exist before.
fn restore(replaced: &[(PathBuf, Option<Vec<u8>>)]) {
    for (path, prior) in replaced {
        let result = match prior {
            Some(bytes) => std::fs::write(path, bytes),
            None => std::fs::remove_file(path),
        };
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "could not restore artifact");
        }
    }
}

/// `<root>/ports/<family>/boards/<directory_name>`, with the directory name
/// lower-cased.
pub fn default_destination(config: &Configuration, root: &Path) -> Result<PathBuf> {
    let board = config.board();
    let name = board
        .directory_name
        .as_deref()
        .ok_or_else(|| SchemaError::MissingField {
            field: "board.directory_name".to_string(),
        })?;

    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SchemaError::InvalidValue {
            field: "board.directory_name".to_string(),
            detail: format!("`{name}` is not a single directory name"),
        }
        .into());
    }

    Ok(root
        .join("ports")
        .join(rules_for(board.family).ports_dir)
        .join("boards")
        .join(name.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{board, ESP, FEATHER, OPTIONS, PICO};

    fn kinds(artifacts: &[Artifact]) -> Vec<ArtifactKind> {
        artifacts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn artifact_sets_per_family() {
        let nordic = render(&board(FEATHER), &OPTIONS).unwrap();
        assert_eq!(kinds(&nordic), ArtifactKind::COMMON);

        let pico = render(&board(PICO), &OPTIONS).unwrap();
        assert_eq!(pico.last().unwrap().kind, ArtifactKind::VendorBoardHeader);
        assert_eq!(pico.len(), 5);

        let esp = render(&board(ESP), &OPTIONS).unwrap();
        assert_eq!(esp.last().unwrap().kind, ArtifactKind::VendorSdkConfig);
        assert_eq!(esp.len(), 5);
    }

    #[test]
    fn render_is_idempotent() {
        for doc in [FEATHER, PICO, ESP] {
            let config = board(doc);
            assert_eq!(
                render(&config, &OPTIONS).unwrap(),
                render(&config, &OPTIONS).unwrap()
            );
        }
    }

    #[test]
    fn generate_writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let written = generate(&board(PICO), &dest, &OPTIONS).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(&dest)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            [
                "board.c",
                "mpconfigboard.h",
                "mpconfigboard.mk",
                "pico-sdk-configboard.h",
                "pins.c"
            ]
        );
        for file in &written {
            let on_disk = std::fs::read_to_string(&file.path).unwrap();
            assert_eq!(on_disk.len(), file.bytes);
        }
    }

    #[test]
    fn generating_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = board(FEATHER);
        let first: Vec<String> = generate(&config, dir.path(), &OPTIONS)
            .unwrap()
            .iter()
            .map(|f| std::fs::read_to_string(&f.path).unwrap())
            .collect();
        let second: Vec<String> = generate(&config, dir.path(), &OPTIONS)
            .unwrap()
            .iter()
            .map(|f| std::fs::read_to_string(&f.path).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_check_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let doc = ESP.replace("[usb]", "[unused]");
        let err = generate(&board(&doc), &dest, &OPTIONS).unwrap_err();
        assert!(matches!(
            err,
            EmitError::Schema(SchemaError::MissingField { ref field }) if field == "usb"
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = generate(&board(ESP), &blocker.join("out"), &OPTIONS).unwrap_err();
        assert!(matches!(err, EmitError::Destination { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn blocked_target_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        std::fs::create_dir_all(dest.join("pins.c")).unwrap();
        std::fs::write(dest.join("pins.c").join("x"), "keep").unwrap();
        std::fs::write(dest.join("mpconfigboard.h"), "old").unwrap();

        let err = generate(&board(PICO), &dest, &OPTIONS).unwrap_err();
        assert!(
            matches!(err, EmitError::Destination { ref path, .. } if path.ends_with("pins.c"))
        );

        let mut names: Vec<String> = std::fs::read_dir(&dest)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["mpconfigboard.h", "pins.c"]);
        assert_eq!(
            std::fs::read_to_string(dest.join("mpconfigboard.h")).unwrap(),
            "old"
        );
    }

    #[test]
    fn restore_puts_back_old_contents_and_removes_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let existed = dir.path().join("mpconfigboard.h");
        let created = dir.path().join("pins.c");
        std::fs::write(&existed, "new").unwrap();
        std::fs::write(&created, "new").unwrap();

        restore(&[
            (existed.clone(), Some(b"old".to_vec())),
            (created.clone(), None),
        ]);

        assert_eq!(std::fs::read_to_string(&existed).unwrap(), "old");
        assert!(!created.exists());
    }

    #[test]
    fn default_destination_lowercases_directory_name() {
        let dest = default_destination(&board(FEATHER), Path::new("/repo")).unwrap();
        assert_eq!(
            dest,
            Path::new("/repo/ports/nordic/boards/feather_nrf52840_express")
        );
    }

    #[test]
    fn default_destination_requires_directory_name() {
        let err = default_destination(&board(PICO), Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            EmitError::Schema(SchemaError::MissingField { ref field }) if field == "board.directory_name"
        ));
    }

    #[test]
    fn default_destination_rejects_paths() {
        let doc = FEATHER.replace("Feather_nRF52840_Express", "../escape");
        let err = default_destination(&board(&doc), Path::new(".")).unwrap_err();
        assert!(matches!(err, EmitError::Schema(SchemaError::InvalidValue { .. })));
    }
}
