// src/assets/store.rs — Name-addressed script storage under a single root
//
// The filesystem is the only source of truth: an asset exists iff
// `<root>/<name>.js` exists. Writes go to a hidden temp file in the same
// directory and are moved into place with a no-clobber rename, so readers
// never see a partial script and two racing uploads of one name cannot
// both win.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::assets::name::{AssetName, SCRIPT_EXTENSION};
use crate::infra::errors::{LucenceError, Result};

const TEMP_PREFIX: &str = ".upload-";
const TEMP_SUFFIX: &str = ".part";

/// Bytes of a not yet published asset. Dropping it removes the temp file.
#[derive(Debug)]
pub struct StagedScript {
    name: AssetName,
    file: NamedTempFile,
}

impl StagedScript {
    pub fn name(&self) -> &AssetName {
        &self.name
    }

    pub fn as_file(&self) -> &File {
        self.file.as_file()
    }
}

#[derive(Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it is missing. Safe to call repeatedly.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve_path(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.file_name())
    }

    pub fn exists(&self, name: &AssetName) -> bool {
        self.resolve_path(name).is_file()
    }

    /// Open a hidden temp file in the root for a new asset named `name`.
    ///
    /// Fails fast with `Conflict` if the name is already taken. The bytes
    /// only become visible under `<name>.js` through [`commit`](Self::commit).
    pub fn stage(&self, name: &AssetName) -> Result<StagedScript> {
        if self.resolve_path(name).exists() {
            return Err(LucenceError::Conflict {
                name: name.to_string(),
            });
        }

        let file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.root)?;
        Ok(StagedScript {
            name: name.clone(),
            file,
        })
    }

    /// Flush a staged script to disk and move it to `<name>.js`.
    /// Never overwrites an existing asset.
    pub fn commit(&self, staged: StagedScript) -> Result<()> {
        let target = self.resolve_path(&staged.name);
        staged.file.as_file().sync_all()?;

        // The check in `stage` is only a fast path; this is the atomic one.
        match staged.file.persist_noclobber(&target) {
            Ok(_) => {
                tracing::info!("Saved plugin script {}", target.display());
                Ok(())
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Err(LucenceError::Conflict {
                name: staged.name.to_string(),
            }),
            Err(e) => Err(LucenceError::Io(e.error)),
        }
    }

    /// Write `content` as a new asset. Never overwrites an existing one.
    ///
    /// If reading `content` fails part way, the temp file is discarded and
    /// no `<name>.js` is created.
    pub fn save(&self, name: &AssetName, mut content: impl Read) -> Result<()> {
        let mut staged = self.stage(name)?;
        std::io::copy(&mut content, &mut staged.file)?;
        self.commit(staged)
    }

    pub fn read(&self, name: &AssetName) -> Result<Vec<u8>> {
        match fs::read(self.resolve_path(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(LucenceError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove an asset. Removing one that does not exist succeeds.
    pub fn delete(&self, name: &AssetName) -> Result<()> {
        let path = self.resolve_path(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Deleted plugin script {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Delete of absent plugin script {}", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all stored scripts, sorted. A missing root lists as empty.
    pub fn list(&self) -> Result<Vec<AssetName>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match AssetName::parse(stem) {
                Ok(name) => names.push(name),
                Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
            }
        }
        names.sort();
        Ok(names)
    }
}
