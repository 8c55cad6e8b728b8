//! The vault: a root folder whose immediate children are directory slots
//! named by [`DirKey`]s.
//!
//! Slot numbers are allocated from what is on disk, not from the database,
//! because a folder is created before the database learns about it.

use crate::error::{JtError, Result};
use crate::tag::{DirKey, TagKind};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    /// Trailing separators on `root` are dropped.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: strip_trailing_separators(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, dir: &DirKey) -> PathBuf {
        self.root.join(dir.as_str())
    }

    /// The slot `path` names, if it is exactly `<root>/<dir key>`.
    pub fn dir_key_for(&self, path: &Path) -> Result<DirKey> {
        let rel = path
            .strip_prefix(&self.root)
            .ok()
            .map(Path::to_path_buf)
            .or_else(|| {
                // cwd comes back with symlinks resolved
                let canonical = fs::canonicalize(&self.root).ok()?;
                path.strip_prefix(canonical).ok().map(Path::to_path_buf)
            })
            .ok_or_else(|| JtError::NotInVault(self.root.display().to_string()))?;
        let rel = rel.to_str().unwrap_or_default();
        if rel.is_empty() || !TagKind::Directory.matches(rel) {
            return Err(JtError::NotInVault(format!(
                "'{}' is not a '{}/XXXX_XXXX_XXXX_XXXX' slot",
                path.display(),
                self.root.display()
            )));
        }
        DirKey::parse(rel)
    }

    /// Names of the immediate subfolders that look like slots.
    pub fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(JtError::Io)? {
            let entry = entry.map_err(JtError::Io)?;
            if !entry.file_type().map_err(JtError::Io)?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if TagKind::Directory.matches(name) {
                    slots.push(name.to_string());
                }
            }
        }
        slots.sort();
        Ok(slots)
    }

    /// The slot after the highest one on disk.
    pub fn allocate(&self) -> Result<DirKey> {
        let slots = self.list_slots()?;
        let key = next_directory_key(&slots)?;
        debug!(existing = slots.len(), next = %key, "allocated directory slot");
        Ok(key)
    }

    /// Creates the folder for `dir`. Fails if it already exists.
    pub fn create_slot(&self, dir: &DirKey) -> Result<PathBuf> {
        let path = self.path_for(dir);
        match fs::create_dir(&path) {
            Ok(()) => Ok(path),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(JtError::Vault(format!(
                "directory '{}' already exists",
                path.display()
            ))),
            Err(e) => Err(JtError::Io(e)),
        }
    }

    /// Deletes the folder for `dir` if it is still empty.
    pub fn remove_slot(&self, dir: &DirKey) -> Result<()> {
        fs::remove_dir(self.path_for(dir)).map_err(JtError::Io)
    }
}

/// Highest existing slot number plus one; `0000_0000_0000_0000` for none.
///
/// Names that are not slot-shaped are ignored.
pub fn next_directory_key<S: AsRef<str>>(existing: &[S]) -> Result<DirKey> {
    let highest = existing
        .iter()
        .filter_map(|name| DirKey::parse(name.as_ref()).ok())
        .map(|key| key.number())
        .max();
    match highest {
        Some(n) => DirKey::from_number(n + 1),
        None => DirKey::from_number(0),
    }
}

fn strip_trailing_separators(path: PathBuf) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() || trimmed.len() == raw.len() {
        path
    } else {
        PathBuf::from(trimmed)
    }
}
