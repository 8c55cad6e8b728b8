//! The persisted tag document.
//!
//! On disk the database is one JSON object with four members:
//!
//! ```text
//! {
//!   "ac":  { "31":         { "name": "Finance" } },
//!   "id":  { "31.11":      { "name": "Taxes" } },
//!   "ext": { "31.11+0001": { "name": "2024", "dirs": ["0000_0000_0000_0001"] } },
//!   "dir": { "0000_0000_0000_0001": { "name": "Receipts", "ext": ["31.11+0001"] } }
//! }
//! ```
//!
//! `ext.dirs` and `dir.ext` are the two halves of one membership edge and are
//! always updated together (see [`crate::graph`]). Missing top-level members
//! load as empty collections; unknown top-level members are carried through
//! untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A category or id record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(default)]
    pub name: String,
}

impl TagRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An extension record: a taggable unit linked to zero or more directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawExtRecord")]
pub struct ExtRecord {
    pub name: String,
    pub dirs: Vec<String>,
}

impl ExtRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirs: Vec::new(),
        }
    }
}

/// Accepts both the current `dirs` list and the legacy singular `dir` field.
#[derive(Deserialize)]
struct RawExtRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    dirs: Option<Vec<String>>,
    #[serde(default)]
    dir: Option<String>,
}

impl From<RawExtRecord> for ExtRecord {
    fn from(raw: RawExtRecord) -> Self {
        let mut dirs = raw.dirs.unwrap_or_default();
        if let Some(legacy) = raw.dir {
            if !legacy.is_empty() && !dirs.contains(&legacy) {
                dirs.push(legacy);
            }
        }
        Self {
            name: raw.name,
            dirs,
        }
    }
}

/// A vault directory record, holding the back half of each membership edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ext: Vec<String>,
}

impl DirRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ext: Vec::new(),
        }
    }
}

/// The whole tag database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagDb {
    #[serde(default)]
    pub ac: BTreeMap<String, TagRecord>,
    #[serde(default)]
    pub id: BTreeMap<String, TagRecord>,
    #[serde(default)]
    pub ext: BTreeMap<String, ExtRecord>,
    #[serde(default)]
    pub dir: BTreeMap<String, DirRecord>,
    /// Top-level members this version does not know about.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TagDb {
    /// The empty four-collection skeleton.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ac.is_empty() && self.id.is_empty() && self.ext.is_empty() && self.dir.is_empty()
    }

    /// Name of a directory, or `""` when it has no record.
    pub fn dir_name(&self, dir: &str) -> &str {
        self.dir.get(dir).map(|d| d.name.as_str()).unwrap_or("")
    }

    /// Checks that every `ext.dirs` entry is mirrored in `dir.ext` and vice versa.
    /// Returns a description of each broken half-edge.
    pub fn edge_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (ext_key, ext) in &self.ext {
            for dir_key in &ext.dirs {
                let mirrored = self
                    .dir
                    .get(dir_key)
                    .map(|d| d.ext.contains(ext_key))
                    .unwrap_or(false);
                if !mirrored {
                    problems.push(format!("{} -> {} has no backlink", ext_key, dir_key));
                }
            }
        }
        for (dir_key, dir) in &self.dir {
            for ext_key in &dir.ext {
                let mirrored = self
                    .ext
                    .get(ext_key)
                    .map(|e| e.dirs.contains(dir_key))
                    .unwrap_or(false);
                if !mirrored {
                    problems.push(format!("{} <- {} has no forward link", dir_key, ext_key));
                }
            }
        }
        problems
    }
}
