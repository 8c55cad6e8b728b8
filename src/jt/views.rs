//! Read-only listings over a [`TagDb`].
//!
//! Views return plain data; the CLI decides how it looks. Nothing here
//! mutates the document.

use crate::error::{JtError, Result};
use crate::model::TagDb;
use crate::tag::{AcKey, DirKey, ExtKey, IdKey, TagKind};
use std::collections::BTreeMap;

/// Rows in a preview block before it is cut off.
pub const PREVIEW_LIMIT: usize = 5;

/// A key and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub name: String,
}

impl Entry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// An extension, optionally with its linked directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtEntry {
    pub key: String,
    pub name: String,
    pub dirs: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub category: Entry,
    pub ids: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdView {
    pub category: Entry,
    pub id: Entry,
    pub extensions: Vec<ExtEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionView {
    pub category: Entry,
    pub id: Entry,
    pub extension: ExtEntry,
}

/// An extension linked to a directory, with its parent id's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedExt {
    pub key: String,
    pub name: String,
    pub id: String,
    pub id_name: String,
}

/// One category row in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    /// `None` when the category has no record.
    pub name: Option<String>,
    pub extensions: Vec<LinkedExt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryView {
    pub key: String,
    pub name: String,
    /// Whether every known category was included.
    pub show_all: bool,
    pub groups: Vec<CategoryGroup>,
}

impl DirectoryView {
    /// The directory name, or its key when unnamed.
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            &self.key
        } else {
            &self.name
        }
    }
}

/// One extension's block in a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtPreview {
    pub key: String,
    pub name: String,
    /// At most [`PREVIEW_LIMIT`] directories, in link order.
    pub dirs: Vec<Entry>,
    /// Number of linked directories, shown or not.
    pub total: usize,
}

impl ExtPreview {
    pub fn truncated(&self) -> bool {
        self.total > PREVIEW_LIMIT
    }

    /// Placeholder rows needed to fill the block to [`PREVIEW_LIMIT`] rows.
    pub fn filler_rows(&self) -> usize {
        if self.truncated() {
            0
        } else {
            PREVIEW_LIMIT - self.dirs.len()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPreview {
    pub id: String,
    pub extensions: Vec<ExtPreview>,
}

fn name_of(map: &BTreeMap<String, crate::model::TagRecord>, key: &str) -> String {
    map.get(key).map(|r| r.name.clone()).unwrap_or_default()
}

fn children<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: String,
) -> impl Iterator<Item = (&'a String, &'a V)> + 'a {
    map.range(prefix.clone()..)
        .take_while(move |(k, _)| k.starts_with(&prefix))
}

pub fn list_categories(db: &TagDb) -> Vec<Entry> {
    db.ac
        .iter()
        .map(|(key, record)| Entry::new(key, &record.name))
        .collect()
}

pub fn category_view(db: &TagDb, key: &AcKey) -> Result<CategoryView> {
    let record = db
        .ac
        .get(key.as_str())
        .ok_or_else(|| JtError::not_found("AC", key.as_str()))?;
    let ids = children(&db.id, key.child_prefix())
        .map(|(k, r)| Entry::new(k, &r.name))
        .collect();
    Ok(CategoryView {
        category: Entry::new(key.as_str(), &record.name),
        ids,
    })
}

pub fn id_view(db: &TagDb, key: &IdKey, with_dirs: bool) -> Result<IdView> {
    let category = key.category();
    if !db.ac.contains_key(category.as_str()) {
        return Err(JtError::not_found("AC", category.as_str()));
    }
    let record = db
        .id
        .get(key.as_str())
        .ok_or_else(|| JtError::not_found("ID", key.as_str()))?;
    let extensions = children(&db.ext, key.child_prefix())
        .map(|(k, r)| ExtEntry {
            key: k.clone(),
            name: r.name.clone(),
            dirs: if with_dirs {
                sorted_dirs(db, &r.dirs)
            } else {
                Vec::new()
            },
        })
        .collect();
    Ok(IdView {
        category: Entry::new(category.as_str(), name_of(&db.ac, category.as_str())),
        id: Entry::new(key.as_str(), &record.name),
        extensions,
    })
}

pub fn extension_view(db: &TagDb, key: &ExtKey) -> Result<ExtensionView> {
    let category = key.category();
    let id = key.id();
    if !db.ac.contains_key(category.as_str()) {
        return Err(JtError::not_found("AC", category.as_str()));
    }
    if !db.id.contains_key(id.as_str()) {
        return Err(JtError::not_found("ID", id.as_str()));
    }
    let record = db
        .ext
        .get(key.as_str())
        .ok_or_else(|| JtError::not_found("EXT", key.as_str()))?;
    Ok(ExtensionView {
        category: Entry::new(category.as_str(), name_of(&db.ac, category.as_str())),
        id: Entry::new(id.as_str(), name_of(&db.id, id.as_str())),
        extension: ExtEntry {
            key: key.to_string(),
            name: record.name.clone(),
            dirs: sorted_dirs(db, &record.dirs),
        },
    })
}

/// Directories sorted by lowercase name. Equal names keep link order.
fn sorted_dirs(db: &TagDb, dirs: &[String]) -> Vec<Entry> {
    let mut entries: Vec<Entry> = dirs
        .iter()
        .map(|d| Entry::new(d, db.dir_name(d)))
        .collect();
    entries.sort_by_key(|e| e.name.to_lowercase());
    entries
}

/// Extensions whose `dirs` contain `dir`, sorted by key.
pub fn exts_for_dir(db: &TagDb, dir: &DirKey) -> Vec<Entry> {
    db.ext
        .iter()
        .filter(|(_, r)| r.dirs.iter().any(|d| d == dir.as_str()))
        .map(|(k, r)| Entry::new(k, &r.name))
        .collect()
}

/// Groups the extensions linked to `dir` by category.
///
/// With `show_all`, every known category gets a group, empty or not.
pub fn directory_view(db: &TagDb, dir: &DirKey, show_all: bool) -> DirectoryView {
    let mut grouped: BTreeMap<String, Vec<LinkedExt>> = BTreeMap::new();
    for entry in exts_for_dir(db, dir) {
        let Ok(key) = ExtKey::parse(&entry.key) else {
            continue;
        };
        let id = key.id();
        grouped
            .entry(key.category().to_string())
            .or_default()
            .push(LinkedExt {
                id_name: name_of(&db.id, id.as_str()),
                id: id.to_string(),
                key: entry.key,
                name: entry.name,
            });
    }
    if show_all {
        for category in db.ac.keys() {
            grouped.entry(category.clone()).or_default();
        }
    }

    let groups = grouped
        .into_iter()
        .map(|(category, extensions)| CategoryGroup {
            name: db.ac.get(&category).map(|r| r.name.clone()),
            category,
            extensions,
        })
        .collect();

    DirectoryView {
        key: dir.to_string(),
        name: db.dir_name(dir.as_str()).to_string(),
        show_all,
        groups,
    }
}

/// Capped preview of every extension under `id`.
///
/// Only the first [`PREVIEW_LIMIT`] links are considered; of those, keys that
/// are not directory-shaped are skipped.
pub fn id_preview(db: &TagDb, id: &IdKey) -> IdPreview {
    let extensions = children(&db.ext, id.child_prefix())
        .map(|(k, r)| ExtPreview {
            key: k.clone(),
            name: r.name.clone(),
            dirs: r
                .dirs
                .iter()
                .take(PREVIEW_LIMIT)
                .filter(|d| TagKind::Directory.matches(d))
                .map(|d| Entry::new(d, db.dir_name(d)))
                .collect(),
            total: r.dirs.len(),
        })
        .collect();
    IdPreview {
        id: id.to_string(),
        extensions,
    }
}

/// Every id and extension as pick candidates, in the order of their
/// `[key] name` lines: `+` sorts before `]`, so an id's extensions come
/// before the id itself.
pub fn taggable(db: &TagDb) -> Vec<Entry> {
    let mut entries: Vec<Entry> = db
        .id
        .iter()
        .map(|(k, r)| Entry::new(k, &r.name))
        .chain(db.ext.iter().map(|(k, r)| Entry::new(k, &r.name)))
        .collect();
    entries.sort_by_cached_key(|e| format!("[{}]", e.key));
    entries
}
