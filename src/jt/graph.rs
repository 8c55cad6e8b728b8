//! Tag graph operations.
//!
//! Every mutation of a [`TagDb`] goes through the methods here. They share one
//! rule: all checks run before the first write, so an `Err` always leaves the
//! document exactly as it was. Callers persist only after `Ok`.
//!
//! ## Cascades
//!
//! - Moving a category re-keys its ids and extensions and rewrites directory
//!   backlinks to the new extension keys.
//! - Moving an id re-keys its extensions and their backlinks. The category
//!   prefix cannot change.
//! - Moving an extension keeps its name and `dirs` and rewrites backlinks. The
//!   id prefix cannot change.
//! - Removing a category or id is blocked while children exist.
//! - Removing an extension detaches it from its directories and prunes any
//!   directory record left with no extensions.
//!
//! `unlink` never prunes a directory record, even when it empties it. Only
//! extension removal does.

use crate::error::{JtError, Result};
use crate::model::{DirRecord, ExtRecord, TagDb, TagRecord};
use crate::tag::{AcKey, DirKey, ExtKey, IdKey, TagKey, TagKind};
use std::collections::{BTreeMap, HashMap};

/// What a re-key touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub kind: TagKind,
    pub from: String,
    pub to: String,
    pub name: String,
    /// Directories linked to a moved extension (extension moves only).
    pub dirs: Vec<String>,
    /// `(old, new)` for every child key re-keyed by the cascade.
    pub cascaded: Vec<(String, String)>,
}

/// What a removal touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveReport {
    pub kind: TagKind,
    pub key: String,
    pub name: String,
    /// Directory records deleted because they lost their last extension.
    pub pruned_dirs: Vec<String>,
}

impl TagDb {
    pub fn add_category(&mut self, key: &AcKey, name: &str) -> Result<()> {
        if self.ac.contains_key(key.as_str()) {
            return Err(JtError::already_exists("AC", key.as_str()));
        }
        self.ac.insert(key.to_string(), TagRecord::new(name));
        Ok(())
    }

    pub fn add_id(&mut self, key: &IdKey, name: &str) -> Result<()> {
        let parent = key.category();
        if !self.ac.contains_key(parent.as_str()) {
            return Err(JtError::parent_missing("AC", parent.as_str()));
        }
        if self.id.contains_key(key.as_str()) {
            return Err(JtError::already_exists("ID", key.as_str()));
        }
        self.id.insert(key.to_string(), TagRecord::new(name));
        Ok(())
    }

    pub fn add_extension(&mut self, key: &ExtKey, name: &str) -> Result<()> {
        let parent = key.id();
        if !self.id.contains_key(parent.as_str()) {
            return Err(JtError::parent_missing("ID", parent.as_str()));
        }
        if self.ext.contains_key(key.as_str()) {
            return Err(JtError::already_exists("EXT", key.as_str()));
        }
        self.ext.insert(key.to_string(), ExtRecord::new(name));
        Ok(())
    }

    /// Creates a category, id or extension.
    pub fn add(&mut self, key: &TagKey, name: &str) -> Result<()> {
        match key {
            TagKey::Category(k) => self.add_category(k, name),
            TagKey::Id(k) => self.add_id(k, name),
            TagKey::Extension(k) => self.add_extension(k, name),
            TagKey::Directory(k) => Err(JtError::InvalidFormat(format!(
                "'{}' is a directory; directories are created with `jt append`",
                k
            ))),
        }
    }

    /// The next free extension key under `id`: highest live number plus one.
    ///
    /// Gaps left by removals are never refilled. There is no persisted
    /// counter, so removing the highest extension lowers the mark again.
    pub fn next_extension_key(&self, id: &IdKey) -> Result<ExtKey> {
        let prefix = id.child_prefix();
        let highest = self
            .ext
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, _)| ExtKey::parse(key).ok())
            .map(|key| key.number())
            .max()
            .unwrap_or(0);
        ExtKey::from_parts(id, highest + 1)
    }

    /// Allocates the next extension under `id`, names it and links it to `dir`.
    pub fn create_linked_extension(
        &mut self,
        id: &IdKey,
        name: &str,
        dir: &DirKey,
    ) -> Result<ExtKey> {
        if !self.id.contains_key(id.as_str()) {
            return Err(JtError::not_found("ID", id.as_str()));
        }
        let key = self.next_extension_key(id)?;
        self.add_extension(&key, name)?;
        self.link(&key, dir)?;
        Ok(key)
    }

    /// Links `ext` and `dir` in both directions.
    ///
    /// Returns `false` if they were already linked. A directory record with an
    /// empty name is created when `dir` has none.
    pub fn link(&mut self, ext: &ExtKey, dir: &DirKey) -> Result<bool> {
        let record = self
            .ext
            .get_mut(ext.as_str())
            .ok_or_else(|| JtError::not_found("EXT", ext.as_str()))?;
        if record.dirs.iter().any(|d| d == dir.as_str()) {
            return Ok(false);
        }
        record.dirs.push(dir.to_string());

        let dir_record = self
            .dir
            .entry(dir.to_string())
            .or_insert_with(|| DirRecord::new(""));
        if !dir_record.ext.iter().any(|e| e == ext.as_str()) {
            dir_record.ext.push(ext.to_string());
        }
        Ok(true)
    }

    /// Removes the `ext`/`dir` edge from both sides.
    ///
    /// Absent halves are ignored. Returns whether anything changed. The
    /// directory record is kept even if its extension list becomes empty.
    pub fn unlink(&mut self, ext: &ExtKey, dir: &DirKey) -> Result<bool> {
        let record = self
            .ext
            .get_mut(ext.as_str())
            .ok_or_else(|| JtError::not_found("EXT", ext.as_str()))?;
        let before = record.dirs.len();
        record.dirs.retain(|d| d != dir.as_str());
        let mut changed = record.dirs.len() != before;

        if let Some(dir_record) = self.dir.get_mut(dir.as_str()) {
            let before = dir_record.ext.len();
            dir_record.ext.retain(|e| e != ext.as_str());
            changed |= dir_record.ext.len() != before;
        }
        Ok(changed)
    }

    /// Overwrites the name of an existing record of any kind. Returns the old name.
    pub fn rename(&mut self, key: &TagKey, name: &str) -> Result<String> {
        let slot = match key {
            TagKey::Category(k) => self.ac.get_mut(k.as_str()).map(|r| &mut r.name),
            TagKey::Id(k) => self.id.get_mut(k.as_str()).map(|r| &mut r.name),
            TagKey::Extension(k) => self.ext.get_mut(k.as_str()).map(|r| &mut r.name),
            TagKey::Directory(k) => self.dir.get_mut(k.as_str()).map(|r| &mut r.name),
        };
        let slot = slot.ok_or_else(|| JtError::not_found(key.kind().label(), key.as_str()))?;
        Ok(std::mem::replace(slot, name.to_string()))
    }

    /// Sets a directory's name, creating its record if needed. Returns the old name.
    pub fn name_directory(&mut self, dir: &DirKey, name: &str) -> String {
        let record = self
            .dir
            .entry(dir.to_string())
            .or_insert_with(|| DirRecord::new(""));
        std::mem::replace(&mut record.name, name.to_string())
    }

    /// Re-keys a tag. Both keys must be of the same level.
    pub fn move_tag(&mut self, from: &TagKey, to: &TagKey) -> Result<MoveReport> {
        match (from, to) {
            (TagKey::Category(a), TagKey::Category(b)) => self.move_category(a, b),
            (TagKey::Id(a), TagKey::Id(b)) => self.move_id(a, b),
            (TagKey::Extension(a), TagKey::Extension(b)) => self.move_extension(a, b),
            (TagKey::Directory(_), TagKey::Directory(_)) => Err(JtError::LevelMismatch {
                from: from.to_string(),
                to: to.to_string(),
                reason: "directory keys name vault folders and cannot be re-keyed",
            }),
            _ => Err(JtError::LevelMismatch {
                from: from.to_string(),
                to: to.to_string(),
                reason: "both keys must be the same level",
            }),
        }
    }

    pub fn move_category(&mut self, from: &AcKey, to: &AcKey) -> Result<MoveReport> {
        if !self.ac.contains_key(from.as_str()) {
            return Err(JtError::not_found("AC", from.as_str()));
        }
        if self.ac.contains_key(to.as_str()) {
            return Err(JtError::already_exists("AC", to.as_str()));
        }

        let old_prefix = from.child_prefix();
        let id_moves: Vec<(String, String)> = keys_with_prefix(&self.id, &old_prefix)
            .filter_map(|k| IdKey::parse(k).ok())
            .map(|k| (k.to_string(), k.with_category(to).to_string()))
            .collect();
        let ext_moves: Vec<(String, String)> = keys_with_prefix(&self.ext, &old_prefix)
            .filter_map(|k| ExtKey::parse(k).ok())
            .map(|k| {
                let id = k.id().with_category(to);
                (k.to_string(), k.with_id(&id).to_string())
            })
            .collect();
        ensure_targets_free(&self.id, &id_moves, "ID")?;
        ensure_targets_free(&self.ext, &ext_moves, "EXT")?;

        let record = self.ac.remove(from.as_str()).unwrap_or_default();
        let name = record.name.clone();
        self.ac.insert(to.to_string(), record);
        rekey(&mut self.id, &id_moves);
        rekey(&mut self.ext, &ext_moves);
        self.rewrite_backlinks(&ext_moves);

        let mut cascaded = id_moves;
        cascaded.extend(ext_moves);
        Ok(MoveReport {
            kind: TagKind::Category,
            from: from.to_string(),
            to: to.to_string(),
            name,
            dirs: Vec::new(),
            cascaded,
        })
    }

    pub fn move_id(&mut self, from: &IdKey, to: &IdKey) -> Result<MoveReport> {
        if from.category() != to.category() {
            return Err(JtError::LevelMismatch {
                from: from.to_string(),
                to: to.to_string(),
                reason: "AC prefix must match when moving an ID",
            });
        }
        if !self.id.contains_key(from.as_str()) {
            return Err(JtError::not_found("ID", from.as_str()));
        }
        if self.id.contains_key(to.as_str()) {
            return Err(JtError::already_exists("ID", to.as_str()));
        }

        let ext_moves: Vec<(String, String)> = keys_with_prefix(&self.ext, &from.child_prefix())
            .filter_map(|k| ExtKey::parse(k).ok())
            .map(|k| (k.to_string(), k.with_id(to).to_string()))
            .collect();
        ensure_targets_free(&self.ext, &ext_moves, "EXT")?;

        let record = self.id.remove(from.as_str()).unwrap_or_default();
        let name = record.name.clone();
        self.id.insert(to.to_string(), record);
        rekey(&mut self.ext, &ext_moves);
        self.rewrite_backlinks(&ext_moves);

        Ok(MoveReport {
            kind: TagKind::Id,
            from: from.to_string(),
            to: to.to_string(),
            name,
            dirs: Vec::new(),
            cascaded: ext_moves,
        })
    }

    pub fn move_extension(&mut self, from: &ExtKey, to: &ExtKey) -> Result<MoveReport> {
        if from.id() != to.id() {
            return Err(JtError::LevelMismatch {
                from: from.to_string(),
                to: to.to_string(),
                reason: "ID prefix must match when moving an EXT",
            });
        }
        if !self.ext.contains_key(from.as_str()) {
            return Err(JtError::not_found("EXT", from.as_str()));
        }
        if self.ext.contains_key(to.as_str()) {
            return Err(JtError::already_exists("EXT", to.as_str()));
        }

        let moves = vec![(from.to_string(), to.to_string())];
        rekey(&mut self.ext, &moves);
        self.rewrite_backlinks(&moves);

        let record = &self.ext[to.as_str()];
        Ok(MoveReport {
            kind: TagKind::Extension,
            from: from.to_string(),
            to: to.to_string(),
            name: record.name.clone(),
            dirs: record.dirs.clone(),
            cascaded: Vec::new(),
        })
    }

    /// Removes a category, id or extension.
    pub fn remove(&mut self, key: &TagKey) -> Result<RemoveReport> {
        match key {
            TagKey::Category(k) => self.remove_category(k),
            TagKey::Id(k) => self.remove_id(k),
            TagKey::Extension(k) => self.remove_extension(k),
            TagKey::Directory(k) => Err(JtError::InvalidFormat(format!(
                "'{}' is a directory; directories go away when their last extension is removed",
                k
            ))),
        }
    }

    pub fn remove_category(&mut self, key: &AcKey) -> Result<RemoveReport> {
        if !self.ac.contains_key(key.as_str()) {
            return Err(JtError::not_found("AC", key.as_str()));
        }
        if keys_with_prefix(&self.id, &key.child_prefix())
            .next()
            .is_some()
        {
            return Err(JtError::HasChildren {
                kind: "AC",
                key: key.to_string(),
                child: "ID",
            });
        }
        let record = self.ac.remove(key.as_str()).unwrap_or_default();
        Ok(RemoveReport {
            kind: TagKind::Category,
            key: key.to_string(),
            name: record.name,
            pruned_dirs: Vec::new(),
        })
    }

    pub fn remove_id(&mut self, key: &IdKey) -> Result<RemoveReport> {
        if !self.id.contains_key(key.as_str()) {
            return Err(JtError::not_found("ID", key.as_str()));
        }
        if keys_with_prefix(&self.ext, &key.child_prefix())
            .next()
            .is_some()
        {
            return Err(JtError::HasChildren {
                kind: "ID",
                key: key.to_string(),
                child: "EXT",
            });
        }
        let record = self.id.remove(key.as_str()).unwrap_or_default();
        Ok(RemoveReport {
            kind: TagKind::Id,
            key: key.to_string(),
            name: record.name,
            pruned_dirs: Vec::new(),
        })
    }

    pub fn remove_extension(&mut self, key: &ExtKey) -> Result<RemoveReport> {
        let record = self
            .ext
            .remove(key.as_str())
            .ok_or_else(|| JtError::not_found("EXT", key.as_str()))?;

        let mut pruned_dirs = Vec::new();
        for dir_key in &record.dirs {
            if let Some(dir) = self.dir.get_mut(dir_key) {
                dir.ext.retain(|e| e != key.as_str());
                if dir.ext.is_empty() {
                    self.dir.remove(dir_key);
                    pruned_dirs.push(dir_key.clone());
                }
            }
        }
        Ok(RemoveReport {
            kind: TagKind::Extension,
            key: key.to_string(),
            name: record.name,
            pruned_dirs,
        })
    }

    fn rewrite_backlinks(&mut self, ext_moves: &[(String, String)]) {
        if ext_moves.is_empty() {
            return;
        }
        let map: HashMap<&str, &str> = ext_moves
            .iter()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect();
        for dir in self.dir.values_mut() {
            for entry in dir.ext.iter_mut() {
                if let Some(new) = map.get(entry.as_str()) {
                    *entry = new.to_string();
                }
            }
        }
    }
}

fn keys_with_prefix<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    map.range(prefix.to_string()..)
        .map(|(k, _)| k.as_str())
        .take_while(move |k| k.starts_with(prefix))
}

/// Fails if a re-key target is occupied by a key that is not itself moving.
fn ensure_targets_free<V>(
    map: &BTreeMap<String, V>,
    moves: &[(String, String)],
    kind: &'static str,
) -> Result<()> {
    for (_, new) in moves {
        let vacating = moves.iter().any(|(old, _)| old == new);
        if map.contains_key(new) && !vacating {
            return Err(JtError::already_exists(kind, new.as_str()));
        }
    }
    Ok(())
}

fn rekey<V>(map: &mut BTreeMap<String, V>, moves: &[(String, String)]) {
    let lifted: Vec<(String, V)> = moves
        .iter()
        .filter_map(|(old, new)| map.remove(old).map(|v| (new.clone(), v)))
        .collect();
    map.extend(lifted);
}
