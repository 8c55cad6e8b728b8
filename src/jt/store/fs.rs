use super::DataStore;
use crate::error::{JtError, Result};
use crate::model::TagDb;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// JSON file backed store.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(JtError::Io)?;
        }
        Ok(parent)
    }

    fn write_atomic(&self, db: &TagDb) -> Result<()> {
        let parent = self.ensure_parent()?;
        let content = serde_json::to_string_pretty(db).map_err(JtError::Serialization)?;

        let tmp_file = parent.join(format!(".jt-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(JtError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(JtError::Io(e));
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load(&self) -> Result<TagDb> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no database yet, writing empty skeleton");
            let db = TagDb::new();
            self.write_atomic(&db)?;
            return Ok(db);
        }

        let content = fs::read_to_string(&self.path).map_err(JtError::Io)?;
        match serde_json::from_str::<TagDb>(&content) {
            Ok(db) => {
                debug!(
                    path = %self.path.display(),
                    categories = db.ac.len(),
                    ids = db.id.len(),
                    extensions = db.ext.len(),
                    dirs = db.dir.len(),
                    "loaded database"
                );
                Ok(db)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "database is unreadable, starting from an empty one"
                );
                Ok(TagDb::new())
            }
        }
    }

    fn save(&mut self, db: &TagDb) -> Result<()> {
        self.write_atomic(db)?;
        debug!(path = %self.path.display(), "saved database");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{AcKey, DirKey, ExtKey, IdKey};
    use tempfile::TempDir;

    fn populated() -> TagDb {
        let mut db = TagDb::new();
        db.add_category(&AcKey::parse("01").unwrap(), "Admin").unwrap();
        db.add_id(&IdKey::parse("01.01").unwrap(), "General").unwrap();
        let ext = ExtKey::parse("01.01+0001").unwrap();
        db.add_extension(&ext, "Note").unwrap();
        for n in [9, 2, 5] {
            db.link(&ext, &DirKey::from_number(n).unwrap()).unwrap();
        }
        db
    }

    #[test]
    fn first_load_creates_skeleton_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("jt.json");
        let store = FileStore::new(&path);

        let db = store.load().unwrap();
        assert!(db.is_empty());
        assert!(path.exists());

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        for member in ["ac", "id", "ext", "dir"] {
            assert!(raw[member].as_object().unwrap().is_empty());
        }
    }

    #[test]
    fn save_then_load_is_identity() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("jt.json"));
        let db = populated();
        store.save(&db).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, db);
        assert_eq!(
            loaded.ext["01.01+0001"].dirs,
            vec![
                "0000_0000_0000_0009",
                "0000_0000_0000_0002",
                "0000_0000_0000_0005"
            ]
        );
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jt.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        let db = store.load().unwrap();
        assert!(db.is_empty());
        // Left in place until the next save.
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path().join("jt.json"));
        store.save(&populated()).unwrap();
        store.save(&TagDb::new()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn unknown_members_survive_a_save() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jt.json");
        fs::write(&path, r#"{"ac": {}, "note": "kept"}"#).unwrap();

        let mut store = FileStore::new(&path);
        let mut db = store.load().unwrap();
        db.add_category(&AcKey::parse("02").unwrap(), "Home").unwrap();
        store.save(&db).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["note"], "kept");
        assert_eq!(raw["ac"]["02"]["name"], "Home");
        assert!(raw["dir"].is_object());
    }
}
