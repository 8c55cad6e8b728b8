use super::{Change, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::DirKey;
use tracing::info;

/// `jt rename <name>`: names the current directory, recording it if needed.
pub fn run<S: DataStore>(store: &mut S, dir: &DirKey, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    let mut db = store.load()?;
    let old = db.name_directory(dir, name);
    store.save(&db)?;
    info!(dir = %dir, old = %old, new = name, "named directory");

    let mut result = CmdResult::default();
    result.add_change(Change::DirNamed {
        key: dir.to_string(),
        old,
        new: name.to_string(),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::sample_store;

    #[test]
    fn renames_known_directory() {
        let mut store = sample_store();
        let dir = DirKey::from_number(1).unwrap();
        let result = run(&mut store, &dir, "Mail").unwrap();
        assert_eq!(
            result.changes[0],
            Change::DirNamed {
                key: dir.to_string(),
                old: "Inbox".into(),
                new: "Mail".into(),
            }
        );
        assert_eq!(store.snapshot().dir[dir.as_str()].ext.len(), 2);
    }

    #[test]
    fn creates_record_for_unknown_directory() {
        let mut store = sample_store();
        let dir = DirKey::from_number(40).unwrap();
        run(&mut store, &dir, "Scans").unwrap();
        let record = &store.snapshot().dir[dir.as_str()];
        assert_eq!(record.name, "Scans");
        assert!(record.ext.is_empty());
    }
}
