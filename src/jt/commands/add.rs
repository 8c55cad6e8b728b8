use super::helpers::parse_taxonomy_tag;
use super::{Change, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;

/// `jt tags add <key> <name>`: creates a category, id or extension.
pub fn run<S: DataStore>(store: &mut S, token: &str, name: &str) -> Result<CmdResult> {
    let key = parse_taxonomy_tag(token)?;
    let name = name.trim();
    let mut db = store.load()?;

    db.add(&key, name)?;
    store.save(&db)?;
    info!(kind = %key.kind(), key = %key, name, "added tag");

    let mut result = CmdResult::default();
    result.add_change(Change::Tagged {
        kind: key.kind(),
        key: key.to_string(),
        name: name.to_string(),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JtError;
    use crate::store::memory::InMemoryStore;
    use crate::tag::TagKind;

    #[test]
    fn adds_each_level_in_order() {
        let mut store = InMemoryStore::new();
        run(&mut store, "01", "Admin").unwrap();
        run(&mut store, "01.01", "General").unwrap();
        let result = run(&mut store, "01.01+0001", " Note ").unwrap();

        assert_eq!(
            result.changes,
            vec![Change::Tagged {
                kind: TagKind::Extension,
                key: "01.01+0001".into(),
                name: "Note".into(),
            }]
        );
        let db = store.snapshot();
        assert_eq!(db.ac["01"].name, "Admin");
        assert_eq!(db.id["01.01"].name, "General");
        assert!(db.ext["01.01+0001"].dirs.is_empty());
    }

    #[test]
    fn missing_parent_leaves_store_untouched() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, "01.01", "General").unwrap_err();
        assert!(matches!(err, JtError::ParentMissing { .. }));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn rejects_bad_keys_and_directories() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            run(&mut store, "1.01", "x"),
            Err(JtError::InvalidFormat(_))
        ));
        assert!(matches!(
            run(&mut store, "0000_0000_0000_0001", "x"),
            Err(JtError::InvalidFormat(_))
        ));
    }

    #[test]
    fn duplicate_is_already_exists() {
        let mut store = InMemoryStore::new();
        run(&mut store, "31", "Finance").unwrap();
        assert!(matches!(
            run(&mut store, "31", "Other"),
            Err(JtError::AlreadyExists { .. })
        ));
        assert_eq!(store.snapshot().ac["31"].name, "Finance");
    }
}
