use super::helpers::{extension_changes, parse_tag};
use super::{Change, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::TagKey;
use tracing::info;

/// `jt tags rename <key> <name>`: renames an existing tag or directory record.
pub fn run<S: DataStore>(store: &mut S, token: &str, name: &str) -> Result<CmdResult> {
    let key = parse_tag(token)?;
    let name = name.trim();
    let mut db = store.load()?;
    let old = db.rename(&key, name)?;
    store.save(&db)?;
    info!(kind = %key.kind(), key = %key, old = %old, new = name, "renamed");

    let mut result = CmdResult::default();
    match &key {
        TagKey::Extension(k) => {
            for change in extension_changes(&db, k.as_str()) {
                result.add_change(change);
            }
        }
        TagKey::Directory(k) => result.add_change(Change::DirNamed {
            key: k.to_string(),
            old,
            new: name.to_string(),
        }),
        _ => result.add_change(Change::Tagged {
            kind: key.kind(),
            key: key.to_string(),
            name: name.to_string(),
        }),
    }
    Ok(result)
}
