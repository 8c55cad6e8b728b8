use super::helpers::parse_taxonomy_tag;
use super::{Change, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use tracing::info;

/// `jt tags rm <key>`: removes a category, id or extension.
pub fn run<S: DataStore>(store: &mut S, token: &str) -> Result<CmdResult> {
    let key = parse_taxonomy_tag(token)?;
    let mut db = store.load()?;
    let report = db.remove(&key)?;
    store.save(&db)?;
    info!(kind = %report.kind, key = %report.key, pruned = report.pruned_dirs.len(), "removed tag");

    let mut result = CmdResult::default();
    result.add_change(Change::Removed {
        kind: report.kind,
        key: report.key,
    });
    for dir in report.pruned_dirs {
        result.add_message(CmdMessage::info(format!(
            "Directory {} no longer has tags and was forgotten",
            dir
        )));
    }
    Ok(result)
}
