use super::helpers::{extension_changes, parse_taxonomy_tag};
use super::{Change, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::TagKind;
use tracing::info;

/// `jt tags mv <old> <new>`: re-keys a tag and everything hanging off it.
pub fn run<S: DataStore>(store: &mut S, from: &str, to: &str) -> Result<CmdResult> {
    let from = parse_taxonomy_tag(from)?;
    let to = parse_taxonomy_tag(to)?;
    let mut db = store.load()?;
    let report = db.move_tag(&from, &to)?;
    store.save(&db)?;
    info!(
        kind = %report.kind,
        from = %report.from,
        to = %report.to,
        cascaded = report.cascaded.len(),
        "moved tag"
    );

    let mut result = CmdResult::default();
    if report.kind == TagKind::Extension {
        for change in extension_changes(&db, &report.to) {
            result.add_change(change);
        }
    } else {
        result.add_change(Change::Tagged {
            kind: report.kind,
            key: report.to.clone(),
            name: report.name.clone(),
        });
    }
    if !report.cascaded.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} child tag(s) re-keyed under {}",
            report.cascaded.len(),
            report.to
        )));
    }
    Ok(result)
}
