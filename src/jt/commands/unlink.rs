use super::helpers::{choice_line, dir_entry, extract_token};
use super::{Change, CmdMessage, CmdResult};
use crate::error::{JtError, Result};
use crate::interact::Interaction;
use crate::store::DataStore;
use crate::tag::{DirKey, ExtKey};
use crate::views::Entry;
use tracing::info;

/// `jt rm`: untags the current directory. The directory record stays.
pub fn run<S: DataStore>(
    store: &mut S,
    dir: &DirKey,
    ui: &mut dyn Interaction,
) -> Result<CmdResult> {
    let mut db = store.load()?;
    let mut result = CmdResult::default();

    let linked: Vec<String> = db
        .dir
        .get(dir.as_str())
        .map(|d| d.ext.clone())
        .unwrap_or_default();
    if linked.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No EXT tags refer to this directory ({}).",
            dir
        )));
        return Ok(result);
    }

    let choices: Vec<String> = linked
        .iter()
        .map(|key| {
            let name = db.ext.get(key).map(|r| r.name.as_str()).unwrap_or("");
            choice_line(&Entry::new(key, name))
        })
        .collect();
    let Some(selection) = ui.select("Select tag: ", &choices)? else {
        return Ok(result);
    };
    let token = extract_token(&selection)
        .ok_or_else(|| JtError::InvalidFormat("could not parse selection".to_string()))?;
    let ext = ExtKey::parse(token)?;

    db.unlink(&ext, dir)?;
    store.save(&db)?;
    info!(ext = %ext, dir = %dir, "unlinked");

    let name = db.ext.get(ext.as_str()).map(|r| r.name.clone()).unwrap_or_default();
    result.add_change(Change::Unlinked {
        ext: Entry::new(ext.as_str(), name),
        dir: dir_entry(&db, dir.as_str()),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::scripted::ScriptedInteraction;
    use crate::store::memory::fixtures::sample_store;

    fn dir(n: u64) -> DirKey {
        DirKey::from_number(n).unwrap()
    }

    #[test]
    fn offers_directory_tags_in_link_order() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(Some("[31.11+0001] 2023"));
        let result = run(&mut store, &dir(1), &mut ui).unwrap();

        assert_eq!(ui.offered[0], vec!["[01.01+0001] Note", "[31.11+0001] 2023"]);
        let db = store.snapshot();
        assert_eq!(db.dir["0000_0000_0000_0001"].ext, vec!["01.01+0001"]);
        assert_eq!(db.ext["31.11+0001"].dirs, vec!["0000_0000_0000_0002"]);
        assert!(matches!(result.changes[0], Change::Unlinked { .. }));
    }

    #[test]
    fn last_unlink_keeps_directory_record() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(Some("[31.11+0001] 2023"));
        run(&mut store, &dir(2), &mut ui).unwrap();

        let db = store.snapshot();
        assert!(db.dir["0000_0000_0000_0002"].ext.is_empty());
    }

    #[test]
    fn untagged_directory_is_informational() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new();
        let result = run(&mut store, &dir(9), &mut ui).unwrap();
        assert!(ui.offered.is_empty());
        assert!(result.messages[0].content.contains("0000_0000_0000_0009"));
    }
}
