use super::helpers::{choice_line, dir_entry, extract_token};
use super::{Change, CmdMessage, CmdResult};
use crate::error::{JtError, Result};
use crate::interact::Interaction;
use crate::store::DataStore;
use crate::tag::{DirKey, TagKey};
use crate::views::{self, Entry};
use tracing::info;

/// `jt add`: tags the current directory.
///
/// The picker offers every id and extension. An extension is linked as is; an
/// id gets a fresh extension, named by prompt, linked in the same save.
pub fn run<S: DataStore>(
    store: &mut S,
    dir: &DirKey,
    ui: &mut dyn Interaction,
) -> Result<CmdResult> {
    let mut db = store.load()?;
    let mut result = CmdResult::default();

    let choices: Vec<String> = views::taggable(&db).iter().map(choice_line).collect();
    if choices.is_empty() {
        result.add_message(CmdMessage::info("No ID or EXT tags available."));
        return Ok(result);
    }

    let Some(selection) = ui.select("Select tag: ", &choices)? else {
        return Ok(result);
    };
    let token = extract_token(&selection)
        .ok_or_else(|| JtError::InvalidFormat("could not parse selection".to_string()))?;

    let ext = match TagKey::classify(token) {
        Some(TagKey::Extension(ext)) => {
            if !db.link(&ext, dir)? {
                result.add_message(CmdMessage::warning(format!(
                    "EXT '{}' already assigned to {}.",
                    ext, dir
                )));
                return Ok(result);
            }
            ext
        }
        Some(TagKey::Id(id)) => {
            if !db.id.contains_key(id.as_str()) {
                return Err(JtError::not_found("ID", id.as_str()));
            }
            let name = ui.prompt(Some("Name (optional)"))?;
            db.create_linked_extension(&id, &name, dir)?
        }
        _ => {
            return Err(JtError::InvalidFormat(format!(
                "'{}' is not a valid ID or EXT",
                token
            )))
        }
    };

    store.save(&db)?;
    info!(ext = %ext, dir = %dir, "linked");

    let name = db.ext.get(ext.as_str()).map(|r| r.name.clone()).unwrap_or_default();
    result.add_change(Change::Linked {
        ext: Entry::new(ext.as_str(), name),
        dir: dir_entry(&db, dir.as_str()),
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::interact::scripted::ScriptedInteraction;
    use crate::store::memory::fixtures::sample_store;
    use crate::store::memory::InMemoryStore;

    fn dir(n: u64) -> DirKey {
        DirKey::from_number(n).unwrap()
    }

    #[test]
    fn picking_extension_links_it() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(Some("[31.11+0003] 2024"));
        let result = run(&mut store, &dir(5), &mut ui).unwrap();

        assert_eq!(ui.prompted, 0);
        assert_eq!(
            ui.offered[0][..2],
            ["[01.01+0001] Note", "[01.01] General"],
            "picker lines are sorted as text"
        );
        let db = store.snapshot();
        assert_eq!(db.ext["31.11+0003"].dirs, vec!["0000_0000_0000_0005"]);
        assert_eq!(db.dir["0000_0000_0000_0005"].ext, vec!["31.11+0003"]);
        assert!(matches!(result.changes[0], Change::Linked { .. }));
    }

    #[test]
    fn picking_id_creates_named_extension() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new()
            .pick(Some("[31.11] Taxes"))
            .answer("2025");
        run(&mut store, &dir(2), &mut ui).unwrap();

        let db = store.snapshot();
        assert_eq!(db.ext["31.11+0004"].name, "2025");
        assert_eq!(db.ext["31.11+0004"].dirs, vec!["0000_0000_0000_0002"]);
        assert_eq!(
            db.dir["0000_0000_0000_0002"].ext,
            vec!["31.11+0001", "31.11+0004"]
        );
        assert!(db.edge_violations().is_empty());
    }

    #[test]
    fn already_linked_warns_without_saving() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(Some("[01.01+0001] Note"));
        let result = run(&mut store, &dir(1), &mut ui).unwrap();
        assert!(result.changes.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("already assigned"));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn nothing_picked_is_a_no_op() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(None);
        let result = run(&mut store, &dir(1), &mut ui).unwrap();
        assert!(result.changes.is_empty() && result.messages.is_empty());
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn empty_taxonomy_skips_the_picker() {
        let mut store = InMemoryStore::new();
        let mut ui = ScriptedInteraction::new();
        let result = run(&mut store, &dir(1), &mut ui).unwrap();
        assert!(ui.offered.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn garbage_selection_is_invalid() {
        let mut store = sample_store();
        let mut ui = ScriptedInteraction::new().pick(Some("31.11 Taxes"));
        assert!(matches!(
            run(&mut store, &dir(1), &mut ui),
            Err(JtError::InvalidFormat(_))
        ));
    }
}
