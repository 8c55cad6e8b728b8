use super::helpers::{choice_line, extract_token};
use super::{CmdMessage, CmdResult, Listing};
use crate::error::{JtError, Result};
use crate::interact::Interaction;
use crate::store::DataStore;
use crate::tag::{DirKey, ExtKey};
use crate::views;

/// `jt nav`: pick one of the current directory's extensions and show it in full.
pub fn run<S: DataStore>(
    store: &S,
    dir: &DirKey,
    ui: &mut dyn Interaction,
) -> Result<CmdResult> {
    let db = store.load()?;
    let mut result = CmdResult::default();

    let linked = views::exts_for_dir(&db, dir);
    if linked.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No tags refer to this directory ({}).",
            dir
        )));
        return Ok(result);
    }

    let choices: Vec<String> = linked.iter().map(choice_line).collect();
    let Some(selection) = ui.select("Select tag: ", &choices)? else {
        return Ok(result);
    };
    let ext = extract_token(&selection)
        .and_then(|token| ExtKey::parse(token).ok())
        .ok_or_else(|| JtError::InvalidFormat("invalid selection".to_string()))?;

    Ok(result.with_listing(Listing::Extension(views::extension_view(&db, &ext)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::scripted::ScriptedInteraction;
    use crate::store::memory::fixtures::sample_store;

    #[test]
    fn shows_picked_extension() {
        let store = sample_store();
        let dir = DirKey::from_number(1).unwrap();
        let mut ui = ScriptedInteraction::new().pick(Some("[31.11+0001] 2023"));
        let result = run(&store, &dir, &mut ui).unwrap();

        assert_eq!(ui.offered[0].len(), 2);
        let Some(Listing::Extension(view)) = result.listing else {
            panic!("expected an extension listing");
        };
        assert_eq!(view.id.name, "Taxes");
        assert_eq!(view.extension.dirs.len(), 2);
    }

    #[test]
    fn untagged_directory_has_nothing_to_offer() {
        let store = sample_store();
        let dir = DirKey::from_number(3).unwrap();
        let mut ui = ScriptedInteraction::new();
        let result = run(&store, &dir, &mut ui).unwrap();
        assert!(result.listing.is_none());
        assert_eq!(result.messages.len(), 1);
    }
}
