use super::{CmdResult, Listing};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::IdKey;
use crate::views;

pub const DEFAULT_ID: &str = "01.01";

/// `jt box [id]`: fixed-height directory preview for each extension of `id`.
pub fn run<S: DataStore>(store: &S, id: Option<&str>) -> Result<CmdResult> {
    let id = IdKey::parse(id.unwrap_or(DEFAULT_ID).trim())?;
    let db = store.load()?;
    Ok(CmdResult::default().with_listing(Listing::Preview(views::id_preview(&db, &id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::sample_store;

    #[test]
    fn defaults_to_first_id() {
        let store = sample_store();
        let Some(Listing::Preview(preview)) = run(&store, None).unwrap().listing else {
            panic!("expected a preview");
        };
        assert_eq!(preview.id, "01.01");
        assert_eq!(preview.extensions.len(), 1);
        assert_eq!(preview.extensions[0].dirs[0].name, "Inbox");
    }

    #[test]
    fn id_without_extensions_is_empty() {
        let store = sample_store();
        let Some(Listing::Preview(preview)) = run(&store, Some("31.12")).unwrap().listing else {
            panic!("expected a preview");
        };
        assert!(preview.extensions.is_empty());
        assert!(run(&store, Some("31")).is_err());
    }
}
