use super::helpers::parse_tag;
use super::{CmdMessage, CmdResult, Listing};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::TagKey;
use crate::views;

/// `jt tags list [-a] [key]`.
///
/// No key lists categories; a category lists its ids; an id lists its
/// extensions (with their directories when `show_all`); an extension is shown
/// with its parents and directories; a directory is grouped like `jt ls`.
pub fn run<S: DataStore>(store: &S, token: Option<&str>, show_all: bool) -> Result<CmdResult> {
    let db = store.load()?;
    let Some(token) = token else {
        let categories = views::list_categories(&db);
        let mut result = CmdResult::default();
        if categories.is_empty() {
            result.add_message(CmdMessage::info("No AC tags defined."));
        }
        return Ok(result.with_listing(Listing::Categories(categories)));
    };

    let listing = match parse_tag(token)? {
        TagKey::Category(k) => Listing::Category(views::category_view(&db, &k)?),
        TagKey::Id(k) => Listing::Id(views::id_view(&db, &k, show_all)?),
        TagKey::Extension(k) => Listing::Extension(views::extension_view(&db, &k)?),
        TagKey::Directory(k) => Listing::Directory(views::directory_view(&db, &k, show_all)),
    };
    Ok(CmdResult::default().with_listing(listing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JtError;
    use crate::store::memory::fixtures::sample_store;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_store_says_so() {
        let store = InMemoryStore::new();
        let result = run(&store, None, false).unwrap();
        assert_eq!(result.messages[0].content, "No AC tags defined.");
        assert_eq!(result.listing, Some(Listing::Categories(Vec::new())));
    }

    #[test]
    fn dispatches_on_key_level() {
        let store = sample_store();
        assert!(matches!(
            run(&store, Some("31"), false).unwrap().listing,
            Some(Listing::Category(ref v)) if v.ids.len() == 2
        ));

        let Some(Listing::Id(view)) = run(&store, Some("31.11"), true).unwrap().listing else {
            panic!("expected an id listing");
        };
        assert_eq!(view.extensions.len(), 2);
        assert_eq!(view.extensions[0].dirs.len(), 2);

        let Some(Listing::Extension(view)) =
            run(&store, Some("01.01+0001"), false).unwrap().listing
        else {
            panic!("expected an extension listing");
        };
        assert_eq!(view.category.name, "Admin");
        assert_eq!(view.extension.dirs[0].name, "Inbox");
    }

    #[test]
    fn unknown_keys_fail() {
        let store = sample_store();
        assert!(matches!(
            run(&store, Some("55"), false),
            Err(JtError::NotFound { .. })
        ));
        assert!(matches!(
            run(&store, Some("abc"), false),
            Err(JtError::InvalidFormat(_))
        ));
    }
}
