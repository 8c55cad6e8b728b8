use super::{CmdResult, Listing};
use crate::error::Result;
use crate::store::DataStore;
use crate::tag::DirKey;
use crate::views;

/// `jt ls [-a]`: the current directory's tags grouped by category.
pub fn run<S: DataStore>(store: &S, dir: &DirKey, show_all: bool) -> Result<CmdResult> {
    let db = store.load()?;
    let view = views::directory_view(&db, dir, show_all);
    Ok(CmdResult::default().with_listing(Listing::Directory(view)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::sample_store;

    #[test]
    fn groups_directory_tags() {
        let store = sample_store();
        let dir = DirKey::from_number(1).unwrap();
        let Some(Listing::Directory(view)) = run(&store, &dir, false).unwrap().listing else {
            panic!("expected a directory listing");
        };
        assert_eq!(view.title(), "Inbox");
        let names: Vec<_> = view.groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, ["01", "31"]);
    }

    #[test]
    fn unknown_directory_lists_empty() {
        let store = sample_store();
        let dir = DirKey::from_number(77).unwrap();
        let Some(Listing::Directory(view)) = run(&store, &dir, true).unwrap().listing else {
            panic!("expected a directory listing");
        };
        assert_eq!(view.title(), "0000_0000_0000_0077");
        assert!(view.groups.iter().all(|g| g.extensions.is_empty()));
        assert_eq!(view.groups.len(), 2);
    }
}
