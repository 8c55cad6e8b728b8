use super::{Change, CmdResult};
use crate::error::Result;
use crate::interact::Interaction;
use crate::store::DataStore;
use crate::vault::Vault;
use tracing::{info, warn};

/// `jt append`: creates the next directory slot in the vault and records it.
///
/// A stale record for the new slot keeps its extensions; only the name is set.
/// If the database cannot be saved the new folder is removed again.
pub fn run<S: DataStore>(
    store: &mut S,
    vault: &Vault,
    ui: &mut dyn Interaction,
) -> Result<CmdResult> {
    let mut db = store.load()?;
    let key = vault.allocate()?;
    let name = ui.prompt(Some("Name"))?;
    let path = vault.create_slot(&key)?;

    db.name_directory(&key, &name);
    if let Err(e) = store.save(&db) {
        if let Err(cleanup) = vault.remove_slot(&key) {
            warn!(
                path = %path.display(),
                error = %cleanup,
                "could not remove unrecorded directory"
            );
        }
        return Err(e);
    }
    info!(dir = %key, name = %name, path = %path.display(), "created directory");

    let mut result = CmdResult::default().with_path(path.clone());
    result.add_change(Change::DirCreated {
        key: key.to_string(),
        name,
        path,
    });
    Ok(result)
}
