use super::CmdResult;
use crate::error::{JtError, Result};
use crate::store::DataStore;
use crate::tag::{DirKey, ExtKey};
use crate::vault::Vault;

/// `jt tags cd <ext>`: the vault path of the extension's first directory.
pub fn run<S: DataStore>(store: &S, vault: &Vault, token: &str) -> Result<CmdResult> {
    let key = ExtKey::parse(token.trim())?;
    let db = store.load()?;
    let record = db
        .ext
        .get(key.as_str())
        .ok_or_else(|| JtError::not_found("EXT", key.as_str()))?;
    let first = record
        .dirs
        .first()
        .ok_or_else(|| JtError::not_found("directory for EXT", key.as_str()))?;
    let dir = DirKey::parse(first)?;
    Ok(CmdResult::default().with_path(vault.path_for(&dir)))
}
