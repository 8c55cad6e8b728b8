//! # API Facade
//!
//! A thin layer over [`crate::commands`], and the one entry point for every
//! jt operation. It:
//!
//! - owns the store and the [`Vault`],
//! - turns a working directory into the [`DirKey`] of the vault slot it names
//!   (failing with `NotInVault` otherwise),
//! - dispatches to the command and hands back its [`CmdResult`].
//!
//! It does no printing and holds no business logic.
//!
//! `JtApi<S: DataStore>` is generic over storage: `JtApi<FileStore>` in the
//! binary, `JtApi<InMemoryStore>` in tests.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::interact::Interaction;
use crate::store::DataStore;
use crate::tag::DirKey;
use crate::vault::Vault;
use std::path::{Path, PathBuf};

pub struct JtApi<S: DataStore> {
    store: S,
    vault: Vault,
    config_dir: PathBuf,
}

impl<S: DataStore> JtApi<S> {
    pub fn new(store: S, vault: Vault, config_dir: PathBuf) -> Self {
        Self {
            store,
            vault,
            config_dir,
        }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The slot `cwd` names.
    pub fn dir_for(&self, cwd: &Path) -> Result<DirKey> {
        self.vault.dir_key_for(cwd)
    }

    pub fn add_tag(&mut self, key: &str, name: &str) -> Result<CmdResult> {
        commands::add::run(&mut self.store, key, name)
    }

    pub fn remove_tag(&mut self, key: &str) -> Result<CmdResult> {
        commands::remove::run(&mut self.store, key)
    }

    pub fn move_tag(&mut self, from: &str, to: &str) -> Result<CmdResult> {
        commands::mv::run(&mut self.store, from, to)
    }

    pub fn rename_tag(&mut self, key: &str, name: &str) -> Result<CmdResult> {
        commands::rename::run(&mut self.store, key, name)
    }

    pub fn list_tags(&self, key: Option<&str>, show_all: bool) -> Result<CmdResult> {
        commands::list::run(&self.store, key, show_all)
    }

    pub fn tag_path(&self, ext: &str) -> Result<CmdResult> {
        commands::cd::run(&self.store, &self.vault, ext)
    }

    pub fn tag_dir(&mut self, cwd: &Path, ui: &mut dyn Interaction) -> Result<CmdResult> {
        let dir = self.dir_for(cwd)?;
        commands::link::run(&mut self.store, &dir, ui)
    }

    pub fn untag_dir(&mut self, cwd: &Path, ui: &mut dyn Interaction) -> Result<CmdResult> {
        let dir = self.dir_for(cwd)?;
        commands::unlink::run(&mut self.store, &dir, ui)
    }

    pub fn navigate(&self, cwd: &Path, ui: &mut dyn Interaction) -> Result<CmdResult> {
        let dir = self.dir_for(cwd)?;
        commands::nav::run(&self.store, &dir, ui)
    }

    pub fn list_dir(&self, cwd: &Path, show_all: bool) -> Result<CmdResult> {
        let dir = self.dir_for(cwd)?;
        commands::ls::run(&self.store, &dir, show_all)
    }

    pub fn name_dir(&mut self, cwd: &Path, name: &str) -> Result<CmdResult> {
        let dir = self.dir_for(cwd)?;
        commands::name_dir::run(&mut self.store, &dir, name)
    }

    pub fn preview(&self, id: Option<&str>) -> Result<CmdResult> {
        commands::preview::run(&self.store, id)
    }

    pub fn append_dir(&mut self, ui: &mut dyn Interaction) -> Result<CmdResult> {
        commands::append::run(&mut self.store, &self.vault, ui)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{Change, CmdMessage, Listing, MessageLevel};
