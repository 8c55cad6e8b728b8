//! # Commands
//!
//! One module per user-facing operation. Each `run` is a single transaction:
//! load the database, apply the operation, save if anything changed, and
//! describe the outcome in a [`CmdResult`]. A command that fails returns
//! before saving, so the persisted database is untouched.
//!
//! Commands never print. The CLI renders [`Change`]s, [`Listing`]s and
//! messages however it likes.

use crate::config::JtConfig;
use crate::tag::TagKind;
use crate::views::{
    CategoryView, DirectoryView, Entry, ExtensionView, IdPreview, IdView,
};
use std::path::PathBuf;

pub mod add;
pub mod append;
pub mod cd;
pub mod config;
pub mod helpers;
pub mod link;
pub mod list;
pub mod ls;
pub mod mv;
pub mod name_dir;
pub mod nav;
pub mod preview;
pub mod remove;
pub mod rename;
pub mod unlink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A committed change, one per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A tag now carries this key and name (added, renamed or moved).
    Tagged {
        kind: TagKind,
        key: String,
        name: String,
    },
    Removed {
        kind: TagKind,
        key: String,
    },
    /// An extension still linked to `dir` after a rename or move.
    Attached { dir: String, ext: Entry },
    Linked { ext: Entry, dir: Entry },
    Unlinked { ext: Entry, dir: Entry },
    DirNamed {
        key: String,
        old: String,
        new: String,
    },
    DirCreated {
        key: String,
        name: String,
        path: PathBuf,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Categories(Vec<Entry>),
    Category(CategoryView),
    Id(IdView),
    Extension(ExtensionView),
    Directory(DirectoryView),
    Preview(IdPreview),
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub changes: Vec<Change>,
    pub listing: Option<Listing>,
    pub path: Option<PathBuf>,
    pub config: Option<JtConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_config(mut self, config: JtConfig) -> Self {
        self.config = Some(config);
        self
    }
}
