//! # Storage Layer
//!
//! The whole tag database is one document. A [`DataStore`] hands out a fresh
//! copy with [`load`](DataStore::load) and replaces it wholesale with
//! [`save`](DataStore::save). Commands run one load, mutate, save cycle per
//! invocation; there is no locking between processes, so the last writer wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a single JSON file.
//!   - First read of a missing file writes the empty skeleton.
//!   - An unparseable file is treated as missing (logged, not backed up).
//!   - Saves go to a temporary sibling and are renamed into place.
//!
//! - [`memory::InMemoryStore`]: in-memory storage for tests.

use crate::error::Result;
use crate::model::TagDb;

pub mod fs;
pub mod memory;

/// Abstract interface for tag database persistence.
pub trait DataStore {
    /// Returns the current document, establishing an empty one if none exists.
    fn load(&self) -> Result<TagDb>;

    /// Replaces the persisted document. Readers never see a partial write.
    fn save(&mut self, db: &TagDb) -> Result<()>;
}
