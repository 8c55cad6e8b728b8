use super::DataStore;
use crate::error::{JtError, Result};
use crate::model::TagDb;

/// In-memory store for tests.
#[derive(Default)]
pub struct InMemoryStore {
    db: TagDb,
    saves: usize,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(db: TagDb) -> Self {
        Self {
            db,
            ..Self::default()
        }
    }

    /// The document as last saved.
    pub fn snapshot(&self) -> &TagDb {
        &self.db
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Makes every following `save` fail.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<TagDb> {
        Ok(self.db.clone())
    }

    fn save(&mut self, db: &TagDb) -> Result<()> {
        if self.simulate_write_error {
            return Err(JtError::Io(std::io::Error::other("simulated write error")));
        }
        self.db = db.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::InMemoryStore;
    use crate::model::TagDb;
    use crate::tag::{AcKey, DirKey, ExtKey, IdKey};

    /// Two categories, three ids, three extensions; `01.01+0001` is linked to
    /// directory 1 and `31.11+0001` to directories 1 and 2.
    pub fn sample_db() -> TagDb {
        let mut db = TagDb::new();
        let add = |db: &mut TagDb| -> crate::error::Result<()> {
            db.add_category(&AcKey::parse("01")?, "Admin")?;
            db.add_category(&AcKey::parse("31")?, "Finance")?;
            db.add_id(&IdKey::parse("01.01")?, "General")?;
            db.add_id(&IdKey::parse("31.11")?, "Taxes")?;
            db.add_id(&IdKey::parse("31.12")?, "Insurance")?;
            db.add_extension(&ExtKey::parse("01.01+0001")?, "Note")?;
            db.add_extension(&ExtKey::parse("31.11+0001")?, "2023")?;
            db.add_extension(&ExtKey::parse("31.11+0003")?, "2024")?;
            let d1 = DirKey::from_number(1)?;
            let d2 = DirKey::from_number(2)?;
            db.name_directory(&d1, "Inbox");
            db.link(&ExtKey::parse("01.01+0001")?, &d1)?;
            db.link(&ExtKey::parse("31.11+0001")?, &d1)?;
            db.link(&ExtKey::parse("31.11+0001")?, &d2)?;
            Ok(())
        };
        if let Err(e) = add(&mut db) {
            panic!("sample fixture is invalid: {}", e);
        }
        db
    }

    pub fn sample_store() -> InMemoryStore {
        InMemoryStore::with_db(sample_db())
    }
}
