//! FILENAME: persistence/src/memory.rs
//! In-memory data source, used for tests and as a scratch store.

use records::SalesRecord;

use crate::{ensure_ids, DataSource, PersistenceError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SalesRecord>,
    /// When set, every operation fails with `Unavailable(reason)`.
    outage: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SalesRecord>) -> Self {
        MemoryStore {
            records,
            outage: None,
        }
    }

    /// Simulates a connectivity failure until `restore` is called.
    pub fn fail_with(&mut self, reason: impl Into<String>) {
        self.outage = Some(reason.into());
    }

    pub fn restore(&mut self) {
        self.outage = None;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check(&self) -> Result<(), PersistenceError> {
        match &self.outage {
            Some(reason) => Err(PersistenceError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl DataSource for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<SalesRecord>, PersistenceError> {
        self.check()?;
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, records: Vec<SalesRecord>) -> Result<(), PersistenceError> {
        self.check()?;
        ensure_ids(&records, "memory store")?;
        self.records = records;
        Ok(())
    }

    fn insert(&mut self, records: Vec<SalesRecord>) -> Result<(), PersistenceError> {
        self.check()?;
        ensure_ids(&records, "memory store")?;
        self.records.extend(records);
        Ok(())
    }
}
