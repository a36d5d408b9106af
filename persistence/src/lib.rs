//! FILENAME: persistence/src/lib.rs
//! Sales Dashboard Persistence Module
//!
//! Handles loading, replacing and clearing the stored sales records, turning
//! decoded spreadsheet rows into records, and the dashboard session that
//! ties a store to the aggregation engine.

mod error;
mod import;
mod json_store;
mod memory;
mod session;

pub use error::PersistenceError;
pub use import::{ImportBatch, ImportRow};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use session::{DashboardSession, Notice, NoticeLevel};

use records::SalesRecord;

// ============================================================================
// DATA SOURCE
// ============================================================================

/// A backend holding the full sales record set.
///
/// Every read returns the whole set; the dashboard never edits records in
/// place, it only appends imports or clears everything.
pub trait DataSource {
    fn fetch_all(&self) -> Result<Vec<SalesRecord>, PersistenceError>;

    fn replace_all(&mut self, records: Vec<SalesRecord>) -> Result<(), PersistenceError>;

    fn delete_all(&mut self) -> Result<(), PersistenceError> {
        self.replace_all(Vec::new())
    }

    /// Appends records to the stored set.
    fn insert(&mut self, records: Vec<SalesRecord>) -> Result<(), PersistenceError> {
        ensure_ids(&records, "insert")?;
        let mut all = self.fetch_all()?;
        all.extend(records);
        self.replace_all(all)
    }
}

/// Rejects a record set containing a blank id. Stores call this on both
/// the read and the write path so nothing unreadable is ever written.
pub(crate) fn ensure_ids(records: &[SalesRecord], origin: &str) -> Result<(), PersistenceError> {
    match records.iter().position(|r| r.id.trim().is_empty()) {
        Some(idx) => Err(PersistenceError::InvalidFormat(format!(
            "record {} in {} has no id",
            idx, origin
        ))),
        None => Ok(()),
    }
}
