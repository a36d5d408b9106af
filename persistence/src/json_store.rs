//! FILENAME: persistence/src/json_store.rs
//! JSON file data source: the whole record set as one pretty-printed array.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use records::SalesRecord;

use crate::{ensure_ids, DataSource, PersistenceError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileStore {
    /// A missing file is an empty data set.
    fn fetch_all(&self) -> Result<Vec<SalesRecord>, PersistenceError> {
        if !self.path.exists() {
            debug!(target: "STORE", "no data file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<SalesRecord> = serde_json::from_str(&contents)?;
        ensure_ids(&records, &self.path.display().to_string())?;

        debug!(target: "STORE", "loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn replace_all(&mut self, records: Vec<SalesRecord>) -> Result<(), PersistenceError> {
        ensure_ids(&records, &self.path.display().to_string())?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;

        info!(target: "STORE", "wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
