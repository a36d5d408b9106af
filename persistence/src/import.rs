//! FILENAME: persistence/src/import.rs
//! PURPOSE: Turns one upload (batch-level fields plus decoded sheet rows)
//! into `SalesRecord`s ready for insertion.
//! CONTEXT: Decoding the spreadsheet bytes happens outside this crate. Rows
//! arrive here already split into columns; the sheet's percentage columns
//! are not part of `ImportRow` because every share is recomputed from the
//! raw measures.

use chrono::Utc;
use log::info;
use records::SalesRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PersistenceError;

/// Fields chosen once per upload and stamped onto every imported row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub subgroup: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
}

/// One decoded spreadsheet row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub profit: Option<f64>,
}

impl ImportBatch {
    pub fn new(month: &str, session: &str, group: &str, subgroup: &str) -> Self {
        ImportBatch {
            month: month.to_string(),
            session: session.to_string(),
            group: group.to_string(),
            subgroup: subgroup.to_string(),
            year: None,
            store: None,
        }
    }

    pub fn with_year(mut self, year: &str) -> Self {
        self.year = Some(year.to_string());
        self
    }

    pub fn with_store(mut self, store: &str) -> Self {
        self.store = Some(store.to_string());
        self
    }

    /// Checks that every required batch field is filled in.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let required = [
            ("month", &self.month),
            ("session", &self.session),
            ("group", &self.group),
            ("subgroup", &self.subgroup),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(PersistenceError::MissingField(name));
            }
        }
        Ok(())
    }

    /// One record per row, all sharing a creation timestamp.
    pub fn into_records(self, rows: Vec<ImportRow>) -> Result<Vec<SalesRecord>, PersistenceError> {
        self.validate()?;
        if rows.is_empty() {
            return Err(PersistenceError::InvalidFormat(
                "Import contains no rows".to_string(),
            ));
        }

        let created = Utc::now();
        let records: Vec<SalesRecord> = rows
            .into_iter()
            .map(|row| SalesRecord {
                product_code: non_blank(row.product_code),
                product_description: non_blank(row.description),
                quantity_sold: row.quantity,
                value_sold: row.value,
                profit_value: row.profit,
                date: Some(created),
                ..self.base_record()
            })
            .collect();

        info!(
            target: "IMPORT",
            "prepared {} records for {} / {}",
            records.len(),
            self.month,
            self.session
        );
        Ok(records)
    }

    /// Legacy upload format: a single record whose `total` is the sum of the
    /// sheet's first column.
    pub fn into_total_record(self, column: &[f64]) -> Result<SalesRecord, PersistenceError> {
        self.validate()?;
        if column.is_empty() {
            return Err(PersistenceError::InvalidFormat(
                "Import contains no values".to_string(),
            ));
        }

        let total: f64 = column.iter().sum();
        info!(target: "IMPORT", "prepared total record {} for {}", total, self.month);
        Ok(SalesRecord {
            total: Some(total),
            date: Some(Utc::now()),
            ..self.base_record()
        })
    }

    fn base_record(&self) -> SalesRecord {
        SalesRecord {
            id: Uuid::new_v4().to_string(),
            month: Some(self.month.trim().to_string()),
            year: self.year.clone(),
            session: Some(self.session.trim().to_string()),
            group: Some(self.group.trim().to_string()),
            subgroup: Some(self.subgroup.trim().to_string()),
            store: self.store.clone(),
            ..SalesRecord::default()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
