//! FILENAME: persistence/src/session.rs
//! Dashboard session - the loaded record set, the active filters, and the
//! engine views computed over the filtered records.
//!
//! Store failures never abort the session. They come back as a `Notice` for
//! the user while the previously loaded records stay in place (an empty set
//! if nothing was ever loaded).

use aggregation_engine::{
    classify_abc, pie_slices, recent_records, sales_by_month, session_performance,
    store_performance, AbcReport, AggregateBucket, ClassifiedProduct, DashboardSummary,
    EngineConfig, Measure, PieSlice, SessionPerformance, StorePerformance, TopPerformers,
};
use log::{info, warn};
use records::{distinct_values, Dimension, FilterState, SalesRecord};
use serde::{Deserialize, Serialize};

use crate::{DataSource, ImportBatch, ImportRow, PersistenceError};

// ============================================================================
// NOTICES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing message about a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: &str, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn error(title: &str, err: &PersistenceError) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: err.to_string(),
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

pub struct DashboardSession<S: DataSource> {
    source: S,
    records: Vec<SalesRecord>,
    filters: FilterState,
    config: EngineConfig,
}

impl<S: DataSource> DashboardSession<S> {
    /// Creates a session with nothing loaded yet; call `refresh` to load.
    pub fn new(source: S) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(source: S, config: EngineConfig) -> Self {
        DashboardSession {
            source,
            records: Vec::new(),
            filters: FilterState::new(),
            config,
        }
    }

    /// Reloads the full record set. On failure the previous records stay.
    pub fn refresh(&mut self) -> Result<usize, Notice> {
        match self.source.fetch_all() {
            Ok(records) => {
                self.records = records;
                info!(target: "SESSION", "loaded {} records", self.records.len());
                Ok(self.records.len())
            }
            Err(e) => {
                warn!(target: "SESSION", "refresh failed, keeping {} records: {}", self.records.len(), e);
                Err(Notice::error("Failed to load data", &e))
            }
        }
    }

    /// Clears the store and the loaded records. On failure both stay.
    pub fn delete_all(&mut self) -> Result<Notice, Notice> {
        match self.source.delete_all() {
            Ok(()) => {
                let removed = self.records.len();
                self.records.clear();
                info!(target: "SESSION", "deleted {} records", removed);
                Ok(Notice::success(
                    "Data deleted",
                    format!("{} records removed", removed),
                ))
            }
            Err(e) => {
                warn!(target: "SESSION", "delete failed: {}", e);
                Err(Notice::error("Failed to delete data", &e))
            }
        }
    }

    /// Validates and stores an upload, then reloads the record set.
    pub fn import(&mut self, batch: ImportBatch, rows: Vec<ImportRow>) -> Result<Notice, Notice> {
        let records = batch
            .into_records(rows)
            .map_err(|e| Notice::error("Invalid import", &e))?;
        self.store_import(records)
    }

    /// Legacy single-total upload.
    pub fn import_total(&mut self, batch: ImportBatch, column: &[f64]) -> Result<Notice, Notice> {
        let record = batch
            .into_total_record(column)
            .map_err(|e| Notice::error("Invalid import", &e))?;
        self.store_import(vec![record])
    }

    fn store_import(&mut self, records: Vec<SalesRecord>) -> Result<Notice, Notice> {
        let count = records.len();
        if let Err(e) = self.source.insert(records) {
            warn!(target: "SESSION", "import of {} records failed: {}", count, e);
            return Err(Notice::error("Failed to import data", &e));
        }
        // The rows are stored at this point; a failed reload must not read
        // as a failed import or a retry would store them twice.
        match self.refresh() {
            Ok(_) => Ok(Notice::success(
                "Data imported",
                format!("{} records imported", count),
            )),
            Err(reload) => {
                warn!(target: "SESSION", "imported {} records but reload failed", count);
                Ok(Notice::success(
                    "Data imported",
                    format!(
                        "{} records imported; reload failed: {}",
                        count, reload.message
                    ),
                ))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------------

    /// Sets one filter; a sentinel such as `"all"` clears it.
    pub fn set_filter(&mut self, dimension: Dimension, value: &str) {
        self.filters.set(dimension, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// The loaded records passing the active filters, in load order.
    pub fn filtered(&self) -> Vec<&SalesRecord> {
        self.filters.apply(&self.records)
    }

    /// Values offered in a filter drop-down, taken from all loaded records.
    pub fn filter_options(&self, dimension: Dimension) -> Vec<String> {
        distinct_values(&self.records, dimension)
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::compute(self.filtered())
    }

    pub fn abc_report(&self) -> AbcReport {
        classify_abc(self.filtered(), &self.config.abc)
    }

    /// The ABC product table, truncated to the configured row count.
    pub fn abc_table(&self) -> Vec<ClassifiedProduct> {
        self.abc_report().top(self.config.limits.abc_table).to_vec()
    }

    pub fn top_performers(&self) -> TopPerformers {
        TopPerformers::compute(self.filtered(), self.config.limits.top_performers)
    }

    pub fn store_performance(&self) -> Vec<StorePerformance> {
        store_performance(self.filtered(), self.config.limits.store_performance)
    }

    pub fn session_performance(&self) -> Vec<SessionPerformance> {
        session_performance(self.filtered(), self.config.limits.session_performance)
    }

    pub fn monthly_sales(&self) -> Vec<AggregateBucket> {
        sales_by_month(self.filtered(), &self.config)
    }

    pub fn pie(&self, dimension: Dimension, measure: Measure) -> Vec<PieSlice> {
        pie_slices(self.filtered(), dimension, measure, self.config.limits.pie_slices)
    }

    pub fn recent(&self) -> Vec<&SalesRecord> {
        recent_records(self.filtered(), self.config.limits.recent_records)
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
