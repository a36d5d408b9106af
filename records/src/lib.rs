//! FILENAME: records/src/lib.rs
//! PURPOSE: Main library entry point for the sales record model.
//! CONTEXT: Re-exports the record type, the dimension/measure selectors and
//! the dashboard filter set used by the aggregation engine and the stores.

pub mod dimension;
pub mod filter;
pub mod month;
pub mod record;

// Re-export commonly used types at the crate root
pub use dimension::{distinct_values, Dimension, Measure};
pub use filter::{is_sentinel, FilterState, ALL_SENTINELS};
pub use month::{calendar_position, default_month_order, MONTH_NAMES_PT};
pub use record::SalesRecord;
