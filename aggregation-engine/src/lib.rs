//! FILENAME: aggregation-engine/src/lib.rs
//! Aggregation engine for the sales dashboard.
//!
//! Every view of the dashboard is a reduction over a (filtered) slice of
//! `SalesRecord`s. This crate holds those reductions and nothing else: it
//! never touches storage and never formats for display.
//!
//! Layers:
//! - `definition`: Serializable configuration (groupings, thresholds, limits)
//! - `bucket`: Grouping and per-bucket accumulation
//! - `percent`: Shares, cumulative shares and percentage change
//! - `abc`, `ranking`, `comparison`: The analyses built on top of buckets
//! - `dashboard`, `analytics`: View-shaped datasets

pub mod definition;
pub mod bucket;
pub mod percent;
pub mod abc;
pub mod ranking;
pub mod comparison;
pub mod dashboard;
pub mod analytics;

pub use definition::*;
pub use bucket::*;
pub use percent::*;
pub use abc::{classify_abc, classify_buckets, AbcCategory, AbcReport, CategorySummary, ClassifiedProduct};
pub use ranking::{ranked, top_n};
pub use comparison::{
    compare, compare_three, compare_two, comparison_candidates, validate_selection,
    ComparedMetric, Comparison, ComparisonError, MetricChange, PeriodMetrics, SessionSeries,
};
pub use dashboard::{
    pie_slices, recent_records, sales_by_month, sales_by_session, DashboardSummary, Highlight,
    PieSlice, TopPerformers,
};
pub use analytics::{
    session_performance, store_performance, GroupDiversity, GroupShare, MonthlyTrend,
    SessionPerformance, StorePerformance, DIVERSIFIED_MIN_GROUPS,
};

pub use records::{Dimension, FilterState, Measure, SalesRecord};
