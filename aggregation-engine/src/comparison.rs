//! FILENAME: aggregation-engine/src/comparison.rs
//! Comparison - side-by-side metrics for 2 or 3 values of one dimension.
//!
//! The record set is partitioned by exact match on the chosen dimension
//! (month, session, group, subgroup, store or product). Each subset gets its
//! own metrics; the later subsets are diffed against the first, and a
//! per-session chart dataset is built over the union of sessions seen in
//! any subset.
//!
//! Selections that are incomplete or not pairwise distinct are rejected
//! with a guidance message before anything is computed.

use log::debug;
use records::{distinct_values, Dimension, SalesRecord};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::bucket::compare_measure;
use crate::percent::percentage_change;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a comparison selection cannot be computed. The message is meant to
/// be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("Please select all {expected} {dimension} values to compare")]
    Incomplete { dimension: Dimension, expected: usize },

    #[error("Please select {expected} different {dimension} values to compare")]
    NotDistinct { dimension: Dimension, expected: usize },

    #[error("Comparisons take 2 or 3 values, got {0}")]
    UnsupportedArity(usize),
}

// ============================================================================
// METRICS
// ============================================================================

/// Totals for one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    /// The dimension value this subset was selected by.
    pub label: String,
    pub total_value: f64,
    pub total_quantity: f64,
    pub total_profit: f64,
    pub record_count: usize,
    pub distinct_sessions: usize,
    pub distinct_stores: usize,
    /// `total_value / distinct_stores`, 0 for an empty subset.
    pub average_per_store: f64,
}

impl PeriodMetrics {
    /// Computes the metrics of one subset. Records without a session or
    /// store count as one distinct (empty) session or store.
    pub fn from_records<'a, I>(label: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut metrics = PeriodMetrics {
            label: label.into(),
            total_value: 0.0,
            total_quantity: 0.0,
            total_profit: 0.0,
            record_count: 0,
            distinct_sessions: 0,
            distinct_stores: 0,
            average_per_store: 0.0,
        };
        let mut sessions: FxHashSet<&str> = FxHashSet::default();
        let mut stores: FxHashSet<&str> = FxHashSet::default();

        for record in records {
            metrics.total_value += record.value();
            metrics.total_quantity += record.quantity();
            metrics.total_profit += record.profit();
            metrics.record_count += 1;
            sessions.insert(Dimension::Session.key(record));
            stores.insert(Dimension::Store.key(record));
        }

        metrics.distinct_sessions = sessions.len();
        metrics.distinct_stores = stores.len();
        if metrics.record_count > 0 {
            metrics.average_per_store = metrics.total_value / metrics.distinct_stores as f64;
        }
        metrics
    }

    pub fn get(&self, metric: ComparedMetric) -> f64 {
        match metric {
            ComparedMetric::TotalValue => self.total_value,
            ComparedMetric::TotalQuantity => self.total_quantity,
            ComparedMetric::TotalProfit => self.total_profit,
            ComparedMetric::RecordCount => self.record_count as f64,
            ComparedMetric::DistinctSessions => self.distinct_sessions as f64,
            ComparedMetric::DistinctStores => self.distinct_stores as f64,
            ComparedMetric::AveragePerStore => self.average_per_store,
        }
    }
}

/// The metrics a comparison reports a change for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparedMetric {
    TotalValue,
    TotalQuantity,
    TotalProfit,
    RecordCount,
    DistinctSessions,
    DistinctStores,
    AveragePerStore,
}

impl ComparedMetric {
    /// The comparison cards, in display order.
    pub const CARDS: [ComparedMetric; 4] = [
        ComparedMetric::TotalValue,
        ComparedMetric::DistinctSessions,
        ComparedMetric::DistinctStores,
        ComparedMetric::AveragePerStore,
    ];
}

/// Change of one metric between the baseline (first) subset and another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub metric: ComparedMetric,
    /// Label of the subset compared against the baseline.
    pub against: String,
    pub baseline: f64,
    pub current: f64,
    pub change: f64,
}

/// One point of the per-session chart: the session's value in each subset,
/// in selection order. Missing combinations are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSeries {
    pub session: String,
    pub values: SmallVec<[f64; 3]>,
}

impl SessionSeries {
    pub fn combined(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// A computed 2- or 3-way comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub dimension: Dimension,
    /// One entry per selected value, in selection order.
    pub periods: Vec<PeriodMetrics>,
    /// Each later subset against the first, for every card metric.
    pub changes: Vec<MetricChange>,
    pub sessions: Vec<SessionSeries>,
}

impl Comparison {
    pub fn change(&self, metric: ComparedMetric, against: &str) -> Option<f64> {
        self.changes
            .iter()
            .find(|c| c.metric == metric && c.against == against)
            .map(|c| c.change)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// The values offered for selection along a dimension.
pub fn comparison_candidates<'a, I>(records: I, dimension: Dimension) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    distinct_values(records, dimension)
}

/// Two-way comparison. The session chart is ordered by combined value,
/// largest first.
pub fn compare_two<'a, I>(
    records: I,
    dimension: Dimension,
    first: &str,
    second: &str,
) -> Result<Comparison, ComparisonError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut comparison = compare(records, dimension, &[first, second])?;
    comparison
        .sessions
        .sort_by(|a, b| compare_measure(b.combined(), a.combined()));
    Ok(comparison)
}

/// Three-way comparison. The session chart keeps first-seen order.
pub fn compare_three<'a, I>(
    records: I,
    dimension: Dimension,
    values: [&str; 3],
) -> Result<Comparison, ComparisonError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    compare(records, dimension, &values)
}

/// Validates a selection of 2 or 3 values.
pub fn validate_selection(dimension: Dimension, values: &[&str]) -> Result<(), ComparisonError> {
    let expected = values.len();
    if !(2..=3).contains(&expected) {
        return Err(ComparisonError::UnsupportedArity(expected));
    }
    if values.iter().any(|v| v.is_empty()) {
        return Err(ComparisonError::Incomplete { dimension, expected });
    }
    let unique: FxHashSet<&str> = values.iter().copied().collect();
    if unique.len() != expected {
        return Err(ComparisonError::NotDistinct { dimension, expected });
    }
    Ok(())
}

/// Partitions the records by the selected values and computes every
/// subset's metrics, the changes against the first subset, and the
/// per-session dataset (first-seen order).
pub fn compare<'a, I>(
    records: I,
    dimension: Dimension,
    values: &[&str],
) -> Result<Comparison, ComparisonError>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    validate_selection(dimension, values)?;

    let mut subsets: Vec<Vec<&SalesRecord>> = vec![Vec::new(); values.len()];
    for record in records {
        let key = dimension.key(record);
        if let Some(idx) = values.iter().position(|v| *v == key) {
            subsets[idx].push(record);
        }
    }

    let periods: Vec<PeriodMetrics> = values
        .iter()
        .zip(&subsets)
        .map(|(label, subset)| PeriodMetrics::from_records(*label, subset.iter().copied()))
        .collect();

    let baseline = &periods[0];
    let changes: Vec<MetricChange> = periods[1..]
        .iter()
        .flat_map(|period| {
            ComparedMetric::CARDS.into_iter().map(move |metric| MetricChange {
                metric,
                against: period.label.clone(),
                baseline: baseline.get(metric),
                current: period.get(metric),
                change: percentage_change(period.get(metric), baseline.get(metric)),
            })
        })
        .collect();

    let sessions = session_series(&subsets);

    debug!(
        target: "COMPARE",
        "compare dimension={} values={:?} records={:?} sessions={}",
        dimension,
        values,
        periods.iter().map(|p| p.record_count).collect::<Vec<_>>(),
        sessions.len()
    );

    Ok(Comparison {
        dimension,
        periods,
        changes,
        sessions,
    })
}

fn session_series(subsets: &[Vec<&SalesRecord>]) -> Vec<SessionSeries> {
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut series: Vec<SessionSeries> = Vec::new();

    for (idx, subset) in subsets.iter().enumerate() {
        for record in subset {
            let session = Dimension::Session.key(record);
            let slot = *slots.entry(session).or_insert_with(|| {
                series.push(SessionSeries {
                    session: session.to_string(),
                    values: SmallVec::from_elem(0.0, subsets.len()),
                });
                series.len() - 1
            });
            series[slot].values[idx] += record.value();
        }
    }

    series
}
