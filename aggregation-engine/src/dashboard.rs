//! FILENAME: aggregation-engine/src/dashboard.rs
//! Dashboard - summary cards, top performers and chart datasets.
//!
//! Each function here is a thin adapter over the grouping primitives: it
//! picks a dimension, a measure and a limit, and shapes the result for one
//! view. Formatting (currency, locale) is left to the presentation layer.

use records::{Dimension, Measure, SalesRecord};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::bucket::{group_by, group_by_in_calendar, AggregateBucket};
use crate::comparison::PeriodMetrics;
use crate::definition::{BucketSort, EngineConfig, GroupingSpec};
use crate::percent::percentage_of;
use crate::ranking::top_n;

// ============================================================================
// SUMMARY CARDS
// ============================================================================

/// The best item of a ranking and its share of the overall value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub key: String,
    pub description: Option<String>,
    pub value: f64,
    pub quantity: f64,
    pub share: f64,
}

impl Highlight {
    fn from_bucket(bucket: AggregateBucket, total_value: f64) -> Self {
        Highlight {
            share: percentage_of(bucket.value, total_value),
            key: bucket.key,
            description: bucket.description,
            value: bucket.value,
            quantity: bucket.quantity,
        }
    }
}

/// Headline metrics for the filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_value: f64,
    pub total_profit: f64,
    pub total_quantity: f64,
    pub record_count: usize,
    /// Distinct non-empty product codes.
    pub distinct_products: usize,
    pub distinct_stores: usize,
    pub distinct_sessions: usize,
    /// `profit / value * 100`, 0 when there is no positive value.
    pub profit_margin: f64,
    pub top_product: Option<Highlight>,
    pub top_store: Option<Highlight>,
}

impl DashboardSummary {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord> + Clone,
    {
        let totals = PeriodMetrics::from_records("", records.clone());

        let distinct_products = records
            .clone()
            .into_iter()
            .filter(|r| r.has_product())
            .map(|r| Dimension::Product.key(r))
            .collect::<FxHashSet<&str>>()
            .len();

        let profit_margin = if totals.total_value > 0.0 {
            totals.total_profit / totals.total_value * 100.0
        } else {
            0.0
        };

        let best = |dimension: Dimension| {
            let spec = GroupingSpec::by(dimension).sorted(BucketSort::Descending(Measure::Value));
            group_by(records.clone(), &spec)
                .into_iter()
                .next()
                .map(|bucket| Highlight::from_bucket(bucket, totals.total_value))
        };

        DashboardSummary {
            top_product: best(Dimension::Product),
            top_store: best(Dimension::Store),
            total_value: totals.total_value,
            total_profit: totals.total_profit,
            total_quantity: totals.total_quantity,
            record_count: totals.record_count,
            distinct_products,
            distinct_stores: totals.distinct_stores,
            distinct_sessions: totals.distinct_sessions,
            profit_margin,
        }
    }
}

// ============================================================================
// TOP PERFORMERS
// ============================================================================

/// Top stores, sessions and products by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformers {
    pub stores: Vec<AggregateBucket>,
    pub sessions: Vec<AggregateBucket>,
    pub products: Vec<AggregateBucket>,
}

impl TopPerformers {
    pub fn compute<'a, I>(records: I, n: usize) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord> + Clone,
    {
        let ranking = |dimension: Dimension| {
            top_n(
                group_by(records.clone(), &GroupingSpec::by(dimension)),
                Measure::Value,
                n,
            )
        };

        TopPerformers {
            stores: ranking(Dimension::Store),
            sessions: ranking(Dimension::Session),
            products: ranking(Dimension::Product),
        }
    }
}

// ============================================================================
// CHART DATASETS
// ============================================================================

/// Value per month, in calendar order.
pub fn sales_by_month<'a, I>(records: I, config: &EngineConfig) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let spec = GroupingSpec::by(Dimension::Month).sorted(BucketSort::CalendarMonth);
    group_by_in_calendar(records, &spec, &config.month_order)
}

/// Value per session, largest first.
pub fn sales_by_session<'a, I>(records: I) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let spec = GroupingSpec::by(Dimension::Session).sorted(BucketSort::Descending(Measure::Value));
    group_by(records, &spec)
}

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the shown slices (not of the full data set).
    pub percentage: f64,
}

/// The `limit` largest groups of `dimension` by `measure`.
pub fn pie_slices<'a, I>(
    records: I,
    dimension: Dimension,
    measure: Measure,
    limit: usize,
) -> Vec<PieSlice>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let shown = top_n(group_by(records, &GroupingSpec::by(dimension)), measure, limit);
    let shown_total: f64 = shown.iter().map(|b| b.measure(measure)).sum();

    shown
        .into_iter()
        .map(|bucket| PieSlice {
            value: bucket.measure(measure),
            percentage: percentage_of(bucket.measure(measure), shown_total),
            label: bucket.key,
        })
        .collect()
}

/// The first `n` records of the set, for the recent-data table.
pub fn recent_records<'a, I>(records: I, n: usize) -> Vec<&'a SalesRecord>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    records.into_iter().take(n).collect()
}
