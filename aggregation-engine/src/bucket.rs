//! FILENAME: aggregation-engine/src/bucket.rs
//! Buckets - Grouping and reduction of records by key.
//!
//! The grouping pass is a single O(n) scan:
//! - Each distinct key is interned once into a key -> slot map
//! - Buckets live in a Vec in first-seen order (the slot is the index)
//! - Measures are accumulated in place; absent measures count as 0
//!
//! Sorting, when requested, happens after the scan and is always stable so
//! equal measures keep their first-seen order across calls.

use std::cmp::Ordering;

use log::debug;
use records::{calendar_position, Dimension, Measure, SalesRecord, MONTH_NAMES_PT};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::definition::{BucketSort, GroupingSpec};

/// Separator between the parts of a composite key.
pub const KEY_SEPARATOR: &str = " ";

/// Shown for products that were uploaded without a description.
pub const MISSING_DESCRIPTION: &str = "N/A";

// ============================================================================
// AGGREGATE BUCKET
// ============================================================================

/// One group of records sharing a key, with its summed measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    /// Grouping key (`""` for records without a value).
    pub key: String,

    /// Sum of the sold value.
    pub value: f64,

    /// Sum of quantity sold.
    pub quantity: f64,

    /// Sum of profit.
    pub profit: f64,

    /// Number of records in the bucket.
    pub count: usize,

    /// Distinct values of the grouping's secondary dimension (0 when none).
    pub distinct_count: usize,

    /// First non-blank product description seen in the bucket.
    pub description: Option<String>,
}

impl AggregateBucket {
    fn empty(key: String) -> Self {
        AggregateBucket {
            key,
            value: 0.0,
            quantity: 0.0,
            profit: 0.0,
            count: 0,
            distinct_count: 0,
            description: None,
        }
    }

    /// Returns the summed value of one measure.
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Value => self.value,
            Measure::Quantity => self.quantity,
            Measure::Profit => self.profit,
        }
    }

    /// Description for display, `"N/A"` when none was uploaded.
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(MISSING_DESCRIPTION)
    }
}

// ============================================================================
// ACCUMULATION
// ============================================================================

/// Per-bucket working state. Distinct values are only tracked when the
/// grouping asks for them.
#[derive(Debug, Default)]
struct BucketAccumulator {
    distinct: FxHashSet<String>,
}

/// Builds the composite key for a record, or `None` when a key field that
/// requires a value is empty.
pub fn bucket_key(record: &SalesRecord, dimensions: &[Dimension]) -> Option<String> {
    let mut parts: SmallVec<[&str; 2]> = SmallVec::new();
    for dimension in dimensions {
        let part = dimension.key(record);
        if part.is_empty() && dimension.requires_non_empty() {
            return None;
        }
        parts.push(part);
    }
    Some(parts.join(KEY_SEPARATOR))
}

/// Groups records by the grouping's key, using the default calendar for
/// `BucketSort::CalendarMonth`.
pub fn group_by<'a, I>(records: I, spec: &GroupingSpec) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    group_by_in_calendar(records, spec, &MONTH_NAMES_PT)
}

/// Groups records by the grouping's key. `month_order` is only consulted for
/// `BucketSort::CalendarMonth`.
pub fn group_by_in_calendar<'a, I, S>(
    records: I,
    spec: &GroupingSpec,
    month_order: &[S],
) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'a SalesRecord>,
    S: AsRef<str>,
{
    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut buckets: Vec<AggregateBucket> = Vec::new();
    let mut accumulators: Vec<BucketAccumulator> = Vec::new();
    let mut scanned = 0usize;

    for record in records {
        scanned += 1;
        let Some(key) = bucket_key(record, &spec.dimensions) else {
            continue;
        };

        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = buckets.len();
                buckets.push(AggregateBucket::empty(key.clone()));
                accumulators.push(BucketAccumulator::default());
                slots.insert(key, slot);
                slot
            }
        };

        let bucket = &mut buckets[slot];
        bucket.value += record.value();
        bucket.quantity += record.quantity();
        bucket.profit += record.profit();
        bucket.count += 1;
        if bucket.description.is_none() {
            bucket.description = record.description().map(str::to_string);
        }

        if let Some(distinct) = spec.distinct {
            let acc = &mut accumulators[slot];
            let distinct_key = distinct.key(record);
            if !acc.distinct.contains(distinct_key) {
                acc.distinct.insert(distinct_key.to_string());
            }
        }
    }

    for (bucket, acc) in buckets.iter_mut().zip(&accumulators) {
        bucket.distinct_count = acc.distinct.len();
    }

    sort_buckets(&mut buckets, spec.sort, month_order);

    debug!(
        target: "ENGINE",
        "group_by dims={:?} records={} buckets={}",
        spec.dimensions,
        scanned,
        buckets.len()
    );

    buckets
}

/// Sorts buckets in place. All orders are stable.
pub fn sort_buckets<S: AsRef<str>>(
    buckets: &mut [AggregateBucket],
    sort: BucketSort,
    month_order: &[S],
) {
    match sort {
        BucketSort::FirstSeen => {
            // Buckets are already in first-seen order
        }
        BucketSort::Descending(measure) => {
            buckets.sort_by(|a, b| compare_measure(b.measure(measure), a.measure(measure)));
        }
        BucketSort::Ascending(measure) => {
            buckets.sort_by(|a, b| compare_measure(a.measure(measure), b.measure(measure)));
        }
        BucketSort::Key => {
            buckets.sort_by(|a, b| a.key.cmp(&b.key));
        }
        BucketSort::CalendarMonth => {
            // Keys outside the calendar rank before every month
            buckets.sort_by_key(|b| calendar_position(&b.key, month_order).map_or(0, |p| p + 1));
        }
    }
}

/// Orders two measures, treating incomparable values as equal.
pub(crate) fn compare_measure(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sums one measure over a set of buckets.
pub fn total_of(buckets: &[AggregateBucket], measure: Measure) -> f64 {
    buckets.iter().map(|b| b.measure(measure)).sum()
}
