//! FILENAME: aggregation-engine/src/percent.rs
//! Percentages - share of total, running totals and period change.
//!
//! Every ratio here is guarded: a zero denominator yields 0 (or the
//! growth-from-nothing rule for `percentage_change`), so NaN and Infinity
//! never reach a view.

use records::Measure;
use serde::{Deserialize, Serialize};

use crate::bucket::{total_of, AggregateBucket};

/// `part / total * 100`, or 0 when `total` is 0.
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total != 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Running sum of individual percentages.
pub fn cumulative_percentages(percentages: &[f64]) -> Vec<f64> {
    percentages
        .iter()
        .scan(0.0, |running, p| {
            *running += p;
            Some(*running)
        })
        .collect()
}

/// Relative change from `previous` to `current`, in percent.
///
/// When `previous` is 0 the result is 100 for any positive `current`
/// (growth from nothing) and 0 otherwise.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

/// A bucket together with its share of the grouping's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub bucket: AggregateBucket,
    pub percentage: f64,
    pub cumulative_percentage: f64,
}

/// Computes each bucket's share of the measure's total, in the given order.
/// The cumulative column is only meaningful for descending input.
pub fn share_of_total(buckets: Vec<AggregateBucket>, measure: Measure) -> Vec<BucketShare> {
    let total = total_of(&buckets, measure);
    let percentages: Vec<f64> = buckets
        .iter()
        .map(|b| percentage_of(b.measure(measure), total))
        .collect();
    let cumulative = cumulative_percentages(&percentages);

    buckets
        .into_iter()
        .zip(percentages)
        .zip(cumulative)
        .map(|((bucket, percentage), cumulative_percentage)| BucketShare {
            bucket,
            percentage,
            cumulative_percentage,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::group_by;
    use crate::definition::{BucketSort, GroupingSpec};
    use records::{Dimension, SalesRecord};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_percentage_of_guards_zero_total() {
        assert_eq!(percentage_of(5.0, 0.0), 0.0);
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert!((percentage_of(25.0, 200.0) - 12.5).abs() < EPSILON);
    }

    #[test]
    fn test_percentage_change_rules() {
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
        assert_eq!(percentage_change(50.0, 0.0), 100.0);
        assert_eq!(percentage_change(-5.0, 0.0), 0.0);
        assert!((percentage_change(150.0, 100.0) - 50.0).abs() < EPSILON);
        assert!((percentage_change(75.0, 100.0) + 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_cumulative_is_running_sum() {
        assert_eq!(cumulative_percentages(&[60.0, 30.0, 10.0]), vec![60.0, 90.0, 100.0]);
        assert!(cumulative_percentages(&[]).is_empty());
    }

    #[test]
    fn test_store_shares_example() {
        let records = vec![
            SalesRecord::new("1").with(Dimension::Store, "A").with_measure(Measure::Value, 600.0),
            SalesRecord::new("2").with(Dimension::Store, "B").with_measure(Measure::Value, 300.0),
            SalesRecord::new("3").with(Dimension::Store, "C").with_measure(Measure::Value, 100.0),
        ];
        let spec = GroupingSpec::by(Dimension::Store).sorted(BucketSort::Descending(Measure::Value));
        let shares = share_of_total(group_by(&records, &spec), Measure::Value);

        let expected = [(60.0, 60.0), (30.0, 90.0), (10.0, 100.0)];
        assert_eq!(shares.len(), expected.len());
        for (share, (percentage, cumulative)) in shares.iter().zip(expected) {
            assert!((share.percentage - percentage).abs() < EPSILON);
            assert!((share.cumulative_percentage - cumulative).abs() < EPSILON);
        }
    }

    #[test]
    fn test_shares_of_all_zero_buckets_are_zero() {
        let records = vec![
            SalesRecord::new("1").with(Dimension::Store, "A"),
            SalesRecord::new("2").with(Dimension::Store, "B"),
        ];
        let shares = share_of_total(group_by(&records, &GroupingSpec::by(Dimension::Store)), Measure::Value);
        assert!(shares.iter().all(|s| s.percentage == 0.0 && s.cumulative_percentage == 0.0));
    }
}
