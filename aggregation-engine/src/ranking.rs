//! FILENAME: aggregation-engine/src/ranking.rs
//! Ranking - top-N selection over bucket sequences.

use records::Measure;

use crate::bucket::{compare_measure, AggregateBucket};

/// Sorts descending by `measure` and keeps the first `n`.
///
/// The sort is stable, so buckets with equal measures keep their input
/// order and repeated calls on the same input return the same ranking.
pub fn top_n(mut buckets: Vec<AggregateBucket>, measure: Measure, n: usize) -> Vec<AggregateBucket> {
    buckets.sort_by(|a, b| compare_measure(b.measure(measure), a.measure(measure)));
    buckets.truncate(n);
    buckets
}

/// 1-based rank positions for display next to a ranking.
pub fn ranked(buckets: &[AggregateBucket]) -> impl Iterator<Item = (usize, &AggregateBucket)> {
    buckets.iter().enumerate().map(|(i, b)| (i + 1, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::group_by;
    use crate::definition::GroupingSpec;
    use records::{Dimension, SalesRecord};

    fn create_test_buckets() -> Vec<AggregateBucket> {
        let records: Vec<SalesRecord> = [("S1", 10.0), ("S2", 40.0), ("S3", 10.0), ("S4", 25.0)]
            .iter()
            .enumerate()
            .map(|(i, (session, value))| {
                SalesRecord::new(i.to_string())
                    .with(Dimension::Session, *session)
                    .with_measure(Measure::Value, *value)
                    .with_measure(Measure::Profit, 100.0 - *value)
            })
            .collect();
        group_by(&records, &GroupingSpec::by(Dimension::Session))
    }

    #[test]
    fn test_top_n_truncates_descending() {
        let top = top_n(create_test_buckets(), Measure::Value, 2);
        let keys: Vec<&str> = top.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["S2", "S4"]);
    }

    #[test]
    fn test_top_n_ties_are_deterministic() {
        let first = top_n(create_test_buckets(), Measure::Value, 4);
        let second = top_n(create_test_buckets(), Measure::Value, 4);
        assert_eq!(first, second);
        assert_eq!(first[2].key, "S1");
        assert_eq!(first[3].key, "S3");
    }

    #[test]
    fn test_top_n_by_other_measure() {
        let top = top_n(create_test_buckets(), Measure::Profit, 1);
        assert_eq!(top[0].key, "S1");
    }

    #[test]
    fn test_n_larger_than_input() {
        assert_eq!(top_n(create_test_buckets(), Measure::Value, 20).len(), 4);
        assert!(top_n(Vec::new(), Measure::Value, 5).is_empty());
    }

    #[test]
    fn test_ranked_positions_start_at_one() {
        let top = top_n(create_test_buckets(), Measure::Value, 3);
        let positions: Vec<usize> = ranked(&top).map(|(rank, _)| rank).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
}
