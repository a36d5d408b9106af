//! FILENAME: aggregation-engine/src/analytics.rs
//! Advanced analytics - store and session performance, monthly trend and
//! group diversification.

use records::{Dimension, Measure, SalesRecord};
use serde::{Deserialize, Serialize};

use crate::bucket::{group_by, total_of, AggregateBucket};
use crate::definition::{BucketSort, GroupingSpec};
use crate::percent::percentage_of;

/// More distinct groups than this counts as a diversified portfolio.
pub const DIVERSIFIED_MIN_GROUPS: usize = 3;

// ============================================================================
// STORE / SESSION PERFORMANCE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePerformance {
    pub store: String,
    pub total: f64,
    pub count: usize,
    pub distinct_sessions: usize,
    /// Total as a percentage of the best store's total.
    pub relative_to_best: f64,
}

/// Stores by value, largest first, with the sessions that touched each.
pub fn store_performance<'a, I>(records: I, limit: usize) -> Vec<StorePerformance>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let spec = GroupingSpec::by(Dimension::Store)
        .counting_distinct(Dimension::Session)
        .sorted(BucketSort::Descending(Measure::Value));
    let buckets = group_by(records, &spec);
    let best = buckets.first().map(|b| b.value).unwrap_or(0.0);

    buckets
        .into_iter()
        .take(limit)
        .map(|b| StorePerformance {
            relative_to_best: percentage_of(b.value, best),
            store: b.key,
            total: b.value,
            count: b.count,
            distinct_sessions: b.distinct_count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPerformance {
    pub session: String,
    pub total: f64,
    pub count: usize,
    pub distinct_stores: usize,
    /// Share of the overall value.
    pub share: f64,
}

/// Sessions by value, largest first, with the stores active in each.
pub fn session_performance<'a, I>(records: I, limit: usize) -> Vec<SessionPerformance>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let spec = GroupingSpec::by(Dimension::Session)
        .counting_distinct(Dimension::Store)
        .sorted(BucketSort::Descending(Measure::Value));
    let buckets = group_by(records, &spec);
    let total = total_of(&buckets, Measure::Value);

    buckets
        .into_iter()
        .take(limit)
        .map(|b| SessionPerformance {
            share: percentage_of(b.value, total),
            session: b.key,
            total: b.value,
            count: b.count,
            distinct_stores: b.distinct_count,
        })
        .collect()
}

// ============================================================================
// MONTHLY TREND
// ============================================================================

/// Value per `"{month} {year}"` period and the growth from the first to
/// the last period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Periods ordered by key, lexicographically.
    pub periods: Vec<AggregateBucket>,
    /// `(last - first) / first * 100`, with a first total of 0 read as 1.
    /// 0 when there are fewer than two periods.
    pub growth: f64,
}

impl MonthlyTrend {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let spec = GroupingSpec::by_all(&[Dimension::Month, Dimension::Year]).sorted(BucketSort::Key);
        let periods = group_by(records, &spec);

        let growth = match (periods.first(), periods.last()) {
            (Some(first), Some(last)) if periods.len() > 1 => {
                let base = if first.value != 0.0 { first.value } else { 1.0 };
                (last.value - first.value) / base * 100.0
            }
            _ => 0.0,
        };

        MonthlyTrend { periods, growth }
    }

    /// Labels of the first and last periods, when there are at least two.
    pub fn span(&self) -> Option<(&str, &str)> {
        if self.periods.len() < 2 {
            return None;
        }
        let first = self.periods.first()?;
        let last = self.periods.last()?;
        Some((first.key.as_str(), last.key.as_str()))
    }
}

// ============================================================================
// GROUP DIVERSITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub group: String,
    pub total: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDiversity {
    /// Groups by value, largest first.
    pub groups: Vec<GroupShare>,
    /// Number of distinct groups.
    pub diversity_score: usize,
    pub is_diversified: bool,
}

impl GroupDiversity {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let spec = GroupingSpec::by(Dimension::Group).sorted(BucketSort::Descending(Measure::Value));
        let buckets = group_by(records, &spec);
        let total = total_of(&buckets, Measure::Value);
        let diversity_score = buckets.len();

        let groups = buckets
            .into_iter()
            .map(|b| GroupShare {
                share: percentage_of(b.value, total),
                group: b.key,
                total: b.value,
            })
            .collect();

        GroupDiversity {
            groups,
            diversity_score,
            is_diversified: diversity_score > DIVERSIFIED_MIN_GROUPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn record(id: &str, store: &str, session: &str, total: f64) -> SalesRecord {
        SalesRecord::new(id)
            .with(Dimension::Store, store)
            .with(Dimension::Session, session)
            .with_total(total)
    }

    #[test]
    fn test_store_performance() {
        let records = vec![
            record("1", "Centro", "Moda", 100.0),
            record("2", "Centro", "Casa", 100.0),
            record("3", "Norte", "Moda", 50.0),
        ];
        let stores = store_performance(&records, 6);

        assert_eq!(stores.len(), 2);
        assert_eq!(stores[0].store, "Centro");
        assert_eq!(stores[0].distinct_sessions, 2);
        assert_eq!(stores[0].count, 2);
        assert!((stores[0].relative_to_best - 100.0).abs() < EPSILON);
        assert!((stores[1].relative_to_best - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_store_performance_with_zero_totals() {
        let records = vec![record("1", "Centro", "Moda", 0.0)];
        let stores = store_performance(&records, 6);
        assert_eq!(stores[0].relative_to_best, 0.0);
    }

    #[test]
    fn test_session_performance_share() {
        let records = vec![
            record("1", "Centro", "Moda", 75.0),
            record("2", "Norte", "Moda", 0.0),
            record("3", "Norte", "Casa", 25.0),
        ];
        let sessions = session_performance(&records, 5);

        assert_eq!(sessions[0].session, "Moda");
        assert_eq!(sessions[0].distinct_stores, 2);
        assert!((sessions[0].share - 75.0).abs() < EPSILON);
    }

    #[test]
    fn test_monthly_trend_growth() {
        let records = vec![
            SalesRecord::new("1").with(Dimension::Month, "01").with(Dimension::Year, "2024").with_total(100.0),
            SalesRecord::new("2").with(Dimension::Month, "02").with(Dimension::Year, "2024").with_total(150.0),
        ];
        let trend = MonthlyTrend::compute(&records);

        assert_eq!(trend.periods.len(), 2);
        assert!((trend.growth - 50.0).abs() < EPSILON);
        assert_eq!(trend.span(), Some(("01 2024", "02 2024")));
    }

    #[test]
    fn test_monthly_trend_zero_base_reads_as_one() {
        let records = vec![
            SalesRecord::new("1").with(Dimension::Month, "01").with(Dimension::Year, "2024").with_total(0.0),
            SalesRecord::new("2").with(Dimension::Month, "02").with(Dimension::Year, "2024").with_total(3.0),
        ];
        let trend = MonthlyTrend::compute(&records);
        assert!((trend.growth - 300.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_period_has_no_growth() {
        let records = vec![SalesRecord::new("1").with(Dimension::Month, "01").with_total(10.0)];
        let trend = MonthlyTrend::compute(&records);
        assert_eq!(trend.growth, 0.0);
        assert!(trend.span().is_none());
    }

    #[test]
    fn test_group_diversity() {
        let records: Vec<SalesRecord> = ["Premium", "Standard", "Básico", "Promocional"]
            .iter()
            .enumerate()
            .map(|(i, group)| {
                SalesRecord::new(i.to_string())
                    .with(Dimension::Group, *group)
                    .with_total((i + 1) as f64 * 10.0)
            })
            .collect();
        let diversity = GroupDiversity::compute(&records);

        assert_eq!(diversity.diversity_score, 4);
        assert!(diversity.is_diversified);
        assert_eq!(diversity.groups[0].group, "Promocional");
        assert!((diversity.groups[0].share - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_three_groups_are_not_diversified() {
        let records: Vec<SalesRecord> = ["A", "B", "C"]
            .iter()
            .map(|g| SalesRecord::new(*g).with(Dimension::Group, *g).with_total(1.0))
            .collect();
        assert!(!GroupDiversity::compute(&records).is_diversified);
    }
}
