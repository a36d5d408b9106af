//! FILENAME: aggregation-engine/src/abc.rs
//! ABC Classification - Pareto banding of products by cumulative revenue.
//!
//! Algorithm:
//! 1. Group records by product code (records without a code are skipped)
//! 2. Stable-sort the product buckets descending by value
//! 3. Walk the sorted list adding each product's share to a running total
//! 4. Band each product by the running total AFTER adding its own share
//! 5. Re-group the classified products by band for the summary cards
//!
//! Step 4 means the product that crosses the A threshold is itself banded
//! B, even when most of its share lies below the threshold.

use log::debug;
use records::{Dimension, Measure, SalesRecord};
use serde::{Deserialize, Serialize};

use crate::bucket::{group_by, total_of, AggregateBucket};
use crate::definition::{AbcThresholds, BucketSort, GroupingSpec};
use crate::percent::percentage_of;

// ============================================================================
// CATEGORIES
// ============================================================================

/// ABC band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl AbcCategory {
    pub const ALL: [AbcCategory; 3] = [AbcCategory::A, AbcCategory::B, AbcCategory::C];

    /// Bands a post-increment cumulative percentage.
    pub fn from_cumulative(cumulative_percentage: f64, thresholds: &AbcThresholds) -> Self {
        if cumulative_percentage <= thresholds.a_max {
            AbcCategory::A
        } else if cumulative_percentage <= thresholds.b_max {
            AbcCategory::B
        } else {
            AbcCategory::C
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        }
    }
}

impl std::fmt::Display for AbcCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// A product bucket with its ABC position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedProduct {
    #[serde(flatten)]
    pub bucket: AggregateBucket,
    pub percentage_of_total: f64,
    pub cumulative_percentage: f64,
    pub category: AbcCategory,
}

/// Totals for one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: AbcCategory,
    pub count: usize,
    pub value: f64,
    pub percentage: f64,
}

/// Full ABC analysis: the classified products (descending by value) and
/// one summary per band, always in A, B, C order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcReport {
    pub products: Vec<ClassifiedProduct>,
    pub summary: Vec<CategorySummary>,
    pub total_value: f64,
}

impl AbcReport {
    /// The first `n` products of the ranking.
    pub fn top(&self, n: usize) -> &[ClassifiedProduct] {
        &self.products[..n.min(self.products.len())]
    }

    pub fn summary_for(&self, category: AbcCategory) -> Option<&CategorySummary> {
        self.summary.iter().find(|s| s.category == category)
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Runs the product-level ABC analysis over a record set.
pub fn classify_abc<'a, I>(records: I, thresholds: &AbcThresholds) -> AbcReport
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let spec = GroupingSpec::by(Dimension::Product).sorted(BucketSort::Descending(Measure::Value));
    classify_buckets(group_by(records, &spec), thresholds)
}

/// Classifies buckets that are already sorted descending by value.
/// Any bucket grouping works (stores, sessions); `classify_abc` is the
/// product-level entry point.
pub fn classify_buckets(buckets: Vec<AggregateBucket>, thresholds: &AbcThresholds) -> AbcReport {
    let total_value = total_of(&buckets, Measure::Value);

    let mut cumulative = 0.0;
    let products: Vec<ClassifiedProduct> = buckets
        .into_iter()
        .map(|bucket| {
            let percentage_of_total = percentage_of(bucket.value, total_value);
            cumulative += percentage_of_total;
            ClassifiedProduct {
                bucket,
                percentage_of_total,
                cumulative_percentage: cumulative,
                category: AbcCategory::from_cumulative(cumulative, thresholds),
            }
        })
        .collect();

    let summary = summarize(&products, total_value);

    debug!(
        target: "ABC",
        "classified products={} total_value={} A={} B={} C={}",
        products.len(),
        total_value,
        summary[0].count,
        summary[1].count,
        summary[2].count
    );

    AbcReport {
        products,
        summary,
        total_value,
    }
}

fn summarize(products: &[ClassifiedProduct], total_value: f64) -> Vec<CategorySummary> {
    let mut summary: Vec<CategorySummary> = AbcCategory::ALL
        .iter()
        .map(|&category| CategorySummary {
            category,
            count: 0,
            value: 0.0,
            percentage: 0.0,
        })
        .collect();

    for product in products {
        let entry = &mut summary[product.category as usize];
        entry.count += 1;
        entry.value += product.bucket.value;
    }

    for entry in &mut summary {
        entry.percentage = percentage_of(entry.value, total_value);
    }

    summary
}
