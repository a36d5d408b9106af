//! FILENAME: aggregation-engine/src/definition.rs
//! Aggregation Definition - The serializable configuration.
//!
//! This module contains the types that DESCRIBE an aggregation request and
//! the engine-wide settings. These structures are designed to be:
//! - Serializable (so a dashboard layout can be saved and reloaded)
//! - Cheap to clone and compare
//! - Immutable snapshots of what a view wants to compute

use records::{default_month_order, Dimension, Measure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// GROUPING
// ============================================================================

/// How the buckets produced by a grouping are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BucketSort {
    /// Keep the order in which keys were first seen.
    #[default]
    FirstSeen,
    /// Descending by a measure (stable: ties keep first-seen order).
    Descending(Measure),
    /// Ascending by a measure (stable).
    Ascending(Measure),
    /// Lexicographic by key.
    Key,
    /// By calendar position of the key in `EngineConfig::month_order`.
    /// Keys outside the calendar come first, in first-seen order.
    CalendarMonth,
}

/// Describes one grouping pass over the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingSpec {
    /// Key fields, outer to inner. Composite keys are joined with a space
    /// (e.g. `[Month, Year]` yields `"Janeiro 2024"`).
    pub dimensions: Vec<Dimension>,

    /// Secondary dimension whose distinct values are counted per bucket
    /// (e.g. sessions touching a store).
    #[serde(default)]
    pub distinct: Option<Dimension>,

    #[serde(default)]
    pub sort: BucketSort,
}

impl GroupingSpec {
    pub fn by(dimension: Dimension) -> Self {
        GroupingSpec {
            dimensions: vec![dimension],
            distinct: None,
            sort: BucketSort::FirstSeen,
        }
    }

    pub fn by_all(dimensions: &[Dimension]) -> Self {
        GroupingSpec {
            dimensions: dimensions.to_vec(),
            distinct: None,
            sort: BucketSort::FirstSeen,
        }
    }

    pub fn counting_distinct(mut self, dimension: Dimension) -> Self {
        self.distinct = Some(dimension);
        self
    }

    pub fn sorted(mut self, sort: BucketSort) -> Self {
        self.sort = sort;
        self
    }

    /// True when any key field excludes records with an empty value.
    pub fn requires_non_empty(&self) -> bool {
        self.dimensions.iter().any(|d| d.requires_non_empty())
    }
}

// ============================================================================
// ABC THRESHOLDS
// ============================================================================

/// Cumulative-percentage bands for ABC classification.
/// A product is A while its post-increment cumulative share is `<= a_max`,
/// B while `<= b_max`, C above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbcThresholds {
    #[serde(default = "default_a_max")]
    pub a_max: f64,

    #[serde(default = "default_b_max")]
    pub b_max: f64,
}

fn default_a_max() -> f64 {
    80.0
}

fn default_b_max() -> f64 {
    95.0
}

impl Default for AbcThresholds {
    fn default() -> Self {
        AbcThresholds {
            a_max: default_a_max(),
            b_max: default_b_max(),
        }
    }
}

// ============================================================================
// RANKING LIMITS
// ============================================================================

/// Row limits used by the dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingLimits {
    /// Top stores, sessions and products cards.
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,

    /// Store performance list in the advanced analytics view.
    #[serde(default = "default_store_performance")]
    pub store_performance: usize,

    /// Session performance list in the advanced analytics view.
    #[serde(default = "default_session_performance")]
    pub session_performance: usize,

    /// Slices shown in a pie chart.
    #[serde(default = "default_pie_slices")]
    pub pie_slices: usize,

    /// Rows in the recent-records table.
    #[serde(default = "default_recent_records")]
    pub recent_records: usize,

    /// Rows in the ABC product table.
    #[serde(default = "default_abc_table")]
    pub abc_table: usize,
}

fn default_top_performers() -> usize {
    5
}

fn default_store_performance() -> usize {
    6
}

fn default_session_performance() -> usize {
    5
}

fn default_pie_slices() -> usize {
    8
}

fn default_recent_records() -> usize {
    10
}

fn default_abc_table() -> usize {
    20
}

impl Default for RankingLimits {
    fn default() -> Self {
        RankingLimits {
            top_performers: default_top_performers(),
            store_performance: default_store_performance(),
            session_performance: default_session_performance(),
            pie_slices: default_pie_slices(),
            recent_records: default_recent_records(),
            abc_table: default_abc_table(),
        }
    }
}

// ============================================================================
// ENGINE CONFIG
// ============================================================================

/// Errors raised while loading an engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ABC thresholds: expected 0 < A ({a_max}) <= B ({b_max}) <= 100")]
    Thresholds { a_max: f64, b_max: f64 },

    #[error("Month order must not be empty")]
    EmptyMonthOrder,
}

/// Engine-wide settings shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub abc: AbcThresholds,

    #[serde(default)]
    pub limits: RankingLimits,

    /// Calendar used to order month keys.
    #[serde(default = "default_month_order")]
    pub month_order: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            abc: AbcThresholds::default(),
            limits: RankingLimits::default(),
            month_order: default_month_order(),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON override. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let AbcThresholds { a_max, b_max } = self.abc;
        if !(a_max > 0.0 && a_max <= b_max && b_max <= 100.0) {
            return Err(ConfigError::Thresholds { a_max, b_max });
        }
        if self.month_order.is_empty() {
            return Err(ConfigError::EmptyMonthOrder);
        }
        Ok(())
    }
}
