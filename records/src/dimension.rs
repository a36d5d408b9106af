//! FILENAME: records/src/dimension.rs
//! PURPOSE: Names the categorical dimensions and numeric measures of a record.
//! CONTEXT: Grouping, filtering and comparison all select fields through
//! these enums instead of string keys, so an unknown field name is caught
//! when a request is parsed rather than silently matching nothing.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::record::SalesRecord;

// ============================================================================
// DIMENSIONS
// ============================================================================

/// A categorical field used as a grouping or filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Month,
    Year,
    Session,
    Group,
    Subgroup,
    Store,
    /// Resolves to the product code.
    Product,
}

impl Dimension {
    /// Every dimension, in display order.
    pub const ALL: [Dimension; 7] = [
        Dimension::Month,
        Dimension::Year,
        Dimension::Session,
        Dimension::Group,
        Dimension::Subgroup,
        Dimension::Store,
        Dimension::Product,
    ];

    /// Returns the record's key for this dimension, `""` when absent.
    pub fn key<'r>(&self, record: &'r SalesRecord) -> &'r str {
        let field = match self {
            Dimension::Month => &record.month,
            Dimension::Year => &record.year,
            Dimension::Session => &record.session,
            Dimension::Group => &record.group,
            Dimension::Subgroup => &record.subgroup,
            Dimension::Store => &record.store,
            Dimension::Product => &record.product_code,
        };
        field.as_deref().unwrap_or("")
    }

    /// Product aggregation skips records without a code; every other
    /// dimension keeps them under the empty key.
    pub fn requires_non_empty(&self) -> bool {
        matches!(self, Dimension::Product)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Month => "month",
            Dimension::Year => "year",
            Dimension::Session => "session",
            Dimension::Group => "group",
            Dimension::Subgroup => "subgroup",
            Dimension::Store => "store",
            Dimension::Product => "product",
        }
    }

    /// Parses a dimension name as sent by a UI selector.
    pub fn from_name(name: &str) -> Option<Dimension> {
        let name = name.trim();
        Dimension::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name))
            .or_else(|| {
                // The import sheets label the product column by its code.
                if name.eq_ignore_ascii_case("product_code") {
                    Some(Dimension::Product)
                } else {
                    None
                }
            })
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// MEASURES
// ============================================================================

/// A numeric field being summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Sold value (legacy `total` when `value_sold` is absent).
    #[default]
    Value,
    Quantity,
    Profit,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Value, Measure::Quantity, Measure::Profit];

    /// Reads the measure from a record, 0 when absent.
    pub fn of(&self, record: &SalesRecord) -> f64 {
        match self {
            Measure::Value => record.value(),
            Measure::Quantity => record.quantity(),
            Measure::Profit => record.profit(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Measure::Value => "value_sold",
            Measure::Quantity => "quantity_sold",
            Measure::Profit => "profit_value",
        }
    }
}

/// Lists the distinct non-empty keys of `dimension`, in first-seen order.
/// These are the options offered by filter and comparison selectors.
pub fn distinct_values<'a, I>(records: I, dimension: Dimension) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut values = Vec::new();
    for record in records {
        let key = dimension.key(record);
        if !key.is_empty() && seen.insert(key) {
            values.push(key.to_string());
        }
    }
    values
}
