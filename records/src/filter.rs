//! FILENAME: records/src/filter.rs
//! PURPOSE: The dashboard filter set and its record predicate.
//! CONTEXT: Filtering is a pure derivation. The filtered view is recomputed
//! from the full record set whenever either the records or the filters
//! change. An unset dimension matches everything; UI sentinel values such
//! as "all" are translated to "unset" on the way in and never reach the
//! predicate.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::record::SalesRecord;

/// Selector values that mean "no filter" for a dimension.
pub const ALL_SENTINELS: [&str; 2] = ["all", "todos"];

/// Returns true when `value` should be read as "no filter".
pub fn is_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || ALL_SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(value))
}

/// Active filters, one optional value per dimension.
///
/// Categorical dimensions match exactly. `product` is free text and matches
/// case-insensitively as a substring of the product code or description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub month: Option<String>,

    #[serde(default)]
    pub year: Option<String>,

    #[serde(default)]
    pub session: Option<String>,

    #[serde(default)]
    pub group: Option<String>,

    #[serde(default)]
    pub subgroup: Option<String>,

    #[serde(default)]
    pub store: Option<String>,

    #[serde(default)]
    pub product: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        FilterState::default()
    }

    /// Sets (or clears, for a sentinel) the filter for one dimension.
    pub fn set(&mut self, dimension: Dimension, value: &str) {
        let value = if is_sentinel(value) {
            None
        } else {
            Some(value.trim().to_string())
        };
        *self.slot_mut(dimension) = value;
    }

    pub fn with(mut self, dimension: Dimension, value: &str) -> Self {
        self.set(dimension, value);
        self
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.slot(dimension).as_deref()
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.slot(*d).is_none())
    }

    /// The active `(dimension, value)` pairs, in display order.
    pub fn active(&self) -> Vec<(Dimension, &str)> {
        Dimension::ALL
            .iter()
            .filter_map(|d| self.get(*d).map(|v| (*d, v)))
            .collect()
    }

    /// Tests one record against the conjunction of all active filters.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        for dimension in Dimension::ALL {
            let Some(wanted) = self.get(dimension) else {
                continue;
            };
            let matched = match dimension {
                Dimension::Product => product_matches(record, wanted),
                _ => dimension.key(record) == wanted,
            };
            if !matched {
                return false;
            }
        }
        true
    }

    /// Returns the records passing every active filter, in input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a SalesRecord>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    fn slot(&self, dimension: Dimension) -> &Option<String> {
        match dimension {
            Dimension::Month => &self.month,
            Dimension::Year => &self.year,
            Dimension::Session => &self.session,
            Dimension::Group => &self.group,
            Dimension::Subgroup => &self.subgroup,
            Dimension::Store => &self.store,
            Dimension::Product => &self.product,
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::Month => &mut self.month,
            Dimension::Year => &mut self.year,
            Dimension::Session => &mut self.session,
            Dimension::Group => &mut self.group,
            Dimension::Subgroup => &mut self.subgroup,
            Dimension::Store => &mut self.store,
            Dimension::Product => &mut self.product,
        }
    }
}

fn product_matches(record: &SalesRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    let code = record.product_code.as_deref().unwrap_or("");
    let description = record.product_description.as_deref().unwrap_or("");
    code.to_lowercase().contains(&query) || description.to_lowercase().contains(&query)
}
