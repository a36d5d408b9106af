//! FILENAME: records/src/record.rs
//! PURPOSE: Defines the `SalesRecord` row loaded from the backend store.
//! CONTEXT: Every categorical field is an opaque, optional string and every
//! measure is optional. Absent measures read as 0 through the accessor
//! methods, so aggregation code never has to special-case missing data.
//! Records are immutable once loaded; derived structures live elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, Measure};

/// One row of sales data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Unique identifier (required).
    pub id: String,

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
    pub product_code: Option<String>,

    #[serde(default)]
    pub product_description: Option<String>,

    #[serde(default)]
    pub quantity_sold: Option<f64>,

    #[serde(default)]
    pub value_sold: Option<f64>,

    #[serde(default)]
    pub profit_value: Option<f64>,

    /// Legacy measure from the first upload format. Read as the sold value
    /// when `value_sold` is absent.
    #[serde(default)]
    pub total: Option<f64>,

    /// When the record was created.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl SalesRecord {
    pub fn new(id: impl Into<String>) -> Self {
        SalesRecord {
            id: id.into(),
            ..SalesRecord::default()
        }
    }

    /// Builder-style setter for any grouping dimension.
    /// `Dimension::Product` sets the product code.
    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match dimension {
            Dimension::Month => self.month = value,
            Dimension::Year => self.year = value,
            Dimension::Session => self.session = value,
            Dimension::Group => self.group = value,
            Dimension::Subgroup => self.subgroup = value,
            Dimension::Store => self.store = value,
            Dimension::Product => self.product_code = value,
        }
        self
    }

    /// Builder-style setter for a measure.
    pub fn with_measure(mut self, measure: Measure, amount: f64) -> Self {
        match measure {
            Measure::Value => self.value_sold = Some(amount),
            Measure::Quantity => self.quantity_sold = Some(amount),
            Measure::Profit => self.profit_value = Some(amount),
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = Some(description.into());
        self
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    /// Sold value, falling back to the legacy `total`, then 0.
    pub fn value(&self) -> f64 {
        self.value_sold.or(self.total).unwrap_or(0.0)
    }

    pub fn quantity(&self) -> f64 {
        self.quantity_sold.unwrap_or(0.0)
    }

    pub fn profit(&self) -> f64 {
        self.profit_value.unwrap_or(0.0)
    }

    /// True when the record carries a non-empty product code and may take
    /// part in product-level aggregation.
    pub fn has_product(&self) -> bool {
        self.product_code.as_deref().is_some_and(|code| !code.is_empty())
    }

    /// Product description, if one was supplied and is not blank.
    pub fn description(&self) -> Option<&str> {
        self.product_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }
}
