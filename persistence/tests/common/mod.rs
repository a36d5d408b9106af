//! FILENAME: tests/common/mod.rs
//! Fixtures for persistence integration tests.

#![allow(dead_code)]

use persistence::{ImportBatch, ImportRow};
use records::{Dimension, Measure, SalesRecord};

pub struct SalesFixture;

impl SalesFixture {
    pub fn records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new("a1")
                .with(Dimension::Month, "Janeiro")
                .with(Dimension::Session, "Informática")
                .with(Dimension::Store, "Centro")
                .with(Dimension::Product, "NB01")
                .with_description("Notebook Pro")
                .with_measure(Measure::Value, 5000.0)
                .with_measure(Measure::Profit, 800.0),
            SalesRecord::new("a2")
                .with(Dimension::Month, "Fevereiro")
                .with(Dimension::Session, "Moda")
                .with(Dimension::Store, "Norte")
                .with(Dimension::Product, "CM01")
                .with_measure(Measure::Value, 600.0),
            // Legacy upload: only a total.
            SalesRecord::new("a3")
                .with(Dimension::Month, "Março")
                .with(Dimension::Session, "Moda")
                .with_total(1400.0),
        ]
    }

    pub fn batch() -> ImportBatch {
        ImportBatch::new("Abril", "Eletro", "Standard", "B").with_year("2024")
    }

    pub fn rows() -> Vec<ImportRow> {
        vec![
            ImportRow {
                product_code: Some("GL01".to_string()),
                description: Some("Geladeira Frost".to_string()),
                quantity: Some(2.0),
                value: Some(6000.0),
                profit: Some(900.0),
            },
            ImportRow {
                product_code: Some("FG01".to_string()),
                description: None,
                quantity: Some(1.0),
                value: Some(1400.0),
                profit: None,
            },
        ]
    }
}

/// Assert that two floats agree to within 0.001.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.001,
        "expected {} but got {}",
        expected,
        actual
    );
}
