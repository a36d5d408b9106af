//! FILENAME: tests/common/mod.rs
//! Fixtures and assertion helpers for aggregation-engine integration tests.

#![allow(dead_code)]

use aggregation_engine::{Dimension, Measure, SalesRecord};

// ============================================================================
// FIXTURES
// ============================================================================

/// A small, hand-checked sales data set.
///
/// Totals by value: overall 14000; stores Centro 9000, Sul 3900, Norte 1100;
/// sessions Informática 8250, Eletro 4400, Moda 1350; months Janeiro 6250,
/// Fevereiro 5750, Março 2000.
pub struct SalesFixture;

impl SalesFixture {
    #[allow(clippy::type_complexity)]
    pub fn rows() -> Vec<(
        &'static str, // month
        &'static str, // session
        &'static str, // group
        &'static str, // subgroup
        &'static str, // store
        &'static str, // product code
        &'static str, // description
        f64,          // quantity
        f64,          // value
        f64,          // profit
    )> {
        vec![
            ("Janeiro", "Informática", "Premium", "Notebooks", "Centro", "NB01", "Notebook Pro", 2.0, 5000.0, 800.0),
            ("Janeiro", "Informática", "Standard", "Mouses", "Norte", "MS01", "Mouse Óptico", 10.0, 500.0, 150.0),
            ("Fevereiro", "Eletro", "Premium", "Geladeiras", "Centro", "GL01", "Geladeira Frost", 1.0, 3000.0, 400.0),
            ("Fevereiro", "Informática", "Premium", "Notebooks", "Sul", "NB01", "Notebook Pro", 1.0, 2500.0, 400.0),
            ("Março", "Moda", "Básico", "Camisetas", "Norte", "CM01", "Camiseta Algodão", 20.0, 600.0, 200.0),
            ("Março", "Eletro", "Standard", "Fogões", "Sul", "FG01", "Fogão 4 Bocas", 2.0, 1400.0, 210.0),
            ("Janeiro", "Moda", "Promocional", "Calças", "Centro", "CL01", "Calça Jeans", 5.0, 750.0, 120.0),
            ("Fevereiro", "Informática", "Standard", "Mouses", "Centro", "MS01", "Mouse Óptico", 5.0, 250.0, 75.0),
        ]
    }

    pub fn records() -> Vec<SalesRecord> {
        Self::rows()
            .into_iter()
            .enumerate()
            .map(
                |(i, (month, session, group, subgroup, store, code, description, quantity, value, profit))| {
                    SalesRecord::new(format!("r{}", i + 1))
                        .with(Dimension::Month, month)
                        .with(Dimension::Year, "2024")
                        .with(Dimension::Session, session)
                        .with(Dimension::Group, group)
                        .with(Dimension::Subgroup, subgroup)
                        .with(Dimension::Store, store)
                        .with(Dimension::Product, code)
                        .with_description(description)
                        .with_measure(Measure::Quantity, quantity)
                        .with_measure(Measure::Value, value)
                        .with_measure(Measure::Profit, profit)
                },
            )
            .collect()
    }

    pub fn total_value() -> f64 {
        14000.0
    }
}

/// Records spread over `stores` stores and `products` products, for
/// size-independent properties.
pub fn create_synthetic_records(count: usize, stores: usize, products: usize) -> Vec<SalesRecord> {
    (0..count)
        .map(|i| {
            SalesRecord::new(i.to_string())
                .with(Dimension::Store, format!("Loja {}", i % stores))
                .with(Dimension::Product, format!("P{:04}", i % products))
                .with(Dimension::Session, format!("S{}", i % 7))
                .with_measure(Measure::Value, ((i * 37) % 1000) as f64 + 1.0)
        })
        .collect()
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that two floats agree to within 0.001.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.001,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// Keys of a bucket-like sequence, for order assertions.
pub fn keys<T, F>(items: &[T], key: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    items.iter().map(|item| key(item).to_string()).collect()
}
