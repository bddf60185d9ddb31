//! Shared test utilities for the storefront.
//!
//! This module provides helpers for setting up throwaway document stores and
//! creating test records with sensible defaults.

use crate::{
    core::{order, product},
    entities::{Category, NewOrder, NewProduct, Order, Product},
    errors::Result,
    store::DocumentStore,
};
use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Opens a store over a fresh temporary directory.
///
/// The `TempDir` must be kept alive for as long as the store is used.
pub async fn setup_test_store() -> Result<(TempDir, Arc<DocumentStore>)> {
    init_test_tracing();
    let dir = tempfile::tempdir()?;
    let store = DocumentStore::open(dir.path().join("database.json")).await?;
    Ok((dir, Arc::new(store)))
}

/// A complete, valid product payload.
///
/// # Defaults
/// * `category`: manettes
/// * `price`: 29.99
/// * `stock`: 5
#[must_use]
pub fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: Some(name.to_string()),
        category: Some(Category::Manettes),
        price: Some(29.99),
        stock: Some(5),
        description: None,
        image: None,
    }
}

/// Creates a test product with the defaults of [`new_product`].
pub async fn create_test_product(store: &DocumentStore, name: &str) -> Result<Product> {
    product::create_product(store, new_product(name)).await
}

/// Creates a test order for `customer` with the given total and one opaque line item.
pub async fn create_test_order(
    store: &DocumentStore,
    customer: &str,
    total: f64,
) -> Result<Order> {
    order::create_order(
        store,
        NewOrder {
            customer_name: Some(customer.to_string()),
            total: Some(total),
            items: Some(vec![serde_json::json!({ "name": "Pad", "quantity": 1 })]),
        },
    )
    .await
}
