//! Dashboard statistics.
//!
//! Counts per collection plus the revenue summed over current orders. Computed
//! from a single loaded document so the numbers are mutually consistent.

use crate::{entities::Document, errors::Result, store::DocumentStore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Body of `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of products
    pub total_products: usize,
    /// Number of orders
    pub total_orders: usize,
    /// Sum of `total` over all orders
    pub total_revenue: f64,
    /// Number of audit log entries
    pub total_logs: usize,
}

/// Aggregates the counters over an already loaded document.
#[must_use]
pub fn compute_stats(doc: &Document) -> Stats {
    Stats {
        total_products: doc.products.len(),
        total_orders: doc.orders.len(),
        total_revenue: doc.orders.iter().map(|o| o.total).sum(),
        total_logs: doc.logs.len(),
    }
}

/// Loads the document and computes its statistics.
///
/// # Errors
/// Returns an error if the document cannot be loaded.
#[instrument(skip(store))]
pub async fn load_stats(store: &DocumentStore) -> Result<Stats> {
    let doc = store.load().await?;
    Ok(compute_stats(&doc))
}
