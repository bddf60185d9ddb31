//! The aggregate document persisted on disk.
//!
//! A [`Document`] always serializes to an object with exactly the keys
//! `products`, `orders` and `logs`. All three keys are required on load, so a
//! file missing one of them is reported as corrupt instead of silently reset.

use super::{LogEntry, Order, Product};
use serde::{Deserialize, Serialize};

/// Everything the storefront persists
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Catalogue, in insertion order
    pub products: Vec<Product>,
    /// Placed orders, in insertion order
    pub orders: Vec<Order>,
    /// Audit log, oldest first
    pub logs: Vec<LogEntry>,
}

/// A record living in one of the document's collections.
///
/// Implemented by the three stored types so that listing, lookup and removal
/// are written once in the service layer.
pub trait Record: Clone {
    /// Name used in not-found messages
    const RESOURCE: &'static str;

    /// Identifier, unique within the collection.
    fn id(&self) -> &str;

    /// The collection holding this record type.
    fn collection(doc: &Document) -> &[Self];

    /// Mutable access to the same collection.
    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
}

impl Record for Product {
    const RESOURCE: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(doc: &Document) -> &[Self] {
        &doc.products
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.products
    }
}

impl Record for Order {
    const RESOURCE: &'static str = "Order";

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(doc: &Document) -> &[Self] {
        &doc.orders
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.orders
    }
}

impl Record for LogEntry {
    const RESOURCE: &'static str = "Log entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn collection(doc: &Document) -> &[Self] {
        &doc.logs
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.logs
    }
}
