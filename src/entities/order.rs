//! Order entity - purchases placed through the storefront.
//!
//! Orders are immutable once created; the only mutation is deletion. Line items
//! are kept as opaque JSON values since the store never interprets them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Customer name stored when the order did not carry one.
pub const ANONYMOUS_CUSTOMER: &str = "Anonymous";

/// A stored order record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Generated unique identifier
    pub id: String,
    /// Orders stored without a customer read as [`ANONYMOUS_CUSTOMER`]
    #[serde(default = "anonymous_customer")]
    pub customer_name: String,
    /// Order total; documents written before totals were mandatory read as 0
    #[serde(default)]
    pub total: f64,
    /// Line items, stored as given
    #[serde(default)]
    pub items: Vec<Value>,
    /// When the order was placed
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
}

fn anonymous_customer() -> String {
    ANONYMOUS_CUSTOMER.to_string()
}

/// Fields accepted when creating an order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Blank or absent means anonymous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// Absent means 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Absent means no items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_legacy_order_without_total_reads_as_zero() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "customerName": "Lea",
            "date": "2025-01-02T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(order.total, 0.0);
        assert!(order.items.is_empty());
        assert_eq!(order.created_at.to_rfc3339(), "2025-01-02T10:00:00+00:00");
    }

    #[test]
    fn test_legacy_order_without_customer_reads_as_anonymous() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "total": 10,
            "items": [],
            "date": "2025-01-02T10:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(order.customer_name, ANONYMOUS_CUSTOMER);
        assert_eq!(order.total, 10.0);
    }
}
