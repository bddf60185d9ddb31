//! Text fragments for each dashboard tab.

use super::dashboard::{Banner, Tab, TabView};
use crate::entities::{ANONYMOUS_CUSTOMER, LogEntry, Order, Product};
use std::fmt::Write;

/// `  [Products]   Orders    Logs  ` with the active tab bracketed.
#[must_use]
pub fn tab_bar(active: Tab) -> String {
    let mut out = String::new();
    for tab in Tab::ALL {
        if tab == active {
            let _ = write!(out, " [{tab}] ");
        } else {
            let _ = write!(out, "  {tab}  ");
        }
    }
    out.push('\n');
    out
}

/// One-line banner, prefixed `OK:` or `ERROR:`.
#[must_use]
pub fn banner(banner: &Banner) -> String {
    match banner {
        Banner::Success(message) => format!("OK: {message}\n"),
        Banner::Error(message) => format!("ERROR: {message}\n"),
    }
}

fn status_line<T>(view: &TabView<T>, what: &str) -> Option<String> {
    match view {
        TabView::Loading => Some(format!("Loading {what}...\n")),
        TabView::Failed(message) => Some(format!("ERROR: {message}\n")),
        TabView::Ready(_) => None,
    }
}

/// Products tab: one block per product.
#[must_use]
pub fn products(view: &TabView<Product>) -> String {
    if let Some(line) = status_line(view, "products") {
        return line;
    }
    let TabView::Ready(products) = view else {
        return String::new();
    };

    let mut out = format!("Products ({})\n", products.len());
    for p in products {
        let _ = writeln!(out, "- {} [{}]", p.name, p.id);
        let _ = writeln!(
            out,
            "  Category: {} | Price: ${:.2} | Stock: {}",
            p.category, p.price, p.stock
        );
        let _ = writeln!(
            out,
            "  Description: {}",
            p.description.as_deref().unwrap_or("N/A")
        );
    }
    out
}

/// Orders tab as a table, with `Anonymous` and `$0.00` fallbacks.
#[must_use]
pub fn orders(view: &TabView<Order>) -> String {
    if let Some(line) = status_line(view, "orders") {
        return line;
    }
    let TabView::Ready(orders) = view else {
        return String::new();
    };

    let mut out = format!("Orders ({})\n", orders.len());
    let _ = writeln!(
        out,
        "{:<36}  {:<20}  {:>10}  {:<10}  {:>5}",
        "ID", "Customer", "Total", "Date", "Items"
    );
    for o in orders {
        let customer = if o.customer_name.trim().is_empty() {
            ANONYMOUS_CUSTOMER
        } else {
            o.customer_name.as_str()
        };
        let _ = writeln!(
            out,
            "{:<36}  {:<20}  {:>10}  {:<10}  {:>5}",
            o.id,
            customer,
            format!("${:.2}", o.total),
            o.created_at.format("%Y-%m-%d"),
            o.items.len()
        );
    }
    out
}

/// Logs tab as a table.
#[must_use]
pub fn logs(view: &TabView<LogEntry>) -> String {
    if let Some(line) = status_line(view, "logs") {
        return line;
    }
    let TabView::Ready(logs) = view else {
        return String::new();
    };

    let mut out = format!("System logs ({})\n", logs.len());
    let _ = writeln!(
        out,
        "{:<16}  {:<19}  {:<8}  Details",
        "Action", "Date", "Actor"
    );
    for l in logs {
        let _ = writeln!(
            out,
            "{:<16}  {:<19}  {:<8}  {}",
            l.action.as_str(),
            l.timestamp.format("%Y-%m-%d %H:%M:%S"),
            l.admin,
            l.details
        );
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{AuditAction, Category};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_products_fragment() {
        let product = Product {
            id: "p1".to_string(),
            name: "Pad".to_string(),
            category: Category::Manettes,
            price: 29.9,
            stock: 5,
            description: None,
            image: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        };
        let out = products(&TabView::Ready(vec![product]));
        assert!(out.starts_with("Products (1)"));
        assert!(out.contains("Price: $29.90"));
        assert!(out.contains("Description: N/A"));
    }

    #[test]
    fn test_orders_fragment_fallbacks() {
        let order = Order {
            id: "o1".to_string(),
            customer_name: String::new(),
            total: 0.0,
            items: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap(),
        };
        let out = orders(&TabView::Ready(vec![order]));
        assert!(out.contains(ANONYMOUS_CUSTOMER));
        assert!(out.contains("$0.00"));
        assert!(out.contains("2025-03-04"));
    }

    #[test]
    fn test_logs_fragment() {
        let entry = LogEntry {
            id: "l1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 4, 12, 30, 0).unwrap(),
            action: AuditAction::ProductDeleted,
            details: "Product deleted: Pad".to_string(),
            admin: "Admin".to_string(),
        };
        let out = logs(&TabView::Ready(vec![entry]));
        assert!(out.contains("PRODUCT_DELETED"));
        assert!(out.contains("2025-03-04 12:30:00"));
        assert!(out.contains("Product deleted: Pad"));
    }

    #[test]
    fn test_loading_and_failure_are_visible() {
        assert!(products(&TabView::Loading).contains("Loading products"));
        let failed: TabView<Order> = TabView::Failed("connection refused".to_string());
        assert_eq!(orders(&failed), "ERROR: connection refused\n");
    }
}
