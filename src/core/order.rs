//! Order business logic.
//!
//! Orders are placed by the storefront and can only be listed, fetched and
//! deleted afterwards. Creation is audited under the system actor, deletion
//! under the admin actor.

use crate::{
    core::{audit, resource},
    entities::{ANONYMOUS_CUSTOMER, AuditAction, DEFAULT_ACTOR, NewOrder, Order, SYSTEM_ACTOR},
    errors::{Error, Result},
    store::DocumentStore,
};
use tracing::{info, instrument};

/// # Errors
/// Returns an error if the document cannot be loaded.
#[instrument(skip(store))]
pub async fn list_orders(store: &DocumentStore) -> Result<Vec<Order>> {
    resource::list_all(store).await
}

/// # Errors
/// Returns `Error::NotFound` if no order has this id.
#[instrument(skip(store))]
pub async fn get_order(store: &DocumentStore, id: &str) -> Result<Order> {
    resource::get_by_id(store, id).await
}

/// Records a new order.
///
/// A blank or missing customer name is stored as [`ANONYMOUS_CUSTOMER`]; a
/// missing total is stored as 0.
///
/// # Errors
/// Returns `Error::Validation` if the total is negative or not finite, or a storage error.
#[instrument(skip(store, input))]
pub async fn create_order(store: &DocumentStore, input: NewOrder) -> Result<Order> {
    let total = input.total.unwrap_or(0.0);
    if !total.is_finite() || total < 0.0 {
        return Err(Error::validation(format!(
            "Invalid total {total}: must be a non-negative number"
        )));
    }
    let customer_name = input
        .customer_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ANONYMOUS_CUSTOMER.to_string());
    let items = input.items.unwrap_or_default();
    let created_at = chrono::Utc::now();

    let order = store
        .update(move |doc| {
            let order = Order {
                id: resource::fresh_id::<Order>(doc),
                customer_name,
                total,
                items,
                created_at,
            };
            doc.orders.push(order.clone());
            Ok(order)
        })
        .await?;

    info!("Order created: {} ({:.2})", order.id, order.total);
    audit::record_best_effort(
        store,
        AuditAction::OrderCreated,
        format!(
            "Order {} from {} - {:.2}",
            order.id, order.customer_name, order.total
        ),
        SYSTEM_ACTOR,
    )
    .await;
    Ok(order)
}

/// Deletes an order and returns the removed record.
///
/// # Errors
/// Returns `Error::NotFound` if the order does not exist, or a storage error.
#[instrument(skip(store))]
pub async fn delete_order(store: &DocumentStore, id: &str) -> Result<Order> {
    let order: Order = resource::delete_by_id(store, id).await?;

    info!("Order deleted: {}", order.id);
    audit::record_best_effort(
        store,
        AuditAction::OrderDeleted,
        format!("Order deleted: {}", order.id),
        DEFAULT_ACTOR,
    )
    .await;
    Ok(order)
}
