//! `/api/orders` handlers. Orders have no update route.

use crate::{
    api::{AppState, json_body},
    core::order,
    entities::{NewOrder, Order},
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

/// `GET /api/orders`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    order::list_orders(&state.store).await.map(Json)
}

/// `GET /api/orders/:id`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    order::get_order(&state.store, &id).await.map(Json)
}

/// `POST /api/orders`, answers 201 with the stored order
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let input = json_body(payload)?;
    let created = order::create_order(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /api/orders/:id`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let removed = order::delete_order(&state.store, &id).await?;
    Ok(Json(json!({ "message": "Order deleted", "id": removed.id })))
}
