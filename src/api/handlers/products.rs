//! `/api/products` handlers.

use crate::{
    api::{AppState, json_body},
    core::product,
    entities::{NewProduct, Product, ProductPatch},
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    product::list_products(&state.store).await.map(Json)
}

/// `GET /api/products/:id`
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    product::get_product(&state.store, &id).await.map(Json)
}

/// `POST /api/products`, answers 201 with the stored product
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let input = json_body(payload)?;
    let created = product::create_product(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/products/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>> {
    let patch = json_body(payload)?;
    product::update_product(&state.store, &id, patch)
        .await
        .map(Json)
}

/// `DELETE /api/products/:id`
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Value>> {
    let removed = product::delete_product(&state.store, &id).await?;
    Ok(Json(json!({ "message": "Product deleted", "id": removed.id })))
}
