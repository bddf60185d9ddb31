//! HTTP Endpoint Layer - axum routes over the core services.
//!
//! Every request loads what it needs from the [`DocumentStore`]; the only state
//! shared between requests is the store handle itself.
//!
//! ## Routes
//!
//! - `GET /health`, `GET /api/health`
//! - `GET|POST /api/products`, `GET|PUT|DELETE /api/products/:id`
//! - `GET|POST /api/orders`, `GET|DELETE /api/orders/:id`
//! - `GET|DELETE /api/logs`
//! - `GET /api/stats`

/// Error to response conversion
pub mod error;
/// Route handlers
pub mod handlers;
/// Access logging and CORS
pub mod middleware;


use crate::{
    config::AppConfig,
    errors::{Error, Result},
    store::DocumentStore,
};
use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    middleware::from_fn,
    routing::get,
};
use handlers::{health, logs, orders, products, stats};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info};

/// State shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
}

impl AppState {
    #[must_use]
    pub const fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/health", get(health::api_health))
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/:id",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/:id", get(orders::get).delete(orders::delete))
        .route("/api/logs", get(logs::list).delete(logs::clear))
        .route("/api/stats", get(stats::stats))
        .fallback(error::route_not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(middleware::log_request))
                .layer(from_fn(middleware::preflight_no_content))
                .layer(middleware::cors_layer())
                .layer(CatchPanicLayer::custom(error::panic_response)),
        )
}

/// Unwraps a JSON body, turning a decode failure into a validation error.
pub(crate) fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| Error::validation(rejection.body_text()))
}

/// Opens the store and serves the API until Ctrl-C.
///
/// # Errors
/// Returns an error if the store cannot be opened or the address cannot be bound.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let store = DocumentStore::open(&config.store.path).await?;
    let state = AppState::new(Arc::new(store));

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(
        "Storefront API listening on http://{} (document: {:?})",
        listener.local_addr()?,
        config.store.path
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Storefront API stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
