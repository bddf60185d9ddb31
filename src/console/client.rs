//! HTTP client for the storefront API.
//!
//! One request per call, no batching. A non-2xx answer becomes `Error::Api`
//! carrying the server's `error` message; a network failure becomes
//! `Error::Transport`.

use crate::{
    core::report::Stats,
    entities::{LogEntry, NewOrder, NewProduct, Order, Product, ProductPatch},
    errors::{Error, Result},
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

/// Typed client over the storefront HTTP API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the API root including `/api`, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// API root without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let invalid = || Error::Config {
            message: format!("Invalid API URL '{}'", self.base_url),
        };
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/health`, returned as raw JSON.
    pub async fn health(&self) -> Result<Value> {
        self.get(&["health"]).await
    }

    /// All products in insertion order.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.get(&["products"]).await
    }

    /// One product by id.
    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.get(&["products", id]).await
    }

    /// Creates a product and returns the stored record.
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: &NewProduct) -> Result<Product> {
        let response = self.http.post(self.url(&["products"])?).json(input).send().await?;
        decode(response).await
    }

    /// Applies a partial update to a product.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: &ProductPatch) -> Result<Product> {
        let response = self
            .http
            .put(self.url(&["products", id])?)
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    /// Deletes a product.
    pub async fn delete_product(&self, id: &str) -> Result<()> {
        self.delete(&["products", id]).await.map(|_| ())
    }

    /// All orders in insertion order.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.get(&["orders"]).await
    }

    /// One order by id.
    pub async fn get_order(&self, id: &str) -> Result<Order> {
        self.get(&["orders", id]).await
    }

    /// Places an order.
    #[instrument(skip(self, input))]
    pub async fn create_order(&self, input: &NewOrder) -> Result<Order> {
        let response = self.http.post(self.url(&["orders"])?).json(input).send().await?;
        decode(response).await
    }

    /// Deletes an order.
    pub async fn delete_order(&self, id: &str) -> Result<()> {
        self.delete(&["orders", id]).await.map(|_| ())
    }

    /// The audit log, oldest first.
    pub async fn list_logs(&self) -> Result<Vec<LogEntry>> {
        self.get(&["logs"]).await
    }

    /// Clears the logs and returns how many entries were removed.
    pub async fn clear_logs(&self) -> Result<u64> {
        let body = self.delete(&["logs"]).await?;
        Ok(body.get("cleared").and_then(Value::as_u64).unwrap_or(0))
    }

    /// Counters and revenue.
    pub async fn stats(&self) -> Result<Stats> {
        self.get(&["stats"]).await
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    async fn delete(&self, segments: &[&str]) -> Result<Value> {
        let url = self.url(segments)?;
        debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| fallback_message(status));
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_url_joining_ignores_extra_slashes() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.url(&["products", "abc"]).unwrap().as_str(),
            "http://localhost:3000/api/products/abc"
        );
        assert_eq!(
            client.url(&["stats"]).unwrap().as_str(),
            "http://localhost:3000/api/stats"
        );
    }

    #[test]
    fn test_ids_are_percent_encoded() {
        let client = ApiClient::new("http://localhost:3000/api");
        let url = client.url(&["products", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/products/a%2Fb%3Fc%23d");
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let client = ApiClient::new("not a url");
        assert!(matches!(client.url(&["stats"]), Err(Error::Config { .. })));
    }
}
