//! Tabbed dashboard state.
//!
//! Exactly one tab is active at a time. Each tab owns the last fetch result of
//! its collection, and every action ends with a [`Banner`] so that no failure
//! goes unreported.

use super::{client::ApiClient, render};
use crate::entities::{LogEntry, NewProduct, Order, Product, ProductPatch};
use std::{fmt, str::FromStr};
use tracing::{error, info};

/// Dashboard tab, one per collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Catalogue
    Products,
    /// Placed orders
    Orders,
    /// Audit log
    Logs,
}

impl Tab {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Products, Self::Orders, Self::Logs];

    /// Title shown in the tab bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Logs => "Logs",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "p" => Ok(Self::Products),
            "orders" | "o" => Ok(Self::Orders),
            "logs" | "l" => Ok(Self::Logs),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

/// Fetch state of one tab
#[derive(Debug, Clone, PartialEq)]
pub enum TabView<T> {
    /// Fetch not finished yet
    Loading,
    /// Collection as last fetched
    Ready(Vec<T>),
    /// Fetch failed with this message
    Failed(String),
}

impl<T> TabView<T> {
    fn from_result(result: crate::errors::Result<Vec<T>>) -> Self {
        match result {
            Ok(items) => Self::Ready(items),
            Err(e) => {
                error!("Tab fetch failed: {}", e);
                Self::Failed(e.to_string())
            }
        }
    }
}

/// Outcome message of the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// The action went through
    Success(String),
    /// The action failed; the message says why
    Error(String),
}

/// Logged-in view of the console
#[derive(Debug)]
pub struct Dashboard {
    client: ApiClient,
    active: Tab,
    products: TabView<Product>,
    orders: TabView<Order>,
    logs: TabView<LogEntry>,
    banner: Option<Banner>,
}

impl Dashboard {
    /// A dashboard on the Products tab with nothing fetched yet.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            active: Tab::Products,
            products: TabView::Loading,
            orders: TabView::Loading,
            logs: TabView::Loading,
            banner: None,
        }
    }

    /// Client used for every fetch and action.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The single active tab.
    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.active
    }

    /// Makes `tab` the active one. Does not fetch.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Last fetch result of the Products tab.
    #[must_use]
    pub const fn products(&self) -> &TabView<Product> {
        &self.products
    }

    /// Last fetch result of the Orders tab.
    #[must_use]
    pub const fn orders(&self) -> &TabView<Order> {
        &self.orders
    }

    /// Last fetch result of the Logs tab.
    #[must_use]
    pub const fn logs(&self) -> &TabView<LogEntry> {
        &self.logs
    }

    /// Outcome of the last action, if any.
    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Removes the banner once it has been shown.
    pub fn take_banner(&mut self) -> Option<Banner> {
        self.banner.take()
    }

    /// Fetches all three tabs, one request each.
    pub async fn load_all(&mut self) {
        for tab in Tab::ALL {
            self.refresh(tab).await;
        }
    }

    /// Re-fetches one tab's collection.
    pub async fn refresh(&mut self, tab: Tab) {
        match tab {
            Tab::Products => {
                self.products = TabView::Loading;
                self.products = TabView::from_result(self.client.list_products().await);
            }
            Tab::Orders => {
                self.orders = TabView::Loading;
                self.orders = TabView::from_result(self.client.list_orders().await);
            }
            Tab::Logs => {
                self.logs = TabView::Loading;
                self.logs = TabView::from_result(self.client.list_logs().await);
            }
        }
    }

    /// Creates a product, then re-fetches the Products tab.
    pub async fn add_product(&mut self, input: NewProduct) {
        match self.client.create_product(&input).await {
            Ok(product) => {
                info!("Product {} added from console", product.id);
                self.succeed(format!("Product added: {}", product.name));
            }
            Err(e) => self.fail("add product", &e),
        }
        self.refresh(Tab::Products).await;
    }

    /// Updates a product, then re-fetches the Products tab.
    pub async fn edit_product(&mut self, id: &str, patch: ProductPatch) {
        match self.client.update_product(id, &patch).await {
            Ok(product) => self.succeed(format!("Product updated: {}", product.name)),
            Err(e) => self.fail("update product", &e),
        }
        self.refresh(Tab::Products).await;
    }

    /// Deletes a product, then re-fetches the Products tab.
    pub async fn delete_product(&mut self, id: &str) {
        match self.client.delete_product(id).await {
            Ok(()) => self.succeed(format!("Product deleted: {id}")),
            Err(e) => self.fail("delete product", &e),
        }
        self.refresh(Tab::Products).await;
    }

    /// Deletes an order, then re-fetches the Orders tab.
    pub async fn delete_order(&mut self, id: &str) {
        match self.client.delete_order(id).await {
            Ok(()) => self.succeed(format!("Order deleted: {id}")),
            Err(e) => self.fail("delete order", &e),
        }
        self.refresh(Tab::Orders).await;
    }

    /// Clears the audit log, then re-fetches the Logs tab.
    pub async fn clear_logs(&mut self) {
        match self.client.clear_logs().await {
            Ok(cleared) => self.succeed(format!("Cleared {cleared} log entries")),
            Err(e) => self.fail("clear logs", &e),
        }
        self.refresh(Tab::Logs).await;
    }

    /// Text rendering of the tab bar, the banner and the active tab.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = render::tab_bar(self.active);
        if let Some(banner) = &self.banner {
            out.push_str(&render::banner(banner));
        }
        out.push_str(&match self.active {
            Tab::Products => render::products(&self.products),
            Tab::Orders => render::orders(&self.orders),
            Tab::Logs => render::logs(&self.logs),
        });
        out
    }

    fn succeed(&mut self, message: String) {
        self.banner = Some(Banner::Success(message));
    }

    fn fail(&mut self, action: &str, err: &crate::errors::Error) {
        error!("Console action '{}' failed: {}", action, err);
        self.banner = Some(Banner::Error(format!("Could not {action}: {err}")));
    }
}
