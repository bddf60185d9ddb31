//! Audit log entries. Append-only; the whole collection can be cleared at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor recorded for actions performed from the admin console.
pub const DEFAULT_ACTOR: &str = "Admin";

/// Actor recorded for actions the storefront performs on its own (new orders).
pub const SYSTEM_ACTOR: &str = "System";

/// What kind of mutation a log entry describes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A product was added
    #[serde(alias = "AJOUT_PRODUIT")]
    ProductCreated,
    /// A product was changed
    #[serde(alias = "MODIFICATION_PRODUIT")]
    ProductUpdated,
    /// A product was removed
    #[serde(alias = "SUPPRESSION_PRODUIT")]
    ProductDeleted,
    /// An order was placed
    #[serde(alias = "NOUVELLE_COMMANDE")]
    OrderCreated,
    /// An order was removed
    #[serde(alias = "SUPPRESSION_COMMANDE")]
    OrderDeleted,
}

impl AuditAction {
    /// Tag as stored on disk.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductCreated => "PRODUCT_CREATED",
            Self::ProductUpdated => "PRODUCT_UPDATED",
            Self::ProductDeleted => "PRODUCT_DELETED",
            Self::OrderCreated => "ORDER_CREATED",
            Self::OrderDeleted => "ORDER_DELETED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Generated unique identifier
    pub id: String,
    /// When the action was recorded
    pub timestamp: DateTime<Utc>,
    /// Kind of mutation
    pub action: AuditAction,
    /// Free text naming the affected record
    pub details: String,
    /// Actor label
    #[serde(default = "default_actor")]
    pub admin: String,
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}
