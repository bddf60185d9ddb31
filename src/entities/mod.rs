//! Entity module - the records persisted in the storefront document.
//! Each collection has a stored record type plus typed input structures that
//! act as the allowlist of fields callers may supply.

/// The persisted aggregate and the `Record` trait
pub mod document;
/// Audit log records
pub mod log_entry;
/// Orders
pub mod order;
/// Products and categories
pub mod product;

pub use document::{Document, Record};
pub use log_entry::{AuditAction, DEFAULT_ACTOR, LogEntry, SYSTEM_ACTOR};
pub use order::{ANONYMOUS_CUSTOMER, NewOrder, Order};
pub use product::{
    Category, NewProduct, PLACEHOLDER_IMAGE_BASE, Product, ProductPatch, placeholder_image,
};
