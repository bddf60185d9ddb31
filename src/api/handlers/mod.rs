//! Route handlers, one module per resource.

/// Liveness checks
pub mod health;
/// Audit log listing and clearing
pub mod logs;
/// Order routes
pub mod orders;
/// Product routes
pub mod products;
/// Aggregated counters
pub mod stats;
