//! Core business logic - framework-agnostic services over the document store.
//!
//! Each collection gets its own service module. Every successful mutation is
//! followed by a best-effort audit append, performed as a separate
//! read-modify-write cycle.

/// Audit Logger - appends log entries describing mutations
pub mod audit;
/// Logs collection - listing and clearing
pub mod log;
/// Orders collection - create, list, lookup and delete
pub mod order;
/// Products collection - full CRUD with validation
pub mod product;
/// Aggregated counters over the whole document
pub mod report;
/// Collection-agnostic helpers shared by the services
pub mod resource;
