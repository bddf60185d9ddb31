//! Document Store - whole-document persistence of the storefront data.
//!
//! The store keeps no state in memory: every operation loads the full JSON
//! document from disk, and every mutation writes the full document back through
//! a temporary file and an atomic rename.

/// File-backed document store
pub mod file;

pub use file::DocumentStore;
