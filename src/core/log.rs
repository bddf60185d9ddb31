//! Logs collection - read access and bulk clearing.

use crate::{core::resource, entities::LogEntry, errors::Result, store::DocumentStore};
use tracing::{info, instrument};

/// Returns every log entry, oldest first.
///
/// # Errors
/// Returns an error if the document cannot be loaded.
#[instrument(skip(store))]
pub async fn list_logs(store: &DocumentStore) -> Result<Vec<LogEntry>> {
    resource::list_all(store).await
}

/// Removes every log entry and returns how many were removed.
///
/// Clearing is not itself audited: the collection is empty afterwards.
///
/// # Errors
/// Returns an error if the document cannot be loaded or saved.
#[instrument(skip(store))]
pub async fn clear_logs(store: &DocumentStore) -> Result<usize> {
    let cleared = store
        .update(|doc| Ok(std::mem::take(&mut doc.logs).len()))
        .await?;
    info!("Cleared {} log entries", cleared);
    Ok(cleared)
}
