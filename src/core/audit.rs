//! Audit Logger.
//!
//! Appends a [`LogEntry`] to the logs collection in its own read-modify-write
//! cycle. Services call it after their mutation has been saved; a failure here
//! never rolls the mutation back.

use crate::{
    core::resource::fresh_id,
    entities::{AuditAction, LogEntry},
    errors::Result,
    store::DocumentStore,
};
use tracing::{debug, instrument, warn};

/// Appends one entry for `action`.
///
/// # Errors
/// Returns an error if the document cannot be loaded or saved.
#[instrument(skip(store, details))]
pub async fn record(
    store: &DocumentStore,
    action: AuditAction,
    details: impl Into<String>,
    actor: &str,
) -> Result<LogEntry> {
    let details = details.into();
    let entry = store
        .update(|doc| {
            let entry = LogEntry {
                id: fresh_id::<LogEntry>(doc),
                timestamp: chrono::Utc::now(),
                action,
                details,
                admin: actor.to_string(),
            };
            doc.logs.push(entry.clone());
            Ok(entry)
        })
        .await?;
    debug!("Audit entry {} recorded: {}", entry.id, entry.details);
    Ok(entry)
}

/// Like [`record`], but only logs a warning on failure.
pub async fn record_best_effort(
    store: &DocumentStore,
    action: AuditAction,
    details: impl Into<String>,
    actor: &str,
) -> Option<LogEntry> {
    record(store, action, details, actor)
        .await
        .inspect_err(|e| warn!("Audit entry for {} not recorded: {}", action, e))
        .ok()
}
