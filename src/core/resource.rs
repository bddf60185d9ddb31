//! Operations shared by every collection: listing, lookup by id and removal.

use crate::{
    entities::{Document, Record},
    errors::{Error, Result},
    store::DocumentStore,
};

/// Builds the `NotFound` error for a record type.
pub fn not_found<R: Record>(id: &str) -> Error {
    Error::NotFound {
        resource: R::RESOURCE,
        id: id.to_string(),
    }
}

/// Generates an identifier not yet used in `R`'s collection.
#[must_use]
pub fn fresh_id<R: Record>(doc: &Document) -> String {
    loop {
        let candidate = uuid::Uuid::new_v4().to_string();
        if !R::collection(doc).iter().any(|r| r.id() == candidate) {
            return candidate;
        }
    }
}

/// Finds a record by identifier.
///
/// # Errors
/// Returns `Error::NotFound` if no record has this id.
pub fn find<R: Record>(doc: &Document, id: &str) -> Result<R> {
    R::collection(doc)
        .iter()
        .find(|r| r.id() == id)
        .cloned()
        .ok_or_else(|| not_found::<R>(id))
}

/// Removes a record by identifier and returns it.
///
/// # Errors
/// Returns `Error::NotFound` if no record has this id.
pub fn remove<R: Record>(doc: &mut Document, id: &str) -> Result<R> {
    let records = R::collection_mut(doc);
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| not_found::<R>(id))?;
    Ok(records.remove(index))
}

/// Returns the current collection in insertion order.
///
/// # Errors
/// Returns an error if the document cannot be loaded.
pub async fn list_all<R: Record>(store: &DocumentStore) -> Result<Vec<R>> {
    let doc = store.load().await?;
    Ok(R::collection(&doc).to_vec())
}

/// Loads the document and looks up one record.
///
/// # Errors
/// Returns `Error::NotFound` for an unknown id, or a load error.
pub async fn get_by_id<R: Record>(store: &DocumentStore, id: &str) -> Result<R> {
    let doc = store.load().await?;
    find(&doc, id)
}

/// Removes one record in a single read-modify-write cycle.
///
/// Nothing is written when the id is unknown.
///
/// # Errors
/// Returns `Error::NotFound` for an unknown id, or a storage error.
pub async fn delete_by_id<R: Record>(store: &DocumentStore, id: &str) -> Result<R> {
    store.update(|doc| remove::<R>(doc, id)).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{AuditAction, LogEntry};

    fn doc_with_logs(ids: &[&str]) -> Document {
        let mut doc = Document::default();
        for id in ids {
            doc.logs.push(LogEntry {
                id: (*id).to_string(),
                timestamp: chrono::Utc::now(),
                action: AuditAction::OrderDeleted,
                details: format!("entry {id}"),
                admin: "Admin".to_string(),
            });
        }
        doc
    }

    #[test]
    fn test_find_and_remove_by_id() {
        let mut doc = doc_with_logs(&["a", "b", "c"]);

        let found: LogEntry = find(&doc, "b").unwrap();
        assert_eq!(found.details, "entry b");

        let removed: LogEntry = remove(&mut doc, "b").unwrap();
        assert_eq!(removed.id, "b");
        let remaining: Vec<&str> = doc.logs.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut doc = doc_with_logs(&["a"]);
        assert!(matches!(
            find::<LogEntry>(&doc, "zzz"),
            Err(Error::NotFound { resource: "Log entry", .. })
        ));
        assert!(matches!(
            remove::<LogEntry>(&mut doc, "zzz"),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(doc.logs.len(), 1);
    }

    #[test]
    fn test_fresh_id_is_unused() {
        let doc = doc_with_logs(&["a", "b"]);
        let id = fresh_id::<LogEntry>(&doc);
        assert!(doc.logs.iter().all(|l| l.id != id));
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
