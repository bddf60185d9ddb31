use crate::entities::Document;
use crate::errors::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace, warn};

/// File-backed store for the single storefront [`Document`].
///
/// Read-modify-write cycles issued through [`DocumentStore::update`] are
/// serialised by an in-process write gate, so two requests served by the same
/// process never overwrite each other's changes. Nothing coordinates separate
/// processes sharing one file: there the last writer wins.
#[derive(Debug)]
pub struct DocumentStore {
    path: PathBuf,
    write_gate: Mutex<()>,
    /// Saves left before `save` starts failing
    #[cfg(test)]
    saves_allowed: std::sync::atomic::AtomicUsize,
}

impl DocumentStore {
    /// Creates a store over `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_gate: Mutex::new(()),
            #[cfg(test)]
            saves_allowed: std::sync::atomic::AtomicUsize::new(usize::MAX),
        }
    }

    /// Lets the next `count` saves through and fails every later one with an IO error.
    #[cfg(test)]
    pub(crate) fn fail_saves_after(&self, count: usize) {
        self.saves_allowed
            .store(count, std::sync::atomic::Ordering::SeqCst);
    }

    /// Opens the store, writing an empty document if none exists yet.
    ///
    /// An existing but unreadable document is reported with a warning and left
    /// untouched; requests will fail with `StorageCorrupt` until it is repaired.
    ///
    /// # Errors
    /// Returns an error if the parent directory or the initial document cannot be written.
    #[instrument(skip_all)]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::new(path.as_ref());
        debug!("Opening document store at {:?}", store.path);

        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        match tokio::fs::metadata(&store.path).await {
            Ok(_) => {
                if let Err(e) = store.load().await {
                    warn!("Existing document could not be read: {}", e);
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                store.save(&Document::default()).await?;
                info!("Initialized empty document at {:?}", store.path);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(store)
    }

    /// Location of the document on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full document.
    ///
    /// A missing file yields an empty document.
    ///
    /// # Errors
    /// Returns `Error::StorageCorrupt` if the file is not a valid storefront
    /// document, or `Error::Io` if it cannot be read.
    pub async fn load(&self) -> Result<Document> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No document at {:?}, using an empty one", self.path);
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };

        let document: Document =
            serde_json::from_slice(&bytes).map_err(|source| Error::StorageCorrupt {
                path: self.path.clone(),
                source,
            })?;
        trace!(
            "Loaded document: {} products, {} orders, {} logs",
            document.products.len(),
            document.orders.len(),
            document.logs.len()
        );
        Ok(document)
    }

    /// Persists the full document, replacing the previous one atomically.
    ///
    /// The JSON is written to a sibling temporary file, flushed to disk, then
    /// renamed over the target. A failure at any step leaves the previous
    /// document in place.
    ///
    /// # Errors
    /// Returns an error if serialization or any filesystem step fails.
    pub async fn save(&self, document: &Document) -> Result<()> {
        #[cfg(test)]
        {
            use std::sync::atomic::Ordering;
            if self
                .saves_allowed
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err()
            {
                return Err(std::io::Error::other("save disabled for this test").into());
            }
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.temp_path();

        if let Err(e) = write_and_rename(&tmp, &self.path, &bytes).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                trace!("Temp file {:?} not removed: {}", tmp, cleanup);
            }
            return Err(e.into());
        }

        debug!("Saved document to {:?} ({} bytes)", self.path, bytes.len());
        Ok(())
    }

    /// Runs one read-modify-write cycle.
    ///
    /// `mutate` receives the freshly loaded document. When it returns `Ok`, the
    /// document is saved and its value is returned; when it returns `Err`,
    /// nothing is written.
    ///
    /// # Errors
    /// Propagates load, mutation and save failures.
    pub async fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let _guard = self.write_gate.lock().await;
        let mut document = self.load().await?;
        let value = mutate(&mut document)?;
        self.save(&document).await?;
        Ok(value)
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}

async fn write_and_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
    }
    tokio::fs::rename(tmp, target).await
}
