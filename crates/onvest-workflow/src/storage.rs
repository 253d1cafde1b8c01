//! Uploaded document storage.
//!
//! Documents land in a single server-local directory under a generated
//! name of the form `{prefix}-{original}`. The prefix starts at the
//! current wall-clock milliseconds and is kept strictly increasing
//! within the process, so simultaneous uploads of identically named
//! files never collide.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::warn;

use crate::error::WorkflowError;

/// Stores uploaded documents on the local filesystem.
#[derive(Debug)]
pub struct DocumentStore {
    root: PathBuf,
    counter: AtomicU64,
}

impl DocumentStore {
    /// Open the storage directory, creating it if necessary.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, WorkflowError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| WorkflowError::Storage(format!("create {}: {e}", root.display())))?;
        Ok(Self {
            root,
            counter: AtomicU64::new(0),
        })
    }

    /// Directory documents are stored under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one document and return its storage path.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf, WorkflowError> {
        let name = format!("{}-{}", self.next_prefix(), sanitize_filename(original_name));
        let path = self.root.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| WorkflowError::Storage(format!("write {}: {e}", path.display())))?;
        Ok(path)
    }

    /// Best-effort removal of a stored document. A failure is logged,
    /// never surfaced.
    pub async fn remove(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "failed to remove stored document");
        }
    }

    fn next_prefix(&self) -> u64 {
        let now = Utc::now().timestamp_millis() as u64;
        let mut prev = self.counter.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self.counter.compare_exchange_weak(
                prev,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Reduce a client-supplied filename to its final path component so a
/// stored name can never escape the storage directory.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "." || base == ".." {
        "document".to_string()
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> DocumentStore {
        DocumentStore::new(dir.path()).unwrap()
    }

    #[tokio::test]
    async fn stores_document_under_prefixed_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.store("passport.pdf", b"%PDF-1.4 test").await.unwrap();

        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-passport.pdf"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.4 test");
    }

    #[tokio::test]
    async fn identical_names_get_distinct_paths() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.store("doc.pdf", b"first").await.unwrap();
        let b = store.store("doc.pdf", b"second").await.unwrap();

        assert_ne!(a, b);
        assert_eq!(tokio::fs::read(&a).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(&b).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn path_components_are_stripped() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.store("../../etc/passwd", b"nope").await.unwrap();

        assert_eq!(path.parent().unwrap(), dir.path());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-passwd"));
    }

    #[tokio::test]
    async fn empty_filename_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.store("", b"data").await.unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("-document"));
    }

    #[tokio::test]
    async fn remove_deletes_the_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.store("doc.pdf", b"data").await.unwrap();
        store.remove(&path).await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn remove_of_missing_file_is_silent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.remove(&dir.path().join("never-existed.pdf")).await;
    }
}
