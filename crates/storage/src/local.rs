//! Filesystem-backed blob store.
//!
//! Blobs live under `{root}/{bucket}/{path}` and are served by whatever
//! static file server fronts `public_base_url`. Used in development and
//! integration tests.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::path::validate_object_path;
use crate::{BlobStore, StorageError};

/// Blob store writing to a local directory.
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create a store rooted at `root`, serving blobs under
    /// `public_base_url` (no trailing slash).
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalStorage {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_object_path(path).map_err(StorageError::InvalidPath)?;

        let full_path = self.root.join(bucket).join(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, bytes).await?;

        tracing::debug!(bucket, path, "Stored blob locally");
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base_url)
    }
}
