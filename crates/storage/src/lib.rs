//! Blob storage for photo evidence.
//!
//! Complaint and resolution images are opaque blobs addressed by
//! `(bucket, path)` and served by public URL. [`BlobStore`] abstracts the
//! backend; [`LocalStorage`] keeps blobs on the local filesystem (dev and
//! tests), [`S3Storage`] talks to S3.

pub mod local;
pub mod path;
pub mod s3;

use async_trait::async_trait;

pub use local::LocalStorage;
pub use s3::S3Storage;

/// Logical bucket for images attached to a complaint at filing time.
pub const BUCKET_COMPLAINT_IMAGES: &str = "complaint-images";

/// Logical bucket for images attached when resolving a complaint.
pub const BUCKET_RESOLUTION_IMAGES: &str = "resolution-images";

/// Errors surfaced by blob storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),
}

/// A write-and-resolve blob store.
///
/// Uploads are atomic from the caller's perspective: either the blob is
/// stored and its public URL will resolve, or the upload fails. There is
/// no delete -- evidence is append-only.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` at `path` within `bucket`.
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// The public URL at which an uploaded blob can be fetched.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
