//! S3-backed blob store.
//!
//! Logical buckets map to S3 buckets prefixed with a deployment-specific
//! name (`{bucket_prefix}-{bucket}`), and public URLs use the standard
//! virtual-hosted style. Buckets are expected to exist and allow public
//! reads; this store only writes.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::path::validate_object_path;
use crate::{BlobStore, StorageError};

/// Blob store writing to S3.
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket_prefix: String,
    region: String,
}

impl S3Storage {
    /// Create a store from the ambient AWS environment (credentials chain,
    /// `AWS_REGION`).
    pub async fn from_env(bucket_prefix: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "us-east-1".to_string());
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket_prefix: bucket_prefix.into(),
            region,
        }
    }

    fn bucket_name(&self, bucket: &str) -> String {
        format!("{}-{bucket}", self.bucket_prefix)
    }
}

#[async_trait]
impl BlobStore for S3Storage {
    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        validate_object_path(path).map_err(StorageError::InvalidPath)?;

        let bucket_name = self.bucket_name(bucket);
        self.client
            .put_object()
            .bucket(&bucket_name)
            .key(path)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;

        tracing::debug!(bucket = %bucket_name, path, "Stored blob in S3");
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{path}",
            self.bucket_name(bucket),
            self.region
        )
    }
}
