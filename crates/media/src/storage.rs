//! Object storage behind a trait, implemented against Cloudflare R2.
//!
//! R2 speaks the S3 API, so the implementation is a thin wrapper over
//! `aws-sdk-s3` pointed at an R2 endpoint. Keys live under `uploads/`
//! and the public URL is served from a separate CDN base, not the S3
//! endpoint itself.

use aws_config::Region;
use aws_sdk_s3::config::{BehaviorVersion, Credentials};
use aws_sdk_s3::primitives::ByteStream;

use crate::error::MediaError;

/// A stored object: the public URL to embed and the key to delete by.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `key` and return the stored object.
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, MediaError>;

    /// Delete the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<(), MediaError>;
}

/// S3-compatible storage backend against a Cloudflare R2 bucket.
pub struct R2Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl R2Store {
    /// Create a store for one R2 bucket.
    ///
    /// * `endpoint` - Account endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`.
    /// * `public_base_url` - CDN base the bucket is served from.
    pub fn new(
        endpoint: &str,
        bucket: String,
        access_key_id: &str,
        secret_access_key: &str,
        public_base_url: String,
    ) -> Self {
        let credentials =
            Credentials::new(access_key_id, secret_access_key, None, None, "firstlook");

        // R2 ignores the region but the SDK requires one.
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .region(Region::new("auto"))
            .credentials_provider(credentials)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket,
            public_base_url,
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), key)
    }
}

#[async_trait::async_trait]
impl ObjectStore for R2Store {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, MediaError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| MediaError::Storage(format!("put {key} failed: {e}")))?;

        Ok(StoredObject {
            url: self.public_url(key),
            key: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), MediaError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MediaError::Storage(format!("delete {key} failed: {e}")))?;

        Ok(())
    }
}

/// Generate a storage key for an uploaded file, keeping its extension.
pub fn storage_key(original_name: &str) -> String {
    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| !ext.is_empty() && ext.len() <= 10)
        .unwrap_or("bin");

    format!("uploads/{}.{}", uuid::Uuid::new_v4(), extension.to_lowercase())
}

/// Map an image content type to a file extension.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/avif" => "avif",
        _ => "bin",
    }
}
