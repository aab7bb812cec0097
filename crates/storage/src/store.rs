//! Object store trait and the S3 implementation.

use async_trait::async_trait;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store rejected or failed the write.
    #[error("Object store write failed: {0}")]
    Write(String),
}

/// Destination for uploaded room images.
///
/// Writes are always fresh, uniquely named objects (the filename carries
/// a timestamp); an existing object is never overwritten.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under a key namespaced by `identity` and `filename`
    /// and return a publicly dereferenceable URL.
    async fn put(
        &self,
        identity: &str,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// S3-backed image store.
pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStore {
    /// Key prefix for all design uploads.
    const PREFIX: &'static str = "designs";

    /// Create a store from an already-configured S3 client.
    ///
    /// * `bucket`          - destination bucket name.
    /// * `public_base_url` - URL prefix under which objects are served,
    ///   e.g. `https://store.example.com/room-images`.
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a store using credentials and region from the environment.
    pub async fn from_env(bucket: String, public_base_url: String) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket, public_base_url)
    }

    fn object_key(identity: &str, filename: &str) -> String {
        format!("{}/{identity}/{filename}", Self::PREFIX)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(
        &self,
        identity: &str,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = Self::object_key(identity, filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .cache_control("max-age=3600")
            // Fresh writes only; fail rather than replace an object.
            .if_none_match("*")
            .send()
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;

        let url = format!("{}/{key}", self.public_base_url);
        tracing::info!(bucket = %self.bucket, key = %key, "Uploaded image");
        Ok(url)
    }
}
