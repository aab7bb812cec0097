//! Inline data-URL fallback for failed uploads.

use base64::Engine as _;

use crate::store::{ImageStore, StorageError};

/// Encode image bytes as a self-contained `data:` URL.
pub fn inline_data_url(bytes: &[u8], content_type: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{encoded}")
}

/// Upload to the store, degrading to an inline data URL on failure.
///
/// The pipeline must be able to continue without network storage, so a
/// store failure is logged and recovered locally rather than propagated.
/// The returned URL is either remote or inline; callers treat both the
/// same.
pub async fn upload_or_inline(
    store: &dyn ImageStore,
    identity: &str,
    filename: &str,
    bytes: &[u8],
    content_type: &str,
) -> String {
    match store.put(identity, filename, bytes, content_type).await {
        Ok(url) => url,
        Err(StorageError::Write(reason)) => {
            tracing::warn!(
                identity,
                filename,
                reason = %reason,
                "Object store upload failed, inlining image as data URL"
            );
            inline_data_url(bytes, content_type)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct FailingStore;

    #[async_trait]
    impl ImageStore for FailingStore {
        async fn put(
            &self,
            _identity: &str,
            _filename: &str,
            _bytes: &[u8],
            _content_type: &str,
        ) -> Result<String, StorageError> {
            Err(StorageError::Write("bucket unreachable".to_string()))
        }
    }

    struct HappyStore;

    #[async_trait]
    impl ImageStore for HappyStore {
        async fn put(
            &self,
            identity: &str,
            filename: &str,
            _bytes: &[u8],
            _content_type: &str,
        ) -> Result<String, StorageError> {
            Ok(format!("https://store/designs/{identity}/{filename}"))
        }
    }

    #[test]
    fn data_url_has_media_type_and_base64_payload() {
        let url = inline_data_url(b"hello", "image/jpeg");
        assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn successful_upload_returns_remote_url() {
        let url = upload_or_inline(&HappyStore, "u1", "photo-1.jpg", b"bytes", "image/jpeg").await;
        assert_eq!(url, "https://store/designs/u1/photo-1.jpg");
    }

    #[tokio::test]
    async fn failed_upload_falls_back_to_data_url() {
        let url = upload_or_inline(&FailingStore, "u1", "photo-1.jpg", b"bytes", "image/jpeg").await;
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }
}
