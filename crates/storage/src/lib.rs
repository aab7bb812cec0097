//! Image ingress: object storage with an inline fallback.
//!
//! Uploads a local image under a per-identity key and returns a publicly
//! dereferenceable URL. When the remote store is unreachable the image is
//! inlined as a base64 `data:` URL instead, so the generation pipeline
//! can proceed in a degraded mode; downstream consumers accept either
//! form interchangeably.

pub mod fallback;
pub mod store;

pub use fallback::{inline_data_url, upload_or_inline};
pub use store::{ImageStore, S3ImageStore, StorageError};
