//! `roomlift-client` -- one-shot redesign runner.
//!
//! Reads a room photo, runs the full redesign flow against the backend,
//! and prints the generated image URL. Intended for scripting and smoke
//! tests; the interactive app drives the same library code.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default               | Description                                    |
//! |---------------------|----------|-----------------------|------------------------------------------------|
//! | `BACKEND_URL`       | yes      | --                    | Backend base URL, e.g. `http://localhost:3000` |
//! | `API_TOKEN`         | yes      | --                    | Bearer token for the backend API               |
//! | `PHOTO_PATH`        | yes      | --                    | Path to the room photo to redesign             |
//! | `DESIGN_ACTION`     | no       | `interior`            | One of `interior`, `exterior`, `garden`, `paint`, `replace`, `floor` |
//! | `ROOM_TYPE`         | no       | `living-room`         | Room / surface type id                         |
//! | `STYLE`             | no       | `modern`              | Design style id                                |
//! | `PALETTE`           | no       | --                    | Color palette id (`surprise` omits it)         |
//! | `CUSTOM_PROMPT`     | no       | --                    | Verbatim prompt overriding synthesis           |
//! | `IDENTITY_FILE`     | no       | `.roomlift-identity`  | Where the device identity token is stored      |
//! | `S3_BUCKET`         | no       | --                    | Upload bucket; inline data URLs when unset     |
//! | `S3_PUBLIC_BASE_URL`| no       | --                    | Public URL prefix for uploaded objects         |

use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomlift_client::api::BackendClient;
use roomlift_client::identity::IdentityStore;
use roomlift_client::orchestrator::{Orchestrator, RedesignRequest};
use roomlift_core::prompt::DesignAction;
use roomlift_storage::store::{ImageStore, S3ImageStore, StorageError};

/// Stand-in store when no bucket is configured; every put fails so the
/// orchestrator inlines the photo as a data URL instead.
struct NoObjectStore;

#[async_trait]
impl ImageStore for NoObjectStore {
    async fn put(
        &self,
        _identity: &str,
        _filename: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Err(StorageError::Write("no object store configured".to_string()))
    }
}

fn required_env(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        tracing::error!("{name} environment variable is required");
        std::process::exit(1);
    })
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomlift_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend_url = required_env("BACKEND_URL");
    let api_token = required_env("API_TOKEN");
    let photo_path = required_env("PHOTO_PATH");

    let action = DesignAction::parse(
        &std::env::var("DESIGN_ACTION").unwrap_or_else(|_| "interior".to_string()),
    );
    let room_type = std::env::var("ROOM_TYPE").unwrap_or_else(|_| "living-room".to_string());
    let style = std::env::var("STYLE").unwrap_or_else(|_| "modern".to_string());
    let palette = std::env::var("PALETTE").ok();
    let custom_prompt = std::env::var("CUSTOM_PROMPT").ok();

    let identity_file =
        std::env::var("IDENTITY_FILE").unwrap_or_else(|_| ".roomlift-identity".to_string());
    let identity = IdentityStore::new(&identity_file).load_or_create();
    tracing::info!(identity = %identity, "Device identity loaded");

    let store: Arc<dyn ImageStore> = match (
        std::env::var("S3_BUCKET").ok(),
        std::env::var("S3_PUBLIC_BASE_URL").ok(),
    ) {
        (Some(bucket), Some(public_base_url)) => {
            tracing::info!(bucket = %bucket, "Using S3 object store");
            Arc::new(S3ImageStore::from_env(bucket, public_base_url).await)
        }
        _ => {
            tracing::info!("No object store configured, photos will be inlined");
            Arc::new(NoObjectStore)
        }
    };

    let backend = Arc::new(BackendClient::new(backend_url, api_token));
    let orchestrator = Orchestrator::new(backend, store, identity);

    let request = RedesignRequest {
        photo_path: photo_path.into(),
        action,
        room_type,
        style,
        palette,
        custom_prompt,
    };

    match orchestrator.redesign(&request).await {
        Ok(result) => {
            tracing::info!(design_id = result.design_id, "Redesign complete");
            println!("{}", result.image_url);
        }
        Err(e) => {
            tracing::error!(error = %e, "Redesign failed");
            std::process::exit(1);
        }
    }
}
