use std::sync::Arc;

use roomlift_replicate::ReplicateApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roomlift_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Inference service client.
    pub replicate: Arc<ReplicateApi>,
}
