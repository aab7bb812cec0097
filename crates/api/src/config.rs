use std::time::Duration;

use roomlift_replicate::PollConfig;

/// Server configuration loaded from environment variables.
///
/// Network and polling settings have defaults suitable for local
/// development; credentials are required and missing ones fail fast at
/// startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// The single value `*` allows any origin (mobile clients have none).
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Must exceed the
    /// polling ceiling, which holds generation requests open for up to
    /// two minutes.
    pub request_timeout_secs: u64,
    /// Shared bearer token expected in the `Authorization` header.
    pub api_token: String,
    /// Base URL of the inference service.
    pub replicate_api_url: String,
    /// Inference service API key.
    pub replicate_api_key: String,
    /// Pinned model version hash.
    pub replicate_model_version: String,
    /// Milliseconds between status polls (default: `1000`).
    pub poll_interval_ms: u64,
    /// Maximum polls before a generation times out (default: `120`).
    pub poll_max_attempts: u32,
}

/// Default pinned version of the room-redesign model.
const DEFAULT_MODEL_VERSION: &str =
    "06d6fae3b75ab68a28cd2900afa6033166910dd09fd9751047043a5bbb4c184b";

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `HOST`                    | `0.0.0.0`                      |
    /// | `PORT`                    | `3000`                         |
    /// | `CORS_ORIGINS`            | `*`                            |
    /// | `REQUEST_TIMEOUT_SECS`    | `180`                          |
    /// | `API_TOKEN`               | required                       |
    /// | `REPLICATE_API_URL`       | `https://api.replicate.com/v1` |
    /// | `REPLICATE_API_KEY`       | required                       |
    /// | `REPLICATE_MODEL_VERSION` | pinned default                 |
    /// | `POLL_INTERVAL_MS`        | `1000`                         |
    /// | `POLL_MAX_ATTEMPTS`       | `120`                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let api_token = std::env::var("API_TOKEN").expect("API_TOKEN must be set");

        let replicate_api_url = std::env::var("REPLICATE_API_URL")
            .unwrap_or_else(|_| "https://api.replicate.com/v1".into());

        let replicate_api_key =
            std::env::var("REPLICATE_API_KEY").expect("REPLICATE_API_KEY must be set");

        let replicate_model_version = std::env::var("REPLICATE_MODEL_VERSION")
            .unwrap_or_else(|_| DEFAULT_MODEL_VERSION.into());

        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("POLL_INTERVAL_MS must be a valid u64");

        let poll_max_attempts: u32 = std::env::var("POLL_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("POLL_MAX_ATTEMPTS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            api_token,
            replicate_api_url,
            replicate_api_key,
            replicate_model_version,
            poll_interval_ms,
            poll_max_attempts,
        }
    }

    /// Polling cadence and ceiling for the generation proxy.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.poll_max_attempts,
        }
    }
}
