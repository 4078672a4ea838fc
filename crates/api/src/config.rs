use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Which execution backend generation jobs are submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBackend {
    /// Rows in the `jobs` table, executed by `chaotix-worker` processes.
    Postgres,
    /// Tokio tasks inside the API process.
    Inline,
}

impl FromStr for QueueBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(QueueBackend::Postgres),
            "inline" => Ok(QueueBackend::Inline),
            other => Err(format!("unknown queue backend '{other}'")),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Where generation jobs run (default: `postgres`).
    pub queue_backend: QueueBackend,
    /// Directory generated images are stored below (default: `media`).
    pub media_root: PathBuf,
    /// How long the inline backend keeps finished job states (default: one day).
    pub inline_result_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `QUEUE_BACKEND`        | `postgres`                 |
    /// | `MEDIA_ROOT`           | `media`                    |
    /// | `INLINE_RESULT_TTL_SECS` | `86400`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let queue_backend: QueueBackend = std::env::var("QUEUE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("QUEUE_BACKEND is invalid: {e}"));

        let media_root = chaotix_worker::config::media_root_from_env();

        let inline_result_ttl_secs: u64 = std::env::var("INLINE_RESULT_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("INLINE_RESULT_TTL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            queue_backend,
            media_root,
            inline_result_ttl: Duration::from_secs(inline_result_ttl_secs),
        }
    }
}
