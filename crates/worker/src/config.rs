use std::path::PathBuf;
use std::time::Duration;

/// Default media root when `MEDIA_ROOT` is unset.
pub const DEFAULT_MEDIA_ROOT: &str = "media";

/// Worker process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name recorded on every job this process claims.
    pub worker_name: String,
    /// Maximum number of jobs executing at once.
    pub concurrency: usize,
    /// How often to look for pending jobs.
    pub poll_interval: Duration,
    /// Directory generated images are written below.
    pub media_root: PathBuf,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default          |
    /// |---------------------------|------------------|
    /// | `WORKER_NAME`             | `worker-<pid>`   |
    /// | `WORKER_CONCURRENCY`      | `4`              |
    /// | `WORKER_POLL_INTERVAL_MS` | `1000`           |
    /// | `MEDIA_ROOT`              | `media`          |
    pub fn from_env() -> Self {
        let worker_name = std::env::var("WORKER_NAME")
            .unwrap_or_else(|_| format!("worker-{}", std::process::id()));

        let concurrency: usize = std::env::var("WORKER_CONCURRENCY")
            .unwrap_or_else(|_| "4".into())
            .parse()
            .expect("WORKER_CONCURRENCY must be a valid usize");
        assert!(concurrency > 0, "WORKER_CONCURRENCY must be at least 1");

        let poll_interval_ms: u64 = std::env::var("WORKER_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("WORKER_POLL_INTERVAL_MS must be a valid u64");

        let media_root = media_root_from_env();

        Self {
            worker_name,
            concurrency,
            poll_interval: Duration::from_millis(poll_interval_ms),
            media_root,
        }
    }
}

/// Read `MEDIA_ROOT`, falling back to [`DEFAULT_MEDIA_ROOT`].
pub fn media_root_from_env() -> PathBuf {
    std::env::var("MEDIA_ROOT")
        .unwrap_or_else(|_| DEFAULT_MEDIA_ROOT.into())
        .into()
}
