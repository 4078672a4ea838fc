use std::fmt;
use std::time::Duration;

/// Default text-to-image endpoint (SDXL 1.0).
pub const DEFAULT_API_URL: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";

/// Connection settings for the Stability API.
///
/// Passed explicitly into [`StabilityApi`](crate::StabilityApi); nothing
/// else reads the credential from the environment.
#[derive(Clone)]
pub struct StabilityConfig {
    /// Bearer credential. Never logged: the `Debug` impl redacts it.
    pub api_key: String,
    /// Full URL of the text-to-image endpoint.
    pub api_url: String,
    /// Optional whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl StabilityConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Default                   |
    /// |--------------------------|---------------------------|
    /// | `STABILITY_AI_API_KEY`   | (required)                |
    /// | `STABILITY_API_URL`      | [`DEFAULT_API_URL`]       |
    /// | `STABILITY_TIMEOUT_SECS` | unset (no timeout)        |
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("STABILITY_AI_API_KEY").expect("STABILITY_AI_API_KEY must be set");

        let api_url =
            std::env::var("STABILITY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let timeout = std::env::var("STABILITY_TIMEOUT_SECS").ok().map(|v| {
            Duration::from_secs(
                v.parse()
                    .expect("STABILITY_TIMEOUT_SECS must be a valid u64"),
            )
        });

        Self {
            api_key,
            api_url,
            timeout,
        }
    }
}

impl fmt::Debug for StabilityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StabilityConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
