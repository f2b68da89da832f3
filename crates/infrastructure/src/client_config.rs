use std::env;
use std::path::PathBuf;
use std::time::Duration;

use casaflow_core::{ClientError, ClientResult};
use casaflow_domain::DEFAULT_PAGE_SIZE;

/// Runtime configuration for the admin client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API. Always carries a trailing slash so
    /// relative endpoint paths append instead of replacing a segment.
    pub api_base_url: String,
    /// Where durable client state (token, preferences) lives on disk.
    pub storage_path: PathBuf,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// Page size used when a route has no stored preference.
    pub default_page_size: u32,
}

impl ClientConfig {
    /// Loads configuration from the environment.
    ///
    /// `CASAFLOW_API_BASE_URL` is required; everything else has defaults.
    pub fn load() -> ClientResult<Self> {
        let api_base_url = required_env("CASAFLOW_API_BASE_URL")?;

        let storage_path = env::var("CASAFLOW_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".casaflow/state.json"));

        let http_timeout = env::var("CASAFLOW_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let default_page_size = env::var("CASAFLOW_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self::new(api_base_url, storage_path, http_timeout, default_page_size)
    }

    /// Creates a validated configuration.
    pub fn new(
        api_base_url: impl Into<String>,
        storage_path: impl Into<PathBuf>,
        http_timeout: Duration,
        default_page_size: u32,
    ) -> ClientResult<Self> {
        let mut api_base_url = api_base_url.into();
        if api_base_url.trim().is_empty() {
            return Err(ClientError::Validation(
                "API base URL must not be empty".to_owned(),
            ));
        }
        if !api_base_url.ends_with('/') {
            api_base_url.push('/');
        }

        Ok(Self {
            api_base_url,
            storage_path: storage_path.into(),
            http_timeout,
            default_page_size: default_page_size.max(1),
        })
    }
}

fn required_env(name: &str) -> ClientResult<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ClientError::Validation(format!("{name} must be set")))
}
