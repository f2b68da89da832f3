use std::sync::Arc;

use casaflow_core::ClientResult;
use casaflow_domain::AppSettings;
use tokio::sync::watch;

use crate::api_client::ApiClient;

/// Application service for tenant-wide settings.
///
/// Settings are auxiliary: they are prefetched after sign-in on a
/// best-effort basis and cached in memory for synchronous reads.
#[derive(Clone)]
pub struct SettingsService {
    api: ApiClient,
    cache: Arc<watch::Sender<Option<AppSettings>>>,
}

impl SettingsService {
    /// Creates a settings service over the API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Arc::new(watch::channel(None).0),
        }
    }

    /// Fetches settings from the backend and caches them.
    pub async fn fetch(&self) -> ClientResult<AppSettings> {
        let settings: AppSettings = self.api.get("settings").await?;
        self.cache.send_replace(Some(settings.clone()));
        Ok(settings)
    }

    /// Fire-and-forget fetch used right after sign-in. Failures stay in
    /// the logs and are never surfaced to the caller.
    pub fn prefetch(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            if let Err(error) = service.fetch().await {
                tracing::warn!(error = %error, "application settings prefetch failed");
            }
        });
    }

    /// Saves settings on the backend and caches the stored copy.
    pub async fn update(&self, settings: &AppSettings) -> ClientResult<AppSettings> {
        let saved: AppSettings = self.api.put("settings", settings).await?;
        self.cache.send_replace(Some(saved.clone()));
        Ok(saved)
    }

    /// Returns the cached settings, if any fetch has succeeded yet.
    #[must_use]
    pub fn current(&self) -> Option<AppSettings> {
        self.cache.borrow().clone()
    }

    /// Subscribes to the cached settings (replay-of-one).
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Option<AppSettings>> {
        self.cache.subscribe()
    }
}
