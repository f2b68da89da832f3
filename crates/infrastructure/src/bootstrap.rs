//! Wires the default adapters into ready-to-use services.

use std::sync::Arc;

use casaflow_application::{
    ApiClient, RoutePreferenceStore, SessionService, TokenStore, purge_legacy_permission_cache,
};
use casaflow_core::ClientResult;

use crate::client_config::ClientConfig;
use crate::file_client_storage::FileClientStorage;
use crate::http_transport::HttpTransport;

/// Fully wired client core: the session plus the shared pieces screens
/// build their controllers from.
pub struct ClientServices {
    /// Session and permission state.
    pub session: SessionService,
    /// Typed API client sharing the session's transport.
    pub api: ApiClient,
    /// Per-route screen preferences.
    pub preferences: RoutePreferenceStore,
    /// Durable client storage the adapters share.
    pub storage: Arc<FileClientStorage>,
}

/// Opens durable storage, purges the legacy permission blob, and wires the
/// reqwest transport into the session service.
pub fn bootstrap(config: &ClientConfig) -> ClientResult<ClientServices> {
    let storage = Arc::new(FileClientStorage::open(&config.storage_path)?);
    purge_legacy_permission_cache(storage.as_ref());

    let token_store = TokenStore::new(storage.clone());
    let transport = Arc::new(HttpTransport::new(config, token_store)?);
    let session = SessionService::new(transport.clone(), storage.clone());
    let api = ApiClient::new(transport);
    let preferences = RoutePreferenceStore::new(storage.clone());

    Ok(ClientServices {
        session,
        api,
        preferences,
        storage,
    })
}
