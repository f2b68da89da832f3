//! Ports and application services for the Casaflow admin client.

#![forbid(unsafe_code)]

mod api_client;
mod client_ports;
mod list_controller;
mod preferences;
mod resource_service;
mod session_service;
mod settings_service;
mod startup;
mod token_store;

pub use api_client::ApiClient;
pub use client_ports::{CapabilityCheck, ClientStorage, NotificationSink, Transport};
pub use list_controller::{
    ListBackend, ListController, ListControllerParams, ListPhase, SEARCH_DEBOUNCE,
};
pub use preferences::{RoutePreferenceStore, ViewType};
pub use resource_service::{
    ResourceClient, ResourceListBackend, banks, contacts, documents, keys, modules, properties,
};
pub use session_service::{SessionEstablished, SessionService};
pub use settings_service::SettingsService;
pub use startup::{LEGACY_PERMISSIONS_KEY, purge_legacy_permission_cache};
pub use token_store::{ACCESS_TOKEN_KEY, TokenStore};
