//! Session establishment, teardown, and the derived permission map.
//!
//! The single source of truth for identity and authorization state. Other
//! components query it through `is_authenticated`, `current_user`, the
//! capability predicates, or the `watch_*` subscriptions; mutation happens
//! only through the explicit sign-in/out/refresh operations here, never by
//! poking fields from outside.

use std::sync::Arc;

use casaflow_core::{ClientResult, UserProfile};
use casaflow_domain::PermissionSet;
use tokio::sync::watch;

use crate::api_client::ApiClient;
use crate::client_ports::{CapabilityCheck, ClientStorage, Transport};
use crate::settings_service::SettingsService;
use crate::token_store::TokenStore;

mod authenticate;

#[cfg(test)]
mod tests;

/// Result of a successful session establishment.
#[derive(Debug, Clone)]
pub struct SessionEstablished {
    /// The authenticated user.
    pub user: UserProfile,
    /// Grants decoded from the issued token.
    pub permissions: PermissionSet,
}

/// In-memory session state, published through replay-of-one channels so a
/// new subscriber immediately sees the latest value.
struct SessionState {
    authenticated: watch::Sender<bool>,
    user: watch::Sender<Option<UserProfile>>,
    permissions: watch::Sender<PermissionSet>,
}

/// Application service owning the authenticated session.
#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
    token_store: TokenStore,
    settings: SettingsService,
    state: Arc<SessionState>,
}

impl SessionService {
    /// Creates the session service over the transport and client storage.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn ClientStorage>) -> Self {
        let api = ApiClient::new(transport);
        Self {
            settings: SettingsService::new(api.clone()),
            token_store: TokenStore::new(storage),
            api,
            state: Arc::new(SessionState {
                authenticated: watch::channel(false).0,
                user: watch::channel(None).0,
                permissions: watch::channel(PermissionSet::empty()).0,
            }),
        }
    }

    /// Returns whether a session is established in this process.
    ///
    /// Never derived from the persisted token alone: a stored token may be
    /// stale or expired without this flag ever having been set.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        *self.state.authenticated.borrow()
    }

    /// Returns the authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.user.borrow().clone()
    }

    /// Returns a snapshot of the current grant set.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        self.state.permissions.borrow().clone()
    }

    /// Returns whether the module's screens may be viewed.
    #[must_use]
    pub fn can_view(&self, module: &str) -> bool {
        self.state.permissions.borrow().can_view(module)
    }

    /// Returns whether the module's records may be edited.
    #[must_use]
    pub fn can_edit(&self, module: &str) -> bool {
        self.state.permissions.borrow().can_edit(module)
    }

    /// Returns whether the module's records may be deleted.
    #[must_use]
    pub fn can_delete(&self, module: &str) -> bool {
        self.state.permissions.borrow().can_delete(module)
    }

    /// Subscribes to the authenticated flag.
    #[must_use]
    pub fn watch_authenticated(&self) -> watch::Receiver<bool> {
        self.state.authenticated.subscribe()
    }

    /// Subscribes to the published user.
    #[must_use]
    pub fn watch_user(&self) -> watch::Receiver<Option<UserProfile>> {
        self.state.user.subscribe()
    }

    /// Subscribes to the grant set.
    #[must_use]
    pub fn watch_permissions(&self) -> watch::Receiver<PermissionSet> {
        self.state.permissions.subscribe()
    }

    /// Returns the settings service sharing this session's transport.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.settings
    }

    /// Fetches the authenticated user's profile from the backend.
    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.api.get("user/me").await
    }

    /// Tears the session down: erases the persisted token, clears grants
    /// and the published user, and drops the flag. Idempotent.
    pub fn sign_out(&self) {
        self.token_store.clear();
        self.state.permissions.send_replace(PermissionSet::empty());
        self.state.user.send_replace(None);
        self.state.authenticated.send_replace(false);
    }
}

impl CapabilityCheck for SessionService {
    fn can_view(&self, module: &str) -> bool {
        Self::can_view(self, module)
    }

    fn can_edit(&self, module: &str) -> bool {
        Self::can_edit(self, module)
    }

    fn can_delete(&self, module: &str) -> bool {
        Self::can_delete(self, module)
    }
}
