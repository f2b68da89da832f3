use std::sync::Arc;

use crate::client_ports::ClientStorage;

/// Storage key holding the bearer token. Matches the key the legacy web
/// client used so existing sessions survive the migration.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// The persisted bearer token, the one piece of state shared by every
/// screen. Presence of a token here says nothing about session liveness;
/// only the in-memory session flag does.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn ClientStorage>,
}

impl TokenStore {
    /// Creates a token store over the client storage.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Returns the persisted token, if a non-empty one is stored.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Persists a token, replacing any previous one.
    pub fn set(&self, token: &str) {
        self.storage.set(ACCESS_TOKEN_KEY, token);
    }

    /// Erases the persisted token. A no-op when none is stored.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
    }
}
