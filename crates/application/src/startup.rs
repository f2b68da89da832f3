//! One-time bootstrap steps that run before any session logic.

use crate::client_ports::ClientStorage;

/// Storage key under which a previous client release persisted the decoded
/// permission map. Grants must only ever derive from the current token, so
/// a stale or tampered copy here must never be trusted.
pub const LEGACY_PERMISSIONS_KEY: &str = "permissions";

/// Deletes the legacy persisted permission blob, if present.
///
/// Runs once at application startup, independent of sign-in/sign-out.
pub fn purge_legacy_permission_cache(storage: &dyn ClientStorage) {
    if storage.get(LEGACY_PERMISSIONS_KEY).is_some() {
        storage.remove(LEGACY_PERMISSIONS_KEY);
        tracing::info!("removed legacy persisted permission cache");
    }
}
