//! Ports onto the environment the admin client runs in.
//!
//! Everything behind these traits is an external collaborator: the HTTP
//! stack, durable device storage, and the design system's toast surface.

use async_trait::async_trait;
use casaflow_core::ClientResult;
use http::Method;
use serde_json::Value;

/// Transport port: executes one API call against the backend.
///
/// Implementations own envelope unwrapping and auth-header injection, so a
/// `Failed` envelope reaches callers as [`casaflow_core::ClientError::Api`]
/// and a successful one as its bare `data` payload.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs `method path` with an optional JSON body and yields the
    /// unwrapped payload.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Value>;
}

/// Durable, synchronously readable key-value storage on the client device.
pub trait ClientStorage: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key` if present.
    fn remove(&self, key: &str);
}

/// Fire-and-forget user notifications (toasts). No call returns a value the
/// core consumes.
pub trait NotificationSink: Send + Sync {
    /// Shows a success notification.
    fn success(&self, title: &str, message: &str);

    /// Shows an error notification.
    fn error(&self, title: &str, message: &str);

    /// Shows a warning notification.
    fn warning(&self, title: &str, message: &str);

    /// Shows an informational notification.
    fn info(&self, title: &str, message: &str);
}

/// Read side of the session's permission map.
///
/// All three checks are fail-closed: an unknown module grants nothing.
pub trait CapabilityCheck: Send + Sync {
    /// Returns whether the module's screens may be viewed.
    fn can_view(&self, module: &str) -> bool;

    /// Returns whether the module's records may be edited.
    fn can_edit(&self, module: &str) -> bool;

    /// Returns whether the module's records may be deleted.
    fn can_delete(&self, module: &str) -> bool;
}
