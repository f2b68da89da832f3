use casaflow_application::NotificationSink;

/// Notification sink that routes toasts into the tracing log stream.
///
/// For headless embeddings and tests, where no design-system toast surface
/// exists to hand notifications to.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn success(&self, title: &str, message: &str) {
        tracing::info!(title, message, kind = "success", "notification");
    }

    fn error(&self, title: &str, message: &str) {
        tracing::error!(title, message, kind = "error", "notification");
    }

    fn warning(&self, title: &str, message: &str) {
        tracing::warn!(title, message, kind = "warning", "notification");
    }

    fn info(&self, title: &str, message: &str) {
        tracing::info!(title, message, kind = "info", "notification");
    }
}
