//! Infrastructure adapters for the client's ports.

#![forbid(unsafe_code)]

mod bootstrap;
mod client_config;
mod file_client_storage;
mod http_transport;
mod in_memory_client_storage;
mod tracing_notification_sink;

pub use bootstrap::{ClientServices, bootstrap};
pub use client_config::ClientConfig;
pub use file_client_storage::FileClientStorage;
pub use http_transport::HttpTransport;
pub use in_memory_client_storage::InMemoryClientStorage;
pub use tracing_notification_sink::TracingNotificationSink;
