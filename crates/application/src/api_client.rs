use std::sync::Arc;

use casaflow_core::{ClientError, ClientResult};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client_ports::Transport;

/// Typed convenience layer over the transport port.
///
/// Handles request/response (de)serialization only; envelope unwrapping and
/// bearer-header injection are the transport's job.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Wraps a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Performs a GET and decodes the payload.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        let value = self.transport.request(Method::GET, path, None).await?;
        decode(path, value)
    }

    /// Performs a POST with a JSON body and decodes the payload.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = encode(path, body)?;
        let value = self
            .transport
            .request(Method::POST, path, Some(body))
            .await?;
        decode(path, value)
    }

    /// Performs a PUT with a JSON body and decodes the payload.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = encode(path, body)?;
        let value = self.transport.request(Method::PUT, path, Some(body)).await?;
        decode(path, value)
    }

    /// Performs a DELETE, discarding any payload.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.transport.request(Method::DELETE, path, None).await?;
        Ok(())
    }
}

fn encode<B: Serialize + ?Sized>(path: &str, body: &B) -> ClientResult<Value> {
    serde_json::to_value(body).map_err(|error| {
        ClientError::Decode(format!("failed to encode request body for '{path}': {error}"))
    })
}

fn decode<R: DeserializeOwned>(path: &str, value: Value) -> ClientResult<R> {
    serde_json::from_value(value).map_err(|error| {
        ClientError::Decode(format!("unexpected response shape from '{path}': {error}"))
    })
}
