use async_trait::async_trait;
use casaflow_application::{TokenStore, Transport};
use casaflow_core::{ClientError, ClientResult};
use casaflow_domain::Envelope;
use http::Method;
use serde_json::Value;
use url::Url;

use crate::client_config::ClientConfig;

/// reqwest-backed transport over the backend REST API.
///
/// Owns bearer-header injection and envelope unwrapping, so every failure
/// reaches callers already normalized into [`ClientError`].
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: Url,
    token_store: TokenStore,
}

impl HttpTransport {
    /// Creates a transport from configuration.
    pub fn new(config: &ClientConfig, token_store: TokenStore) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|error| ClientError::Validation(format!("invalid API base URL: {error}")))?;

        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|error| {
                ClientError::Validation(format!("failed to build HTTP client: {error}"))
            })?;

        Ok(Self {
            http_client,
            base_url,
            token_store,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        let url = self.base_url.join(path).map_err(|error| {
            ClientError::Validation(format!("invalid request path '{path}': {error}"))
        })?;

        let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
            .map_err(|error| ClientError::Validation(format!("invalid HTTP method: {error}")))?;

        let mut builder = self.http_client.request(method, url);
        if let Some(token) = self.token_store.get() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| ClientError::Network(error.to_string()))?;

        let status = response.status();
        tracing::debug!(path, %status, "api response received");

        // The backend wraps failures in the envelope even on non-2xx
        // statuses; a body that is not JSON at all is a transport problem.
        let payload: Value = response.json().await.map_err(|error| {
            ClientError::Network(format!("HTTP {status}: response body is not JSON: {error}"))
        })?;

        Envelope::decode(payload)
    }
}
