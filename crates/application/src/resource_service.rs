//! Typed REST clients for the admin resources.
//!
//! Every resource follows the same endpoint pattern, so one generic client
//! covers them all: `POST {resource}/list`, `POST {resource}/create`,
//! `GET/PUT/DELETE {resource}/{id}`.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use casaflow_core::ClientResult;
use casaflow_domain::{
    Bank, Contact, DocumentRecord, KeyRecord, ListQuery, Page, PropertyRecord,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api_client::ApiClient;
use crate::list_controller::ListBackend;

/// Permission module keys for the managed resources.
pub mod modules {
    /// Banks module.
    pub const BANKS: &str = "banks";
    /// Contacts module.
    pub const CONTACTS: &str = "contacts";
    /// Keys module.
    pub const KEYS: &str = "keys";
    /// Properties module.
    pub const PROPERTIES: &str = "properties";
    /// Documents module.
    pub const DOCUMENTS: &str = "documents";
}

/// REST client for one resource type.
pub struct ResourceClient<T> {
    api: ApiClient,
    resource: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            resource: self.resource.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> ResourceClient<T> {
    /// Creates a client for `resource`, the backend path segment
    /// (e.g. `Bank`).
    #[must_use]
    pub fn new(api: ApiClient, resource: impl Into<String>) -> Self {
        Self {
            api,
            resource: resource.into(),
            _marker: PhantomData,
        }
    }

    /// Loads one page of records.
    pub async fn list<F>(&self, query: &ListQuery<F>) -> ClientResult<Page<T>>
    where
        F: Serialize + Send + Sync,
    {
        self.api
            .post(&format!("{}/list", self.resource), query)
            .await
    }

    /// Fetches one record by id.
    pub async fn get(&self, id: Uuid) -> ClientResult<T> {
        self.api.get(&format!("{}/{id}", self.resource)).await
    }

    /// Creates a record and returns the stored copy.
    pub async fn create<B>(&self, body: &B) -> ClientResult<T>
    where
        B: Serialize + Send + Sync,
    {
        self.api
            .post(&format!("{}/create", self.resource), body)
            .await
    }

    /// Updates a record and returns the stored copy.
    pub async fn update<B>(&self, id: Uuid, body: &B) -> ClientResult<T>
    where
        B: Serialize + Send + Sync,
    {
        self.api.put(&format!("{}/{id}", self.resource), body).await
    }

    /// Deletes a record by id.
    pub async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.api.delete(&format!("{}/{id}", self.resource)).await
    }
}

/// Bridges a resource client into the list controller's backend port.
pub struct ResourceListBackend<T, F> {
    client: ResourceClient<T>,
    _marker: PhantomData<fn() -> F>,
}

impl<T, F> ResourceListBackend<T, F> {
    /// Wraps a resource client.
    #[must_use]
    pub fn new(client: ResourceClient<T>) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// Wraps a resource client into a shareable backend handle.
    #[must_use]
    pub fn shared(client: ResourceClient<T>) -> Arc<Self> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl<T, F> ListBackend<T, F> for ResourceListBackend<T, F>
where
    T: DeserializeOwned + Send + Sync,
    F: Serialize + Send + Sync,
{
    async fn load(&self, query: ListQuery<F>) -> ClientResult<Page<T>> {
        self.client.list(&query).await
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.client.delete(id).await
    }
}

/// Client for the banks resource.
#[must_use]
pub fn banks(api: &ApiClient) -> ResourceClient<Bank> {
    ResourceClient::new(api.clone(), "Bank")
}

/// Client for the contacts resource.
#[must_use]
pub fn contacts(api: &ApiClient) -> ResourceClient<Contact> {
    ResourceClient::new(api.clone(), "Contact")
}

/// Client for the keys resource.
#[must_use]
pub fn keys(api: &ApiClient) -> ResourceClient<KeyRecord> {
    ResourceClient::new(api.clone(), "Key")
}

/// Client for the properties resource.
#[must_use]
pub fn properties(api: &ApiClient) -> ResourceClient<PropertyRecord> {
    ResourceClient::new(api.clone(), "Property")
}

/// Client for the documents resource.
#[must_use]
pub fn documents(api: &ApiClient) -> ResourceClient<DocumentRecord> {
    ResourceClient::new(api.clone(), "Document")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use async_trait::async_trait;
    use casaflow_core::{ClientError, ClientResult};
    use casaflow_domain::{ListQuery, NoFilter};
    use http::Method;
    use serde_json::{Value, json};
    use uuid::Uuid;

    use crate::api_client::ApiClient;
    use crate::client_ports::Transport;

    use super::banks;

    #[derive(Default)]
    struct RecordingTransport {
        calls: Mutex<Vec<(Method, String, Option<Value>)>>,
        response: Mutex<Option<Value>>,
    }

    impl RecordingTransport {
        fn respond(&self, value: Value) {
            *self
                .response
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(value);
        }

        fn calls(&self) -> Vec<(Method, String, Option<Value>)> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<Value>,
        ) -> ClientResult<Value> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((method, path.to_owned(), body));

            self.response
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .ok_or_else(|| ClientError::Network("no stub".to_owned()))
        }
    }

    #[tokio::test]
    async fn list_posts_the_query_to_the_list_endpoint() {
        let transport = Arc::new(RecordingTransport::default());
        transport.respond(json!({
            "result": [],
            "currentPage": 1,
            "totalPages": 1,
            "totalItems": 0,
        }));

        let client = banks(&ApiClient::new(transport.clone()));
        let query = ListQuery {
            current_page: 1,
            page_size: 10,
            search_query: Some("national".to_owned()),
            filters: NoFilter {},
        };

        let page = client.list(&query).await;
        assert!(page.is_ok());

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Method::POST);
        assert_eq!(calls[0].1, "Bank/list");
        assert_eq!(
            calls[0].2,
            Some(json!({"currentPage": 1, "pageSize": 10, "searchQuery": "national"}))
        );
    }

    #[tokio::test]
    async fn delete_targets_the_record_path() {
        let transport = Arc::new(RecordingTransport::default());
        transport.respond(Value::Null);

        let client = banks(&ApiClient::new(transport.clone()));
        let id = Uuid::new_v4();
        assert!(client.delete(id).await.is_ok());

        let calls = transport.calls();
        assert_eq!(calls[0].0, Method::DELETE);
        assert_eq!(calls[0].1, format!("Bank/{id}"));
        assert_eq!(calls[0].2, None);
    }
}
