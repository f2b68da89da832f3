use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use casaflow_core::{ACCESS_RESTRICTED_CODE, ClientError, ClientResult};
use casaflow_domain::Credentials;
use chrono::Utc;
use http::Method;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::client_ports::{ClientStorage, Transport};
use crate::token_store::ACCESS_TOKEN_KEY;

use super::SessionService;

#[derive(Default)]
struct FakeTransport {
    responses: Mutex<HashMap<String, ClientResult<Value>>>,
    calls: Mutex<Vec<(Method, String, Option<Value>)>>,
}

impl FakeTransport {
    fn respond(&self, method: Method, path: &str, result: ClientResult<Value>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(format!("{method} {path}"), result);
    }

    fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, called, _)| called == path)
            .count()
    }

    fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Value> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((method.clone(), path.to_owned(), body));

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&format!("{method} {path}"))
            .cloned()
            .unwrap_or_else(|| Err(ClientError::Network(format!("no stub for '{path}'"))))
    }
}

#[derive(Default)]
struct FakeStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl ClientStorage for FakeStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

fn token_with(permissions: &Value, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "sub": "user-1",
            "permissions": permissions.to_string(),
            "exp": exp,
        })
        .to_string(),
    );
    format!("{header}.{payload}.sig")
}

fn fresh_token(permissions: &Value) -> String {
    token_with(permissions, Utc::now().timestamp() + 3600)
}

fn sign_in_payload(token: &str) -> Value {
    json!({
        "token": token,
        "user": {
            "id": Uuid::new_v4().to_string(),
            "name": "Avery Admin",
            "email": "avery@example.com",
            "role": "admin",
            "company": {"id": Uuid::new_v4().to_string(), "name": "Casaflow Realty"},
        },
    })
}

fn credentials() -> Credentials {
    Credentials {
        email: "avery@example.com".to_owned(),
        password: "a-long-passphrase".to_owned(),
    }
}

fn service() -> (SessionService, Arc<FakeTransport>, Arc<FakeStorage>) {
    let transport = Arc::new(FakeTransport::default());
    let storage = Arc::new(FakeStorage::default());
    let service = SessionService::new(transport.clone(), storage.clone());
    (service, transport, storage)
}

#[tokio::test]
async fn sign_in_persists_token_and_publishes_user_and_permissions() {
    let (service, transport, storage) = service();
    let token = fresh_token(&json!({"Banks": {"View": true, "Edit": false, "Delete": false}}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));

    let established = service.sign_in(credentials()).await;
    assert!(established.is_ok());

    assert!(service.is_authenticated());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some(token));
    let user = service.current_user();
    assert_eq!(user.map(|user| user.name().to_owned()), Some("Avery Admin".to_owned()));
    assert!(service.can_view("banks"));
    assert!(!service.can_edit("banks"));
    assert!(!service.can_delete("banks"));
}

#[tokio::test]
async fn sign_in_rejects_when_a_session_is_already_active() {
    let (service, transport, _storage) = service();
    let token = fresh_token(&json!({}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));

    assert!(service.sign_in(credentials()).await.is_ok());

    let second = service.sign_in(credentials()).await;
    assert!(matches!(second, Err(ClientError::AlreadyAuthenticated)));
}

#[tokio::test]
async fn sign_in_maps_the_restricted_company_code_to_its_own_signal() {
    let (service, transport, storage) = service();
    transport.respond(
        Method::POST,
        "user/sign-in",
        Err(ClientError::Api {
            code: Some(ACCESS_RESTRICTED_CODE.to_owned()),
            message: "your company has been restricted".to_owned(),
            errors: None,
            data: None,
        }),
    );

    let outcome = service.sign_in(credentials()).await;
    assert!(matches!(outcome, Err(ClientError::AccessRestricted(_))));
    assert!(!service.is_authenticated());
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
}

#[tokio::test]
async fn sign_in_validates_credentials_before_any_network_call() {
    let (service, transport, _storage) = service();

    let outcome = service
        .sign_in(Credentials {
            email: "  ".to_owned(),
            password: "secret".to_owned(),
        })
        .await;

    assert!(matches!(outcome, Err(ClientError::Validation(_))));
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn malformed_permission_claim_yields_empty_grants_but_signs_in() {
    let (service, transport, _storage) = service();
    let token = token_with(&json!("not an object"), Utc::now().timestamp() + 3600);
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));

    let established = service.sign_in(credentials()).await;
    assert!(established.is_ok());
    assert!(service.is_authenticated());
    assert!(service.permissions().is_empty());
    assert!(!service.can_view("banks"));
}

#[tokio::test]
async fn sign_in_with_token_resolves_false_without_a_persisted_token() {
    let (service, transport, _storage) = service();

    assert!(!service.sign_in_with_token().await);
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn sign_in_with_token_resolves_false_on_backend_rejection() {
    let (service, transport, storage) = service();
    storage.set(ACCESS_TOKEN_KEY, &fresh_token(&json!({})));
    transport.respond(
        Method::POST,
        "user/sign-in-with-token",
        Err(ClientError::Api {
            code: Some("invalid_token".to_owned()),
            message: "token rejected".to_owned(),
            errors: None,
            data: None,
        }),
    );

    assert!(!service.sign_in_with_token().await);
    assert!(!service.is_authenticated());
}

#[tokio::test]
async fn sign_in_with_token_adopts_a_rotated_token() {
    let (service, transport, storage) = service();
    storage.set(ACCESS_TOKEN_KEY, &fresh_token(&json!({})));

    let rotated = fresh_token(&json!({"keys": {"view": true}}));
    transport.respond(
        Method::POST,
        "user/sign-in-with-token",
        Ok(sign_in_payload(&rotated)),
    );

    assert!(service.sign_in_with_token().await);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some(rotated));
    assert!(service.can_view("keys"));
}

#[tokio::test]
async fn check_session_rejects_an_expired_token_without_a_network_call() {
    let (service, transport, storage) = service();
    storage.set(
        ACCESS_TOKEN_KEY,
        &token_with(&json!({}), Utc::now().timestamp() - 60),
    );

    assert!(!service.check_session().await);
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn check_session_short_circuits_when_already_authenticated() {
    let (service, transport, _storage) = service();
    let token = fresh_token(&json!({}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));
    assert!(service.sign_in(credentials()).await.is_ok());

    assert!(service.check_session().await);
    assert_eq!(transport.calls_to("user/sign-in-with-token"), 0);
}

#[tokio::test]
async fn check_session_resolves_false_without_any_token() {
    let (service, _transport, _storage) = service();
    assert!(!service.check_session().await);
}

#[tokio::test]
async fn sign_out_is_idempotent() {
    let (service, transport, storage) = service();
    let token = fresh_token(&json!({"banks": {"view": true}}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));
    assert!(service.sign_in(credentials()).await.is_ok());

    service.sign_out();
    service.sign_out();

    assert!(!service.is_authenticated());
    assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
    assert!(service.current_user().is_none());
    assert!(service.permissions().is_empty());
}

#[tokio::test]
async fn refresh_permissions_replaces_the_grant_set_wholesale() {
    let (service, transport, _storage) = service();
    let initial = fresh_token(&json!({"banks": {"view": true}}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&initial)));
    assert!(service.sign_in(credentials()).await.is_ok());
    assert!(!service.can_edit("banks"));

    let upgraded = fresh_token(&json!({"banks": {"view": true, "edit": true}}));
    transport.respond(
        Method::POST,
        "user/sign-in-with-token",
        Ok(sign_in_payload(&upgraded)),
    );

    let refreshed = service.refresh_permissions().await;
    assert!(refreshed.is_ok());
    assert!(service.can_edit("banks"));
}

#[tokio::test]
async fn refresh_permissions_requires_a_persisted_token() {
    let (service, _transport, _storage) = service();
    let outcome = service.refresh_permissions().await;
    assert!(matches!(outcome, Err(ClientError::NotAuthenticated)));
}

#[tokio::test]
async fn capability_predicates_are_idempotent_between_mutations() {
    let (service, transport, _storage) = service();
    let token = fresh_token(&json!({"contacts": {"view": true, "delete": true}}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));
    assert!(service.sign_in(credentials()).await.is_ok());

    assert_eq!(service.can_view("contacts"), service.can_view("contacts"));
    assert_eq!(service.can_edit("contacts"), service.can_edit("contacts"));
    assert_eq!(service.can_delete("contacts"), service.can_delete("contacts"));
}

#[tokio::test]
async fn watch_subscriptions_replay_the_latest_value() {
    let (service, transport, _storage) = service();
    let token = fresh_token(&json!({}));
    transport.respond(Method::POST, "user/sign-in", Ok(sign_in_payload(&token)));
    assert!(service.sign_in(credentials()).await.is_ok());

    // Subscribing after the fact still observes the current state.
    assert!(*service.watch_authenticated().borrow());
    assert!(service.watch_user().borrow().is_some());
}

#[tokio::test]
async fn settings_fetch_caches_the_payload() {
    let (service, transport, _storage) = service();
    transport.respond(
        Method::GET,
        "settings",
        Ok(json!({"companyName": "Casaflow Realty", "currency": "EUR"})),
    );

    let settings = service.settings().fetch().await;
    assert!(settings.is_ok());
    let cached = service.settings().current();
    assert_eq!(
        cached.and_then(|settings| settings.company_name),
        Some("Casaflow Realty".to_owned())
    );
}

#[tokio::test]
async fn settings_update_replaces_the_cache() {
    let (service, transport, _storage) = service();
    transport.respond(
        Method::PUT,
        "settings",
        Ok(json!({"companyName": "Casaflow Realty", "currency": "USD"})),
    );

    let saved = service
        .settings()
        .update(&casaflow_domain::AppSettings {
            company_name: Some("Casaflow Realty".to_owned()),
            currency: Some("USD".to_owned()),
            ..Default::default()
        })
        .await;

    assert!(saved.is_ok());
    assert_eq!(
        service
            .settings()
            .current()
            .and_then(|settings| settings.currency),
        Some("USD".to_owned())
    );
}

#[tokio::test]
async fn me_fetches_the_profile() {
    let (service, transport, _storage) = service();
    transport.respond(
        Method::GET,
        "user/me",
        Ok(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "Avery Admin",
            "email": "avery@example.com",
            "role": "admin",
            "company": null,
        })),
    );

    let profile = service.me().await;
    assert_eq!(
        profile.ok().map(|profile| profile.name().to_owned()),
        Some("Avery Admin".to_owned())
    );
}
