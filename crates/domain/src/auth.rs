//! Wire payloads for the authentication endpoints.

use casaflow_core::{ClientError, ClientResult, UserProfile};
use serde::{Deserialize, Serialize};

/// Sign-in form payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Plaintext password, carried over TLS only.
    pub password: String,
}

impl Credentials {
    /// Validates the form before any network call is made.
    pub fn validate(&self) -> ClientResult<()> {
        if self.email.trim().is_empty() {
            return Err(ClientError::Validation("email is required".to_owned()));
        }
        if self.password.trim().is_empty() {
            return Err(ClientError::Validation("password is required".to_owned()));
        }
        Ok(())
    }
}

/// Payload returned by both sign-in endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Bearer token for subsequent requests. May differ from the token that
    /// was sent: the server rotates tokens on silent re-authentication.
    pub token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Body for the silent re-authentication endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSignInRequest {
    /// Previously issued bearer token.
    pub token: String,
}
