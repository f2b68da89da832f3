//! Client-side reads of the bearer token payload.
//!
//! The token is opaque to the client except for the claims read here.
//! Signature verification stays on the server; the client only needs the
//! expiry for the no-network session check and the embedded permission blob.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use casaflow_core::{ClientError, ClientResult};
use chrono::Utc;
use serde::Deserialize;

/// Claims the admin client reads out of the bearer token payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject claim -- the user identifier as issued.
    #[serde(default)]
    pub sub: Option<String>,
    /// JSON-encoded per-module permission grants.
    #[serde(default)]
    pub permissions: Option<String>,
    /// Expiry as unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Returns whether the token is past its expiry claim.
    ///
    /// A token without a readable expiry is treated as expired (fail-closed).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => exp <= Utc::now().timestamp(),
            None => true,
        }
    }
}

/// Decodes the payload segment of a bearer token.
pub fn decode_token_claims(token: &str) -> ClientResult<TokenClaims> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ClientError::Decode("token has no payload segment".to_owned()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|error| ClientError::Decode(format!("token payload is not base64url: {error}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|error| ClientError::Decode(format!("token payload is not valid JSON: {error}")))
}

/// Returns whether a raw token string is expired.
///
/// Undecodable tokens count as expired so a corrupted persisted token can
/// never keep a session looking alive.
#[must_use]
pub fn token_expired(token: &str) -> bool {
    decode_token_claims(token)
        .map(|claims| claims.is_expired())
        .unwrap_or(true)
}
