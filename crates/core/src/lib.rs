//! Shared primitives for all Rust crates in Casaflow.

#![forbid(unsafe_code)]

/// Authenticated-user primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use auth::{CompanyRef, UserId, UserProfile};

/// Result type used across Casaflow crates.
pub type ClientResult<T> = Result<T, ClientError>;

/// Domain error code the backend sends when the actor's company has been
/// locked out of the tenant. Detected by the sign-in path and mapped to
/// [`ClientError::AccessRestricted`] so callers can route it to the blocking
/// restricted-access flow instead of the generic error path.
pub const ACCESS_RESTRICTED_CODE: &str = "company_restricted";

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> ClientResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ClientError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common client error categories.
///
/// Transport failures are normalized into this shape exactly once at the
/// transport adapter boundary; everything above it branches on the variant
/// (or on [`ClientError::api_code`] for domain error codes) and never on
/// raw wire payloads.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Invalid input caught before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection-level failure: DNS, refused, timeout, non-envelope body.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a `Failed` envelope.
    #[error("api error: {message}")]
    Api {
        /// Domain error code, when the backend provided one.
        code: Option<String>,
        /// User-facing message from the envelope.
        message: String,
        /// Per-field validation errors, verbatim from the envelope.
        errors: Option<Value>,
        /// Extra payload the backend attached to the failure.
        data: Option<Value>,
    },

    /// A payload (token claim, envelope, response body) could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Operation requires an established session and none is active.
    #[error("no active session")]
    NotAuthenticated,

    /// The session is established but lacks the capability for the
    /// attempted operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Sign-in attempted while a session is already active.
    #[error("a session is already active")]
    AlreadyAuthenticated,

    /// The actor's company is restricted from the tenant. A distinguished
    /// signal, not a generic failure: the UI must show the blocking
    /// restricted-access flow instead of an error toast.
    #[error("access restricted: {0}")]
    AccessRestricted(String),
}

impl ClientError {
    /// Returns the backend domain code, if this is an API failure with one.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns whether this failure carries the restricted-company code.
    #[must_use]
    pub fn is_access_restricted(&self) -> bool {
        matches!(self, Self::AccessRestricted(_))
            || self.api_code() == Some(ACCESS_RESTRICTED_CODE)
    }
}
