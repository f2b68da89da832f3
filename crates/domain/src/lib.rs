//! Domain types and invariants for the Casaflow admin client.

#![forbid(unsafe_code)]

mod auth;
mod envelope;
mod pagination;
mod permissions;
mod query;
mod resources;
mod settings;
mod token;

pub use auth::{Credentials, SignInResponse, TokenSignInRequest};
pub use envelope::{Envelope, ResponseStatus};
pub use pagination::{DEFAULT_PAGE_SIZE, Page, PaginationState};
pub use permissions::{Capability, PermissionSet, decode_permission_claim, normalize_permission_payload};
pub use query::{ListQuery, NoFilter, SEARCH_MIN_LENGTH, SearchEvaluation, evaluate_search_input};
pub use resources::{
    Bank, Contact, ContactFilter, DocumentFilter, DocumentRecord, KeyFilter, KeyRecord,
    PropertyFilter, PropertyRecord,
};
pub use settings::AppSettings;
pub use token::{TokenClaims, decode_token_claims, token_expired};
