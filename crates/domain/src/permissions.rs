//! Per-module capability grants and their casing normalization.
//!
//! The permission blob embedded in the token has drifted between PascalCase
//! and camelCase over backend versions, for both module keys and capability
//! fields. Everything is normalized to canonical lowercase on decode so the
//! rest of the client only ever sees one shape.

use std::collections::BTreeMap;

use casaflow_core::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability record for one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Whether the module's screens may be opened at all.
    pub view: bool,
    /// Whether records may be created or updated.
    pub edit: bool,
    /// Whether records may be deleted.
    pub delete: bool,
}

/// Per-module capability grants for the current session.
///
/// Exists only in memory, rebuilt from the token claim on every session
/// establishment. Lookups are fail-closed: an absent module grants nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeMap<String, Capability>);

impl PermissionSet {
    /// Returns an empty grant set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a grant set from canonical entries. Keys are lowercased.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Capability)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(module, capability)| (module.to_lowercase(), capability))
                .collect(),
        )
    }

    /// Returns the capability record for a module, if one was granted.
    #[must_use]
    pub fn get(&self, module: &str) -> Option<Capability> {
        self.0.get(&module.to_lowercase()).copied()
    }

    /// Returns whether the module's screens may be viewed.
    #[must_use]
    pub fn can_view(&self, module: &str) -> bool {
        self.get(module).map(|c| c.view).unwrap_or(false)
    }

    /// Returns whether the module's records may be edited.
    #[must_use]
    pub fn can_edit(&self, module: &str) -> bool {
        self.get(module).map(|c| c.edit).unwrap_or(false)
    }

    /// Returns whether the module's records may be deleted.
    #[must_use]
    pub fn can_delete(&self, module: &str) -> bool {
        self.get(module).map(|c| c.delete).unwrap_or(false)
    }

    /// Returns whether no module has any grant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the canonical module keys with grants.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Normalizes a raw permission payload into canonical lowercase form.
///
/// Accepts `View`/`Edit`/`Delete` or `view`/`edit`/`delete` per module, with
/// the PascalCase spelling winning when both are present. Module keys are
/// lowercased. Entries that are not objects are skipped.
#[must_use]
pub fn normalize_permission_payload(raw: &Value) -> PermissionSet {
    let Some(modules) = raw.as_object() else {
        return PermissionSet::empty();
    };

    let mut entries = BTreeMap::new();
    for (module, grants) in modules {
        if !grants.is_object() {
            continue;
        }
        entries.insert(
            module.to_lowercase(),
            Capability {
                view: flag(grants, "View", "view"),
                edit: flag(grants, "Edit", "edit"),
                delete: flag(grants, "Delete", "delete"),
            },
        );
    }

    PermissionSet(entries)
}

fn flag(grants: &Value, pascal: &str, camel: &str) -> bool {
    grants
        .get(pascal)
        .and_then(Value::as_bool)
        .or_else(|| grants.get(camel).and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Parses the JSON-encoded permission claim and normalizes it.
///
/// A claim whose top level is not an object is a decode failure; callers
/// treat that as "no permissions" rather than failing session establishment.
pub fn decode_permission_claim(claim: &str) -> ClientResult<PermissionSet> {
    let raw: Value = serde_json::from_str(claim)
        .map_err(|error| ClientError::Decode(format!("permission claim is not JSON: {error}")))?;

    if !raw.is_object() {
        return Err(ClientError::Decode(
            "permission claim is not a JSON object".to_owned(),
        ));
    }

    Ok(normalize_permission_payload(&raw))
}
