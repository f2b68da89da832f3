//! Records and filter shapes for the resources the admin panel manages.
//!
//! Wire casing is camelCase throughout; optional filter fields are omitted
//! from the request body when unset so the backend applies no constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bank account usable for lease and transaction payouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    /// Unique bank identifier.
    pub id: Uuid,
    /// Bank display name.
    pub name: String,
    /// Branch label, if recorded.
    pub branch: Option<String>,
    /// Account number, if recorded.
    pub account_number: Option<String>,
    /// IBAN, if recorded.
    pub iban: Option<String>,
}

/// Person or organization in the contact book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique contact identifier.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Email address, if recorded.
    pub email: Option<String>,
    /// Phone number, if recorded.
    pub phone: Option<String>,
    /// Contact type label (owner, tenant, vendor, ...).
    pub contact_type: Option<String>,
}

/// Filter fields for contact lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    /// Restrict to one contact type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
}

/// Physical key tracked for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    /// Unique key identifier.
    pub id: Uuid,
    /// Tag label on the key.
    pub label: String,
    /// Key category (entrance, mailbox, garage, ...).
    pub category: Option<String>,
    /// Property the key belongs to, if assigned.
    pub property_id: Option<Uuid>,
    /// Current holder, if checked out.
    pub holder: Option<String>,
}

/// Filter fields for key lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFilter {
    /// Restrict to one key category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Managed property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Unique property identifier.
    pub id: Uuid,
    /// Property display name.
    pub name: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Owning contact, if linked.
    pub owner_id: Option<Uuid>,
    /// Lifecycle status label (vacant, leased, maintenance, ...).
    pub status: Option<String>,
}

/// Filter fields for property lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Restrict to properties of one owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
}

/// Stored document (contract, invoice, certificate, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Unique document identifier.
    pub id: Uuid,
    /// Document title.
    pub title: String,
    /// Document category label.
    pub category: Option<String>,
    /// Stored file name.
    pub file_name: Option<String>,
    /// Upload timestamp.
    pub created_at: Option<DateTime<Utc>>,
}

/// Filter fields for document lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFilter {
    /// Restrict to one document category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
